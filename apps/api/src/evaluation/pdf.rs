//! PDF text extraction for uploaded resumes.

use tracing::debug;

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Extracts the text of every page of an in-memory PDF.
///
/// Runs on the blocking pool; `pdf-extract` is CPU-bound and synchronous.
pub async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String, AppError> {
    ensure_pdf(&bytes)?;

    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?;

    debug!("Extracted {} characters of PDF text", text.len());

    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "The PDF contains no extractable text".to_string(),
        ));
    }
    Ok(text)
}

fn ensure_pdf(bytes: &[u8]) -> Result<(), AppError> {
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(AppError::Validation(
            "Uploaded file is not a PDF".to_string(),
        ));
    }
    Ok(())
}
