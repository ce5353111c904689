//! Axum route handlers for the Evaluation API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::pdf::extract_pdf_text;
use crate::evaluation::store::{append_evaluation, list_evaluations, SheetTarget};
use crate::models::evaluation::EvaluationRow;
use crate::scoring::pipeline::evaluate_resume;
use crate::scoring::record::{build_record, RubricRecord};
use crate::scoring::rubric::Rubric;
use crate::state::AppState;

/// Multipart field carrying the resume PDF.
const UPLOAD_FIELD: &str = "file";
const DEFAULT_UPLOAD_NAME: &str = "resume.pdf";
const DEFAULT_TEXT_SOURCE: &str = "text-submission";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EvaluateTextRequest {
    pub resume_text: String,
    #[serde(default)]
    pub source_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub evaluation_id: Uuid,
    pub source_name: String,
    pub record: RubricRecord,
    /// The model's full response, as returned by the API.
    pub model_response: Value,
    pub sheet_key: String,
}

struct Upload {
    file_name: String,
    bytes: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/evaluations
///
/// Multipart upload of a resume PDF. Extracts its text, grades it, and appends the
/// record to the score sheet.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<EvaluationResponse>, AppError> {
    let upload = read_upload(&mut multipart).await?;
    let resume_text = extract_pdf_text(upload.bytes.to_vec()).await?;

    let response = run_evaluation(&state, &upload.file_name, &resume_text).await?;
    Ok(Json(response))
}

/// POST /api/v1/evaluations/text
///
/// Grades resume text that was extracted elsewhere.
pub async fn handle_evaluate_text(
    State(state): State<AppState>,
    Json(request): Json<EvaluateTextRequest>,
) -> Result<Json<EvaluationResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }
    let source_name = source_name_or_default(request.source_name.as_deref());

    let response = run_evaluation(&state, source_name, &request.resume_text).await?;
    Ok(Json(response))
}

/// POST /api/v1/evaluations/parse
///
/// Parses an already-obtained model response into a record. No model call, nothing stored.
pub async fn handle_parse_response(
    Json(response): Json<Value>,
) -> Result<Json<RubricRecord>, AppError> {
    Ok(Json(build_record(&response)?))
}

/// GET /api/v1/evaluations
pub async fn handle_list_evaluations(
    State(state): State<AppState>,
) -> Result<Json<Vec<EvaluationRow>>, AppError> {
    Ok(Json(list_evaluations(&state.db).await?))
}

/// GET /api/v1/rubric
pub async fn handle_get_rubric(State(state): State<AppState>) -> Json<Rubric> {
    Json(state.rubric.as_ref().clone())
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Grades one resume and persists the record. An unextractable model response is
/// reported as 422 with the response attached, and nothing is stored.
async fn run_evaluation(
    state: &AppState,
    source_name: &str,
    resume_text: &str,
) -> Result<EvaluationResponse, AppError> {
    let evaluation = evaluate_resume(resume_text, &state.rubric, state.model.as_ref()).await?;

    let Some(record) = evaluation.record else {
        return Err(AppError::UnextractableResponse(evaluation.model_response));
    };

    let sheet = SheetTarget {
        s3: &state.s3,
        bucket: &state.config.s3_bucket,
        key: &state.config.sheet_key,
    };
    let row = append_evaluation(&state.db, sheet, source_name, &record).await?;

    Ok(EvaluationResponse {
        evaluation_id: row.id,
        source_name: row.source_name,
        record,
        model_response: evaluation.model_response,
        sheet_key: state.config.sheet_key.clone(),
    })
}

async fn read_upload(multipart: &mut Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field
            .file_name()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_UPLOAD_NAME)
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
        return Ok(Upload { file_name, bytes });
    }
    Err(AppError::Validation(format!(
        "Missing multipart field '{UPLOAD_FIELD}'"
    )))
}

fn source_name_or_default(source_name: Option<&str>) -> &str {
    source_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_TEXT_SOURCE)
}
