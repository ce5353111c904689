//! Evaluation pipeline: render the grading prompt, call the model, extract the record.

use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::ModelInvoker;
use crate::scoring::prompts::{render_evaluation_prompt, EVALUATION_SYSTEM};
use crate::scoring::record::{build_record, RubricRecord};
use crate::scoring::rubric::Rubric;

/// Result of grading one resume.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// The full decoded model response, kept for display and auditing.
    pub model_response: Value,
    /// `None` when the response envelope had no usable content.
    pub record: Option<RubricRecord>,
}

/// Grades `resume_text` against `rubric` using the given model backend.
///
/// A malformed response is not an error here: it yields `record: None` so the caller can
/// report it and skip persistence.
pub async fn evaluate_resume(
    resume_text: &str,
    rubric: &Rubric,
    model: &dyn ModelInvoker,
) -> Result<Evaluation, AppError> {
    let prompt = render_evaluation_prompt(rubric, resume_text);
    let model_response = model
        .invoke(&prompt, EVALUATION_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Resume grading failed: {e}")))?;

    let record = match build_record(&model_response) {
        Ok(record) => {
            let missing = record.missing_fields();
            if missing.is_empty() {
                info!("Extracted complete rubric record");
            } else {
                info!("Extracted rubric record with missing fields: {:?}", missing);
            }
            Some(record)
        }
        Err(e) => {
            warn!("Could not extract rubric record: {e}; model response: {model_response}");
            None
        }
    };

    Ok(Evaluation {
        model_response,
        record,
    })
}
