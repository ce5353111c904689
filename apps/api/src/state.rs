use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::ModelInvoker;
use crate::scoring::rubric::Rubric;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    /// Grading model backend. Default: `LlmClient`.
    pub model: Arc<dyn ModelInvoker>,
    /// Read-only rubric, built once at startup.
    pub rubric: Arc<Rubric>,
    pub config: Config,
}
