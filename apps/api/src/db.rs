use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Append-only evaluation log. Column names mirror the persisted sheet columns.
const EVALUATIONS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS evaluations (
    id                 UUID PRIMARY KEY,
    source_name        TEXT NOT NULL,
    name               TEXT NOT NULL,
    email              TEXT NOT NULL,
    phone_number       TEXT NOT NULL,
    gpa                TEXT NOT NULL,
    school_activities  TEXT NOT NULL,
    awards             TEXT NOT NULL,
    volunteer_service  TEXT NOT NULL,
    leadership         TEXT NOT NULL,
    scores_explanation TEXT NOT NULL,
    created_at         TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the `evaluations` table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(EVALUATIONS_SCHEMA)
        .execute(pool)
        .await
        .context("Failed to create evaluations table")?;
    info!("Evaluations schema ready");
    Ok(())
}
