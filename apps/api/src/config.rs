use anyhow::{Context, Result};

const DEFAULT_SHEET_KEY: &str = "evaluations/scores.csv";
const DEFAULT_MAX_UPLOAD_MB: usize = 10;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub anthropic_api_key: String,
    /// Object key of the CSV score sheet inside `s3_bucket`.
    pub sheet_key: String,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let max_upload_mb = std::env::var("MAX_UPLOAD_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_MB.to_string())
            .parse::<usize>()
            .context("MAX_UPLOAD_MB must be a whole number of megabytes")?;

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            sheet_key: std::env::var("SHEET_KEY").unwrap_or_else(|_| DEFAULT_SHEET_KEY.to_string()),
            max_upload_bytes: upload_limit_bytes(max_upload_mb)?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn upload_limit_bytes(max_upload_mb: usize) -> Result<usize> {
    max_upload_mb
        .checked_mul(1024 * 1024)
        .with_context(|| format!("MAX_UPLOAD_MB={max_upload_mb} is too large"))
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_limit_in_bytes() {
        assert_eq!(upload_limit_bytes(DEFAULT_MAX_UPLOAD_MB).unwrap(), 10 * 1024 * 1024);
        assert_eq!(upload_limit_bytes(0).unwrap(), 0);
    }

    #[test]
    fn test_oversized_upload_limit_is_rejected() {
        let err = upload_limit_bytes(usize::MAX).unwrap_err();
        assert!(err.to_string().contains("MAX_UPLOAD_MB"));
    }
}
