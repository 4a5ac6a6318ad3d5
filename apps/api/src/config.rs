use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Directory assembled reports are written to.
    pub report_output_dir: PathBuf,
    pub provider_timeout: Duration,
    pub interview: InterviewConfig,
}

/// Interview-bot connection. Every field is optional; the client reports a
/// configuration failure per call when the URL or key is missing.
#[derive(Debug, Clone, Default)]
pub struct InterviewConfig {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub job_position_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let timeout_secs = std::env::var("PROVIDER_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u64>()
            .context("PROVIDER_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            report_output_dir: std::env::var("REPORT_OUTPUT_DIR")
                .unwrap_or_else(|_| "./reports".to_string())
                .into(),
            provider_timeout: Duration::from_secs(timeout_secs),
            interview: InterviewConfig {
                api_url: optional_env("INTERVIEW_API_URL"),
                api_key: optional_env("INTERVIEW_API_KEY"),
                job_position_id: optional_env("DEFAULT_JOB_POSITION_ID"),
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
