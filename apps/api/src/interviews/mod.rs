//! Interview-bot client.
//!
//! Asks the external interview provider to create an AI-led interview for a
//! candidate and hands back the link. One attempt per call, bounded by
//! [`REQUEST_TIMEOUT`]. Every failure is classified so the caller can tell
//! a misconfiguration from a provider that never answered.

pub mod handlers;

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::InterviewConfig;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CREATE_PATH: &str = "/api/interviews/create";
const DEFAULT_CANDIDATE_NAME: &str = "Candidato";

#[derive(Debug, Error)]
pub enum InterviewError {
    #[error("interview provider is not configured")]
    NotConfigured,

    #[error("candidate must have an email")]
    MissingEmail,

    #[error("interview server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("no response from the interview server")]
    NoResponse,

    #[error("request malformed: {0}")]
    Malformed(String),

    #[error("interview server returned success: false")]
    ReportedFailure,

    #[error("interview server reported success without a link")]
    MissingLink,
}

impl From<reqwest::Error> for InterviewError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() || e.is_connect() {
            InterviewError::NoResponse
        } else {
            InterviewError::Malformed(e.to_string())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContact {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub nombre: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedInterview {
    pub link: String,
    pub interview_id: Option<String>,
}

/// Flattened result returned to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterviewOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<CreatedInterview, InterviewError>> for InterviewOutcome {
    fn from(result: Result<CreatedInterview, InterviewError>) -> Self {
        match result {
            Ok(created) => Self {
                success: true,
                link: Some(created.link),
                interview_id: created.interview_id,
                error: None,
            },
            Err(e) => Self {
                success: false,
                link: None,
                interview_id: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct CreatePayload<'a> {
    email: &'a str,
    candidate_name: &'a str,
    job_position_id: Option<&'a str>,
}

#[derive(Debug, Default, Deserialize)]
struct CreateResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<CreateData>,
}

#[derive(Debug, Default, Deserialize)]
struct CreateData {
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    interview_id: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone)]
pub struct InterviewClient {
    client: Client,
    config: InterviewConfig,
}

impl InterviewClient {
    pub fn new(config: InterviewConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            config,
        })
    }

    pub async fn create_interview(&self, candidate: &CandidateContact) -> InterviewOutcome {
        self.create(candidate).await.into()
    }

    pub async fn create(&self, candidate: &CandidateContact) -> Result<CreatedInterview, InterviewError> {
        let (Some(base_url), Some(api_key)) = (&self.config.api_url, &self.config.api_key) else {
            warn!("Interview provider URL or key not configured");
            return Err(InterviewError::NotConfigured);
        };

        let email = candidate.email.trim();
        if email.is_empty() {
            return Err(InterviewError::MissingEmail);
        }

        let candidate_name = candidate
            .nombre
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_CANDIDATE_NAME);

        let payload = CreatePayload {
            email,
            candidate_name,
            job_position_id: self.config.job_position_id.as_deref(),
        };

        info!("Creating interview for {email}");

        let response = self
            .client
            .post(format!("{}{CREATE_PATH}", base_url.trim_end_matches('/')))
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
            let message = parsed
                .error
                .or(parsed.message)
                .unwrap_or_else(|| "unknown error".to_string());
            warn!("Interview server returned {status}: {message}");
            return Err(InterviewError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: CreateResponse = serde_json::from_str(&body).unwrap_or_default();
        if !parsed.success {
            warn!("Interview server returned success: false");
            return Err(InterviewError::ReportedFailure);
        }

        let data = parsed.data.unwrap_or_default();
        let link = data
            .link
            .filter(|l| !l.trim().is_empty())
            .ok_or(InterviewError::MissingLink)?;

        let interview_id = data.interview_id.and_then(|id| match id {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        info!("Interview created for {email}");
        Ok(CreatedInterview { link, interview_id })
    }
}
