//! Axum route handlers for the Interview API.

use axum::{extract::State, http::StatusCode, Json};

use crate::interviews::{CandidateContact, InterviewError, InterviewOutcome};
use crate::state::AppState;

/// POST /api/v1/interviews
///
/// Body: `{ "email": "...", "nombre": "..." }`. Always answers with an
/// [`InterviewOutcome`]; the status code reflects the failure class.
pub async fn handle_create_interview(
    State(state): State<AppState>,
    Json(candidate): Json<CandidateContact>,
) -> (StatusCode, Json<InterviewOutcome>) {
    let result = state.interviews.create(&candidate).await;
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => status_for(e),
    };
    (status, Json(result.into()))
}

fn status_for(error: &InterviewError) -> StatusCode {
    match error {
        InterviewError::MissingEmail => StatusCode::BAD_REQUEST,
        InterviewError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        InterviewError::NoResponse => StatusCode::GATEWAY_TIMEOUT,
        InterviewError::Rejected { .. }
        | InterviewError::Malformed(_)
        | InterviewError::ReportedFailure
        | InterviewError::MissingLink => StatusCode::BAD_GATEWAY,
    }
}
