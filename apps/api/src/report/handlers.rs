//! Axum route handlers for the Report API.

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::render::{is_safe_name, RenderError};
use crate::report::models::ToolMention;
use crate::report::pipeline::{ReportOutcome, ReportRequest};
use crate::report::tool_extractor::{extract_tools_with_percent, DEFAULT_MAX_TOOLS};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractToolsRequest {
    pub text: String,
    #[serde(default)]
    pub max: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ExtractToolsResponse {
    pub tools: Vec<ToolMention>,
}

/// Uploaded résumé, kept in memory until it is spooled to disk.
struct CvUpload {
    file_name: String,
    data: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/reports
///
/// Multipart form: `notes` (text), optional `cv` (file), optional `basename`.
/// At least one of notes or cv must carry content.
pub async fn handle_generate_report(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ReportOutcome>, AppError> {
    let mut notes = String::new();
    let mut basename: Option<String> = None;
    let mut cv: Option<CvUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "notes" => notes = read_text(field).await?,
            "basename" => {
                let value = read_text(field).await?;
                let value = value.trim();
                if !value.is_empty() {
                    basename = Some(value.to_string());
                }
            }
            "cv" => {
                let file_name = field.file_name().unwrap_or("cv").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read cv: {e}")))?;
                debug!("Received CV '{file_name}' ({} bytes)", data.len());
                if !data.is_empty() {
                    cv = Some(CvUpload { file_name, data });
                }
            }
            other => debug!("Ignoring multipart field '{other}'"),
        }
    }

    if notes.trim().is_empty() && cv.is_none() {
        return Err(AppError::Validation(
            "either notes or a cv file is required".to_string(),
        ));
    }

    let basename = match basename {
        Some(name) if is_safe_name(&name) => name,
        Some(name) => return Err(RenderError::InvalidName(name).into()),
        None => format!("ficha_{}", Uuid::new_v4().simple()),
    };

    // The temp file must outlive the pipeline run.
    let spooled = match &cv {
        Some(upload) => Some(spool_upload(upload).await?),
        None => None,
    };

    let outcome = state
        .pipeline
        .run(ReportRequest {
            notes,
            cv_path: spooled.as_ref().map(|f| f.path().to_path_buf()),
            basename,
        })
        .await?;

    Ok(Json(outcome))
}

/// POST /api/v1/reports/extract-tools
///
/// Runs only the local "tool – percentage" extraction. Useful for previewing
/// what will be merged into the provider's tool list.
pub async fn handle_extract_tools(
    State(state): State<AppState>,
    Json(request): Json<ExtractToolsRequest>,
) -> Result<Json<ExtractToolsResponse>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let tools = extract_tools_with_percent(
        &request.text,
        state.pipeline.catalog(),
        request.max.unwrap_or(DEFAULT_MAX_TOOLS),
    );

    Ok(Json(ExtractToolsResponse { tools }))
}

/// GET /api/v1/reports/:id
///
/// Returns the persisted Markdown document.
pub async fn handle_get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let content = state
        .reports
        .load(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("report '{id}' not found")))?;

    Ok(([(header::CONTENT_TYPE, "text/markdown; charset=utf-8")], content))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart field: {e}")))
}

/// Writes the upload to a temp file that keeps the original extension, which
/// drives the document reader's format dispatch.
async fn spool_upload(upload: &CvUpload) -> Result<NamedTempFile, AppError> {
    let suffix = std::path::Path::new(&upload.file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default();

    let file = tempfile::Builder::new()
        .prefix("cv_")
        .suffix(&suffix)
        .tempfile()
        .map_err(anyhow::Error::from)?;
    tokio::fs::write(file.path(), &upload.data)
        .await
        .map_err(anyhow::Error::from)?;

    Ok(file)
}
