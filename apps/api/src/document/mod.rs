//! Document text reader — plain text out of whatever the recruiter uploaded.
//!
//! Dispatches on the file extension: `.pdf` goes through pdf-extract, `.docx`
//! through the WordprocessingML reader, anything else is read as (lossy)
//! UTF-8. Callers of [`DocumentTextReader::read`] never see an error: a
//! missing or unreadable file yields an empty string.

mod docx;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

#[async_trait]
pub trait DocumentTextReader: Send + Sync {
    /// Extracted text, or `""` when the file cannot be read.
    async fn read(&self, path: &Path) -> String;
}

/// Reads documents from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FileTextReader;

#[async_trait]
impl DocumentTextReader for FileTextReader {
    async fn read(&self, path: &Path) -> String {
        let owned = path.to_path_buf();
        // PDF/DOCX parsing is CPU-bound; a panicking parser ends up as a JoinError
        let result = tokio::task::spawn_blocking(move || read_document_text(&owned)).await;

        match result {
            Ok(Ok(text)) => {
                info!("Read {} characters from {}", text.chars().count(), path.display());
                text
            }
            Ok(Err(e)) => {
                warn!("Could not read {}: {e}", path.display());
                String::new()
            }
            Err(e) => {
                warn!("Text extraction for {} aborted: {e}", path.display());
                String::new()
            }
        }
    }
}

/// Synchronous extraction with the error kept, for callers that care why.
pub fn read_document_text(path: &Path) -> Result<String, DocumentError> {
    if !path.is_file() {
        return Err(DocumentError::NotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|v| v.to_str())
        .map(|v| v.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => pdf_extract::extract_text(path).map_err(|e| DocumentError::Pdf(e.to_string())),
        "docx" => {
            let data = std::fs::read(path)?;
            docx::extract_docx_text(&data)
        }
        _ => {
            let data = std::fs::read(path)?;
            Ok(String::from_utf8_lossy(&data).into_owned())
        }
    }
}
