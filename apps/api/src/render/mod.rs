// Report assembly: lays a reclassified record out as a block-structured
// document and persists it. Binary formats (DOCX/PDF) are not produced here;
// the Markdown assembler is the persisted form.

pub mod layout;
pub mod markdown;

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::report::models::CandidateReportRecord;

pub use layout::build_document;
pub use markdown::MarkdownAssembler;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid report name: {0:?}")]
    InvalidName(String),
}

/// One layout element. Order in `ReportDocument::blocks` is render order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Title { text: String },
    Subtitle { text: String },
    Heading { text: String },
    Paragraph { text: String },
    Table { headers: Vec<String>, rows: Vec<Vec<String>> },
    Attribution { text: String },
    PageBreak,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportDocument {
    pub blocks: Vec<Block>,
}

impl ReportDocument {
    pub fn headings(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Per-run inputs the record itself does not carry.
#[derive(Debug, Clone)]
pub struct AssemblyContext {
    /// File stem for the persisted document. Must pass [`is_safe_name`].
    pub basename: String,
    /// Used when the record has no `fecha`.
    pub today: String,
    /// Raw recruiter notes, appended after the report body when non-empty.
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct AssembledReport {
    pub path: PathBuf,
    pub document: ReportDocument,
}

#[async_trait]
pub trait ReportAssembler: Send + Sync {
    async fn assemble(
        &self,
        record: &CandidateReportRecord,
        context: &AssemblyContext,
    ) -> Result<AssembledReport, RenderError>;
}

/// Report names end up as file stems: ASCII alphanumerics, `-` and `_` only.
pub fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 128
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
