//! Field extraction — the contract with the generative provider.
//!
//! Builds the prompt, makes exactly one provider call, recovers the JSON
//! payload from whatever text comes back and merges locally detected tools
//! into the provider's list. Nothing here returns an error: a failed call or
//! an unparseable answer degrades to the empty record so the report can
//! still be produced.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::TextGenerator;
use crate::report::models::{CandidateReportRecord, ToolMention};
use crate::report::prompts::{FIELD_EXTRACTION_CLOSING, FIELD_EXTRACTION_INSTRUCTIONS};

pub const MAX_NOTES_CHARS: usize = 15_000;
pub const MAX_CV_CONTEXT_CHARS: usize = 45_000;
pub const MAX_CV_PROMPT_CHARS: usize = 20_000;
pub const TRUNCATION_MARKER: &str = "\n...[TRUNCADO]...";

/// Why the extraction fell back to the empty record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ExtractionIssue {
    /// Transport failure, non-2xx status, timeout or empty content.
    ProviderUnavailable(String),
    /// The provider answered but no JSON object could be parsed.
    UnparseableResponse(String),
}

#[derive(Debug, Clone)]
pub struct FieldExtraction {
    pub record: CandidateReportRecord,
    pub issue: Option<ExtractionIssue>,
}

/// Inputs for one extraction call.
pub struct ExtractionInput<'a> {
    pub notes: &'a str,
    pub cv_text: &'a str,
    pub detected_tools: &'a [ToolMention],
    /// Pre-filled into the schema's `fecha` field.
    pub today: &'a str,
}

#[derive(Clone)]
pub struct FieldExtractionClient {
    generator: Arc<dyn TextGenerator>,
}

impl FieldExtractionClient {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Runs the provider call and returns the merged record.
    pub async fn extract(&self, input: ExtractionInput<'_>) -> FieldExtraction {
        let prompt = build_prompt(&input);

        let (mut record, issue) = match self.generator.generate(&prompt, JSON_ONLY_SYSTEM).await {
            Ok(raw) => match parse_provider_response(&raw) {
                Ok(record) => (record, None),
                Err(e) => {
                    warn!("Provider response is not valid report JSON: {e}");
                    (
                        CandidateReportRecord::default(),
                        Some(ExtractionIssue::UnparseableResponse(e.to_string())),
                    )
                }
            },
            Err(e) => {
                warn!("Field extraction provider call failed: {e}");
                (
                    CandidateReportRecord::default(),
                    Some(ExtractionIssue::ProviderUnavailable(e.to_string())),
                )
            }
        };

        let before = record.herramientas.len();
        merge_tools(&mut record.herramientas, input.detected_tools);
        info!(
            "Field extraction done: {} provider tools, {} appended from local detection",
            before,
            record.herramientas.len() - before
        );

        FieldExtraction { record, issue }
    }
}

/// Assembles the full provider prompt.
pub fn build_prompt(input: &ExtractionInput<'_>) -> String {
    let notes = truncate_chars(input.notes, MAX_NOTES_CHARS);
    let cv = bound_cv_context(input.cv_text);
    let cv = truncate_chars(&cv, MAX_CV_PROMPT_CHARS);
    let tools = serde_json::to_string_pretty(input.detected_tools).unwrap_or_else(|_| "[]".into());
    let instructions = FIELD_EXTRACTION_INSTRUCTIONS.replace("{today}", input.today);

    format!(
        "{instructions}\n\n\
         === TEXTO/NOTAS DEL RECLUTADOR ===\n{notes}\n\n\
         === CV DEL CANDIDATO ===\n{cv}\n\n\
         === HERRAMIENTAS DETECTADAS (priorizar estas) ===\n{tools}\n\n\
         {FIELD_EXTRACTION_CLOSING}\n"
    )
}

/// Caps the raw CV context, marking the cut when one happens.
fn bound_cv_context(cv_text: &str) -> String {
    if cv_text.chars().count() > MAX_CV_CONTEXT_CHARS {
        format!(
            "{}{TRUNCATION_MARKER}",
            truncate_chars(cv_text, MAX_CV_CONTEXT_CHARS)
        )
    } else {
        cv_text.to_string()
    }
}

/// First `max` characters of `s`, never splitting a UTF-8 sequence.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Strips markdown fences and slices from the first `{` to the last `}`.
pub fn recover_json_payload(raw: &str) -> String {
    let text = raw.replace("```json", "").replace("```", "");
    let text = text.trim();

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => text[start..=end].to_string(),
        _ => text.to_string(),
    }
}

/// Parses provider output into a record.
pub fn parse_provider_response(raw: &str) -> Result<CandidateReportRecord, serde_json::Error> {
    serde_json::from_str(&recover_json_payload(raw))
}

/// Appends every local tool whose name (case-insensitive) the provider did
/// not already report. Provider entries are never modified or removed.
pub fn merge_tools(provider: &mut Vec<ToolMention>, local: &[ToolMention]) {
    if local.is_empty() {
        return;
    }

    let mut seen: HashSet<String> = provider
        .iter()
        .map(|t| t.herramienta.trim().to_lowercase())
        .collect();

    for tool in local {
        if seen.insert(tool.herramienta.trim().to_lowercase()) {
            provider.push(tool.clone());
        }
    }
}
