//! Skill reclassification — moves software out of the competency list.
//!
//! Providers regularly list "Excel" or "Python" as a competency even when told
//! not to. Any competency whose name contains a software keyword is moved to
//! the tool list (once, case-insensitively) and dropped from competencies.

use crate::report::catalog::ToolCatalog;
use crate::report::models::{CandidateReportRecord, ToolMention};

/// Level used when a moved competency carries none.
pub const MENTIONED_LEVEL: &str = "Se menciona";

/// Reclassifies in place and returns the record. Idempotent.
pub fn reclassify_skills(
    mut record: CandidateReportRecord,
    catalog: &ToolCatalog,
) -> CandidateReportRecord {
    let competencies = std::mem::take(&mut record.competencias_tecnicas);

    for entry in competencies {
        if !catalog.is_software(&entry.competencia) {
            record.competencias_tecnicas.push(entry);
            continue;
        }

        if !record.has_tool(&entry.competencia) {
            let nivel = if entry.nivel.trim().is_empty() {
                MENTIONED_LEVEL.to_string()
            } else {
                entry.nivel
            };
            record.herramientas.push(ToolMention {
                herramienta: entry.competencia,
                nivel,
                uso: String::new(),
            });
        }
    }

    record
}
