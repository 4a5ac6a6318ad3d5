//! Soft validation of the extracted record.
//!
//! Never blocks report generation: every finding is an advisory warning that
//! travels back to the caller next to the report.

use serde::{Deserialize, Serialize};

use crate::report::field_extraction::ExtractionIssue;
use crate::report::models::{CandidateReportRecord, ToolMention};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadWarning {
    /// Dotted path of the field concerned, e.g. `ficha_tecnica.ubicacion`.
    pub field: String,
    pub message: String,
}

impl PayloadWarning {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Collects advisory warnings about a reclassified record.
///
/// `detected_tools` is the local extraction that was merged into the record;
/// a provider level that differs from a locally detected percentage is
/// reported, not corrected.
pub fn validate_record(
    record: &CandidateReportRecord,
    detected_tools: &[ToolMention],
    issue: Option<&ExtractionIssue>,
) -> Vec<PayloadWarning> {
    let mut warnings = Vec::new();

    match issue {
        Some(ExtractionIssue::ProviderUnavailable(detail)) => warnings.push(PayloadWarning::new(
            "provider",
            format!("provider call failed, report built from local data only: {detail}"),
        )),
        Some(ExtractionIssue::UnparseableResponse(detail)) => warnings.push(PayloadWarning::new(
            "provider",
            format!("provider response was not valid JSON: {detail}"),
        )),
        None => {}
    }

    let text_fields = [
        ("nombre", record.candidate_name()),
        ("puesto", record.puesto.as_str()),
        ("resumen_ejecutivo", record.resumen_ejecutivo.as_str()),
        ("recomendacion_final", record.recomendacion_final.as_str()),
    ];
    for (field, value) in text_fields {
        if value.trim().is_empty() {
            warnings.push(PayloadWarning::new(field, "empty"));
        }
    }

    let ficha = &record.ficha_tecnica;
    let ficha_fields = [
        ("ficha_tecnica.ubicacion", &ficha.ubicacion),
        ("ficha_tecnica.nivel_experiencia", &ficha.nivel_experiencia),
        ("ficha_tecnica.formacion_formal", &ficha.formacion_formal),
        ("ficha_tecnica.nivel_ingles", &ficha.nivel_ingles),
        ("ficha_tecnica.disponibilidad", &ficha.disponibilidad),
    ];
    for (field, value) in ficha_fields {
        if value.trim().is_empty() {
            warnings.push(PayloadWarning::new(field, "empty"));
        }
    }

    if record.competencias_tecnicas.is_empty() {
        warnings.push(PayloadWarning::new("competencias_tecnicas", "no entries"));
    }
    if record.habilidades_blandas.is_empty() {
        warnings.push(PayloadWarning::new("habilidades_blandas", "no entries"));
    }
    if record.herramientas.is_empty() {
        warnings.push(PayloadWarning::new("herramientas", "no entries"));
    }

    for local in detected_tools {
        let key = local.herramienta.to_lowercase();
        let reported = record
            .herramientas
            .iter()
            .find(|t| t.herramienta.trim().to_lowercase() == key);
        if let Some(reported) = reported {
            if reported.percent() != local.percent() {
                warnings.push(PayloadWarning::new(
                    "herramientas",
                    format!(
                        "'{}' detected at {} in the notes/CV but reported as '{}'",
                        local.herramienta, local.nivel, reported.nivel
                    ),
                ));
            }
        }
    }

    warnings
}
