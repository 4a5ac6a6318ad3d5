//! Report pipeline — orchestrates one candidate report.
//!
//! Flow: read CV text → extract tools from notes + CV → provider field
//! extraction (merged with local tools) → reclassify skills → soft
//! validation → assemble and persist.
//!
//! Only assembly can fail: unreadable inputs and provider failures degrade
//! the report instead of aborting it.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::document::DocumentTextReader;
use crate::render::{AssemblyContext, RenderError, ReportAssembler};
use crate::report::catalog::ToolCatalog;
use crate::report::field_extraction::{ExtractionInput, FieldExtractionClient};
use crate::report::models::{CandidateReportRecord, ToolMention};
use crate::report::reclassify::reclassify_skills;
use crate::report::tool_extractor::{extract_tools_with_percent, DEFAULT_MAX_TOOLS};
use crate::report::validation::{validate_record, PayloadWarning};

#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Free-form recruiter notes.
    pub notes: String,
    pub cv_path: Option<PathBuf>,
    /// File stem of the persisted report; doubles as the report id.
    pub basename: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportOutcome {
    pub report_id: String,
    pub path: PathBuf,
    pub record: CandidateReportRecord,
    pub detected_tools: Vec<ToolMention>,
    pub warnings: Vec<PayloadWarning>,
    /// Section headings of the assembled document, in render order.
    pub sections: Vec<String>,
}

#[derive(Clone)]
pub struct ReportPipeline {
    catalog: Arc<ToolCatalog>,
    reader: Arc<dyn DocumentTextReader>,
    extractor: FieldExtractionClient,
    assembler: Arc<dyn ReportAssembler>,
}

impl ReportPipeline {
    pub fn new(
        catalog: Arc<ToolCatalog>,
        reader: Arc<dyn DocumentTextReader>,
        extractor: FieldExtractionClient,
        assembler: Arc<dyn ReportAssembler>,
    ) -> Self {
        Self {
            catalog,
            reader,
            extractor,
            assembler,
        }
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    pub async fn run(&self, request: ReportRequest) -> Result<ReportOutcome, RenderError> {
        info!("Generating report '{}'", request.basename);

        let cv_text = match &request.cv_path {
            Some(path) => self.reader.read(path).await,
            None => String::new(),
        };
        info!("CV text: {} characters", cv_text.chars().count());

        let combined = format!("{}\n{}", request.notes, cv_text);
        let detected_tools = extract_tools_with_percent(&combined, &self.catalog, DEFAULT_MAX_TOOLS);
        info!("Detected {} tools with explicit percentages", detected_tools.len());

        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        let extraction = self
            .extractor
            .extract(ExtractionInput {
                notes: &request.notes,
                cv_text: &cv_text,
                detected_tools: &detected_tools,
                today: &today,
            })
            .await;

        let record = reclassify_skills(extraction.record, &self.catalog);
        let warnings = validate_record(&record, &detected_tools, extraction.issue.as_ref());
        if !warnings.is_empty() {
            info!("Report '{}' has {} warnings", request.basename, warnings.len());
        }

        let assembled = self
            .assembler
            .assemble(
                &record,
                &AssemblyContext {
                    basename: request.basename.clone(),
                    today,
                    notes: request.notes.clone(),
                },
            )
            .await?;

        let sections = assembled
            .document
            .headings()
            .into_iter()
            .map(str::to_string)
            .collect();

        Ok(ReportOutcome {
            report_id: request.basename,
            path: assembled.path,
            record,
            detected_tools,
            warnings,
            sections,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::document::FileTextReader;
    use crate::llm_client::mock::MockGenerator;
    use crate::render::MarkdownAssembler;

    fn pipeline(generator: Arc<MockGenerator>, output_dir: &std::path::Path) -> ReportPipeline {
        ReportPipeline::new(
            Arc::new(ToolCatalog::default()),
            Arc::new(FileTextReader),
            FieldExtractionClient::new(generator),
            Arc::new(MarkdownAssembler::new(output_dir)),
        )
    }

    fn request(notes: &str, cv_path: Option<PathBuf>) -> ReportRequest {
        ReportRequest {
            notes: notes.to_string(),
            cv_path,
            basename: "ficha_test".to_string(),
        }
    }

    const PROVIDER_REPLY: &str = r#"Aquí tienes el informe:
```json
{
  "puesto": "Asistente Administrativa",
  "nombre": "Ana Pérez",
  "resumen_ejecutivo": "Perfil administrativo con foco en finanzas.",
  "competencias_tecnicas": [
    {"competencia": "Contabilidad", "nivel": "Alto"},
    {"competencia": "Excel", "nivel": "Alto"}
  ],
  "habilidades_blandas": [{"habilidad": "Organización", "nivel": "Alto"}],
  "herramientas": [{"herramienta": "Photoshop", "nivel": "Intermedio"}],
  "recomendacion_final": "Recomendada."
}
```"#;

    #[tokio::test]
    async fn test_full_run_merges_reclassifies_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut cv = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(cv, "Experiencia en Trello - 70%").unwrap();

        let generator = Arc::new(MockGenerator::replying(PROVIDER_REPLY));
        let outcome = pipeline(generator.clone(), dir.path())
            .run(request("Canva - 85%", Some(cv.path().to_path_buf())))
            .await
            .unwrap();

        let tools: Vec<_> = outcome
            .record
            .herramientas
            .iter()
            .map(|t| (t.herramienta.as_str(), t.nivel.as_str()))
            .collect();
        assert_eq!(
            tools,
            vec![
                ("Photoshop", "Intermedio"),
                ("Canva", "85%"),
                ("Trello", "70%"),
                ("Excel", "Alto"),
            ]
        );
        assert_eq!(outcome.record.competencias_tecnicas.len(), 1);
        assert_eq!(outcome.record.competencias_tecnicas[0].competencia, "Contabilidad");
        assert_eq!(outcome.detected_tools.len(), 2);
        assert_eq!(
            outcome.sections,
            vec![
                "FICHA TÉCNICA",
                "RESUMEN EJECUTIVO",
                "COMPETENCIAS TÉCNICAS",
                "HABILIDADES BLANDAS",
                "HERRAMIENTAS TECNOLÓGICAS",
                "RECOMENDACIÓN FINAL",
                "NOTAS ADICIONALES / INPUT DEL RECLUTADOR",
            ]
        );

        // the CV reached the prompt
        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("Experiencia en Trello - 70%"));
        drop(prompts);

        let written = std::fs::read_to_string(&outcome.path).unwrap();
        assert!(written.contains("| Nombre | Ana Pérez |"));
        assert!(written.contains("## NOTAS ADICIONALES / INPUT DEL RECLUTADOR"));
    }

    #[tokio::test]
    async fn test_prose_reply_still_produces_a_report() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Arc::new(MockGenerator::replying("No tengo suficiente información."));

        let outcome = pipeline(generator, dir.path())
            .run(request("", None))
            .await
            .unwrap();

        assert_eq!(outcome.record, CandidateReportRecord::default());
        assert_eq!(outcome.warnings[0].field, "provider");
        assert!(outcome.path.exists());
    }

    #[tokio::test]
    async fn test_missing_cv_file_degrades_to_notes_only() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Arc::new(MockGenerator::failing(500));

        let outcome = pipeline(generator, dir.path())
            .run(request(
                "Jira: 60%",
                Some(dir.path().join("does-not-exist.pdf")),
            ))
            .await
            .unwrap();

        assert_eq!(outcome.record.herramientas.len(), 1);
        assert_eq!(outcome.record.herramientas[0].herramienta, "Jira");
    }
}
