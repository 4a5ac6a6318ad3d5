//! Markdown persistence for assembled reports.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::render::{
    build_document, is_safe_name, AssembledReport, AssemblyContext, Block, RenderError,
    ReportAssembler, ReportDocument,
};
use crate::report::models::CandidateReportRecord;

const EXTENSION: &str = "md";

/// Writes each report to `<output_dir>/<basename>.md`.
#[derive(Debug, Clone)]
pub struct MarkdownAssembler {
    output_dir: PathBuf,
}

impl MarkdownAssembler {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, RenderError> {
        if !is_safe_name(name) {
            return Err(RenderError::InvalidName(name.to_string()));
        }
        Ok(self.output_dir.join(format!("{name}.{EXTENSION}")))
    }

    /// Previously assembled report, `None` when it does not exist.
    pub async fn load(&self, name: &str) -> Result<Option<String>, RenderError> {
        let path = self.path_for(name)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ReportAssembler for MarkdownAssembler {
    async fn assemble(
        &self,
        record: &CandidateReportRecord,
        context: &AssemblyContext,
    ) -> Result<AssembledReport, RenderError> {
        let path = self.path_for(&context.basename)?;
        let document = build_document(record, context);

        tokio::fs::create_dir_all(&self.output_dir).await?;
        tokio::fs::write(&path, render_markdown(&document)).await?;
        info!("Report written to {}", path.display());

        Ok(AssembledReport { path, document })
    }
}

pub fn render_markdown(document: &ReportDocument) -> String {
    let mut out = String::new();

    for block in &document.blocks {
        match block {
            Block::Title { text } => {
                out.push_str(&format!("# {text}\n\n"));
            }
            Block::Subtitle { text } => {
                out.push_str(&format!("_{text}_\n\n"));
            }
            Block::Heading { text } => {
                out.push_str(&format!("## {text}\n\n"));
            }
            Block::Paragraph { text } => {
                out.push_str(&text.lines().collect::<Vec<_>>().join("  \n"));
                out.push_str("\n\n");
            }
            Block::Table { headers, rows } => {
                out.push_str(&table_row(headers));
                out.push_str(&table_row(&vec!["---".to_string(); headers.len()]));
                for row in rows {
                    out.push_str(&table_row(row));
                }
                out.push('\n');
            }
            Block::Attribution { text } => {
                out.push_str(&format!("---\n\n_{text}_\n\n"));
            }
            Block::PageBreak => {
                out.push_str("<div style=\"page-break-after: always\"></div>\n\n");
            }
        }
    }

    out
}

fn table_row(cells: &[String]) -> String {
    let cells: Vec<String> = cells.iter().map(|c| escape_cell(c)).collect();
    format!("| {} |\n", cells.join(" | "))
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::models::ToolMention;

    fn context(basename: &str) -> AssemblyContext {
        AssemblyContext {
            basename: basename.to_string(),
            today: "2026-10-16".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_render_tables_and_escaping() {
        let doc = ReportDocument {
            blocks: vec![
                Block::Heading {
                    text: "HERRAMIENTAS".to_string(),
                },
                Block::Table {
                    headers: vec!["Herramienta".to_string(), "Nivel".to_string()],
                    rows: vec![vec!["A|B".to_string(), "Alto\nMedio".to_string()]],
                },
            ],
        };

        assert_eq!(
            render_markdown(&doc),
            "## HERRAMIENTAS\n\n| Herramienta | Nivel |\n| --- | --- |\n| A\\|B | Alto<br>Medio |\n\n"
        );
    }

    #[tokio::test]
    async fn test_assemble_writes_and_loads_report() {
        let dir = tempfile::tempdir().unwrap();
        let assembler = MarkdownAssembler::new(dir.path().join("reports"));

        let record = CandidateReportRecord {
            nombre: "Ana Pérez".to_string(),
            herramientas: vec![ToolMention {
                herramienta: "Jira".to_string(),
                nivel: "60%".to_string(),
                uso: String::new(),
            }],
            ..Default::default()
        };

        let assembled = assembler.assemble(&record, &context("ficha_ana")).await.unwrap();
        assert!(assembled.path.ends_with("reports/ficha_ana.md"));

        let content = assembler.load("ficha_ana").await.unwrap().unwrap();
        assert!(content.starts_with("# INFORME DE EVALUACIÓN PROFESIONAL\n\n_Fecha: 2026-10-16_"));
        assert!(content.contains("| Nombre | Ana Pérez |"));
        assert!(content.contains("| Jira | - | 60% |"));
        assert!(content.contains("_Responsable: Departamento de Recursos Humanos_"));
    }

    #[tokio::test]
    async fn test_unsafe_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let assembler = MarkdownAssembler::new(dir.path());

        let err = assembler
            .assemble(&CandidateReportRecord::default(), &context("../escape"))
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidName(_)));
        assert!(matches!(
            assembler.load("../escape").await,
            Err(RenderError::InvalidName(_))
        ));
    }

    #[tokio::test]
    async fn test_load_missing_report_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let assembler = MarkdownAssembler::new(dir.path());
        assert!(assembler.load("missing").await.unwrap().is_none());
    }
}
