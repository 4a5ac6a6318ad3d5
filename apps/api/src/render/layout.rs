//! Report layout — the fixed section order of the evaluation report.
//!
//! Title block, fact sheet, executive summary, competencies, soft skills,
//! tools, strengths, suggested training, final verdict, attribution, then
//! the recruiter notes appendix. A section whose source field is empty is
//! omitted entirely; the fact sheet and attribution are always present.

use crate::render::{AssemblyContext, Block, ReportDocument};
use crate::report::models::CandidateReportRecord;

pub const REPORT_TITLE: &str = "INFORME DE EVALUACIÓN PROFESIONAL";
pub const DEFAULT_RESPONSIBLE: &str = "Departamento de Recursos Humanos";
const EMPTY_CELL: &str = "-";

pub fn build_document(record: &CandidateReportRecord, context: &AssemblyContext) -> ReportDocument {
    let mut blocks = Vec::new();

    let fecha = non_empty(&record.fecha).unwrap_or(context.today.as_str());
    blocks.push(Block::Title {
        text: REPORT_TITLE.to_string(),
    });
    blocks.push(Block::Subtitle {
        text: format!("Fecha: {fecha}"),
    });

    let ficha = &record.ficha_tecnica;
    heading(&mut blocks, "FICHA TÉCNICA");
    blocks.push(table(
        &["Campo", "Valor"],
        [
            ("Nombre", record.candidate_name()),
            ("Puesto", record.puesto.as_str()),
            ("Ubicación", ficha.ubicacion.as_str()),
            ("Nivel de Experiencia", ficha.nivel_experiencia.as_str()),
            ("Formación", ficha.formacion_formal.as_str()),
            ("Nivel de Inglés", ficha.nivel_ingles.as_str()),
            ("Disponibilidad", ficha.disponibilidad.as_str()),
        ]
        .into_iter()
        .map(|(label, value)| vec![label.to_string(), cell(value)])
        .collect(),
    ));

    text_section(&mut blocks, "RESUMEN EJECUTIVO", &record.resumen_ejecutivo);

    if !record.competencias_tecnicas.is_empty() {
        heading(&mut blocks, "COMPETENCIAS TÉCNICAS");
        blocks.push(table(
            &["Competencia", "Nivel"],
            record
                .competencias_tecnicas
                .iter()
                .map(|c| vec![cell(&c.competencia), cell(&c.nivel)])
                .collect(),
        ));
    }

    if !record.habilidades_blandas.is_empty() {
        heading(&mut blocks, "HABILIDADES BLANDAS");
        blocks.push(table(
            &["Habilidad", "Nivel"],
            record
                .habilidades_blandas
                .iter()
                .map(|h| vec![cell(&h.habilidad), cell(&h.nivel)])
                .collect(),
        ));
    }

    if !record.herramientas.is_empty() {
        heading(&mut blocks, "HERRAMIENTAS TECNOLÓGICAS");
        blocks.push(table(
            &["Herramienta", "Uso", "Nivel"],
            record
                .herramientas
                .iter()
                .map(|t| vec![cell(&t.herramienta), cell(&t.uso), cell(&t.nivel)])
                .collect(),
        ));
    }

    text_section(&mut blocks, "PUNTOS FUERTES", &record.plus);
    text_section(&mut blocks, "FORMACIÓN SUGERIDA", &record.formacion_sugerida);
    text_section(&mut blocks, "RECOMENDACIÓN FINAL", &record.recomendacion_final);

    let responsible = non_empty(&record.responsable).unwrap_or(DEFAULT_RESPONSIBLE);
    blocks.push(Block::Attribution {
        text: format!("Responsable: {responsible}"),
    });

    if !context.notes.trim().is_empty() {
        blocks.push(Block::PageBreak);
        text_section(
            &mut blocks,
            "NOTAS ADICIONALES / INPUT DEL RECLUTADOR",
            &context.notes,
        );
    }

    ReportDocument { blocks }
}

fn heading(blocks: &mut Vec<Block>, text: &str) {
    blocks.push(Block::Heading {
        text: text.to_string(),
    });
}

/// Heading plus one paragraph per blank-line-separated chunk; nothing when empty.
fn text_section(blocks: &mut Vec<Block>, title: &str, text: &str) {
    let chunks = paragraphs(text);
    if chunks.is_empty() {
        return;
    }
    heading(blocks, title);
    blocks.extend(chunks.into_iter().map(|text| Block::Paragraph { text }));
}

fn paragraphs(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let text = text.replace('\r', "");
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim());
        }
    }
    if !current.is_empty() {
        out.push(current.join("\n"));
    }
    out
}

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> Block {
    Block::Table {
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows,
    }
}

fn cell(value: &str) -> String {
    non_empty(value).unwrap_or(EMPTY_CELL).to_string()
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}
