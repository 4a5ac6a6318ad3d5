use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use super::DocumentError;

/// Paragraph text of `word/document.xml`, one paragraph per line.
///
/// Only `w:t` runs contribute text; `w:tab` and `w:br` become a tab and a
/// line break so "Excel<tab>90%" style tables stay parseable.
pub fn extract_docx_text(data: &[u8]) -> Result<String, DocumentError> {
    let docx_err = |e: &dyn std::fmt::Display| DocumentError::Docx(e.to_string());

    let mut archive = zip::ZipArchive::new(Cursor::new(data)).map_err(|e| docx_err(&e))?;
    let mut document_file = archive
        .by_name("word/document.xml")
        .map_err(|e| docx_err(&e))?;
    let mut xml = String::new();
    document_file.read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut current = String::new();
    let mut lines = Vec::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => current.clear(),
                b"w:t" => in_run_text = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:p" => {
                    let line = current.trim();
                    if !line.is_empty() {
                        lines.push(line.to_string());
                    }
                    current.clear();
                }
                b"w:t" => in_run_text = false,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" => current.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_run_text {
                    let value = e.xml_content().map_err(|e| docx_err(&e))?;
                    current.push_str(&value);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(docx_err(&e)),
            _ => {}
        }

        buf.clear();
    }

    Ok(lines.join("\n"))
}
