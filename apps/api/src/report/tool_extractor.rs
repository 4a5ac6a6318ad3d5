//! Local "tool — percentage" extraction from free text.
//!
//! Recognises mentions such as `Excel - 90%`, `Jira: 60%` or `Photoshop 85%`,
//! normalizes names through the [`ToolCatalog`], keeps the highest percentage
//! per canonical name and returns the result sorted by percentage.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::report::catalog::ToolCatalog;
use crate::report::models::ToolMention;

pub const DEFAULT_MAX_TOOLS: usize = 40;

/// Minimum alphabetic characters a normalized name needs to count as a tool.
const MIN_NAME_LETTERS: usize = 3;

static TOOL_PERCENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([A-Za-zÁ-ÿ][A-Za-zÁ-ÿ0-9 .+/_()\-]{1,}?)\s*[:\-–—]?\s*([0-9]{1,3})\s*%")
        .unwrap()
});

/// Extracts tool mentions with an explicit percentage.
///
/// Pure function of its inputs. At most `max_n` entries are returned,
/// ordered by percentage descending; ties keep first-seen order.
pub fn extract_tools_with_percent(
    text: &str,
    catalog: &ToolCatalog,
    max_n: usize,
) -> Vec<ToolMention> {
    let text = text.replace('\r', "");

    let mut tools: Vec<(ToolMention, u8)> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for caps in TOOL_PERCENT_RE.captures_iter(&text) {
        let name = catalog.normalize_tool(&caps[1]);
        if letter_count(&name) < MIN_NAME_LETTERS {
            continue;
        }

        // [0-9]{1,3} always fits in u16
        let pct = caps[2].parse::<u16>().unwrap_or(0).min(100) as u8;

        let key = name.to_lowercase();
        let slot = index_by_key.get(&key).copied();
        if let Some(i) = slot {
            if pct <= tools[i].1 {
                continue;
            }
        }

        let uso = catalog.guess_tool_usage(&name).to_string();
        let entry = (
            ToolMention {
                herramienta: name,
                nivel: format!("{pct}%"),
                uso,
            },
            pct,
        );
        // a higher duplicate replaces the whole entry but keeps its position
        match slot {
            Some(i) => tools[i] = entry,
            None => {
                index_by_key.insert(key, tools.len());
                tools.push(entry);
            }
        }
    }

    tools.sort_by(|a, b| b.1.cmp(&a.1));
    tools.into_iter().take(max_n).map(|(t, _)| t).collect()
}

fn letter_count(name: &str) -> usize {
    name.chars()
        .filter(|c| c.is_ascii_alphabetic() || ('\u{C1}'..='\u{FF}').contains(c))
        .count()
}
