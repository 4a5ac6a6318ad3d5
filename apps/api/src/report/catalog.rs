//! Tool catalog — static reference data for tool-name normalization.
//!
//! Built once at startup and shared read-only (`Arc<ToolCatalog>`) by every
//! pipeline run. Nothing here is mutated after construction.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Known tool → short usage description. Keys are lowercase.
const TOOLS_USAGE: &[(&str, &str)] = &[
    ("autocad", "Diseño y planos arquitectónicos"),
    ("revit", "Modelado BIM y coordinación"),
    ("sketchup", "Modelado 3D y visualización"),
    ("archicad", "Modelado BIM y documentación"),
    ("photoshop", "Edición y retoque de imágenes"),
    ("illustrator", "Gráficos vectoriales y piezas"),
    ("microsoft project", "Planificación y seguimiento"),
    ("microsoft office", "Documentación y presentaciones"),
    ("microsoft excel", "Modelado y análisis de datos"),
    ("excel", "Modelado y análisis de datos"),
    ("google workspace", "Colaboración y productividad"),
    ("google calendar", "Gestión de agenda y reuniones"),
    ("asana", "Gestión y priorización de tareas"),
    ("trello", "Tableros kanban y seguimiento"),
    ("notion", "Documentación de procesos"),
    ("metricool", "Analítica y programación social"),
    ("mailchimp", "Email marketing y automatización"),
    ("pipedrive", "Gestión de ventas y CRM"),
    ("canva", "Diseño rápido de piezas"),
    ("meta ads", "Gestión de campañas en Meta"),
    ("google ads", "Publicidad y performance"),
    ("odoo", "ERP y procesos contables"),
    ("sap", "ERP corporativo"),
    ("slack", "Mensajería y colaboración"),
    ("discord", "Comunicación por canales"),
    ("hubspot", "CRM y marketing automation"),
    ("salesforce", "CRM empresarial"),
    ("jira", "Gestión de proyectos ágiles"),
    ("figma", "Diseño de interfaces UI/UX"),
    ("python", "Desarrollo y automatización"),
    ("javascript", "Desarrollo web frontend/backend"),
    ("react", "Desarrollo de interfaces web"),
    ("node", "Backend y APIs"),
];

/// Informal name → canonical name. Keys are lowercase; lookup is exact.
/// Bare "excel" is deliberately absent: it is already the display name
/// recruiters expect.
const TOOL_SYNONYMS: &[(&str, &str)] = &[
    ("project", "Microsoft Project"),
    ("ms project", "Microsoft Project"),
    ("office", "Microsoft Office"),
    ("ms office", "Microsoft Office"),
    ("ms excel", "Microsoft Excel"),
    ("microsoft excel", "Microsoft Excel"),
    ("g suite", "Google Workspace"),
    ("google suite", "Google Workspace"),
    ("calendar", "Google Calendar"),
    ("google calendar", "Google Calendar"),
    ("autocad", "AutoCAD"),
    ("sketchup", "SketchUp"),
    ("adwords", "Google Ads"),
    ("facebook ads", "Meta Ads"),
    ("slack", "Slack"),
    ("discord", "Discord"),
];

/// Keyword families for usage guessing, in priority order. First match wins.
const USAGE_FAMILIES: &[(&[&str], &str)] = &[
    (
        &["excel", "sheet"],
        "Modelado y análisis de datos en hojas de cálculo",
    ),
    (
        &["calendar", "agenda"],
        "Gestión de agenda, eventos y reuniones",
    ),
    (
        &["slack", "discord", "teams", "whatsapp", "telegram"],
        "Mensajería y colaboración en equipos",
    ),
    (
        &["ads", "sem", "seo", "mailchimp", "metricool"],
        "Gestión de campañas de marketing digital",
    ),
    (
        &["crm", "pipedrive", "hubspot", "salesforce"],
        "Gestión de oportunidades comerciales en CRM",
    ),
    (
        &["project", "asana", "trello", "notion", "jira"],
        "Planificación y seguimiento de proyectos",
    ),
    (
        &["autocad", "revit", "archicad", "sketchup"],
        "Modelado y documentación técnica",
    ),
    (
        &["photoshop", "illustrator", "canva", "figma"],
        "Diseño y edición de piezas visuales",
    ),
    (
        &["odoo", "sap", "profit"],
        "Soporte a procesos contables y de gestión en ERP",
    ),
];

pub const DEFAULT_USAGE: &str = "Aplicación práctica en el área";

/// Substrings that mark a "competency" as actually being software.
const SOFTWARE_KEYWORDS: &[&str] = &[
    "excel",
    "word",
    "powerpoint",
    "office",
    "photoshop",
    "illustrator",
    "figma",
    "canva",
    "trello",
    "asana",
    "jira",
    "python",
    "java",
    "javascript",
    "react",
    "angular",
    "node",
    "html",
    "css",
    "sql",
    "salesforce",
    "sap",
    "hubspot",
    "vs code",
    "visual studio",
    "postman",
    "git",
    "github",
    "docker",
    "aws",
    "azure",
];

static LEADING_NON_LETTERS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^A-Za-zÁ-ÿ]+").unwrap());

// One or more filler lead-ins, each optionally followed by ':' or '-'.
static FILLER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:(?:he\s+utilizado|he\s+usado|he\s+manejado|he\s+trabajado\s+con|utilizo|uso\s+de|uso|manejo|conocimiento\s+de|experiencia\s+en|trabajo\s+con|herramientas?\s+de)\b\s*[:\-]?\s*)+",
    )
    .unwrap()
});

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Immutable reference tables used by extraction, normalization and
/// reclassification.
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    usage: HashMap<&'static str, &'static str>,
    synonyms: HashMap<&'static str, &'static str>,
    families: &'static [(&'static [&'static str], &'static str)],
    software_keywords: &'static [&'static str],
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self {
            usage: TOOLS_USAGE.iter().copied().collect(),
            synonyms: TOOL_SYNONYMS.iter().copied().collect(),
            families: USAGE_FAMILIES,
            software_keywords: SOFTWARE_KEYWORDS,
        }
    }
}

impl ToolCatalog {
    /// Canonical display name for a raw tool mention.
    ///
    /// Strips filler lead-ins ("He utilizado", "conocimiento de:", ...),
    /// resolves synonyms, then capitalizes a lowercase first letter.
    pub fn normalize_tool(&self, raw: &str) -> String {
        let stripped = LEADING_NON_LETTERS_RE.replace(raw.trim(), "");
        let stripped = FILLER_RE.replace(&stripped, "");
        let name = WHITESPACE_RE.replace_all(stripped.trim(), " ").into_owned();

        if let Some(canonical) = self.synonyms.get(name.to_lowercase().as_str()) {
            return (*canonical).to_string();
        }

        capitalize_first(&name)
    }

    /// Short usage note for a tool: exact table hit, else keyword family,
    /// else a generic description.
    pub fn guess_tool_usage(&self, name: &str) -> &'static str {
        let key = name.trim().to_lowercase();

        if let Some(usage) = self.usage.get(key.as_str()) {
            return *usage;
        }

        self.families
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| key.contains(k)))
            .map(|(_, usage)| *usage)
            .unwrap_or(DEFAULT_USAGE)
    }

    /// Whether a competency name actually names software.
    pub fn is_software(&self, name: &str) -> bool {
        let key = name.to_lowercase();
        self.software_keywords.iter().any(|k| key.contains(k))
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ToolCatalog {
        ToolCatalog::default()
    }

    #[test]
    fn test_normalize_strips_filler_phrases() {
        let c = catalog();
        assert_eq!(c.normalize_tool("He utilizado Trello"), "Trello");
        assert_eq!(c.normalize_tool("conocimiento de: Notion"), "Notion");
        assert_eq!(c.normalize_tool("Experiencia en - Canva"), "Canva");
        assert_eq!(c.normalize_tool("uso de photoshop"), "Photoshop");
    }

    #[test]
    fn test_normalize_does_not_strip_inside_words() {
        // "uso" must not eat the start of "Usonia"
        assert_eq!(catalog().normalize_tool("Usonia"), "Usonia");
    }

    #[test]
    fn test_normalize_applies_synonyms_case_insensitively() {
        let c = catalog();
        assert_eq!(c.normalize_tool("ms project"), "Microsoft Project");
        assert_eq!(c.normalize_tool("G Suite"), "Google Workspace");
        assert_eq!(c.normalize_tool("AUTOCAD"), "AutoCAD");
        assert_eq!(c.normalize_tool("manejo adwords"), "Google Ads");
    }

    #[test]
    fn test_normalize_keeps_excel_as_written() {
        assert_eq!(catalog().normalize_tool("Excel"), "Excel");
        assert_eq!(catalog().normalize_tool("excel"), "Excel");
    }

    #[test]
    fn test_normalize_capitalizes_only_lowercase_initial() {
        let c = catalog();
        assert_eq!(c.normalize_tool("jira"), "Jira");
        assert_eq!(c.normalize_tool("iPhone"), "IPhone");
        assert_eq!(c.normalize_tool("HubSpot"), "HubSpot");
        assert_eq!(c.normalize_tool("ñandú"), "Ñandú");
    }

    #[test]
    fn test_normalize_collapses_whitespace_and_leading_noise() {
        assert_eq!(catalog().normalize_tool("  - *  google   ads "), "Google ads");
    }

    #[test]
    fn test_usage_exact_lookup_first() {
        let c = catalog();
        assert_eq!(c.guess_tool_usage("Excel"), "Modelado y análisis de datos");
        assert_eq!(c.guess_tool_usage("Google Ads"), "Publicidad y performance");
    }

    #[test]
    fn test_usage_family_boundaries() {
        let c = catalog();
        assert_eq!(
            c.guess_tool_usage("Google Sheets"),
            "Modelado y análisis de datos en hojas de cálculo"
        );
        assert_eq!(
            c.guess_tool_usage("Outlook Calendar"),
            "Gestión de agenda, eventos y reuniones"
        );
        assert_eq!(
            c.guess_tool_usage("Microsoft Teams"),
            "Mensajería y colaboración en equipos"
        );
        assert_eq!(
            c.guess_tool_usage("TikTok Ads"),
            "Gestión de campañas de marketing digital"
        );
        assert_eq!(
            c.guess_tool_usage("Zoho CRM"),
            "Gestión de oportunidades comerciales en CRM"
        );
        assert_eq!(
            c.guess_tool_usage("Jira Service Management"),
            "Planificación y seguimiento de proyectos"
        );
        assert_eq!(c.guess_tool_usage("Revit MEP"), "Modelado y documentación técnica");
        assert_eq!(c.guess_tool_usage("Figma Jam"), "Diseño y edición de piezas visuales");
        assert_eq!(
            c.guess_tool_usage("Odoo Accounting"),
            "Soporte a procesos contables y de gestión en ERP"
        );
    }

    #[test]
    fn test_usage_first_family_wins() {
        let c = catalog();
        // spreadsheet is checked before marketing
        assert_eq!(
            c.guess_tool_usage("Excel Ads Reports"),
            "Modelado y análisis de datos en hojas de cálculo"
        );
        // messaging is checked before CRM
        assert_eq!(
            c.guess_tool_usage("Slack CRM bridge"),
            "Mensajería y colaboración en equipos"
        );
    }

    #[test]
    fn test_usage_fallback() {
        assert_eq!(catalog().guess_tool_usage("Blender"), DEFAULT_USAGE);
    }

    #[test]
    fn test_is_software() {
        let c = catalog();
        assert!(c.is_software("Excel avanzado"));
        assert!(c.is_software("Programación en Python"));
        assert!(c.is_software("Control de versiones con Git"));
        assert!(!c.is_software("Contabilidad"));
        assert!(!c.is_software("Gestión de Proyectos"));
    }
}
