//! Candidate report data model.
//!
//! Field names are the JSON contract shared with the generative provider and
//! with API clients, so they stay in the report's language (Spanish).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A software tool or platform the candidate uses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMention {
    /// Canonical display name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub herramienta: String,
    /// `"NN%"` or a qualitative tier ("Avanzado", "Se menciona", ...).
    #[serde(default, deserialize_with = "lenient_string")]
    pub nivel: String,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "String::is_empty")]
    pub uso: String,
}

impl ToolMention {
    /// Numeric percentage when `nivel` is of the form `"NN%"`.
    pub fn percent(&self) -> Option<u8> {
        self.nivel.trim().strip_suffix('%')?.trim().parse().ok()
    }
}

/// A knowledge area. Never a piece of software once the record is reclassified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencyEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub competencia: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nivel: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftSkillEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub habilidad: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nivel: String,
}

/// Technical fact sheet. `nombre` is accepted here as well because some
/// provider responses nest the candidate name inside the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FichaTecnica {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "String::is_empty")]
    pub nombre: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ubicacion: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nivel_experiencia: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub formacion_formal: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nivel_ingles: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub disponibilidad: String,
}

/// Aggregate produced by one pipeline run.
///
/// Every field defaults to empty so that a partially valid provider payload
/// still deserializes; `CandidateReportRecord::default()` is the empty
/// skeleton used when the payload cannot be parsed at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateReportRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub fecha: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub puesto: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nombre: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub resumen_ejecutivo: String,
    #[serde(default, deserialize_with = "lenient_object")]
    pub ficha_tecnica: FichaTecnica,
    #[serde(default, deserialize_with = "lenient_list")]
    pub competencias_tecnicas: Vec<CompetencyEntry>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub habilidades_blandas: Vec<SoftSkillEntry>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub herramientas: Vec<ToolMention>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub plus: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub formacion_sugerida: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub recomendacion_final: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub responsable: String,
}

impl CandidateReportRecord {
    /// Candidate name, falling back to the one nested in the fact sheet.
    pub fn candidate_name(&self) -> &str {
        if self.nombre.trim().is_empty() {
            self.ficha_tecnica.nombre.trim()
        } else {
            self.nombre.trim()
        }
    }

    pub fn has_tool(&self, name: &str) -> bool {
        let name = name.trim().to_lowercase();
        self.herramientas
            .iter()
            .any(|t| t.herramienta.trim().to_lowercase() == name)
    }
}

/// Accepts strings, numbers, booleans and null; anything else becomes empty.
/// Providers routinely answer `"nivel": 85` or `"plus": null`.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// List entries that a provider may also send as a bare name.
trait NamedEntry: DeserializeOwned {
    fn from_name(name: String) -> Self;
}

impl NamedEntry for CompetencyEntry {
    fn from_name(competencia: String) -> Self {
        Self {
            competencia,
            ..Default::default()
        }
    }
}

impl NamedEntry for SoftSkillEntry {
    fn from_name(habilidad: String) -> Self {
        Self {
            habilidad,
            ..Default::default()
        }
    }
}

impl NamedEntry for ToolMention {
    fn from_name(herramienta: String) -> Self {
        Self {
            herramienta,
            ..Default::default()
        }
    }
}

/// Objects deserialize as usual; any other shape becomes the default.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        v @ Value::Object(_) => serde_json::from_value(v).unwrap_or_default(),
        _ => T::default(),
    })
}

/// Arrays of objects or bare names. Other items are dropped and a non-array
/// value yields an empty list.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: NamedEntry,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            v @ Value::Object(_) => serde_json::from_value(v).ok(),
            Value::String(s) if !s.trim().is_empty() => Some(T::from_name(s.trim().to_string())),
            _ => None,
        })
        .collect())
}
