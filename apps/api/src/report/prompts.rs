// Provider prompt for report-field extraction.
// The JSON schema below is the contract `CandidateReportRecord` deserializes.

/// Instructions and schema. The recruiter notes, CV and detected tools are
/// appended by `field_extraction::build_prompt`.
pub const FIELD_EXTRACTION_INSTRUCTIONS: &str = r#"Eres analista de RRHH. Genera un informe profesional en ESPAÑOL NEUTRO.

Devuelve SOLO JSON válido (sin markdown, sin ```). Estructura EXACTA:

{
  "fecha": "{today}",
  "puesto": "Puesto detectado o 'Asistente Virtual'",
  "nombre": "Nombre completo del candidato",
  "resumen_ejecutivo": "Párrafo de 5-8 líneas describiendo el perfil profesional",
  "ficha_tecnica": {
    "ubicacion": "Ciudad, País",
    "nivel_experiencia": "Junior/Semi-Senior/Senior",
    "formacion_formal": "Título principal",
    "nivel_ingles": "Básico/Intermedio/Avanzado/Nativo",
    "disponibilidad": "Inmediata/2 semanas/etc"
  },
  "competencias_tecnicas": [
    {"competencia": "Área de conocimiento (NO software)", "nivel": "Alto/Medio/Básico"}
  ],
  "habilidades_blandas": [
    {"habilidad": "Soft skill", "nivel": "Alto/Medio/Básico"}
  ],
  "herramientas": [
    {"herramienta": "Software/Plataforma", "nivel": "NN% o Avanzado/Intermedio/Básico"}
  ],
  "plus": "Puntos fuertes adicionales del candidato",
  "formacion_sugerida": "Áreas de mejora o capacitación recomendada",
  "recomendacion_final": "Veredicto final sobre el candidato",
  "responsable": "Departamento de Recursos Humanos"
}

REGLAS CRÍTICAS:
1. 'competencias_tecnicas': ÁREAS DE CONOCIMIENTO (Ej: 'Gestión de Proyectos', 'Contabilidad'). PROHIBIDO poner software aquí.
2. 'herramientas': SOLO SOFTWARE y PLATAFORMAS (Ej: 'Excel', 'Python', 'Jira').
3. Si la lista de herramientas detectadas está incompleta, EXTRAE LAS HERRAMIENTAS DEL CV.
   Si no tienen porcentaje explícito, usa 'Se menciona' o infiere el nivel (Básico/Intermedio/Avanzado).
4. 'habilidades_blandas': Solo soft skills."#;

pub const FIELD_EXTRACTION_CLOSING: &str =
    "Responde SOLO con el JSON, sin explicaciones ni markdown.";
