// Exam analysis prompt constants.
// The composer only appends to CLINICAL_DIRECTIVE; it never edits it.

/// System-role instruction: fixes the assistant's persona and expertise.
pub const ANALYSIS_SYSTEM: &str = "\
Eres un médico experto en medicina funcional, medicina del estilo de vida y longevidad. \
Interpretas exámenes de laboratorio con rigor clínico y comparas cada parámetro tanto con \
el rango de referencia del laboratorio como con el rango óptimo para la salud y la longevidad. \
Respondes siempre en español y únicamente con el objeto JSON solicitado.";

/// Fixed user-role directive sent with every exam.
pub const CLINICAL_DIRECTIVE: &str = "\
Analiza el examen adjunto y extrae la información. Primero extrae la fecha del examen y \
los valores de todos los parámetros reportados, en el mismo orden en que aparecen en el \
documento, con su unidad, el valor actual, el rango de referencia del laboratorio y el \
rango óptimo desde la medicina funcional. Luego entrega un análisis de los hallazgos más \
relevantes y recomendaciones concretas de nutrición, ejercicio, sueño y suplementación. \
Si el examen reporta un único valor y no un intervalo, indica solo el mínimo y deja el \
máximo en null.";

/// Heading of the appended medication section.
pub const MEDICATIONS_HEADING: &str = "Medicamentos y suplementos que toma el paciente:";

/// Heading of the appended free-text context section.
pub const ADDITIONAL_INFO_HEADING: &str = "Información adicional del paciente:";

/// Placeholder for medication fields the user left empty.
pub const UNSPECIFIED: &str = "sin especificar";
