//! Structured-output schema for `ExamAnalysisResult`.
//!
//! Strict mode: every object closes `additionalProperties` and lists all of its
//! keys as required. Nullable values are expressed as `["number", "null"]` or an
//! `anyOf` with `null`. Item counts in descriptions are guidance for the model and
//! are not enforced by the validator.

use serde_json::{json, Value};

use crate::llm_client::StructuredOutputFormat;

pub const SCHEMA_NAME: &str = "exam_analysis";

/// The contract sent to the provider with every generation call.
pub fn exam_analysis_format() -> StructuredOutputFormat {
    StructuredOutputFormat {
        name: SCHEMA_NAME.to_string(),
        schema: exam_analysis_schema(),
        strict: true,
    }
}

pub fn exam_analysis_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "required": [
            "date",
            "parameters",
            "analysis",
            "nutritionalRecommendations",
            "exerciseRecommendations",
            "sleepRecommendations",
            "supplementRecommendations"
        ],
        "properties": {
            "date": {
                "type": "string",
                "description": "Fecha en que se tomó el examen, tal como aparece en el documento."
            },
            "parameters": {
                "type": "array",
                "description": "Parámetros del examen en el mismo orden en que aparecen en el documento.",
                "items": parameter_schema()
            },
            "analysis": string_list(
                "Entre 3 y 5 hallazgos clínicos relevantes, cada uno en una frase completa."
            ),
            "nutritionalRecommendations": string_list(
                "Recomendaciones de nutrición. Cada una comienza con un emoji representativo."
            ),
            "exerciseRecommendations": string_list(
                "Recomendaciones de ejercicio. Cada una comienza con un emoji representativo."
            ),
            "sleepRecommendations": string_list(
                "Recomendaciones de sueño. Cada una comienza con un emoji representativo."
            ),
            "supplementRecommendations": string_list(
                "Entre 1 y 3 suplementos recomendados como máximo, cada uno comenzando con un emoji."
            )
        }
    })
}

fn parameter_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "required": [
            "name",
            "unit",
            "currentRange",
            "laboratoryRange",
            "optimalRange",
            "valuation"
        ],
        "properties": {
            "name": {
                "type": "string",
                "description": "Nombre del parámetro tal como lo reporta el laboratorio."
            },
            "unit": {
                "type": "string",
                "description": "Unidad de medida del parámetro, por ejemplo mg/dL."
            },
            "currentRange": range_schema(
                "Valor medido en el examen. Si es un único valor, va en min y max es null."
            ),
            "laboratoryRange": {
                "anyOf": [
                    range_schema("Rango de referencia impreso por el laboratorio."),
                    { "type": "null" }
                ]
            },
            "optimalRange": range_schema(
                "Rango óptimo según medicina funcional. Si es un valor de corte único, max es null."
            ),
            "valuation": {
                "type": "string",
                "description": "Interpretación breve del valor actual frente a los rangos."
            }
        }
    })
}

fn range_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "description": description,
        "additionalProperties": false,
        "required": ["min", "max"],
        "properties": {
            "min": { "type": "number" },
            "max": {
                "type": ["number", "null"],
                "description": "Límite superior. null cuando se reporta un solo valor; nunca repetir min."
            }
        }
    })
}

fn string_list(description: &str) -> Value {
    json!({
        "type": "array",
        "description": description,
        "items": { "type": "string" }
    })
}
