//! Domain types for one exam analysis cycle.
//!
//! `ExamAnalysisResult` mirrors the structured-output schema in `schema.rs`
//! field for field. Deserialization is strict: unknown keys are rejected and
//! nullable fields must still be present.

use serde::{Deserialize, Deserializer, Serialize};

/// A medication or supplement the patient reports taking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Medication {
    pub name: String,
    /// `YYYY-MM-DD` from the form's date input; kept verbatim.
    pub starting_date: String,
    pub dose: f64,
    pub frequency: String,
}

impl Medication {
    /// True when the form row was left untouched.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
            && self.starting_date.trim().is_empty()
            && self.dose == 0.0
            && self.frequency.trim().is_empty()
    }
}

/// A numeric range reported for a parameter.
///
/// `max == None` means the source reported a single value, not an interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterRange {
    pub min: f64,
    #[serde(deserialize_with = "required_nullable")]
    pub max: Option<f64>,
}

#[cfg(test)]
impl ParameterRange {
    pub fn single(value: f64) -> Self {
        Self {
            min: value,
            max: None,
        }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }
}

/// One lab-reported measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExamParameter {
    pub name: String,
    pub unit: String,
    pub current_range: ParameterRange,
    /// Null when the lab report prints no reference interval.
    #[serde(deserialize_with = "required_nullable")]
    pub laboratory_range: Option<ParameterRange>,
    pub optimal_range: ParameterRange,
    pub valuation: String,
}

/// The validated analysis returned to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExamAnalysisResult {
    pub date: String,
    pub parameters: Vec<ExamParameter>,
    pub analysis: Vec<String>,
    pub nutritional_recommendations: Vec<String>,
    pub exercise_recommendations: Vec<String>,
    pub sleep_recommendations: Vec<String>,
    pub supplement_recommendations: Vec<String>,
}

/// Deserializes an `Option<T>` whose key must be present (value may be null).
///
/// Plain `Option` fields default to `None` when the key is missing; routing the
/// field through `deserialize_with` turns a missing key into an error instead.
fn required_nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}
