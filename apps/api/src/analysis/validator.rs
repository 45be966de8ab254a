//! Response Validator: strict pass/fail check of the provider's structured output.
//!
//! No repair: code fences, trailing text, missing keys, unknown keys and wrong
//! types all reject the whole payload.

use thiserror::Error;

use crate::analysis::models::ExamAnalysisResult;

#[derive(Debug, Error)]
#[error("{detail}")]
pub struct SchemaMismatch {
    detail: String,
}

impl SchemaMismatch {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

pub fn validate_structured_output(raw: &str) -> Result<ExamAnalysisResult, SchemaMismatch> {
    if raw.trim().is_empty() {
        return Err(SchemaMismatch::new("structured output is empty"));
    }

    serde_json::from_str(raw)
        .map_err(|e| SchemaMismatch::new(format!("structured output does not match schema: {e}")))
}

/// Same check for a raw request body.
pub fn validate_bytes(raw: &[u8]) -> Result<ExamAnalysisResult, SchemaMismatch> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| SchemaMismatch::new(format!("body is not valid UTF-8: {e}")))?;
    validate_structured_output(text)
}
