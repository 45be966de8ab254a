//! Upload Intake: collects the multipart submission into typed fields.
//!
//! Nothing here decides whether the submission is analyzable; the analyzer
//! rejects a missing or non-PDF file before any provider call.

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;
use tracing::debug;

use crate::analysis::models::Medication;
use crate::errors::AppError;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A file part taken from the `pdf` field.
#[derive(Debug, Clone)]
pub struct ExamUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub content: Bytes,
}

impl ExamUpload {
    /// True for a non-empty part declared as `application/pdf` (parameters ignored).
    pub fn is_pdf(&self) -> bool {
        let essence = self
            .content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(str::trim)
            .unwrap_or_default();
        essence.eq_ignore_ascii_case(PDF_CONTENT_TYPE) && !self.content.is_empty()
    }
}

/// Raw form fields of one analysis submission.
#[derive(Debug, Clone, Default)]
pub struct ExamSubmission {
    pub pdf: Option<ExamUpload>,
    pub additional_info: Option<String>,
    pub is_taking_medication: bool,
    pub medications_json: Option<String>,
}

/// Outcome of decoding the `medications` field.
///
/// Decoding never fails the request: problems become `warnings` and the
/// affected entries (or the whole list) are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MedicationParse {
    pub medications: Vec<Medication>,
    pub warnings: Vec<String>,
}

impl ExamSubmission {
    /// `max_upload_bytes` is only used to report the limit when the body exceeds it.
    pub async fn from_multipart(
        mut multipart: Multipart,
        max_upload_bytes: usize,
    ) -> Result<Self, AppError> {
        let mut submission = ExamSubmission::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, max_upload_bytes, "Malformed multipart body"))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "pdf" => {
                    // A plain text value under `pdf` is not a file.
                    let Some(file_name) = field.file_name().map(str::to_string) else {
                        continue;
                    };
                    let content_type = field.content_type().map(str::to_string);
                    let content = field.bytes().await.map_err(|e| {
                        multipart_error(e, max_upload_bytes, "Failed to read uploaded file")
                    })?;
                    submission.pdf = Some(ExamUpload {
                        file_name,
                        content_type,
                        content,
                    });
                }
                "additional_info" => {
                    submission.additional_info = Some(read_text(field, &name, max_upload_bytes).await?);
                }
                "is_taking_medication" => {
                    submission.is_taking_medication = read_text(field, &name, max_upload_bytes).await?.trim() == "true";
                }
                "medications" => {
                    submission.medications_json = Some(read_text(field, &name, max_upload_bytes).await?);
                }
                _ => debug!("Ignoring unknown multipart field '{name}'"),
            }
        }

        Ok(submission)
    }

    /// Medications to include in the prompt. Empty unless the patient is taking any.
    pub fn medications(&self) -> MedicationParse {
        match (&self.medications_json, self.is_taking_medication) {
            (Some(raw), true) => parse_medications(raw),
            _ => MedicationParse::default(),
        }
    }
}

async fn read_text(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
    max_upload_bytes: usize,
) -> Result<String, AppError> {
    field.text().await.map_err(|e| {
        multipart_error(e, max_upload_bytes, &format!("Failed to read field '{name}'"))
    })
}

/// A body cut off by `DefaultBodyLimit` is a 413, anything else a malformed request.
fn multipart_error(err: MultipartError, max_upload_bytes: usize, context: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge {
            limit: max_upload_bytes,
        }
    } else {
        AppError::Validation(format!("{context}: {}", err.body_text()))
    }
}

/// Decodes the JSON-encoded medication list submitted by the form.
pub fn parse_medications(raw: &str) -> MedicationParse {
    if raw.trim().is_empty() {
        return MedicationParse::default();
    }

    let decoded: Vec<Medication> = match serde_json::from_str(raw) {
        Ok(list) => list,
        Err(e) => {
            return MedicationParse {
                medications: vec![],
                warnings: vec![format!("Ignoring malformed medications field: {e}")],
            }
        }
    };

    let mut parse = MedicationParse::default();
    for (index, medication) in decoded.into_iter().enumerate() {
        if medication.is_blank() {
            continue;
        }
        if !medication.dose.is_finite() || medication.dose < 0.0 {
            parse.warnings.push(format!(
                "Dropping medication #{} ('{}'): dose must be a non-negative number",
                index + 1,
                medication.name.trim()
            ));
            continue;
        }
        parse.medications.push(medication);
    }
    parse
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(content_type: Option<&str>, content: &'static [u8]) -> ExamUpload {
        ExamUpload {
            file_name: "examen.pdf".to_string(),
            content_type: content_type.map(str::to_string),
            content: Bytes::from_static(content),
        }
    }

    #[test]
    fn test_pdf_upload_is_accepted() {
        assert!(upload(Some("application/pdf"), b"%PDF-1.7").is_pdf());
        assert!(upload(Some("Application/PDF; name=x"), b"%PDF-1.7").is_pdf());
    }

    #[test]
    fn test_non_pdf_or_empty_upload_is_rejected() {
        assert!(!upload(Some("image/png"), b"\x89PNG").is_pdf());
        assert!(!upload(None, b"%PDF-1.7").is_pdf());
        assert!(!upload(Some("application/pdf"), b"").is_pdf());
    }

    #[test]
    fn test_parse_medications_keeps_order_and_drops_blanks() {
        let raw = r#"[
            {"name": "Magnesio", "startingDate": "2024-01-01", "dose": 400, "frequency": "noche"},
            {"name": "", "startingDate": "", "dose": 0, "frequency": ""},
            {"name": "Creatina", "startingDate": "2024-02-01", "dose": 5, "frequency": "diaria"}
        ]"#;
        let parse = parse_medications(raw);
        assert!(parse.warnings.is_empty());
        let names: Vec<&str> = parse.medications.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Magnesio", "Creatina"]);
    }

    #[test]
    fn test_malformed_medications_degrade_to_empty_with_warning() {
        let parse = parse_medications("[{\"name\": \"Magnesio\"");
        assert!(parse.medications.is_empty());
        assert_eq!(parse.warnings.len(), 1);
        assert!(parse.warnings[0].contains("malformed"));
    }

    #[test]
    fn test_wrong_shape_degrades_to_empty_with_warning() {
        let parse = parse_medications(r#"{"name": "Magnesio"}"#);
        assert!(parse.medications.is_empty());
        assert_eq!(parse.warnings.len(), 1);
    }

    #[test]
    fn test_negative_dose_is_dropped_with_warning() {
        let raw = r#"[
            {"name": "Zinc", "dose": -15},
            {"name": "Hierro", "dose": 30}
        ]"#;
        let parse = parse_medications(raw);
        assert_eq!(parse.medications.len(), 1);
        assert_eq!(parse.medications[0].name, "Hierro");
        assert_eq!(parse.warnings.len(), 1);
        assert!(parse.warnings[0].contains("Zinc"));
    }

    #[test]
    fn test_empty_field_is_not_a_warning() {
        assert_eq!(parse_medications("  "), MedicationParse::default());
        assert_eq!(parse_medications("[]"), MedicationParse::default());
    }

    #[test]
    fn test_medications_ignored_unless_taking_medication() {
        let submission = ExamSubmission {
            is_taking_medication: false,
            medications_json: Some(r#"[{"name": "Magnesio", "dose": 400}]"#.to_string()),
            ..Default::default()
        };
        assert!(submission.medications().medications.is_empty());

        let taking = ExamSubmission {
            is_taking_medication: true,
            ..submission
        };
        assert_eq!(taking.medications().medications.len(), 1);
    }
}
