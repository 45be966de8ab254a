//! Axum route handlers for the exam analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;

use crate::analysis::analyzer::analyze_exam;
use crate::analysis::intake::ExamSubmission;
use crate::analysis::models::ExamAnalysisResult;
use crate::analysis::presentation::{present, PresentedAnalysis};
use crate::analysis::validator::validate_bytes;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/exams/analyze
///
/// Multipart form: `pdf`, `additional_info`, `is_taking_medication`, `medications`.
/// Returns the validated analysis or `{ "error": ... }`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExamAnalysisResult>, AppError> {
    let submission =
        ExamSubmission::from_multipart(multipart, state.config.max_upload_bytes).await?;
    let result = analyze_exam(
        state.provider.as_ref(),
        state.config.reasoning_effort,
        submission,
    )
    .await?;
    Ok(Json(result))
}

/// POST /api/v1/exams/present
///
/// Takes an analysis result and returns the view the UI renders: icon-split
/// recommendations and formatted ranges. The body goes through the same
/// strict validation as provider output.
pub async fn handle_present(body: Bytes) -> Result<Json<PresentedAnalysis>, AppError> {
    let result = validate_bytes(&body)?;
    Ok(Json(present(&result)))
}
