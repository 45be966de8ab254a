//! Exam analysis pipeline.
//!
//! Flow: accept upload → decode medications → compose instructions →
//!       store file → generate with schema → validate → return.
//!
//! The two provider calls run strictly in sequence; generation needs the
//! reference returned by the upload. Nothing is retried.

use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::composer::compose_instructions;
use crate::analysis::intake::{ExamSubmission, ExamUpload};
use crate::analysis::models::ExamAnalysisResult;
use crate::analysis::schema::exam_analysis_format;
use crate::analysis::validator::validate_structured_output;
use crate::errors::AppError;
use crate::llm_client::{AnalysisProvider, GenerationRequest, ReasoningEffort};

pub async fn analyze_exam(
    provider: &dyn AnalysisProvider,
    reasoning_effort: ReasoningEffort,
    submission: ExamSubmission,
) -> Result<ExamAnalysisResult, AppError> {
    let analysis_id = Uuid::new_v4();

    let medications = submission.medications();
    let upload = accept_upload(submission.pdf)?;

    for warning in &medications.warnings {
        warn!("Analysis {analysis_id}: {warning}");
    }

    let instructions = compose_instructions(
        &medications.medications,
        submission.additional_info.as_deref(),
    );
    info!(
        "Analysis {analysis_id}: {} ({} bytes), {} medication(s)",
        upload.file_name,
        upload.content.len(),
        medications.medications.len()
    );

    let file = provider
        .store_file(&upload.file_name, upload.content)
        .await?;
    info!("Analysis {analysis_id}: exam stored as {}", file.as_str());

    let request = GenerationRequest {
        system_instruction: instructions.system,
        user_instruction: instructions.user,
        file,
        format: exam_analysis_format(),
        reasoning_effort,
    };
    let raw = provider.generate(&request).await?;

    let result = validate_structured_output(&raw)?;
    info!(
        "Analysis {analysis_id}: validated result with {} parameters",
        result.parameters.len()
    );

    Ok(result)
}

fn accept_upload(pdf: Option<ExamUpload>) -> Result<ExamUpload, AppError> {
    match pdf {
        Some(upload) if upload.is_pdf() => Ok(upload),
        Some(upload) => {
            warn!(
                "Rejecting upload '{}' with content type {:?}",
                upload.file_name, upload.content_type
            );
            Err(AppError::MissingFile)
        }
        None => Err(AppError::MissingFile),
    }
}
