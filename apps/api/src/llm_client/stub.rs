//! In-memory `AnalysisProvider` for tests. Records every call it receives.

use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use super::{AnalysisProvider, FileReference, GenerationRequest, ProviderError, ReasoningEffort};

#[derive(Debug, Clone, PartialEq)]
pub enum StubCall {
    Store { file_name: String, size: usize },
    Generate(Box<GenerationRequestSnapshot>),
}

/// Owned copy of the fields tests assert on.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequestSnapshot {
    pub system_instruction: String,
    pub user_instruction: String,
    pub file_id: String,
    pub format_name: String,
    pub strict: bool,
    pub reasoning_effort: ReasoningEffort,
}

pub struct StubProvider {
    output: Result<String, String>,
    calls: Mutex<Vec<StubCall>>,
}

impl StubProvider {
    /// Replies to `generate` with `output` verbatim.
    pub fn replying(output: impl Into<String>) -> Self {
        Self {
            output: Ok(output.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fails `generate` with an API error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            output: Err(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<StubCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_generation(&self) -> Option<GenerationRequestSnapshot> {
        self.calls().into_iter().rev().find_map(|c| match c {
            StubCall::Generate(snapshot) => Some(*snapshot),
            StubCall::Store { .. } => None,
        })
    }
}

#[async_trait]
impl AnalysisProvider for StubProvider {
    async fn store_file(
        &self,
        file_name: &str,
        content: Bytes,
    ) -> Result<FileReference, ProviderError> {
        self.calls.lock().unwrap().push(StubCall::Store {
            file_name: file_name.to_string(),
            size: content.len(),
        });
        Ok(FileReference("file-stub-1".to_string()))
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push(StubCall::Generate(Box::new(GenerationRequestSnapshot {
                system_instruction: request.system_instruction.clone(),
                user_instruction: request.user_instruction.clone(),
                file_id: request.file.as_str().to_string(),
                format_name: request.format.name.clone(),
                strict: request.format.strict,
                reasoning_effort: request.reasoning_effort,
            })));

        self.output.clone().map_err(|message| ProviderError::Api {
            status: 500,
            message,
        })
    }
}
