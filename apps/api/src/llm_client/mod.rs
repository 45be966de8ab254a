/// LLM client: the single point of entry for all model-provider calls in Biosense.
///
/// No other module may talk to the provider over HTTP. Handlers and the analysis
/// pipeline depend on the `AnalysisProvider` trait, never on `OpenAiClient` directly.
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{
    multipart::{Form, Part},
    Client, Response,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[cfg(test)]
pub mod stub;

/// OpenAI requires this purpose for files referenced from a Responses `input_file`.
const FILE_PURPOSE: &str = "assistants";
const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Model refused the request: {0}")]
    Refusal(String),

    #[error("Response incomplete: {0}")]
    Incomplete(String),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Provider-side trade-off between latency/cost and depth of reasoning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Minimal,
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Debug, Error)]
#[error("unknown reasoning effort '{0}'")]
pub struct UnknownReasoningEffort(String);

impl FromStr for ReasoningEffort {
    type Err = UnknownReasoningEffort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(ReasoningEffort::Minimal),
            "low" => Ok(ReasoningEffort::Low),
            "medium" => Ok(ReasoningEffort::Medium),
            "high" => Ok(ReasoningEffort::High),
            _ => Err(UnknownReasoningEffort(s.to_string())),
        }
    }
}

/// Opaque id of a file held in the provider's storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference(pub String);

impl FileReference {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A named JSON schema the provider must constrain its output to.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredOutputFormat {
    pub name: String,
    pub schema: serde_json::Value,
    pub strict: bool,
}

/// Everything one structured generation call needs.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub user_instruction: String,
    pub file: FileReference,
    pub format: StructuredOutputFormat,
    pub reasoning_effort: ReasoningEffort,
}

/// The narrow provider interface: store a file, then generate against it.
///
/// Carried in `AppState` as `Arc<dyn AnalysisProvider>`.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    async fn store_file(&self, file_name: &str, content: Bytes)
        -> Result<FileReference, ProviderError>;

    /// Returns the raw structured output text. Validation is the caller's job.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError>;
}

// ────────────────────────────────────────────────────────────────────────────
// OpenAI wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    reasoning: ReasoningConfig,
    input: Vec<InputMessage<'a>>,
    text: TextConfig<'a>,
}

#[derive(Debug, Serialize)]
struct ReasoningConfig {
    effort: ReasoningEffort,
}

#[derive(Debug, Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: Vec<InputContent<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum InputContent<'a> {
    InputText { text: &'a str },
    InputFile { file_id: &'a str },
}

#[derive(Debug, Serialize)]
struct TextConfig<'a> {
    format: JsonSchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'static str,
    name: &'a str,
    schema: &'a serde_json::Value,
    strict: bool,
}

#[derive(Debug, Deserialize)]
struct FileObject {
    id: String,
}

#[derive(Debug, Deserialize)]
pub struct ResponsesResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub incomplete_details: Option<IncompleteDetails>,
    #[serde(default)]
    pub output: Vec<OutputItem>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct IncompleteDetails {
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OutputItem {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
pub struct OutputContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: Option<String>,
    pub refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

impl ResponsesResponse {
    /// Concatenates every `output_text` part of the assistant message(s).
    /// A refusal or an incomplete response is an error, never partial text.
    pub fn output_text(&self) -> Result<String, ProviderError> {
        if self.status.as_deref() == Some("incomplete") {
            let reason = self
                .incomplete_details
                .as_ref()
                .and_then(|d| d.reason.clone())
                .unwrap_or_else(|| "unknown".to_string());
            return Err(ProviderError::Incomplete(reason));
        }

        let mut text = String::new();
        for part in self
            .output
            .iter()
            .filter(|item| item.item_type == "message")
            .flat_map(|item| item.content.iter())
        {
            match part.content_type.as_str() {
                "output_text" => text.push_str(part.text.as_deref().unwrap_or_default()),
                "refusal" => {
                    return Err(ProviderError::Refusal(
                        part.refusal.clone().unwrap_or_default(),
                    ))
                }
                _ => {}
            }
        }

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyContent);
        }
        Ok(text)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// OpenAiClient
// ────────────────────────────────────────────────────────────────────────────

/// Production provider backed by the OpenAI Files and Responses APIs.
/// No retries: a failed call fails the request.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(
        api_key: String,
        base_url: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl AnalysisProvider for OpenAiClient {
    async fn store_file(
        &self,
        file_name: &str,
        content: Bytes,
    ) -> Result<FileReference, ProviderError> {
        let size = content.len();
        let part = Part::bytes(content.to_vec())
            .file_name(file_name.to_string())
            .mime_str(PDF_MIME)?;
        let form = Form::new().text("purpose", FILE_PURPOSE).part("file", part);

        let response = self
            .client
            .post(self.url("files"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let file: FileObject = check_status(response).await?.json().await?;
        debug!("Stored file {file_name} ({size} bytes) as {}", file.id);

        Ok(FileReference(file.id))
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let body = ResponsesRequest {
            model: &self.model,
            reasoning: ReasoningConfig {
                effort: request.reasoning_effort,
            },
            input: vec![
                InputMessage {
                    role: "system",
                    content: vec![InputContent::InputText {
                        text: &request.system_instruction,
                    }],
                },
                InputMessage {
                    role: "user",
                    content: vec![
                        InputContent::InputFile {
                            file_id: request.file.as_str(),
                        },
                        InputContent::InputText {
                            text: &request.user_instruction,
                        },
                    ],
                },
            ],
            text: TextConfig {
                format: JsonSchemaFormat {
                    format_type: "json_schema",
                    name: &request.format.name,
                    schema: &request.format.schema,
                    strict: request.format.strict,
                },
            },
        };

        let response = self
            .client
            .post(self.url("responses"))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let parsed: ResponsesResponse = check_status(response).await?.json().await?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "Responses call succeeded: input_tokens={}, output_tokens={}",
                usage.input_tokens, usage.output_tokens
            );
        }

        parsed.output_text()
    }
}

/// Turns a non-2xx response into `ProviderError::Api`, preferring the API's own message.
async fn check_status(response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<OpenAiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    Err(ProviderError::Api {
        status: status.as_u16(),
        message,
    })
}
