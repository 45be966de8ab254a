// Exam analysis: intake, request composition, schema contract, validation, presentation.
// Provider calls go through llm_client::AnalysisProvider only.

pub mod analyzer;
pub mod composer;
pub mod handlers;
pub mod intake;
pub mod models;
pub mod presentation;
pub mod prompts;
pub mod schema;
pub mod validator;

#[cfg(test)]
pub mod fixtures;
