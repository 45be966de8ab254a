use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::AnalysisProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model provider. `OpenAiClient` in production, a stub in tests.
    pub provider: Arc<dyn AnalysisProvider>,
    pub config: Config,
}
