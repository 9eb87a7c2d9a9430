//! Application State

use std::sync::Arc;

use agent_core::{LlmProvider, ToolRegistry};
use token_intel::MarketDataClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// LLM provider (OpenAI-compatible endpoint)
    pub provider: Arc<dyn LlmProvider>,

    /// Tool registry with all available tools
    pub tools: Arc<ToolRegistry>,

    /// Market data client backing the direct data endpoints
    pub market: Arc<dyn MarketDataClient>,

    /// Model routed to when the request does not name one
    pub default_model: String,
}
