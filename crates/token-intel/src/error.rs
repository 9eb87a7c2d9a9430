//! Error Types for Token Intelligence

use thiserror::Error;

pub type Result<T> = std::result::Result<T, IntelError>;

#[derive(Error, Debug)]
pub enum IntelError {
    #[error("Fetch failed with status {status}: {message}")]
    Fetch { status: u16, message: String },

    #[error("Token not found for query \"{0}\"")]
    TokenNotFound(String),

    #[error("Wallet not found: {0}")]
    WalletNotFound(String),

    #[error("Missing API key: set {0} in the environment")]
    MissingApiKey(&'static str),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<IntelError> for agent_core::AgentError {
    fn from(err: IntelError) -> Self {
        agent_core::AgentError::ToolExecution(err.to_string())
    }
}
