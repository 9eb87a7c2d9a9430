//! # agent-runtime
//!
//! Provider implementations for the token intelligence agent.
//!
//! ## Providers
//!
//! - **OpenAI-compatible** (default): any chat-completions endpoint that
//!   speaks the OpenAI wire format with function calling, e.g. Fireworks.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::OpenAiProvider;
//!
//! let provider = OpenAiProvider::from_env()?;
//! let agent = AgentBuilder::new()
//!     .provider(Arc::new(provider))
//!     .build()?;
//! ```

pub mod openai;

pub use openai::{OpenAiConfig, OpenAiProvider};

// Re-export core types for convenience
pub use agent_core::{
    Agent, AgentError, LlmProvider, Message, Result, Role, Tool, ToolRegistry,
};
