//! # agent-core
//!
//! Provider-agnostic orchestration core for a tool-augmented chat agent.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Agent                                  │
//! │  ┌──────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │ Orchestrator │  │    Tool     │  │   LlmProvider       │  │
//! │  │ (one tool    │──│   Registry  │──│   (Strategy)        │  │
//! │  │  per turn)   │  └─────────────┘  └─────────────────────┘  │
//! │  └──────┬───────┘                                            │
//! │         │  streaming: StreamState (reasoning filter)         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait is the only seam to the language model, so tests
//! substitute a scripted fake and the server injects a real HTTP client.

pub mod agent;
pub mod error;
pub mod message;
pub mod provider;
pub mod stream;
pub mod tool;

pub use agent::{Agent, AgentBuilder, AgentConfig};
pub use error::{AgentError, Result};
pub use message::{Conversation, Message, Role};
pub use provider::LlmProvider;
pub use stream::{strip_reasoning, StreamState};
pub use tool::{Tool, ToolCall, ToolCallRequest, ToolRegistry, ToolResult};
