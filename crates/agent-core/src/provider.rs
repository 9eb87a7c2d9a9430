//! LLM Provider Strategy Pattern
//!
//! Defines a common interface for language-model backends. The orchestrator
//! holds the provider behind this trait so tests can substitute a scripted
//! fake and deployments can swap endpoints without touching agent logic.

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;

use crate::error::Result;
use crate::message::Message;
use crate::tool::{ToolCallRequest, ToolSchema};

/// Configuration for LLM generation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier (e.g. "accounts/fireworks/models/llama-v3p3-70b-instruct")
    pub model: String,

    /// Temperature for sampling (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Top-p nucleus sampling
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    2048
}
fn default_top_p() -> f32 {
    0.9
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: "llama-v3p3-70b-instruct".into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
        }
    }
}

/// Response from an LLM completion
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text (may be empty for pure tool-call responses)
    pub content: String,

    /// Tool-call instructions requested by the model, in emission order.
    /// The orchestrator acts on the first one only.
    #[serde(default)]
    pub tool_calls: Vec<ToolCallRequest>,

    /// Model that generated this response
    pub model: String,

    /// Token usage statistics (if available)
    pub usage: Option<TokenUsage>,

    /// Finish reason
    pub finish_reason: Option<FinishReason>,
}

impl Completion {
    /// First tool-call instruction, if the model requested one
    pub fn tool_call(&self) -> Option<&ToolCallRequest> {
        self.tool_calls.first()
    }
}

/// Token usage statistics
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Reason for completion finishing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
    Error,
}

/// A chunk from streaming completion
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StreamChunk {
    /// The text delta
    pub delta: String,

    /// Name of a tool the model started calling mid-stream, if any.
    /// Streaming mode logs these; it never executes them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<String>,

    /// Whether this is the final chunk
    pub done: bool,

    /// Token usage (typically only on the final chunk)
    pub usage: Option<TokenUsage>,
}

/// Stream type for completion streaming
pub type CompletionStream = Pin<Box<dyn Stream<Item = Result<StreamChunk>> + Send>>;

/// Strategy trait for LLM providers
///
/// Implement this trait to add support for new LLM backends.
/// The agent works exclusively through this interface.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion. `tools` carries the registry schema when the
    /// model is allowed to request a tool ("auto" tool choice); `None` means
    /// plain chat with no tool surface.
    async fn complete(
        &self,
        messages: &[Message],
        tools: Option<&[ToolSchema]>,
        options: &GenerationOptions,
    ) -> Result<Completion>;

    /// Generate a streaming completion with the same tool semantics
    async fn complete_stream(
        &self,
        messages: &[Message],
        tools: Option<&[ToolSchema]>,
        options: &GenerationOptions,
    ) -> Result<CompletionStream>;

    /// Check if the provider is reachable and configured correctly
    async fn health_check(&self) -> Result<bool>;

    /// Provider name (e.g. "fireworks", "openai")
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_options_defaults() {
        let opts = GenerationOptions::default();
        assert_eq!(opts.temperature, 0.7);
        assert_eq!(opts.max_tokens, 2048);
    }

    #[test]
    fn test_completion_first_tool_call() {
        let completion = Completion {
            tool_calls: vec![
                ToolCallRequest::new("call_1", "get_token_data", "{}"),
                ToolCallRequest::new("call_2", "get_top_holders", "{}"),
            ],
            ..Default::default()
        };
        assert_eq!(completion.tool_call().unwrap().name, "get_token_data");
    }
}
