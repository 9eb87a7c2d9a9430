//! Agent Orchestrator
//!
//! Drives one user turn through the language-model provider. At most one
//! tool is invoked per turn: the orchestrator acts on the first tool-call
//! instruction, feeds the serialized result back as a tool turn, and issues
//! exactly one follow-up completion with no tool surface. Streaming mode
//! accumulates deltas until a reasoning-free answer is available, then
//! returns that single string.

use std::sync::Arc;

use futures::StreamExt;

use crate::error::{AgentError, Result};
use crate::message::{Conversation, Message};
use crate::provider::{GenerationOptions, LlmProvider};
use crate::stream::{strip_reasoning, StreamState};
use crate::tool::{ToolCall, ToolCallRequest, ToolRegistry, ToolResult};

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// System prompt encoding persona, capability list, and constraints
    pub system_prompt: String,

    /// Generation options
    pub generation: GenerationOptions,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: "You are a helpful assistant.".into(),
            generation: GenerationOptions::default(),
        }
    }
}

/// The main Agent struct
pub struct Agent {
    provider: Arc<dyn LlmProvider>,
    tools: Arc<ToolRegistry>,
    config: AgentConfig,
}

impl Agent {
    /// Create a new agent
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        tools: Arc<ToolRegistry>,
        config: AgentConfig,
    ) -> Self {
        Self {
            provider,
            tools,
            config,
        }
    }

    /// Answer a question in single-shot mode.
    ///
    /// One model round-trip, optionally one tool execution, and one
    /// follow-up round-trip. The returned text never contains a paired
    /// reasoning span. A tool-call instruction in the follow-up response is
    /// not processed further.
    pub async fn answer(&self, question: &str) -> Result<String> {
        if question.trim().is_empty() {
            return Err(AgentError::InvalidInput("question must not be empty".into()));
        }

        let mut conversation = Conversation::with_system_prompt(&self.config.system_prompt);
        conversation.push(Message::user(question));

        let schemas = self.tools.schemas();
        let completion = self
            .provider
            .complete(conversation.messages(), Some(&schemas), &self.config.generation)
            .await?;

        let Some(mut request) = completion.tool_call().cloned() else {
            return Ok(strip_reasoning(&completion.content));
        };

        if completion.tool_calls.len() > 1 {
            tracing::debug!(
                ignored = completion.tool_calls.len() - 1,
                "model requested multiple tools; only the first is executed"
            );
        }

        // A provider-omitted correlation id is synthesized here so the
        // assistant turn and the tool turn carry the same id.
        if request.id.is_empty() {
            request.id = uuid::Uuid::new_v4().to_string();
        }

        tracing::debug!(tool = %request.name, id = %request.id, "executing tool");
        let result = self.run_tool(&request).await;

        conversation.push(Message::assistant_tool_call(request.clone()));
        conversation.push(Message::tool(result.to_turn_content(), result.id.clone()));

        let follow_up = self
            .provider
            .complete(conversation.messages(), None, &self.config.generation)
            .await?;

        Ok(strip_reasoning(&follow_up.content))
    }

    /// Answer a question in streaming mode.
    ///
    /// Deltas accumulate until the buffer, net of any reasoning span, has
    /// visible content; that trimmed string is returned and the stream is
    /// abandoned. Tool calls observed mid-stream are logged, never executed.
    /// `Ok(None)` means the stream ended with nothing deliverable.
    pub async fn answer_stream(&self, question: &str) -> Result<Option<String>> {
        if question.trim().is_empty() {
            return Err(AgentError::InvalidInput("question must not be empty".into()));
        }

        let mut conversation = Conversation::with_system_prompt(&self.config.system_prompt);
        conversation.push(Message::user(question));

        let schemas = self.tools.schemas();
        let mut stream = self
            .provider
            .complete_stream(conversation.messages(), Some(&schemas), &self.config.generation)
            .await?;

        let mut state = StreamState::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;

            if let Some(name) = &chunk.tool_call {
                tracing::warn!(
                    tool = %name,
                    "tool call received mid-stream; streaming mode does not execute tools"
                );
            }

            if !chunk.delta.is_empty() {
                if let Some(answer) = state.observe(&chunk.delta) {
                    return Ok(Some(answer));
                }
            }

            if chunk.done {
                break;
            }
        }

        Ok(None)
    }

    /// Parse, validate, and execute one tool call. Every failure along the
    /// way is absorbed into a failure `ToolResult` carrying the same
    /// correlation id, so the model still gets a turn to respond gracefully.
    async fn run_tool(&self, request: &ToolCallRequest) -> ToolResult {
        let call = match ToolCall::parse(request) {
            Ok(call) => call,
            Err(e) => {
                tracing::warn!(tool = %request.name, error = %e, "tool argument parse failed");
                return ToolResult::failure(&request.name, request.id.clone(), e.user_message());
            }
        };

        match self.tools.execute(&call).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(tool = %request.name, error = %e, "tool execution failed");
                ToolResult::failure(&request.name, request.id.clone(), e.user_message())
            }
        }
    }

    /// Get the tool registry
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Get configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// Builder for Agent configuration
pub struct AgentBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    tools: ToolRegistry,
    config: AgentConfig,
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            tools: ToolRegistry::new(),
            config: AgentConfig::default(),
        }
    }

    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn tool<T: crate::tool::Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.register(tool);
        self
    }

    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.generation.model = model.into();
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.generation.temperature = temp;
        self
    }

    pub fn build(self) -> Result<Agent> {
        let provider = self
            .provider
            .ok_or_else(|| AgentError::Config("provider is required".into()))?;

        Ok(Agent::new(provider, Arc::new(self.tools), self.config))
    }
}
