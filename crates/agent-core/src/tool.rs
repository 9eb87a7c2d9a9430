//! Tool System
//!
//! Schema-described data-fetch capabilities the model may request. The
//! `ToolRegistry` is the single source of truth for both the provider-facing
//! schema export and internal dispatch; tool names exist nowhere else.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{AgentError, Result};

/// Raw tool-call instruction as emitted by the provider. The argument
/// payload is untrusted text; it must be parsed and validated before use.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Correlation id matching the eventual tool result back to this call
    pub id: String,

    /// Tool identifier
    pub name: String,

    /// Raw JSON argument payload
    pub arguments: String,
}

impl ToolCallRequest {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// A parsed, validated tool call ready for dispatch
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool identifier
    pub name: String,

    /// Arguments as an untyped map, checked against the schema at dispatch
    pub arguments: HashMap<String, Value>,

    /// Correlation id carried over from the request
    pub id: String,
}

impl ToolCall {
    /// Parse the raw argument payload of a request. A malformed payload is a
    /// `ToolArguments` error naming the tool; there is no retry.
    pub fn parse(request: &ToolCallRequest) -> Result<Self> {
        let trimmed = request.arguments.trim();
        let arguments: HashMap<String, Value> = if trimmed.is_empty() {
            HashMap::new()
        } else {
            serde_json::from_str(trimmed).map_err(|e| {
                AgentError::ToolArguments(format!(
                    "malformed arguments for tool '{}': {}",
                    request.name, e
                ))
            })?
        };

        Ok(Self {
            name: request.name.clone(),
            arguments,
            id: request.id.clone(),
        })
    }

    /// Fetch a string argument
    pub fn str_arg(&self, name: &str) -> Option<&str> {
        self.arguments.get(name).and_then(|v| v.as_str())
    }

    /// Fetch a numeric argument as usize
    pub fn usize_arg(&self, name: &str) -> Option<usize> {
        self.arguments
            .get(name)
            .and_then(|v| v.as_u64())
            .map(|n| n as usize)
    }
}

/// Result from tool execution, serialized into a tool turn
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool that was called
    pub name: String,

    /// Correlation id of the call this answers
    pub id: String,

    /// Whether execution succeeded
    pub success: bool,

    /// Structured payload on success, error message on failure
    pub payload: Value,
}

impl ToolResult {
    pub fn success(name: impl Into<String>, id: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            success: true,
            payload,
        }
    }

    pub fn failure(name: impl Into<String>, id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            success: false,
            payload: serde_json::json!({ "error": error.into() }),
        }
    }

    /// Serialize the payload for the tool turn content
    pub fn to_turn_content(&self) -> String {
        self.payload.to_string()
    }
}

/// Parameter definition for tool schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Parameter name
    pub name: String,

    /// JSON Schema type (string, number, boolean)
    #[serde(rename = "type")]
    pub param_type: String,

    /// Human-readable description
    pub description: String,

    /// Whether this parameter is required
    #[serde(default)]
    pub required: bool,
}

impl ParameterSchema {
    pub fn required(
        name: impl Into<String>,
        param_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            description: description.into(),
            required: true,
        }
    }

    pub fn optional(
        name: impl Into<String>,
        param_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            description: description.into(),
            required: false,
        }
    }
}

/// Tool definition schema (for LLM function calling)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique tool identifier (snake_case)
    pub name: String,

    /// Human-readable description (shown to the LLM)
    pub description: String,

    /// Parameter definitions
    pub parameters: Vec<ParameterSchema>,
}

/// Tool trait - implement to add new capabilities
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool's schema for LLM function calling
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with parsed, validated arguments
    async fn execute(&self, call: &ToolCall) -> Result<ToolResult>;

    /// Validate arguments against the declared schema. A missing required
    /// field stops the call before the underlying fetch runs.
    fn validate(&self, call: &ToolCall) -> Result<()> {
        let schema = self.schema();

        for param in &schema.parameters {
            if param.required && !call.arguments.contains_key(&param.name) {
                return Err(AgentError::ToolArguments(format!(
                    "tool '{}' is missing required parameter '{}'",
                    schema.name, param.name
                )));
            }
        }

        Ok(())
    }
}

/// Registry for available tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a new tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let schema = tool.schema();
        self.tools.insert(schema.name.clone(), Arc::new(tool));
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Validate and execute a tool call
    pub async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        let tool = self
            .get(&call.name)
            .ok_or_else(|| AgentError::ToolNotFound(call.name.clone()))?;

        tool.validate(call)?;

        tool.execute(call).await
    }

    /// Get all tool schemas (for the provider-facing tool surface)
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|t| t.schema()).collect()
    }

    /// Get tool names
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "echo".into(),
                description: "Echo back the input".into(),
                parameters: vec![
                    ParameterSchema::required("text", "string", "Text to echo"),
                    ParameterSchema::optional("limit", "number", "Truncate length"),
                ],
            }
        }

        async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
            let text = call.str_arg("text").unwrap_or_default();
            Ok(ToolResult::success(
                "echo",
                call.id.clone(),
                serde_json::json!({ "text": text }),
            ))
        }
    }

    #[test]
    fn test_parse_malformed_arguments() {
        let request = ToolCallRequest::new("call_1", "echo", "{not json");
        let err = ToolCall::parse(&request).unwrap_err();
        assert!(matches!(err, AgentError::ToolArguments(_)));
        assert!(err.to_string().contains("echo"));
    }

    #[test]
    fn test_parse_empty_arguments() {
        let request = ToolCallRequest::new("call_1", "echo", "");
        let call = ToolCall::parse(&request).unwrap();
        assert!(call.arguments.is_empty());
    }

    #[tokio::test]
    async fn test_missing_required_parameter_never_executes() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        let request = ToolCallRequest::new("call_1", "echo", r#"{"limit": 5}"#);
        let call = ToolCall::parse(&request).unwrap();

        let err = registry.execute(&call).await.unwrap_err();
        assert!(matches!(err, AgentError::ToolArguments(_)));
        assert!(err.to_string().contains("text"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry = ToolRegistry::new();
        let request = ToolCallRequest::new("call_1", "nope", "{}");
        let call = ToolCall::parse(&request).unwrap();

        let err = registry.execute(&call).await.unwrap_err();
        assert!(matches!(err, AgentError::ToolNotFound(_)));
    }

    #[tokio::test]
    async fn test_registry_dispatch() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);

        let request = ToolCallRequest::new("call_9", "echo", r#"{"text": "hi"}"#);
        let call = ToolCall::parse(&request).unwrap();

        let result = registry.execute(&call).await.unwrap();
        assert!(result.success);
        assert_eq!(result.id, "call_9");
        assert_eq!(result.payload["text"], "hi");
    }
}
