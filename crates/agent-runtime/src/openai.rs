//! OpenAI-Compatible LLM Provider
//!
//! Implementation of `LlmProvider` against any chat-completions endpoint
//! speaking the OpenAI wire format with function calling (Fireworks, OpenAI,
//! vLLM, ...). Tool schemas are exported with `tool_choice: "auto"`; the
//! streaming path decodes server-sent events into `StreamChunk`s.

use async_trait::async_trait;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use agent_core::{
    error::{AgentError, Result},
    message::{Message, Role},
    provider::{
        Completion, CompletionStream, FinishReason, GenerationOptions, LlmProvider, StreamChunk,
        TokenUsage,
    },
    tool::{ToolCallRequest, ToolSchema},
};

/// Provider configuration
#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    /// Base URL of the chat-completions API (e.g. "https://api.fireworks.ai/inference/v1")
    pub base_url: String,

    /// Bearer token for the provider
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OpenAiConfig {
    /// Read `LLM_BASE_URL` and `LLM_API_KEY` from the environment
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("LLM_BASE_URL")
            .map_err(|_| AgentError::Config("LLM_BASE_URL is not set".into()))?;
        let api_key = std::env::var("LLM_API_KEY")
            .map_err(|_| AgentError::Config("LLM_API_KEY is not set".into()))?;

        Ok(Self {
            base_url,
            api_key,
            timeout_secs: 120,
        })
    }
}

/// OpenAI-compatible chat-completions provider
pub struct OpenAiProvider {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiProvider {
    /// Create from configuration
    pub fn from_config(config: OpenAiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(OpenAiConfig::from_env()?)
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Convert agent messages to the wire format
    fn convert_messages(messages: &[Message]) -> Vec<WireMessage> {
        messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    Role::System => "system",
                    Role::User => "user",
                    Role::Assistant => "assistant",
                    Role::Tool => "tool",
                };
                WireMessage {
                    role,
                    content: Some(m.content.clone()),
                    tool_calls: m
                        .tool_call
                        .as_ref()
                        .map(|call| vec![WireToolCall::from_request(call)]),
                    tool_call_id: m.tool_call_id.clone(),
                }
            })
            .collect()
    }

    /// Convert registry schemas to the wire tool surface
    fn convert_tools(schemas: &[ToolSchema]) -> Vec<WireTool> {
        schemas
            .iter()
            .map(|schema| {
                let mut properties = serde_json::Map::new();
                let mut required = Vec::new();
                for param in &schema.parameters {
                    properties.insert(
                        param.name.clone(),
                        serde_json::json!({
                            "type": param.param_type,
                            "description": param.description,
                        }),
                    );
                    if param.required {
                        required.push(Value::String(param.name.clone()));
                    }
                }

                WireTool {
                    kind: "function",
                    function: WireFunctionDef {
                        name: schema.name.clone(),
                        description: schema.description.clone(),
                        parameters: serde_json::json!({
                            "type": "object",
                            "properties": properties,
                            "required": required,
                        }),
                    },
                }
            })
            .collect()
    }

    fn build_request<'a>(
        &self,
        messages: &[Message],
        tools: Option<&[ToolSchema]>,
        options: &'a GenerationOptions,
        stream: bool,
    ) -> ChatRequest<'a> {
        let wire_tools = tools.filter(|t| !t.is_empty()).map(Self::convert_tools);
        let tool_choice = wire_tools.as_ref().map(|_| "auto");

        ChatRequest {
            model: &options.model,
            messages: Self::convert_messages(messages),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            top_p: options.top_p,
            tools: wire_tools,
            tool_choice,
            stream,
        }
    }

    /// Convert a wire response into a completion
    fn convert_completion(response: ChatResponse, model: &str) -> Result<Completion> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::Provider("response contained no choices".into()))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(WireToolCall::into_request)
            .collect();

        let finish_reason = choice.finish_reason.as_deref().map(|r| match r {
            "length" => FinishReason::Length,
            "tool_calls" => FinishReason::ToolCalls,
            "content_filter" => FinishReason::ContentFilter,
            _ => FinishReason::Stop,
        });

        Ok(Completion {
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
            model: response.model.unwrap_or_else(|| model.to_string()),
            usage: response.usage.map(WireUsage::into_usage),
            finish_reason,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(
        &self,
        messages: &[Message],
        tools: Option<&[ToolSchema]>,
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let body = self.build_request(messages, tools, options, false);

        let resp = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::ProviderUnavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AgentError::Provider(format!("{status}: {message}")));
        }

        let parsed: ChatResponse = resp
            .json()
            .await
            .map_err(|e| AgentError::Parse(e.to_string()))?;

        Self::convert_completion(parsed, &options.model)
    }

    async fn complete_stream(
        &self,
        messages: &[Message],
        tools: Option<&[ToolSchema]>,
        options: &GenerationOptions,
    ) -> Result<CompletionStream> {
        let body = self.build_request(messages, tools, options, true);

        let resp = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::ProviderUnavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AgentError::Provider(format!("{status}: {message}")));
        }

        // SSE frames can split anywhere, so carry a line buffer across
        // network chunks and emit one StreamChunk per complete data line.
        let stream = resp
            .bytes_stream()
            .map(|res| res.map_err(|e| AgentError::Provider(e.to_string())))
            .scan(String::new(), |buffer, res| {
                let chunks: Vec<Result<StreamChunk>> = match res {
                    Err(e) => vec![Err(e)],
                    Ok(bytes) => {
                        buffer.push_str(&String::from_utf8_lossy(&bytes));
                        let mut out = Vec::new();
                        while let Some(pos) = buffer.find('\n') {
                            let line: String = buffer.drain(..=pos).collect();
                            if let Some(chunk) = parse_sse_line(line.trim()) {
                                out.push(chunk);
                            }
                        }
                        out
                    }
                };
                futures::future::ready(Some(chunks))
            })
            .flat_map(futures::stream::iter);

        Ok(Box::pin(stream))
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/models", self.config.base_url.trim_end_matches('/'));
        match self
            .client
            .get(url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
        {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) => {
                tracing::warn!("provider health check failed: {}", e);
                Ok(false)
            }
        }
    }

    fn name(&self) -> &str {
        "openai-compatible"
    }
}

/// Decode one SSE line. Returns `None` for blank lines, comments, and
/// non-data fields; `[DONE]` becomes the terminal chunk.
fn parse_sse_line(line: &str) -> Option<Result<StreamChunk>> {
    let data = line.strip_prefix("data:")?.trim_start();

    if data.is_empty() {
        return None;
    }
    if data == "[DONE]" {
        return Some(Ok(StreamChunk {
            done: true,
            ..Default::default()
        }));
    }

    match serde_json::from_str::<StreamResponse>(data) {
        Ok(parsed) => {
            let choice = parsed.choices.into_iter().next()?;
            let tool_call = choice
                .delta
                .tool_calls
                .unwrap_or_default()
                .into_iter()
                .find_map(|c| c.function.and_then(|f| f.name));

            Some(Ok(StreamChunk {
                delta: choice.delta.content.unwrap_or_default(),
                tool_call,
                done: choice.finish_reason.is_some(),
                usage: parsed.usage.map(WireUsage::into_usage),
            }))
        }
        Err(e) => Some(Err(AgentError::Parse(format!("bad SSE payload: {e}")))),
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    stream: bool,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireToolCall {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: WireFunctionCall,
}

fn function_kind() -> String {
    "function".into()
}

impl WireToolCall {
    fn from_request(request: &ToolCallRequest) -> Self {
        Self {
            id: Some(request.id.clone()),
            kind: function_kind(),
            function: WireFunctionCall {
                name: request.name.clone(),
                arguments: request.arguments.clone(),
            },
        }
    }

    /// The correlation id is provider-supplied; synthesize one if absent so
    /// the tool turn can always be matched back.
    fn into_request(self) -> ToolCallRequest {
        ToolCallRequest {
            id: self
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            name: self.function.name,
            arguments: self.function.arguments,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Serialize)]
struct WireTool {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunctionDef,
}

#[derive(Debug, Serialize)]
struct WireFunctionDef {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<WireChoice>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

impl WireUsage {
    fn into_usage(self) -> TokenUsage {
        TokenUsage {
            prompt_tokens: self.prompt_tokens,
            completion_tokens: self.completion_tokens,
            total_tokens: self.total_tokens,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    choices: Vec<StreamChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: WireDelta,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireDelta {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireDeltaToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireDeltaToolCall {
    #[serde(default)]
    function: Option<WireDeltaFunction>,
}

#[derive(Debug, Deserialize)]
struct WireDeltaFunction {
    #[serde(default)]
    name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::tool::ParameterSchema;

    fn provider() -> OpenAiProvider {
        OpenAiProvider::from_config(OpenAiConfig {
            base_url: "https://llm.example/v1".into(),
            api_key: "test".into(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn schema() -> ToolSchema {
        ToolSchema {
            name: "get_top_holders".into(),
            description: "Fetch top holders".into(),
            parameters: vec![
                ParameterSchema::required("address", "string", "Contract address"),
                ParameterSchema::optional("limit", "number", "Number of holders"),
            ],
        }
    }

    #[test]
    fn test_request_includes_tool_surface() {
        let provider = provider();
        let messages = vec![Message::system("sys"), Message::user("hi")];
        let schemas = vec![schema()];
        let options = GenerationOptions::default();
        let request = provider.build_request(&messages, Some(&schemas), &options, false);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["tool_choice"], "auto");
        assert_eq!(body["tools"][0]["type"], "function");
        assert_eq!(body["tools"][0]["function"]["name"], "get_top_holders");
        assert_eq!(
            body["tools"][0]["function"]["parameters"]["required"],
            serde_json::json!(["address"])
        );
        assert!(body.get("stream").is_none());
    }

    #[test]
    fn test_request_without_tools_omits_surface() {
        let provider = provider();
        let messages = vec![Message::user("hi")];
        let options = GenerationOptions::default();
        let request = provider.build_request(&messages, None, &options, true);

        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("tools").is_none());
        assert!(body.get("tool_choice").is_none());
        assert_eq!(body["stream"], true);
    }

    #[test]
    fn test_tool_turn_serialization() {
        let request = ToolCallRequest::new("call_7", "get_token_data", r#"{"ca":"Mint"}"#);
        let messages = vec![
            Message::assistant_tool_call(request),
            Message::tool(r#"{"ok":true}"#, "call_7"),
        ];
        let wire = OpenAiProvider::convert_messages(&messages);

        let assistant = serde_json::to_value(&wire[0]).unwrap();
        assert_eq!(assistant["tool_calls"][0]["id"], "call_7");
        assert_eq!(
            assistant["tool_calls"][0]["function"]["name"],
            "get_token_data"
        );

        let tool = serde_json::to_value(&wire[1]).unwrap();
        assert_eq!(tool["role"], "tool");
        assert_eq!(tool["tool_call_id"], "call_7");
    }

    #[test]
    fn test_response_with_tool_call() {
        let raw = serde_json::json!({
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_3",
                        "type": "function",
                        "function": {"name": "get_token_data", "arguments": "{\"ca\":\"X\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "model": "llama-v3p3-70b-instruct"
        });

        let parsed: ChatResponse = serde_json::from_value(raw).unwrap();
        let completion = OpenAiProvider::convert_completion(parsed, "fallback").unwrap();

        assert_eq!(completion.finish_reason, Some(FinishReason::ToolCalls));
        let call = completion.tool_call().unwrap();
        assert_eq!(call.id, "call_3");
        assert_eq!(call.name, "get_token_data");
    }

    #[test]
    fn test_missing_correlation_id_gets_synthesized() {
        let raw = serde_json::json!({
            "choices": [{
                "message": {
                    "tool_calls": [{
                        "type": "function",
                        "function": {"name": "get_wallet_swaps", "arguments": "{}"}
                    }]
                }
            }]
        });

        let parsed: ChatResponse = serde_json::from_value(raw).unwrap();
        let completion = OpenAiProvider::convert_completion(parsed, "m").unwrap();
        assert!(!completion.tool_call().unwrap().id.is_empty());
    }

    #[test]
    fn test_parse_sse_lines() {
        assert!(parse_sse_line("").is_none());
        assert!(parse_sse_line(": keep-alive").is_none());
        assert!(parse_sse_line("event: ping").is_none());

        let done = parse_sse_line("data: [DONE]").unwrap().unwrap();
        assert!(done.done);

        let chunk = parse_sse_line(
            r#"data: {"choices":[{"delta":{"content":"hel"},"finish_reason":null}]}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(chunk.delta, "hel");
        assert!(!chunk.done);

        let tool = parse_sse_line(
            r#"data: {"choices":[{"delta":{"tool_calls":[{"index":0,"function":{"name":"get_token_data","arguments":""}}]},"finish_reason":null}]}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(tool.tool_call.as_deref(), Some("get_token_data"));

        let bad = parse_sse_line("data: {broken").unwrap();
        assert!(bad.is_err());
    }
}
