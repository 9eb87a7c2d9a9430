//! Token Data Tool
//!
//! Full token lookup: market snapshot, top holders, verdict, security block.

use async_trait::async_trait;
use std::sync::Arc;

use agent_core::tool::{ParameterSchema, Tool, ToolCall, ToolResult, ToolSchema};
use agent_core::{AgentError, Result as CoreResult};

use crate::market::MarketDataClient;
use crate::report::build_token_report;

/// Tool for looking up token stats by contract address
pub struct TokenDataTool {
    market: Arc<dyn MarketDataClient>,
}

impl TokenDataTool {
    pub fn new(market: Arc<dyn MarketDataClient>) -> Self {
        Self { market }
    }
}

#[async_trait]
impl Tool for TokenDataTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_token_data".into(),
            description:
                "Look up Solana token stats (price, FDV, volume, holders, risk) by contract address"
                    .into(),
            parameters: vec![ParameterSchema::required(
                "ca",
                "string",
                "Contract address of the token",
            )],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let ca = call
            .str_arg("ca")
            .ok_or_else(|| AgentError::ToolArguments("'ca' must be a string".into()))?;

        let report = build_token_report(self.market.as_ref(), ca)
            .await
            .map_err(AgentError::from)?;

        Ok(ToolResult::success(
            "get_token_data",
            call.id.clone(),
            serde_json::to_value(report)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::mock::MOCK_HEALTHY_MINT;
    use crate::market::MockMarketDataClient;
    use agent_core::tool::ToolCallRequest;

    fn call(args: &str) -> ToolCall {
        ToolCall::parse(&ToolCallRequest::new("call_1", "get_token_data", args)).unwrap()
    }

    #[tokio::test]
    async fn test_lookup_success() {
        let tool = TokenDataTool::new(Arc::new(MockMarketDataClient::new()));
        let args = format!(r#"{{"ca": "{MOCK_HEALTHY_MINT}"}}"#);

        let result = tool.execute(&call(&args)).await.unwrap();
        assert!(result.success);
        assert_eq!(result.payload["token"], "Bonk Fixture (BONKF)");
        assert_eq!(result.payload["security"]["lpStatus"], "likely safe");
    }

    #[tokio::test]
    async fn test_unknown_token_is_execution_error() {
        let tool = TokenDataTool::new(Arc::new(MockMarketDataClient::new()));
        let err = tool
            .execute(&call(r#"{"ca": "missing"}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::ToolExecution(_)));
    }
}
