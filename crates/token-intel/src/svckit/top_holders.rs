//! Top Holders Tool

use async_trait::async_trait;
use std::sync::Arc;

use agent_core::tool::{ParameterSchema, Tool, ToolCall, ToolResult, ToolSchema};
use agent_core::{AgentError, Result as CoreResult};

use super::DEFAULT_LIST_LIMIT;
use crate::market::MarketDataClient;
use crate::model::HolderSummary;

/// Tool for fetching a token's top holders
pub struct TopHoldersTool {
    market: Arc<dyn MarketDataClient>,
}

impl TopHoldersTool {
    pub fn new(market: Arc<dyn MarketDataClient>) -> Self {
        Self { market }
    }
}

#[async_trait]
impl Tool for TopHoldersTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_top_holders".into(),
            description: "Fetch the top holders of a Solana token given its contract address"
                .into(),
            parameters: vec![
                ParameterSchema::required("address", "string", "Contract address of the token"),
                ParameterSchema::optional("limit", "number", "Number of holders to fetch"),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let address = call
            .str_arg("address")
            .ok_or_else(|| AgentError::ToolArguments("'address' must be a string".into()))?;
        let limit = call.usize_arg("limit").unwrap_or(DEFAULT_LIST_LIMIT);

        let holders = self
            .market
            .top_holders(address, limit)
            .await
            .map_err(AgentError::from)?;

        let summaries: Vec<HolderSummary> = holders.iter().map(HolderSummary::from).collect();

        Ok(ToolResult::success(
            "get_top_holders",
            call.id.clone(),
            serde_json::to_value(summaries)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::mock::MOCK_HEALTHY_MINT;
    use crate::market::MockMarketDataClient;
    use agent_core::tool::ToolCallRequest;

    #[tokio::test]
    async fn test_default_limit_applies() {
        let tool = TopHoldersTool::new(Arc::new(MockMarketDataClient::new()));
        let args = format!(r#"{{"address": "{MOCK_HEALTHY_MINT}"}}"#);
        let call = ToolCall::parse(&ToolCallRequest::new("c1", "get_top_holders", &args)).unwrap();

        let result = tool.execute(&call).await.unwrap();
        assert!(result.success);
        let holders = result.payload.as_array().unwrap();
        assert!(!holders.is_empty());
        assert!(holders[0]["ownerAddress"].is_string());
    }

    #[tokio::test]
    async fn test_validation_catches_missing_address() {
        let tool = TopHoldersTool::new(Arc::new(MockMarketDataClient::new()));
        let call =
            ToolCall::parse(&ToolCallRequest::new("c1", "get_top_holders", r#"{"limit": 5}"#))
                .unwrap();

        let err = tool.validate(&call).unwrap_err();
        assert!(matches!(err, AgentError::ToolArguments(_)));
        assert!(err.to_string().contains("address"));
    }
}
