//! Graduated Tokens Tool
//!
//! Lists tokens that recently graduated off the pump.fun bonding curve.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use agent_core::tool::{ParameterSchema, Tool, ToolCall, ToolResult, ToolSchema};
use agent_core::{AgentError, Result as CoreResult};

use super::DEFAULT_LAUNCH_LIMIT;
use crate::market::MarketDataClient;
use crate::model::LaunchedToken;

/// Launch entry as embedded in the tool payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LaunchSummary {
    contract_address: String,
    name: String,
    symbol: String,
    price_usd: String,
    liquidity: String,
    fdv: String,
    graduated_at: String,
}

impl From<&LaunchedToken> for LaunchSummary {
    fn from(token: &LaunchedToken) -> Self {
        Self {
            contract_address: token.address.clone().unwrap_or_else(|| "N/A".into()),
            name: token.name.clone(),
            symbol: token.symbol.clone(),
            price_usd: token
                .price_usd
                .as_deref()
                .map(|p| format!("${p}"))
                .unwrap_or_else(|| "N/A".into()),
            liquidity: token.liquidity.clone().unwrap_or_else(|| "N/A".into()),
            fdv: token
                .fully_diluted_valuation
                .clone()
                .unwrap_or_else(|| "N/A".into()),
            graduated_at: token.graduated_at.format("%b %d, %Y %I:%M %p").to_string(),
        }
    }
}

/// Tool for listing recently launched tokens
pub struct GraduatedTokensTool {
    market: Arc<dyn MarketDataClient>,
}

impl GraduatedTokensTool {
    pub fn new(market: Arc<dyn MarketDataClient>) -> Self {
        Self { market }
    }
}

#[async_trait]
impl Tool for GraduatedTokensTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_graduated_tokens".into(),
            description: "Fetch recently graduated or newly bonded pump.fun tokens".into(),
            parameters: vec![ParameterSchema::optional(
                "limit",
                "number",
                "Number of launches to fetch",
            )],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let limit = call.usize_arg("limit").unwrap_or(DEFAULT_LAUNCH_LIMIT);

        let launches = self
            .market
            .graduated_tokens(limit)
            .await
            .map_err(AgentError::from)?;

        let summaries: Vec<LaunchSummary> = launches.iter().map(LaunchSummary::from).collect();

        Ok(ToolResult::success(
            "get_graduated_tokens",
            call.id.clone(),
            serde_json::to_value(summaries)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::MockMarketDataClient;
    use agent_core::tool::ToolCallRequest;

    #[tokio::test]
    async fn test_no_arguments_needed() {
        let tool = GraduatedTokensTool::new(Arc::new(MockMarketDataClient::new()));
        let call =
            ToolCall::parse(&ToolCallRequest::new("c1", "get_graduated_tokens", "{}")).unwrap();

        assert!(tool.validate(&call).is_ok());
        let result = tool.execute(&call).await.unwrap();
        assert!(result.success);

        let launches = result.payload.as_array().unwrap();
        assert_eq!(launches.len(), 2);
        assert!(launches[0]["priceUsd"].as_str().unwrap().starts_with('$'));
    }

    #[tokio::test]
    async fn test_limit_argument() {
        let tool = GraduatedTokensTool::new(Arc::new(MockMarketDataClient::new()));
        let call = ToolCall::parse(&ToolCallRequest::new(
            "c1",
            "get_graduated_tokens",
            r#"{"limit": 1}"#,
        ))
        .unwrap();

        let result = tool.execute(&call).await.unwrap();
        assert_eq!(result.payload.as_array().unwrap().len(), 1);
    }
}
