//! Wallet Swaps Tool

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use agent_core::tool::{ParameterSchema, Tool, ToolCall, ToolResult, ToolSchema};
use agent_core::{AgentError, Result as CoreResult};

use super::DEFAULT_LIST_LIMIT;
use crate::market::MarketDataClient;
use crate::model::{SwapLeg, SwapTransaction};

/// Swap entry as embedded in the tool payload: structured fields plus a
/// ready-made one-line summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SwapSummary {
    summary: String,
    transaction_hash: String,
    transaction_type: String,
    block_timestamp: String,
    pair_label: String,
    exchange_name: String,
    bought: SwapLeg,
    sold: SwapLeg,
    total_value_usd: String,
}

impl From<&SwapTransaction> for SwapSummary {
    fn from(tx: &SwapTransaction) -> Self {
        Self {
            summary: tx.summary_line(),
            transaction_hash: tx.transaction_hash.clone(),
            transaction_type: tx.transaction_type.clone(),
            block_timestamp: tx.block_timestamp.to_rfc3339(),
            pair_label: tx.pair_label.clone(),
            exchange_name: tx.exchange_name.clone(),
            bought: tx.bought.clone(),
            sold: tx.sold.clone(),
            total_value_usd: tx.total_value_usd.clone(),
        }
    }
}

/// Tool for fetching a wallet's swap history
pub struct WalletSwapsTool {
    market: Arc<dyn MarketDataClient>,
}

impl WalletSwapsTool {
    pub fn new(market: Arc<dyn MarketDataClient>) -> Self {
        Self { market }
    }
}

#[async_trait]
impl Tool for WalletSwapsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_wallet_swaps".into(),
            description: "Get recent swap transactions of a Solana wallet address".into(),
            parameters: vec![
                ParameterSchema::required("wallet", "string", "Wallet address"),
                ParameterSchema::optional("limit", "number", "Number of swaps to fetch"),
            ],
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let wallet = call
            .str_arg("wallet")
            .ok_or_else(|| AgentError::ToolArguments("'wallet' must be a string".into()))?;
        let limit = call.usize_arg("limit").unwrap_or(DEFAULT_LIST_LIMIT);

        let swaps = self
            .market
            .wallet_swaps(wallet, limit)
            .await
            .map_err(AgentError::from)?;

        let summaries: Vec<SwapSummary> = swaps.iter().map(SwapSummary::from).collect();

        Ok(ToolResult::success(
            "get_wallet_swaps",
            call.id.clone(),
            serde_json::to_value(summaries)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::mock::MOCK_WALLET;
    use crate::market::MockMarketDataClient;
    use agent_core::tool::ToolCallRequest;

    #[tokio::test]
    async fn test_swap_history_payload() {
        let tool = WalletSwapsTool::new(Arc::new(MockMarketDataClient::new()));
        let args = format!(r#"{{"wallet": "{MOCK_WALLET}", "limit": 1}}"#);
        let call = ToolCall::parse(&ToolCallRequest::new("c1", "get_wallet_swaps", &args)).unwrap();

        let result = tool.execute(&call).await.unwrap();
        assert!(result.success);

        let swaps = result.payload.as_array().unwrap();
        assert_eq!(swaps.len(), 1);
        assert!(swaps[0]["summary"].as_str().unwrap().contains("Bought"));
    }

    #[tokio::test]
    async fn test_unknown_wallet_is_execution_error() {
        let tool = WalletSwapsTool::new(Arc::new(MockMarketDataClient::new()));
        let call = ToolCall::parse(&ToolCallRequest::new(
            "c1",
            "get_wallet_swaps",
            r#"{"wallet": "nobody"}"#,
        ))
        .unwrap();

        let err = tool.execute(&call).await.unwrap_err();
        assert!(matches!(err, AgentError::ToolExecution(_)));
    }
}
