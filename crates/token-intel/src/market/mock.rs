//! Mock Market Data Client
//!
//! Fixture-backed client for tests and offline demos. Serves two tokens: a
//! liquid large-cap style pair and a thin fresh launch with a whale problem.

use async_trait::async_trait;
use chrono::{Duration, Utc};

use super::MarketDataClient;
use crate::error::{IntelError, Result};
use crate::model::{Holder, LaunchedToken, SwapLeg, SwapTransaction, TokenMarket};

/// Address of the healthy fixture token
pub const MOCK_HEALTHY_MINT: &str = "BonkFixture1111111111111111111111111111111";

/// Address of the risky fixture token (thin liquidity, concentrated supply)
pub const MOCK_RISKY_MINT: &str = "RugFixture22222222222222222222222222222222";

/// Wallet address with fixture swap history
pub const MOCK_WALLET: &str = "Wa11etFixture333333333333333333333333333333";

/// Mock market data client with static fixtures
#[derive(Default)]
pub struct MockMarketDataClient;

impl MockMarketDataClient {
    pub fn new() -> Self {
        Self
    }

    fn healthy_token() -> TokenMarket {
        TokenMarket {
            address: MOCK_HEALTHY_MINT.into(),
            name: "Bonk Fixture".into(),
            symbol: "BONKF".into(),
            price_usd: "0.000021".into(),
            price_native: "0.00000012".into(),
            liquidity_usd: 450_000.0,
            volume_24h: 2_300_000.0,
            price_change_24h: 24.0,
            buys_24h: 1_800,
            sells_24h: 900,
            fdv: 21_000_000.0,
            market_cap: 20_500_000.0,
            website: Some("https://bonk.example".into()),
            twitter: Some("https://x.com/bonkfixture".into()),
        }
    }

    fn risky_token() -> TokenMarket {
        TokenMarket {
            address: MOCK_RISKY_MINT.into(),
            name: "Rug Fixture".into(),
            symbol: "RUGF".into(),
            price_usd: "0.0000004".into(),
            price_native: "0.000000002".into(),
            liquidity_usd: 6_500.0,
            volume_24h: 14_000.0,
            price_change_24h: -42.0,
            buys_24h: 12,
            sells_24h: 95,
            fdv: 80_000.0,
            market_cap: 75_000.0,
            website: None,
            twitter: None,
        }
    }

    fn holder(owner: &str, balance: &str, pct: f64) -> Holder {
        Holder {
            owner_address: owner.into(),
            balance_formatted: balance.into(),
            usd_value: None,
            percentage_relative_to_total_supply: pct,
            is_contract: false,
        }
    }
}

#[async_trait]
impl MarketDataClient for MockMarketDataClient {
    async fn search_token(&self, query: &str) -> Result<TokenMarket> {
        match query {
            MOCK_HEALTHY_MINT | "BONKF" => Ok(Self::healthy_token()),
            MOCK_RISKY_MINT | "RUGF" => Ok(Self::risky_token()),
            other => Err(IntelError::TokenNotFound(other.to_string())),
        }
    }

    async fn top_holders(&self, address: &str, limit: usize) -> Result<Vec<Holder>> {
        let holders = match address {
            MOCK_HEALTHY_MINT => vec![
                Self::holder("HealthyWhale1", "52000000000", 4.8),
                Self::holder("HealthyWhale2", "38000000000", 3.5),
                Self::holder("HealthyWhale3", "21000000000", 1.9),
            ],
            MOCK_RISKY_MINT => vec![
                Self::holder("RugDeployer", "610000000000", 61.0),
                Self::holder("RugSidekick", "90000000000", 9.0),
            ],
            other => return Err(IntelError::TokenNotFound(other.to_string())),
        };
        Ok(holders.into_iter().take(limit).collect())
    }

    async fn graduated_tokens(&self, limit: usize) -> Result<Vec<LaunchedToken>> {
        let now = Utc::now();
        let launches = vec![
            LaunchedToken {
                address: Some("FreshMint1".into()),
                name: "Fresh One".into(),
                symbol: "FRSH1".into(),
                price_usd: Some("0.00009".into()),
                liquidity: Some("31000".into()),
                fully_diluted_valuation: Some("90000".into()),
                graduated_at: now - Duration::hours(2),
                logo: None,
            },
            LaunchedToken {
                address: Some("FreshMint2".into()),
                name: "Fresh Two".into(),
                symbol: "FRSH2".into(),
                price_usd: Some("0.00017".into()),
                liquidity: Some("54000".into()),
                fully_diluted_valuation: Some("170000".into()),
                graduated_at: now - Duration::hours(9),
                logo: None,
            },
        ];
        Ok(launches.into_iter().take(limit).collect())
    }

    async fn wallet_swaps(&self, wallet: &str, limit: usize) -> Result<Vec<SwapTransaction>> {
        if wallet != MOCK_WALLET {
            return Err(IntelError::WalletNotFound(wallet.to_string()));
        }

        let now = Utc::now();
        let swaps = vec![
            SwapTransaction {
                block_timestamp: now - Duration::minutes(30),
                transaction_type: "buy".into(),
                bought: SwapLeg {
                    symbol: "BONKF".into(),
                    amount: "1500000".into(),
                    usd_amount: "31.5".into(),
                },
                sold: SwapLeg {
                    symbol: "SOL".into(),
                    amount: "0.21".into(),
                    usd_amount: "31.5".into(),
                },
                total_value_usd: "31.5".into(),
                exchange_name: "Raydium".into(),
                pair_label: "BONKF/SOL".into(),
                transaction_hash: "5KtP9fixturehash1111111111111111111111".into(),
            },
            SwapTransaction {
                block_timestamp: now - Duration::hours(5),
                transaction_type: "sell".into(),
                bought: SwapLeg {
                    symbol: "SOL".into(),
                    amount: "1.05".into(),
                    usd_amount: "157.0".into(),
                },
                sold: SwapLeg {
                    symbol: "RUGF".into(),
                    amount: "390000000".into(),
                    usd_amount: "157.0".into(),
                },
                total_value_usd: "157.0".into(),
                exchange_name: "Orca".into(),
                pair_label: "RUGF/SOL".into(),
                transaction_hash: "3KmQ7fixturehash2222222222222222222222".into(),
            },
        ];
        Ok(swaps.into_iter().take(limit).collect())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_known_tokens() {
        let client = MockMarketDataClient::new();
        let healthy = client.search_token("BONKF").await.unwrap();
        assert!(healthy.liquidity_usd > 100_000.0);

        let risky = client.search_token(MOCK_RISKY_MINT).await.unwrap();
        assert!(risky.liquidity_usd < 10_000.0);
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let client = MockMarketDataClient::new();
        let err = client.search_token("nonsense").await.unwrap_err();
        assert!(matches!(err, IntelError::TokenNotFound(_)));
    }

    #[tokio::test]
    async fn test_holder_limit_respected() {
        let client = MockMarketDataClient::new();
        let holders = client.top_holders(MOCK_HEALTHY_MINT, 2).await.unwrap();
        assert_eq!(holders.len(), 2);
    }

    #[tokio::test]
    async fn test_swap_history_ordering() {
        let client = MockMarketDataClient::new();
        let swaps = client.wallet_swaps(MOCK_WALLET, 10).await.unwrap();
        assert!(swaps.len() >= 2);
        assert!(swaps[0].block_timestamp > swaps[1].block_timestamp);
    }
}
