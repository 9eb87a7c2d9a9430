//! Market Data Providers
//!
//! Abstraction over the upstream market-data services (dexscreener for pair
//! snapshots, the Moralis Solana gateway for holders, launches, and swaps).

mod http;
pub mod mock;

pub use http::HttpMarketDataClient;
pub use mock::MockMarketDataClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Holder, LaunchedToken, SwapTransaction, TokenMarket};

/// Market data client trait (Strategy pattern)
///
/// The HTTP client hits real providers; the mock serves fixtures for tests
/// and offline demos. The core never retries these calls internally.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Search for a token by contract address or name; returns the best pair
    async fn search_token(&self, query: &str) -> Result<TokenMarket>;

    /// Top holders of a token, ordered by share of supply
    async fn top_holders(&self, address: &str, limit: usize) -> Result<Vec<Holder>>;

    /// Recently graduated launchpad tokens
    async fn graduated_tokens(&self, limit: usize) -> Result<Vec<LaunchedToken>>;

    /// Swap history of a wallet, most recent first
    async fn wallet_swaps(&self, wallet: &str, limit: usize) -> Result<Vec<SwapTransaction>>;

    /// Whether the provider is reachable
    async fn health_check(&self) -> bool;

    /// Provider name
    fn name(&self) -> &str;
}
