//! HTTP Market Data Client
//!
//! Dexscreener for pair snapshots, Moralis Solana gateway for holders,
//! graduated launchpad tokens, and wallet swap history.

use async_trait::async_trait;
use serde::Deserialize;

use super::MarketDataClient;
use crate::error::{IntelError, Result};
use crate::model::{Holder, LaunchedToken, SwapTransaction, TokenMarket};

const DEXSCREENER_BASE: &str = "https://api.dexscreener.com";
const MORALIS_BASE: &str = "https://solana-gateway.moralis.io";

const MORALIS_API_KEY_VAR: &str = "MORALIS_API_KEY";

/// Market data client over dexscreener + Moralis
pub struct HttpMarketDataClient {
    http: reqwest::Client,
    moralis_api_key: Option<String>,
    dexscreener_base: String,
    moralis_base: String,
}

impl HttpMarketDataClient {
    pub fn new(http: reqwest::Client, moralis_api_key: Option<String>) -> Self {
        Self {
            http,
            moralis_api_key,
            dexscreener_base: DEXSCREENER_BASE.into(),
            moralis_base: MORALIS_BASE.into(),
        }
    }

    /// Read `MORALIS_API_KEY` from the environment; the key is only required
    /// once a Moralis-backed call is made.
    pub fn from_env() -> Self {
        Self::new(
            reqwest::Client::new(),
            std::env::var(MORALIS_API_KEY_VAR).ok(),
        )
    }

    /// Override provider base URLs (for tests against a local server)
    pub fn with_base_urls(
        mut self,
        dexscreener: impl Into<String>,
        moralis: impl Into<String>,
    ) -> Self {
        self.dexscreener_base = dexscreener.into();
        self.moralis_base = moralis.into();
        self
    }

    fn api_key(&self) -> Result<&str> {
        self.moralis_api_key
            .as_deref()
            .ok_or(IntelError::MissingApiKey(MORALIS_API_KEY_VAR))
    }

    async fn moralis_get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let key = self.api_key()?;
        let resp = self
            .http
            .get(url)
            .header("accept", "application/json")
            .header("X-API-Key", key)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(IntelError::Fetch {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }
}

#[async_trait]
impl MarketDataClient for HttpMarketDataClient {
    async fn search_token(&self, query: &str) -> Result<TokenMarket> {
        let url = format!("{}/latest/dex/search/?q={}", self.dexscreener_base, query);
        let resp = self.http.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(IntelError::Fetch {
                status: status.as_u16(),
                message,
            });
        }

        let data: DexSearchResponse = resp.json().await?;
        let pair = data
            .pairs
            .and_then(|pairs| pairs.into_iter().next())
            .ok_or_else(|| IntelError::TokenNotFound(query.to_string()))?;

        Ok(pair.into_market())
    }

    async fn top_holders(&self, address: &str, limit: usize) -> Result<Vec<Holder>> {
        let url = format!(
            "{}/token/mainnet/{}/top-holders?limit={}",
            self.moralis_base, address, limit
        );
        let data: MoralisPage<Holder> = self.moralis_get(&url).await?;
        Ok(data.result)
    }

    async fn graduated_tokens(&self, limit: usize) -> Result<Vec<LaunchedToken>> {
        let url = format!(
            "{}/token/mainnet/exchange/pumpfun/graduated?limit={}",
            self.moralis_base, limit
        );
        let data: MoralisPage<LaunchedToken> = self.moralis_get(&url).await?;
        Ok(data.result)
    }

    async fn wallet_swaps(&self, wallet: &str, limit: usize) -> Result<Vec<SwapTransaction>> {
        let url = format!(
            "{}/account/mainnet/{}/swaps?limit={}&order=DESC",
            self.moralis_base, wallet, limit
        );
        let data: MoralisPage<SwapTransaction> = self.moralis_get(&url).await?;
        Ok(data.result)
    }

    async fn health_check(&self) -> bool {
        // Dexscreener needs no key, so a cheap search doubles as liveness.
        let url = format!("{}/latest/dex/search/?q=SOL", self.dexscreener_base);
        match self.http.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::warn!("market data health check failed: {}", e);
                false
            }
        }
    }

    fn name(&self) -> &str {
        "dexscreener+moralis"
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct MoralisPage<T> {
    result: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct DexSearchResponse {
    pairs: Option<Vec<DexPair>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DexPair {
    base_token: DexBaseToken,
    #[serde(default)]
    price_usd: String,
    #[serde(default)]
    price_native: String,
    #[serde(default)]
    liquidity: DexLiquidity,
    #[serde(default)]
    volume: DexWindow,
    #[serde(default)]
    price_change: DexWindow,
    #[serde(default)]
    txns: DexTxns,
    #[serde(default)]
    fdv: f64,
    #[serde(default)]
    market_cap: f64,
    #[serde(default)]
    info: Option<DexInfo>,
}

#[derive(Debug, Deserialize)]
struct DexBaseToken {
    address: String,
    name: String,
    symbol: String,
}

#[derive(Debug, Default, Deserialize)]
struct DexLiquidity {
    #[serde(default)]
    usd: f64,
}

#[derive(Debug, Default, Deserialize)]
struct DexWindow {
    #[serde(default)]
    h24: f64,
}

#[derive(Debug, Default, Deserialize)]
struct DexTxns {
    #[serde(default)]
    h24: DexTxnCounts,
}

#[derive(Debug, Default, Deserialize)]
struct DexTxnCounts {
    #[serde(default)]
    buys: u32,
    #[serde(default)]
    sells: u32,
}

#[derive(Debug, Deserialize)]
struct DexInfo {
    #[serde(default)]
    websites: Vec<DexLink>,
    #[serde(default)]
    socials: Vec<DexSocial>,
}

#[derive(Debug, Deserialize)]
struct DexLink {
    url: String,
}

#[derive(Debug, Deserialize)]
struct DexSocial {
    #[serde(rename = "type")]
    kind: String,
    url: String,
}

impl DexPair {
    fn into_market(self) -> TokenMarket {
        let website = self
            .info
            .as_ref()
            .and_then(|i| i.websites.first())
            .map(|w| w.url.clone());
        let twitter = self
            .info
            .as_ref()
            .and_then(|i| i.socials.iter().find(|s| s.kind == "twitter"))
            .map(|s| s.url.clone());

        TokenMarket {
            address: self.base_token.address,
            name: self.base_token.name,
            symbol: self.base_token.symbol,
            price_usd: self.price_usd,
            price_native: self.price_native,
            liquidity_usd: self.liquidity.usd,
            volume_24h: self.volume.h24,
            price_change_24h: self.price_change.h24,
            buys_24h: self.txns.h24.buys,
            sells_24h: self.txns.h24.sells,
            fdv: self.fdv,
            market_cap: self.market_cap,
            website,
            twitter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_moralis_calls_require_api_key() {
        let client = HttpMarketDataClient::new(reqwest::Client::new(), None);
        let err = client.top_holders("SomeMint", 10).await.unwrap_err();
        assert!(matches!(err, IntelError::MissingApiKey(_)));
    }

    #[test]
    fn test_dex_pair_deserialization() {
        let raw = serde_json::json!({
            "baseToken": {"address": "Mint111", "name": "Bonk", "symbol": "BONK"},
            "priceUsd": "0.000021",
            "priceNative": "0.00000012",
            "liquidity": {"usd": 250000.0, "native": 1200.0},
            "volume": {"h24": 1000000.0, "h6": 300000.0},
            "priceChange": {"h24": 25.0},
            "txns": {"h24": {"buys": 500, "sells": 200}},
            "fdv": 1500000.0,
            "marketCap": 1400000.0,
            "info": {
                "websites": [{"name": "site", "url": "https://bonk.example"}],
                "socials": [
                    {"type": "telegram", "url": "https://t.me/bonk"},
                    {"type": "twitter", "url": "https://x.com/bonk"}
                ]
            }
        });

        let pair: DexPair = serde_json::from_value(raw).unwrap();
        let market = pair.into_market();

        assert_eq!(market.symbol, "BONK");
        assert_eq!(market.liquidity_usd, 250_000.0);
        assert_eq!(market.buys_24h, 500);
        assert_eq!(market.twitter.as_deref(), Some("https://x.com/bonk"));
        assert_eq!(market.website.as_deref(), Some("https://bonk.example"));
    }

    #[test]
    fn test_dex_pair_tolerates_missing_fields() {
        let raw = serde_json::json!({
            "baseToken": {"address": "Mint222", "name": "Mystery", "symbol": "MYST"}
        });

        let pair: DexPair = serde_json::from_value(raw).unwrap();
        let market = pair.into_market();

        assert_eq!(market.liquidity_usd, 0.0);
        assert!(market.website.is_none());
    }

    #[test]
    fn test_empty_search_is_token_not_found() {
        let raw = serde_json::json!({ "pairs": null });
        let resp: DexSearchResponse = serde_json::from_value(raw).unwrap();
        assert!(resp.pairs.is_none());
    }
}
