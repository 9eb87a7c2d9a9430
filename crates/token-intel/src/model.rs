//! Domain Models
//!
//! Data shapes for Solana token market snapshots, holder listings, launch
//! listings, and wallet swap history. Upstream feeds return prices as
//! strings; those stay strings for display, while the fields the scoring
//! engine reads (liquidity, price change, transaction counts) are numeric.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Market snapshot for one token pair
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenMarket {
    /// Token mint address
    pub address: String,

    /// Display name (e.g. "Bonk")
    pub name: String,

    /// Ticker symbol (e.g. "BONK")
    pub symbol: String,

    /// Price in USD, as reported by the feed
    pub price_usd: String,

    /// Price in SOL, as reported by the feed
    pub price_native: String,

    /// Pooled liquidity in USD
    pub liquidity_usd: f64,

    /// 24-hour trading volume in USD
    pub volume_24h: f64,

    /// 24-hour price change percentage
    pub price_change_24h: f64,

    /// 24-hour buy transaction count
    pub buys_24h: u32,

    /// 24-hour sell transaction count
    pub sells_24h: u32,

    /// Fully-diluted valuation in USD
    pub fdv: f64,

    /// Market capitalization in USD
    pub market_cap: f64,

    /// Project website, if listed
    pub website: Option<String>,

    /// Project twitter, if listed
    pub twitter: Option<String>,
}

/// One entry in a token's top-holder listing
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holder {
    /// Holder wallet address
    pub owner_address: String,

    /// Balance formatted in whole-token units
    pub balance_formatted: String,

    /// USD value of the holding
    #[serde(default)]
    pub usd_value: Option<String>,

    /// Share of total supply held, in percent
    pub percentage_relative_to_total_supply: f64,

    /// Whether the holder is a program/contract account
    #[serde(default)]
    pub is_contract: bool,
}

/// A recently graduated (bonded) launchpad token
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchedToken {
    /// Token mint address
    #[serde(default)]
    pub address: Option<String>,

    pub name: String,

    pub symbol: String,

    /// Price in USD at listing time
    #[serde(default)]
    pub price_usd: Option<String>,

    #[serde(default)]
    pub liquidity: Option<String>,

    #[serde(default)]
    pub fully_diluted_valuation: Option<String>,

    /// When the token graduated off the launchpad bonding curve
    pub graduated_at: DateTime<Utc>,

    #[serde(default)]
    pub logo: Option<String>,
}

/// One leg of a swap (the asset bought or sold)
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapLeg {
    pub symbol: String,
    pub amount: String,
    pub usd_amount: String,
}

/// A single swap transaction from a wallet's history
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapTransaction {
    pub block_timestamp: DateTime<Utc>,

    /// "buy" or "sell"
    pub transaction_type: String,

    pub bought: SwapLeg,
    pub sold: SwapLeg,

    pub total_value_usd: String,
    pub exchange_name: String,
    pub pair_label: String,
    pub transaction_hash: String,
}

impl SwapTransaction {
    /// One-line human-readable summary, e.g.
    /// `🟢 Bought 12.50 BONK for $42.00 (BONK/SOL) on Raydium — Tx: abc123...wxyz (Jan 05, 2026)`
    pub fn summary_line(&self) -> String {
        let (action, leg) = if self.transaction_type == "buy" {
            ("🟢 Bought", &self.bought)
        } else {
            ("🔴 Sold", &self.sold)
        };
        let amount = leg.amount.parse::<f64>().unwrap_or(0.0);
        let value = self.total_value_usd.parse::<f64>().unwrap_or(0.0);
        let hash = short_hash(&self.transaction_hash);
        let date = self.block_timestamp.format("%b %d, %Y");

        format!(
            "{action} {amount:.2} {} for ${value:.2} ({}) on {} — Tx: {hash} ({date})",
            leg.symbol, self.pair_label, self.exchange_name
        )
    }
}

/// Shortened transaction hash: first 6 and last 4 characters
fn short_hash(hash: &str) -> String {
    if hash.len() > 10 {
        format!("{}...{}", &hash[..6], &hash[hash.len() - 4..])
    } else {
        hash.to_string()
    }
}

/// Holder entry as embedded in tool payloads
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolderSummary {
    pub owner_address: String,
    pub balance_formatted: String,
    pub percentage_relative_to_total_supply: f64,
}

impl From<&Holder> for HolderSummary {
    fn from(h: &Holder) -> Self {
        Self {
            owner_address: h.owner_address.clone(),
            balance_formatted: fmt_thousands_str(&h.balance_formatted),
            percentage_relative_to_total_supply: h.percentage_relative_to_total_supply,
        }
    }
}

/// Security block of a token report
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySummary {
    /// "7/10", lower = riskier
    pub rug_score: String,

    /// Liquidity-pool status label
    pub lp_status: String,
}

/// Assembled token lookup payload: snapshot, holders, and derived risk
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenReport {
    pub address: String,

    /// "Name (SYMBOL)"
    pub token: String,

    pub price_usd: String,
    pub price_native: String,
    pub liquidity_usd: String,
    pub volume_24h: String,
    pub price_change_24h: String,
    pub buys_vs_sells_24h: String,
    pub website: String,
    pub twitter: String,
    pub fdv_usd: String,
    pub market_cap_usd: String,

    pub top_holders: Vec<HolderSummary>,

    /// Qualitative trade verdict text
    pub justification: String,

    pub security: SecuritySummary,
}

/// Group the integer part of a number with commas; fractional amounts keep
/// two decimal places.
pub fn fmt_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let value = value.abs();
    let int_part = value.trunc() as u64;
    let frac = value.fract();

    let digits = int_part.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if frac >= 0.005 {
        out.push_str(&format!("{:.2}", frac)[1..]);
    }
    out
}

/// Same grouping applied to a numeric string from an upstream feed; a
/// non-numeric string passes through unchanged.
pub fn fmt_thousands_str(value: &str) -> String {
    value
        .parse::<f64>()
        .map(fmt_thousands)
        .unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_thousands() {
        assert_eq!(fmt_thousands(0.0), "0");
        assert_eq!(fmt_thousands(950.0), "950");
        assert_eq!(fmt_thousands(1_000.0), "1,000");
        assert_eq!(fmt_thousands(1_234_567.0), "1,234,567");
        assert_eq!(fmt_thousands(1234.5), "1,234.50");
        assert_eq!(fmt_thousands(-42_000.0), "-42,000");
    }

    #[test]
    fn test_fmt_thousands_str_passthrough() {
        assert_eq!(fmt_thousands_str("12345678"), "12,345,678");
        assert_eq!(fmt_thousands_str("N/A"), "N/A");
    }

    #[test]
    fn test_swap_summary_line() {
        let swap = SwapTransaction {
            block_timestamp: "2026-01-05T12:00:00Z".parse().unwrap(),
            transaction_type: "buy".into(),
            bought: SwapLeg {
                symbol: "BONK".into(),
                amount: "12.5".into(),
                usd_amount: "42.0".into(),
            },
            sold: SwapLeg {
                symbol: "SOL".into(),
                amount: "0.2".into(),
                usd_amount: "42.0".into(),
            },
            total_value_usd: "42.0".into(),
            exchange_name: "Raydium".into(),
            pair_label: "BONK/SOL".into(),
            transaction_hash: "abcdef1234567890xyzw".into(),
        };

        let line = swap.summary_line();
        assert!(line.starts_with("🟢 Bought 12.50 BONK for $42.00"));
        assert!(line.contains("abcdef...xyzw"));
        assert!(line.contains("Jan 05, 2026"));
    }
}
