//! Risk Scoring Engine
//!
//! Pure, deterministic heuristics turning raw market numbers into a trade
//! verdict, a liquidity-pool status label, and a bounded rug score. No I/O;
//! every function here is a plain function of its inputs.

use serde::{Deserialize, Serialize};

use crate::model::Holder;

/// Any single holder above this share of supply flags concentration risk
pub const CONCENTRATION_THRESHOLD_PERCENT: f64 = 20.0;

/// Qualitative trade verdict
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Bullish,
    SellPressure,
    LowLiquidity,
    Mixed,
}

impl Verdict {
    /// Fixed justification text for each verdict
    pub fn text(&self) -> &'static str {
        match self {
            Verdict::Bullish => {
                "📈 Up only vibes. Smart apes loading bags. Might be a solid entry 🦍🚀"
            }
            Verdict::SellPressure => {
                "🔻 Heavy sell pressure. Could be mid-rug energy. Stay sharp, degen."
            }
            Verdict::LowLiquidity => {
                "💧 Liquidity looking sus. Might be exit scam season. Proceed with caution."
            }
            Verdict::Mixed => {
                "🤔 Mixed signals. Might wanna wait for confirmation or check LP lock."
            }
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// Liquidity-pool status label
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LpStatus {
    LikelySafe,
    LikelyRisky,
    Unknown,
}

impl LpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LpStatus::LikelySafe => "likely safe",
            LpStatus::LikelyRisky => "likely risky",
            LpStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for LpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trade verdict from 24h market action. Branches are checked in this fixed
/// order; the first match wins.
pub fn justification(price_change_24h: f64, buys: u32, sells: u32, liquidity_usd: f64) -> Verdict {
    if price_change_24h > 20.0 && buys > sells && liquidity_usd > 100_000.0 {
        Verdict::Bullish
    } else if price_change_24h < -15.0 && sells > buys {
        Verdict::SellPressure
    } else if liquidity_usd < 10_000.0 {
        Verdict::LowLiquidity
    } else {
        Verdict::Mixed
    }
}

/// LP status from pooled liquidity. The 50k-100k band maps to `Unknown`;
/// that gap is deliberate, not a missing boundary.
pub fn lp_status(liquidity_usd: f64) -> LpStatus {
    if liquidity_usd > 100_000.0 {
        LpStatus::LikelySafe
    } else if liquidity_usd < 50_000.0 {
        LpStatus::LikelyRisky
    } else {
        LpStatus::Unknown
    }
}

/// Inputs to the rug score
#[derive(Clone, Copy, Debug)]
pub struct RugInputs {
    pub liquidity_usd: f64,
    pub price_change_24h: f64,
    pub buys_24h: u32,
    pub sells_24h: u32,
    /// True if any top holder holds more than 20% of supply
    pub concentration_risk: bool,
}

/// Rug score in [1, 10], lower = riskier. Starts at 10; each deduction is
/// evaluated independently against the same snapshot, then the result is
/// clamped to a floor of 1.
pub fn rug_score(inputs: &RugInputs) -> u8 {
    let mut score: i32 = 10;

    if inputs.concentration_risk {
        score -= 8;
    }
    if inputs.liquidity_usd < 10_000.0 {
        score -= 4;
    }
    if f64::from(inputs.sells_24h) > f64::from(inputs.buys_24h) * 1.5 {
        score -= 3;
    }
    if inputs.price_change_24h < -25.0 {
        score -= 2;
    }

    score.max(1) as u8
}

/// Whether any holder in the listing crosses the concentration threshold
pub fn concentration_risk(holders: &[Holder]) -> bool {
    holders
        .iter()
        .any(|h| h.percentage_relative_to_total_supply > CONCENTRATION_THRESHOLD_PERCENT)
}

/// Full derived assessment for a token snapshot
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub verdict: Verdict,
    pub lp_status: LpStatus,
    pub rug_score: u8,
}

impl RiskAssessment {
    pub fn derive(
        price_change_24h: f64,
        buys_24h: u32,
        sells_24h: u32,
        liquidity_usd: f64,
        concentration_risk: bool,
    ) -> Self {
        Self {
            verdict: justification(price_change_24h, buys_24h, sells_24h, liquidity_usd),
            lp_status: lp_status(liquidity_usd),
            rug_score: rug_score(&RugInputs {
                liquidity_usd,
                price_change_24h,
                buys_24h,
                sells_24h,
                concentration_risk,
            }),
        }
    }
}
