//! Token Report Assembly
//!
//! Builds the full token lookup payload: pair snapshot plus the top-10
//! holder listing, with the derived verdict and security block. Display
//! fields are formatted here; the risk engine stays numeric and pure.

use crate::error::Result;
use crate::market::MarketDataClient;
use crate::model::{fmt_thousands, HolderSummary, SecuritySummary, TokenMarket, TokenReport};
use crate::risk::{self, RiskAssessment};

/// Holders pulled into every token report for the concentration check
const REPORT_HOLDER_COUNT: usize = 10;

/// Look up a token and assemble its report
pub async fn build_token_report(
    market: &dyn MarketDataClient,
    query: &str,
) -> Result<TokenReport> {
    let snapshot = market.search_token(query).await?;
    let holders = market
        .top_holders(&snapshot.address, REPORT_HOLDER_COUNT)
        .await?;

    let concentrated = risk::concentration_risk(&holders);
    let assessment = RiskAssessment::derive(
        snapshot.price_change_24h,
        snapshot.buys_24h,
        snapshot.sells_24h,
        snapshot.liquidity_usd,
        concentrated,
    );

    let top_holders = holders.iter().map(HolderSummary::from).collect();

    Ok(render_report(&snapshot, top_holders, &assessment))
}

fn render_report(
    snapshot: &TokenMarket,
    top_holders: Vec<HolderSummary>,
    assessment: &RiskAssessment,
) -> TokenReport {
    TokenReport {
        address: snapshot.address.clone(),
        token: format!("{} ({})", snapshot.name, snapshot.symbol),
        price_usd: format!("${}", snapshot.price_usd),
        price_native: format!("{} SOL", snapshot.price_native),
        liquidity_usd: format!("${}", fmt_thousands(snapshot.liquidity_usd)),
        volume_24h: format!("${}", fmt_thousands(snapshot.volume_24h)),
        price_change_24h: format!("{}%", snapshot.price_change_24h),
        buys_vs_sells_24h: format!(
            "{} buys / {} sells",
            snapshot.buys_24h, snapshot.sells_24h
        ),
        website: snapshot.website.clone().unwrap_or_else(|| "N/A".into()),
        twitter: snapshot.twitter.clone().unwrap_or_else(|| "N/A".into()),
        fdv_usd: format!("${}", fmt_thousands(snapshot.fdv)),
        market_cap_usd: format!("${}", fmt_thousands(snapshot.market_cap)),
        top_holders,
        justification: assessment.verdict.text().into(),
        security: SecuritySummary {
            rug_score: format!("{}/10", assessment.rug_score),
            lp_status: assessment.lp_status.as_str().into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::mock::{MOCK_HEALTHY_MINT, MOCK_RISKY_MINT};
    use crate::market::MockMarketDataClient;

    #[tokio::test]
    async fn test_healthy_token_report() {
        let client = MockMarketDataClient::new();
        let report = build_token_report(&client, MOCK_HEALTHY_MINT).await.unwrap();

        assert_eq!(report.token, "Bonk Fixture (BONKF)");
        assert_eq!(report.price_usd, "$0.000021");
        assert_eq!(report.liquidity_usd, "$450,000");
        assert_eq!(report.buys_vs_sells_24h, "1800 buys / 900 sells");
        assert_eq!(report.security.lp_status, "likely safe");
        assert_eq!(report.security.rug_score, "10/10");
        // 24% up, more buys than sells, deep liquidity: bullish verdict.
        assert!(report.justification.contains("Up only"));
        assert_eq!(report.top_holders.len(), 3);
    }

    #[tokio::test]
    async fn test_risky_token_report() {
        let client = MockMarketDataClient::new();
        let report = build_token_report(&client, MOCK_RISKY_MINT).await.unwrap();

        // Concentrated supply (-8), thin liquidity (-4), sell pressure (-3),
        // crash (-2): clamped to the floor.
        assert_eq!(report.security.rug_score, "1/10");
        assert_eq!(report.security.lp_status, "likely risky");
        assert!(report.justification.contains("sell pressure"));
        assert_eq!(report.website, "N/A");
    }

    #[tokio::test]
    async fn test_unknown_token_propagates() {
        let client = MockMarketDataClient::new();
        assert!(build_token_report(&client, "nope").await.is_err());
    }
}
