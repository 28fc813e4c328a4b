use super::labels::{alignment_comment, performance_comment, RatingTier, RiskLabel};
use crate::scoring::ScoreResult;
use crate::state::{CompanyProfile, InsightDepth, RiskPreference};

/// Sub-scores rescaled to 0-100 for the deep view.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Breakdown {
    pub stability: f64,
    pub growth: f64,
    pub efficiency: f64,
}

impl Breakdown {
    pub fn from_score(score: &ScoreResult) -> Self {
        Self {
            stability: round_to(score.vol_score * 100.0, 1),
            growth: round_to(score.return_score * 100.0, 1),
            efficiency: round_to(score.sharpe_score * 100.0, 1),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Commentary {
    pub risk_label: RiskLabel,
    pub risk_category: &'static str,
    pub rating_tier: RatingTier,
    pub rating: &'static str,
    pub performance: &'static str,
    pub alignment: &'static str,
    pub breakdown: Option<Breakdown>,
    /// Markdown body for the insight panel.
    pub text: String,
}

impl Commentary {
    pub fn build(
        profile: &CompanyProfile,
        score: &ScoreResult,
        preference: RiskPreference,
        depth: InsightDepth,
    ) -> Self {
        let risk_label = RiskLabel::from_volatility(score.volatility);
        let rating_tier = RatingTier::from_score(score.esg_score);
        let performance = performance_comment(score.sharpe_ratio);
        let alignment = alignment_comment(preference, score.volatility);
        let breakdown = match depth {
            InsightDepth::Deep => Some(Breakdown::from_score(score)),
            InsightDepth::Standard => None,
        };

        let mut text = overview_text(profile, score, risk_label, rating_tier, performance, alignment);
        if let Some(b) = &breakdown {
            text.push_str(&deep_text(profile, b, rating_tier));
        }

        Self {
            risk_label,
            risk_category: risk_label.as_str(),
            rating_tier,
            rating: rating_tier.as_str(),
            performance,
            alignment,
            breakdown,
            text,
        }
    }
}

fn overview_text(
    profile: &CompanyProfile,
    score: &ScoreResult,
    risk_label: RiskLabel,
    rating_tier: RatingTier,
    performance: &str,
    alignment: &str,
) -> String {
    format!(
        "### Company Overview: {name}\n\n\
         **Sector:** {sector}  \n\
         **Risk Category:** {risk}  \n\
         **ESG Proxy Score:** {esg} / 100  \n\
         **ESG Rating Tier:** {tier}  \n\n\
         ---\n\n\
         ### Financial Signal Summary\n\n\
         - Annual Return: **{ret}%**\n\
         - Annual Volatility: **{vol}**\n\
         - Sharpe Ratio: **{sharpe}**\n\n\
         The company demonstrates **{performance}**, indicating how efficiently it converts risk into returns.\n\n\
         ---\n\n\
         ### Investor Fit Analysis\n\n\
         {alignment}\n",
        name = profile.name,
        sector = profile.sector,
        risk = risk_label.as_str(),
        esg = round_to(score.esg_score, 2),
        tier = rating_tier.as_str(),
        ret = round_to(score.mean_return * 100.0, 2),
        vol = round_to(score.volatility, 3),
        sharpe = round_to(score.sharpe_ratio, 2),
    )
}

fn deep_text(profile: &CompanyProfile, b: &Breakdown, rating_tier: RatingTier) -> String {
    format!(
        "\n---\n\n\
         ### Deep ESG Signal Breakdown\n\n\
         **Stability Component (Volatility-Based):** {stability}  \n\
         Higher score indicates controlled downside fluctuations.\n\n\
         **Growth Component (Return-Based):** {growth}  \n\
         Captures long-term appreciation strength.\n\n\
         **Efficiency Component (Sharpe-Based):** {efficiency}  \n\
         Measures risk-adjusted capital allocation efficiency.\n\n\
         ---\n\n\
         ### Interpretation\n\n\
         From a proxy ESG standpoint, {name} reflects market-perceived governance quality through volatility discipline and capital efficiency.\n\n\
         Lower volatility often correlates with:\n\
         - Strong governance\n\
         - Predictable operations\n\
         - Institutional investor confidence\n\n\
         Higher Sharpe ratios indicate:\n\
         - Efficient capital management\n\
         - Strategic risk positioning\n\n\
         Overall, the sustainability outlook suggests a **{tier}** profile within the {sector} sector.\n",
        stability = b.stability,
        growth = b.growth,
        efficiency = b.efficiency,
        name = profile.name,
        tier = rating_tier.as_str(),
        sector = profile.sector,
    )
}

/// Round half away from zero to `dp` decimals.
#[inline]
pub fn round_to(value: f64, dp: i32) -> f64 {
    let scale = 10f64.powi(dp);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::engine::score;

    fn profile() -> CompanyProfile {
        CompanyProfile {
            ticker: "ACME".into(),
            name: "Acme Corp".into(),
            sector: "Industrials".into(),
        }
    }

    #[test]
    fn test_flat_series_standard_insight() {
        let s = score(&[10.0; 30]).unwrap();
        let c = Commentary::build(&profile(), &s, RiskPreference::Conservative, InsightDepth::Standard);
        assert_eq!(c.risk_label, RiskLabel::Low);
        assert_eq!(c.rating_tier, RatingTier::Stable);
        assert_eq!(c.performance, "weak risk-adjusted return structure");
        assert!(c.alignment.contains("conservative investors seeking stability"));
        assert!(c.breakdown.is_none());
        assert!(c.text.contains("**ESG Proxy Score:** 67.5 / 100"));
        assert!(c.text.contains("**Sector:** Industrials"));
        assert!(!c.text.contains("Deep ESG Signal Breakdown"));
        assert!(c.text.starts_with("### Company Overview: Acme Corp\n\n**Sector:** Industrials  \n"));
        assert!(c.text.contains("- Sharpe Ratio: **0**\n"));
        assert!(c.text.ends_with("conservative investors seeking stability.\n"));
    }

    #[test]
    fn test_deep_insight_adds_breakdown() {
        let s = score(&[10.0; 30]).unwrap();
        let c = Commentary::build(&profile(), &s, RiskPreference::Balanced, InsightDepth::Deep);
        let b = c.breakdown.unwrap();
        assert_eq!(b.stability, 100.0);
        assert_eq!(b.growth, 50.0);
        assert_eq!(b.efficiency, 50.0);
        assert!(c.text.contains("Deep ESG Signal Breakdown"));
        assert!(c.text.contains("**Stability Component (Volatility-Based):** 100  \n"));
        assert!(c.text.contains("**Sustainability Stable** profile within the Industrials sector.\n"));
        assert!(c.text.find("Investor Fit Analysis") < c.text.find("Deep ESG Signal Breakdown"));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(67.456, 2), 67.46);
        assert_eq!(round_to(0.12345, 3), 0.123);
        assert_eq!(round_to(-1.25, 1), -1.3);
    }
}
