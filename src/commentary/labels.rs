use crate::state::RiskPreference;

/// Risk category from annualized volatility. Both bounds are strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum RiskLabel {
    Low,
    Moderate,
    High,
}

impl RiskLabel {
    pub fn from_volatility(volatility: f64) -> Self {
        if volatility < 0.20 {
            RiskLabel::Low
        } else if volatility < 0.35 {
            RiskLabel::Moderate
        } else {
            RiskLabel::High
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLabel::Low => "Low Risk",
            RiskLabel::Moderate => "Moderate Risk",
            RiskLabel::High => "High Risk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum RatingTier {
    Leader,
    Stable,
    Risk,
}

impl RatingTier {
    pub fn from_score(esg_score: f64) -> Self {
        if esg_score >= 75.0 {
            RatingTier::Leader
        } else if esg_score >= 55.0 {
            RatingTier::Stable
        } else {
            RatingTier::Risk
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RatingTier::Leader => "Sustainability Leader",
            RatingTier::Stable => "Sustainability Stable",
            RatingTier::Risk => "Sustainability Risk",
        }
    }
}

/// Gauge color band for a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeBand {
    Low,
    Mid,
    High,
}

impl GaugeBand {
    pub fn for_score(esg_score: f64) -> Self {
        if esg_score < 50.0 {
            GaugeBand::Low
        } else if esg_score < 75.0 {
            GaugeBand::Mid
        } else {
            GaugeBand::High
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            GaugeBand::Low => "red",
            GaugeBand::Mid => "amber",
            GaugeBand::High => "green",
        }
    }
}

pub fn performance_comment(sharpe_ratio: f64) -> &'static str {
    if sharpe_ratio > 1.5 {
        "strong risk-adjusted performance"
    } else if sharpe_ratio > 0.8 {
        "moderate risk-adjusted efficiency"
    } else {
        "weak risk-adjusted return structure"
    }
}

/// Only the conservative profile looks at volatility.
pub fn alignment_comment(preference: RiskPreference, volatility: f64) -> &'static str {
    match preference {
        RiskPreference::Conservative if volatility < 0.25 => {
            "This stock aligns well with conservative investors seeking stability."
        }
        RiskPreference::Conservative => {
            "Volatility levels may exceed conservative investor comfort."
        }
        RiskPreference::Balanced => {
            "This stock may suit balanced portfolios combining growth and stability."
        }
        RiskPreference::Aggressive => {
            "Higher volatility could benefit aggressive investors targeting alpha."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_label_boundaries() {
        assert_eq!(RiskLabel::from_volatility(0.0), RiskLabel::Low);
        assert_eq!(RiskLabel::from_volatility(0.1999), RiskLabel::Low);
        assert_eq!(RiskLabel::from_volatility(0.20), RiskLabel::Moderate);
        assert_eq!(RiskLabel::from_volatility(0.20).as_str(), "Moderate Risk");
        assert_eq!(RiskLabel::from_volatility(0.3499), RiskLabel::Moderate);
        assert_eq!(RiskLabel::from_volatility(0.35), RiskLabel::High);
        assert_eq!(RiskLabel::from_volatility(0.35).as_str(), "High Risk");
    }

    #[test]
    fn test_rating_tier_boundaries() {
        assert_eq!(RatingTier::from_score(75.0), RatingTier::Leader);
        assert_eq!(RatingTier::from_score(74.99), RatingTier::Stable);
        assert_eq!(RatingTier::from_score(55.0), RatingTier::Stable);
        assert_eq!(RatingTier::from_score(54.99), RatingTier::Risk);
    }

    #[test]
    fn test_gauge_bands() {
        assert_eq!(GaugeBand::for_score(0.0), GaugeBand::Low);
        assert_eq!(GaugeBand::for_score(49.999), GaugeBand::Low);
        assert_eq!(GaugeBand::for_score(50.0), GaugeBand::Mid);
        assert_eq!(GaugeBand::for_score(75.0), GaugeBand::High);
        assert_eq!(GaugeBand::for_score(100.0).color(), "green");
    }

    #[test]
    fn test_performance_comment_is_strict() {
        assert_eq!(performance_comment(1.5), "moderate risk-adjusted efficiency");
        assert_eq!(performance_comment(1.51), "strong risk-adjusted performance");
        assert_eq!(performance_comment(0.8), "weak risk-adjusted return structure");
    }

    #[test]
    fn test_alignment() {
        assert!(alignment_comment(RiskPreference::Conservative, 0.24).contains("aligns well"));
        assert!(alignment_comment(RiskPreference::Conservative, 0.25).contains("may exceed"));
        // volatility only matters for the conservative profile
        assert_eq!(
            alignment_comment(RiskPreference::Balanced, 0.01),
            alignment_comment(RiskPreference::Balanced, 2.0)
        );
        assert!(alignment_comment(RiskPreference::Aggressive, 0.9).contains("alpha"));
    }
}
