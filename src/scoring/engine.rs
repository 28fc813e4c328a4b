use super::series::{daily_returns, sample_std};
use super::TRADING_DAYS_PER_YEAR;
use crate::errors::{EsgError, EsgResult};
use crate::state::PriceSeries;
use statrs::statistics::Statistics;

/// Guards the Sharpe division for flat price series.
pub const SHARPE_EPSILON: f64 = 1e-6;

const STABILITY_WEIGHT: f64 = 35.0;
const GROWTH_WEIGHT: f64 = 30.0;
const EFFICIENCY_WEIGHT: f64 = 35.0;

/// Market-derived proxy score plus the statistics it was built from.
/// Deterministic in its input: same closes, same bits.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ScoreResult {
    pub volatility: f64,
    pub mean_return: f64,
    pub sharpe_ratio: f64,
    pub vol_score: f64,
    pub return_score: f64,
    pub sharpe_score: f64,
    pub esg_score: f64,
}

/// Stability sub-score. 1 at zero volatility, strictly decreasing after.
#[inline]
pub fn vol_score(volatility: f64) -> f64 {
    1.0 / (1.0 + volatility * 8.0)
}

/// Growth sub-score. Linear on [-0.2, 0.2], saturated outside.
#[inline]
pub fn return_score(mean_return: f64) -> f64 {
    ((mean_return + 0.2) / 0.4).clamp(0.0, 1.0)
}

/// Efficiency sub-score. Linear on [-2, 2], saturated outside.
#[inline]
pub fn sharpe_score(sharpe_ratio: f64) -> f64 {
    ((sharpe_ratio + 2.0) / 4.0).clamp(0.0, 1.0)
}

/// Weighted 35/30/35 blend, clipped to [0, 100].
#[inline]
pub fn composite(vol_score: f64, return_score: f64, sharpe_score: f64) -> f64 {
    (vol_score * STABILITY_WEIGHT + return_score * GROWTH_WEIGHT + sharpe_score * EFFICIENCY_WEIGHT)
        .clamp(0.0, 100.0)
}

/// Score a chronological run of daily closes.
///
/// Non-finite and non-positive closes are dropped first (provider gaps).
/// Volatility needs at least two daily returns, so fewer than three usable
/// closes is `InsufficientData`.
pub fn score(prices: &[f64]) -> EsgResult<ScoreResult> {
    let clean: Vec<f64> = prices
        .iter()
        .copied()
        .filter(|p| p.is_finite() && *p > 0.0)
        .collect();

    let returns = daily_returns(&clean);
    let daily_std = sample_std(&returns).ok_or_else(|| {
        EsgError::InsufficientData(format!(
            "need at least 2 daily returns, got {} from {} closing prices",
            returns.len(),
            clean.len()
        ))
    })?;

    let volatility = daily_std * TRADING_DAYS_PER_YEAR.sqrt();
    let mean_return = returns.iter().mean() * TRADING_DAYS_PER_YEAR;
    let sharpe_ratio = mean_return / (volatility + SHARPE_EPSILON);

    let vol_score = vol_score(volatility);
    let return_score = return_score(mean_return);
    let sharpe_score = sharpe_score(sharpe_ratio);

    Ok(ScoreResult {
        volatility,
        mean_return,
        sharpe_ratio,
        vol_score,
        return_score,
        sharpe_score,
        esg_score: composite(vol_score, return_score, sharpe_score),
    })
}

pub fn score_series(series: &PriceSeries) -> EsgResult<ScoreResult> {
    score(&series.closes()).map_err(|e| match e {
        EsgError::InsufficientData(detail) => {
            EsgError::InsufficientData(format!("{}: {detail}", series.ticker))
        }
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Geometric walk with a fixed alternating shock, no randomness.
    fn zigzag(n: usize, drift: f64, shock: f64) -> Vec<f64> {
        let mut p = 100.0;
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            out.push(p);
            let s = if i % 2 == 0 { shock } else { -shock };
            p *= 1.0 + drift + s;
        }
        out
    }

    #[test]
    fn test_constant_price_scores_67_5() {
        let r = score(&[42.0; 10]).unwrap();
        assert_eq!(r.volatility, 0.0);
        assert_eq!(r.mean_return, 0.0);
        assert!(r.sharpe_ratio.abs() < 1e-9);
        assert_eq!(r.vol_score, 1.0);
        assert_eq!(r.return_score, 0.5);
        assert_eq!(r.sharpe_score, 0.5);
        assert!((r.esg_score - 67.5).abs() < 1e-9);
    }

    #[test]
    fn test_single_and_empty_series_rejected() {
        assert!(matches!(score(&[100.0]), Err(EsgError::InsufficientData(_))));
        assert!(matches!(score(&[]), Err(EsgError::InsufficientData(_))));
    }

    #[test]
    fn test_gaps_are_dropped_before_length_check() {
        assert!(matches!(
            score(&[f64::NAN, 100.0, 0.0]),
            Err(EsgError::InsufficientData(_))
        ));
        let with_gap = score(&[100.0, f64::NAN, 101.0, 102.0]).unwrap();
        let without = score(&[100.0, 101.0, 102.0]).unwrap();
        assert_eq!(with_gap, without);
    }

    #[test]
    fn test_single_return_rejected() {
        // one return has no sample spread; a crash must not read as zero volatility
        assert!(matches!(score(&[100.0, 101.0]), Err(EsgError::InsufficientData(_))));
        assert!(matches!(score(&[100.0, 50.0]), Err(EsgError::InsufficientData(_))));
        assert!(matches!(
            score(&[100.0, f64::NAN, 50.0]),
            Err(EsgError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_three_closes_is_minimum() {
        let r = score(&[100.0, 50.0, 55.0]).unwrap();
        assert!(r.volatility > 1.0);
        assert_eq!(r.vol_score, vol_score(r.volatility));
        assert!(r.vol_score < 0.2);
        assert!((0.0..=100.0).contains(&r.esg_score));
    }

    #[test]
    fn test_known_statistics() {
        let prices = [100.0, 102.0, 100.98, 103.0];
        let r = score(&prices).unwrap();
        let returns = daily_returns(&prices);
        let mean = returns.iter().sum::<f64>() / 3.0;
        let var = returns.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / 2.0;
        assert!((r.mean_return - mean * 252.0).abs() < 1e-9);
        assert!((r.volatility - var.sqrt() * 252.0_f64.sqrt()).abs() < 1e-9);
        assert!((r.sharpe_ratio - r.mean_return / (r.volatility + 1e-6)).abs() < 1e-9);
    }

    #[test]
    fn test_score_bounded_across_regimes() {
        for &(drift, shock) in &[
            (0.0, 0.001),
            (0.002, 0.01),
            (-0.004, 0.03),
            (0.01, 0.08),
            (-0.02, 0.2),
        ] {
            let r = score(&zigzag(252, drift, shock)).unwrap();
            assert!(
                (0.0..=100.0).contains(&r.esg_score),
                "drift={drift} shock={shock} score={}",
                r.esg_score
            );
            assert!(r.volatility >= 0.0);
        }
    }

    #[test]
    fn test_deterministic() {
        let prices = zigzag(300, 0.0007, 0.013);
        let a = score(&prices).unwrap();
        let b = score(&prices).unwrap();
        assert_eq!(a.esg_score.to_bits(), b.esg_score.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_vol_score_shape() {
        assert_eq!(vol_score(0.0), 1.0);
        let mut prev = vol_score(0.0);
        for i in 1..100 {
            let v = vol_score(i as f64 * 0.05);
            assert!(v < prev);
            assert!(v > 0.0);
            prev = v;
        }
    }

    #[test]
    fn test_clipped_sub_scores() {
        assert_eq!(return_score(-0.2), 0.0);
        assert_eq!(return_score(-1.0), 0.0);
        assert_eq!(return_score(0.2), 1.0);
        assert_eq!(return_score(3.0), 1.0);
        assert!((return_score(0.1) - 0.75).abs() < 1e-12);

        assert_eq!(sharpe_score(-2.0), 0.0);
        assert_eq!(sharpe_score(-5.0), 0.0);
        assert_eq!(sharpe_score(2.0), 1.0);
        assert_eq!(sharpe_score(0.0), 0.5);
        assert!(sharpe_score(1.0) >= sharpe_score(0.5));
    }

    #[test]
    fn test_composite_extremes() {
        assert_eq!(composite(0.0, 0.0, 0.0), 0.0);
        assert_eq!(composite(1.0, 1.0, 1.0), 100.0);
        // collapsing market: near-zero stability, floor growth, weak efficiency
        let r = score(&zigzag(252, -0.05, 0.5)).unwrap();
        assert_eq!(r.return_score, 0.0);
        assert!(r.sharpe_score < 0.25);
        assert!(r.esg_score < 10.0, "score={}", r.esg_score);
    }

    #[test]
    fn test_score_series_names_ticker() {
        let series = PriceSeries::new("NOPE", Vec::new());
        let err = score_series(&series).unwrap_err();
        assert!(err.to_string().contains("NOPE"));
    }
}
