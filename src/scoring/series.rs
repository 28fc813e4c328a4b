use super::TRADING_DAYS_PER_YEAR;
use crate::state::PriceSeries;
use chrono::NaiveDate;
use statrs::statistics::Statistics;

/// Daily simple returns: r[i] = p[i+1] / p[i] - 1. One shorter than `prices`.
pub fn daily_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Sample standard deviation (n - 1). Undefined below two observations.
#[inline]
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    Some(values.iter().std_dev())
}

/// Trailing simple moving average, aligned with `prices`.
/// The first `window - 1` entries are `None`.
pub fn moving_average(prices: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; prices.len()];
    }
    (0..prices.len())
        .map(|i| {
            if i + 1 < window {
                None
            } else {
                Some(prices[i + 1 - window..=i].iter().mean())
            }
        })
        .collect()
}

/// Trailing annualized volatility of daily returns over `window` returns,
/// aligned with `prices`. Entry `i` uses the returns ending at price `i`,
/// so the first `window` entries are `None`.
pub fn rolling_volatility(prices: &[f64], window: usize) -> Vec<Option<f64>> {
    let returns = daily_returns(prices);
    let annualizer = TRADING_DAYS_PER_YEAR.sqrt();
    (0..prices.len())
        .map(|i| {
            if i < window {
                None
            } else {
                sample_std(&returns[i - window..i]).map(|s| s * annualizer)
            }
        })
        .collect()
}

/// One row of the price/volatility chart data.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub close: f64,
    pub moving_average: Option<f64>,
    pub rolling_volatility: Option<f64>,
}

pub fn chart_points(series: &PriceSeries, ma_window: usize, vol_window: usize) -> Vec<ChartPoint> {
    let closes = series.closes();
    let ma = moving_average(&closes, ma_window);
    let vol = rolling_volatility(&closes, vol_window);

    series
        .points
        .iter()
        .zip(ma)
        .zip(vol)
        .map(|((p, moving_average), rolling_volatility)| ChartPoint {
            date: p.date,
            close: p.close,
            moving_average,
            rolling_volatility,
        })
        .collect()
}
