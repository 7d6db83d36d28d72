//! Performance metrics: pure functions over the annotated series.
//!
//! The strategy holds the position implied by yesterday's signal through
//! today's return: `sr[i] = r[i] * code(signal[i-1])`. Days whose entering
//! position is `Flat` (warmup) carry no strategy return and are left out of
//! every aggregate below.

use crosslab_core::domain::AnnotatedBar;
use crosslab_core::numeric::report;
use serde::{Deserialize, Serialize};

/// Trading days per year used to annualize the Sharpe ratio.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Standard deviations below this are floating-point noise.
const ZERO_STD_TOLERANCE: f64 = 1e-15;

/// Scalar summary of one simulation. Percentages are in percent units
/// (12.5 means 12.5%), all values rounded to 2 decimals and finite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_return: f64,
    pub buy_hold_return: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub total_trades: usize,
}

impl PerformanceMetrics {
    /// Every field zero; reported when no bar carries a strategy return.
    pub fn zeroed() -> Self {
        Self::default()
    }

    pub fn compute(annotated: &[AnnotatedBar]) -> Self {
        let strategy = strategy_returns(annotated);
        if strategy.is_empty() {
            return Self::zeroed();
        }

        let closes: Vec<f64> = annotated.iter().map(AnnotatedBar::close).collect();
        let market = daily_returns(&closes);

        Self {
            total_return: report(compounded_return(&strategy) * 100.0),
            buy_hold_return: report(compounded_return(&market) * 100.0),
            sharpe_ratio: report(sharpe_ratio(&strategy)),
            max_drawdown: report(max_drawdown(&equity_curve(&strategy)).abs() * 100.0),
            win_rate: report(win_rate(&strategy) * 100.0),
            total_trades: count_crossovers(annotated),
        }
    }
}

// ─── Return series ──────────────────────────────────────────────────

/// Simple close-to-close returns: `r[i-1] = close[i] / close[i-1] - 1`.
pub fn daily_returns(closes: &[f64]) -> Vec<f64> {
    closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Strategy returns with a one-bar lag. Bars entered `Flat` are skipped.
pub fn strategy_returns(annotated: &[AnnotatedBar]) -> Vec<f64> {
    annotated
        .windows(2)
        .filter(|w| !w[0].signal.is_flat())
        .map(|w| (w[1].close() / w[0].close() - 1.0) * w[0].signal.exposure())
        .collect()
}

/// Growth of 1.0 after applying each return in turn.
pub fn equity_curve(returns: &[f64]) -> Vec<f64> {
    returns
        .iter()
        .scan(1.0_f64, |equity, r| {
            *equity *= 1.0 + r;
            Some(*equity)
        })
        .collect()
}

// ─── Individual metric functions ────────────────────────────────────

/// Compounded return as a fraction: `Π(1 + r) - 1`.
pub fn compounded_return(returns: &[f64]) -> f64 {
    returns.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0
}

/// Annualized Sharpe ratio with a zero risk-free rate.
///
/// Sharpe = mean(r) / std(r) * sqrt(252), sample standard deviation.
/// Returns 0.0 if the deviation is zero or there are fewer than 2 returns.
///
/// A constant series rarely yields an exact zero deviation because the mean
/// itself carries rounding error; anything below `ZERO_STD_TOLERANCE` is
/// treated as zero variance.
pub fn sharpe_ratio(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }
    let std = std_dev(returns);
    if std < ZERO_STD_TOLERANCE {
        return 0.0;
    }
    mean_f64(returns) / std * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Maximum drawdown as a negative fraction (e.g., -0.15 = 15% drawdown).
///
/// The running peak starts at the first point of the curve.
pub fn max_drawdown(equity_curve: &[f64]) -> f64 {
    let Some(&first) = equity_curve.first() else {
        return 0.0;
    };
    let mut peak = first;
    let mut max_dd = 0.0_f64;

    for &eq in equity_curve {
        if eq > peak {
            peak = eq;
        }
        if peak > 0.0 {
            let dd = (eq - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Fraction of returns strictly above zero.
pub fn win_rate(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    returns.iter().filter(|&&r| r > 0.0).count() as f64 / returns.len() as f64
}

/// Number of bars where the signal flipped between Long and Short.
pub fn count_crossovers(annotated: &[AnnotatedBar]) -> usize {
    annotated.iter().filter(|a| a.is_crossover()).count()
}

pub(crate) fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crosslab_core::domain::{Bar, Signal, Windows};
    use crosslab_core::engine::annotate;

    fn bars(closes: &[f64]) -> Vec<Bar> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar {
                date: base + chrono::Duration::days(i as i64),
                open: c,
                high: c,
                low: c,
                close: c,
                volume: 10.0,
            })
            .collect()
    }

    fn annotated(closes: &[f64], short: i64, long: i64) -> Vec<AnnotatedBar> {
        annotate(&bars(closes), Windows::new(short, long).unwrap())
    }

    const EXAMPLE: [f64; 10] = [10.0, 10.0, 10.0, 12.0, 14.0, 16.0, 14.0, 12.0, 10.0, 10.0];

    // ── Return series ──

    #[test]
    fn daily_returns_basic() {
        let r = daily_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(r.len(), 2);
        assert!((r[0] - 0.1).abs() < 1e-12);
        assert!((r[1] - (-0.1)).abs() < 1e-12);
    }

    #[test]
    fn strategy_returns_skip_flat_and_lag_one_bar() {
        let a = annotated(&EXAMPLE, 2, 4);
        let sr = strategy_returns(&a);
        // signal[2..=8] enters bars 3..=9
        assert_eq!(sr.len(), 7);
        // Bar 3 entered Short: 12/10 - 1 = +20% market, -20% strategy
        assert!((sr[0] - (-0.2)).abs() < 1e-12);
        // Bar 4 entered Long: 14/12 - 1
        assert!((sr[1] - (14.0 / 12.0 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn equity_curve_compounds() {
        let eq = equity_curve(&[0.1, -0.5]);
        assert!((eq[0] - 1.1).abs() < 1e-12);
        assert!((eq[1] - 0.55).abs() < 1e-12);
    }

    // ── Individual metrics ──

    #[test]
    fn compounded_return_basic() {
        assert!((compounded_return(&[0.1, 0.1]) - 0.21).abs() < 1e-12);
        assert_eq!(compounded_return(&[]), 0.0);
    }

    #[test]
    fn sharpe_constant_returns_is_zero() {
        assert_eq!(sharpe_ratio(&[0.01; 50]), 0.0);
        assert_eq!(sharpe_ratio(&[0.01]), 0.0);
    }

    #[test]
    fn sharpe_ignores_rounding_noise_in_constant_returns() {
        // Ten 0.1s do not sum to exactly 1.0, so the deviation is tiny but nonzero.
        assert_eq!(sharpe_ratio(&[0.1; 10]), 0.0);
        assert_eq!(sharpe_ratio(&[-0.003; 37]), 0.0);
    }

    #[test]
    fn sharpe_uses_sample_std() {
        let r = [0.01, -0.01, 0.02, 0.0];
        let mean = 0.005;
        let var = ((0.005_f64).powi(2) + 0.015_f64.powi(2) + 0.015_f64.powi(2) + 0.005_f64.powi(2)) / 3.0;
        let expected = mean / var.sqrt() * 252.0_f64.sqrt();
        assert!((sharpe_ratio(&r) - expected).abs() < 1e-9);
    }

    #[test]
    fn max_drawdown_known_curve() {
        // Peak 1.2, trough 0.9 → -25%
        let dd = max_drawdown(&[1.0, 1.2, 0.9, 1.1]);
        assert!((dd - (-0.25)).abs() < 1e-12);
        assert_eq!(max_drawdown(&[]), 0.0);
        assert_eq!(max_drawdown(&[1.0, 1.1, 1.2]), 0.0);
    }

    #[test]
    fn max_drawdown_peak_starts_at_first_point() {
        // First point already below 1.0 is not a drawdown by itself
        assert_eq!(max_drawdown(&[0.8, 0.9]), 0.0);
    }

    #[test]
    fn win_rate_counts_strict_gains() {
        assert!((win_rate(&[0.1, 0.0, -0.1, 0.2]) - 0.5).abs() < 1e-12);
        assert_eq!(win_rate(&[]), 0.0);
    }

    // ── Aggregate ──

    #[test]
    fn example_metrics() {
        let a = annotated(&EXAMPLE, 2, 4);
        let m = PerformanceMetrics::compute(&a);

        assert_eq!(m.total_trades, 2);
        // Market: 10 → 10 over the whole series
        assert_eq!(m.buy_hold_return, 0.0);

        // sr: -0.2, 14/12-1, 16/14-1, 14/16-1, 12/14-1, -(10/12-1), -(10/10-1)
        let sr = strategy_returns(&a);
        let expected_total = (compounded_return(&sr) * 100.0 * 100.0).round() / 100.0;
        assert_eq!(m.total_return, expected_total);
        // Winners: bars 4, 5 (Long, rising) and 8 (Short, falling)
        assert_eq!(m.win_rate, 42.86);
        assert!(m.max_drawdown >= 0.0);
    }

    #[test]
    fn short_series_is_zeroed() {
        let a = annotated(&[10.0, 11.0, 12.0], 3, 5);
        assert!(a.iter().all(|b| b.signal == Signal::Flat));
        assert_eq!(PerformanceMetrics::compute(&a), PerformanceMetrics::zeroed());
    }

    #[test]
    fn signal_on_last_bar_only_is_zeroed() {
        // signal starts at index 2, which is the last bar: nothing is entered
        let a = annotated(&[10.0, 11.0, 12.0], 2, 3);
        assert_eq!(PerformanceMetrics::compute(&a), PerformanceMetrics::zeroed());
    }

    #[test]
    fn constant_series_metrics() {
        let a = annotated(&[50.0; 40], 5, 10);
        let m = PerformanceMetrics::compute(&a);
        assert_eq!(m, PerformanceMetrics::zeroed());
    }

    #[test]
    fn metrics_are_finite_and_rounded() {
        let closes: Vec<f64> = (0..120)
            .map(|i| 100.0 + (i as f64 * 0.37).sin() * 7.0 + i as f64 * 0.1)
            .collect();
        let m = PerformanceMetrics::compute(&annotated(&closes, 5, 20));
        for v in [m.total_return, m.buy_hold_return, m.sharpe_ratio, m.max_drawdown, m.win_rate] {
            assert!(v.is_finite());
            assert_eq!((v * 100.0).round() / 100.0, v);
        }
        assert!(m.max_drawdown >= 0.0);
        assert!((0.0..=100.0).contains(&m.win_rate));
    }
}
