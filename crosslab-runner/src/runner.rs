//! Simulation runner: validation, fetch, engine, packaging.
//!
//! `run_simulation` is the entry point used by the CLI and the HTTP handler.
//! `simulate_from_series` is the I/O-free core it delegates to.

use thiserror::Error;
use tracing::{debug, info};

use crosslab_core::data::{AdjustMode, DataError, DataProvider, PriceSeries};
use crosslab_core::domain::Windows;
use crosslab_core::engine::{annotate, extract_trades};

use crate::chart::ChartData;
use crate::metrics::PerformanceMetrics;
use crate::request::{Period, SimulationRequest, ValidationError};
use crate::result::SimulationResult;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to fetch data for {symbol}: {source}")]
    Fetch {
        symbol: String,
        #[source]
        source: DataError,
    },

    #[error("Simulation failed: {0}")]
    Internal(String),
}

impl RunError {
    pub fn is_validation(&self) -> bool {
        matches!(self, RunError::Validation(_))
    }
}

/// Validate the request, fetch its series and run the simulation.
///
/// Prices are split/dividend adjusted, like the default Yahoo history.
pub fn run_simulation(
    request: &SimulationRequest,
    provider: &dyn DataProvider,
) -> Result<SimulationResult, RunError> {
    run_simulation_with(request, provider, AdjustMode::default())
}

/// `run_simulation` with an explicit adjustment mode.
pub fn run_simulation_with(
    request: &SimulationRequest,
    provider: &dyn DataProvider,
    adjust: AdjustMode,
) -> Result<SimulationResult, RunError> {
    let validated = request.validate()?;
    let symbol = validated.symbol.as_str();
    let fetch_error = |source| RunError::Fetch {
        symbol: symbol.to_string(),
        source,
    };

    debug!(
        symbol,
        provider = provider.name(),
        period = %validated.period,
        "fetching series"
    );
    let fetched = provider
        .fetch(symbol, validated.period.start, validated.period.end)
        .map_err(fetch_error)?;
    let series = PriceSeries::from_raw(symbol, fetched.bars, adjust).map_err(fetch_error)?;

    Ok(simulate_from_series(
        &series,
        validated.windows,
        validated.period,
    ))
}

/// Run the simulation over an already normalized series. No I/O.
pub fn simulate_from_series(
    series: &PriceSeries,
    windows: Windows,
    period: Period,
) -> SimulationResult {
    let annotated = annotate(series.bars(), windows);
    let trades = extract_trades(&annotated);
    let metrics = PerformanceMetrics::compute(&annotated);
    let chart_data = ChartData::from_annotated(&annotated);

    debug_assert_eq!(metrics.total_trades, trades.len());
    debug_assert_eq!(chart_data.len(), series.len());

    info!(
        symbol = series.symbol(),
        bars = series.len(),
        trades = trades.len(),
        total_return = metrics.total_return,
        %windows,
        "simulation complete"
    );

    SimulationResult {
        symbol: series.symbol().to_string(),
        period: period.to_string(),
        ma_windows: windows.to_string(),
        chart_data,
        trades,
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crosslab_core::data::{DataSource, FetchResult, RawBar};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider serving fixed closes from 2024-01-01 on, one per calendar day.
    struct FixedProvider {
        closes: Vec<f64>,
        calls: AtomicUsize,
    }

    impl FixedProvider {
        fn new(closes: &[f64]) -> Self {
            Self {
                closes: closes.to_vec(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl DataProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn fetch(
            &self,
            symbol: &str,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<FetchResult, DataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            let bars: Vec<RawBar> = self
                .closes
                .iter()
                .enumerate()
                .map(|(i, &c)| {
                    RawBar::unadjusted(base + chrono::Duration::days(i as i64), c, c, c, c, 1.0)
                })
                .filter(|b| b.date >= start && b.date < end)
                .collect();
            if bars.is_empty() {
                return Err(DataError::NoData {
                    symbol: symbol.to_string(),
                });
            }
            Ok(FetchResult {
                symbol: symbol.to_string(),
                bars,
                source: DataSource::Synthetic,
            })
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    const EXAMPLE: [f64; 10] = [10.0, 10.0, 10.0, 12.0, 14.0, 16.0, 14.0, 12.0, 10.0, 10.0];

    #[test]
    fn example_end_to_end() {
        let provider = FixedProvider::new(&EXAMPLE);
        let req = SimulationRequest::new("TEST", "2024-01-01", "2024-02-01", 2, 4);
        let result = run_simulation(&req, &provider).unwrap();

        assert_eq!(result.symbol, "TEST");
        assert_eq!(result.period, "2024-01-01 to 2024-02-01");
        assert_eq!(result.ma_windows, "MA2 / MA4");
        assert_eq!(result.chart_data.len(), 10);
        assert_eq!(result.trades.len(), 2);
        assert_eq!(result.buy_count(), 1);
        assert_eq!(result.sell_count(), 1);
        assert_eq!(result.metrics.total_trades, 2);
    }

    #[test]
    fn validation_fails_before_fetch() {
        let provider = FixedProvider::new(&EXAMPLE);
        let req = SimulationRequest::new("TEST", "2024-01-01", "2024-02-01", 4, 2);
        let err = run_simulation(&req, &provider).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "MA1 window should be smaller than MA2 window");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn empty_fetch_is_fetch_error() {
        let provider = FixedProvider::new(&EXAMPLE);
        let req = SimulationRequest::new("TEST", "2030-01-01", "2030-02-01", 2, 4);
        let err = run_simulation(&req, &provider).unwrap_err();
        assert!(matches!(err, RunError::Fetch { .. }));
        assert_eq!(
            err.to_string(),
            "Failed to fetch data for TEST: no data found for symbol TEST"
        );
    }

    #[test]
    fn unusable_series_is_fetch_error() {
        let provider = FixedProvider::new(&[-1.0, -2.0]);
        let req = SimulationRequest::new("NEG", "2024-01-01", "2024-02-01", 1, 2);
        let err = run_simulation(&req, &provider).unwrap_err();
        assert!(matches!(err, RunError::Fetch { ref symbol, .. } if symbol == "NEG"));
    }

    #[test]
    fn series_shorter_than_short_window() {
        let provider = FixedProvider::new(&[10.0, 11.0, 12.0]);
        let req = SimulationRequest::new("TINY", "2024-01-01", "2024-02-01", 5, 10);
        let result = run_simulation(&req, &provider).unwrap();
        assert!(result.trades.is_empty());
        assert_eq!(result.metrics, PerformanceMetrics::zeroed());
        assert_eq!(result.chart_data.len(), 3);
        assert!(result.chart_data.ma_short.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn identical_inputs_identical_outputs() {
        let closes: Vec<f64> = (0..200)
            .map(|i| 50.0 + (i as f64 * 0.21).sin() * 5.0)
            .collect();
        let provider = FixedProvider::new(&closes);
        let req = SimulationRequest::new("SIN", "2024-01-01", "2025-01-01", 5, 21);
        let a = run_simulation(&req, &provider).unwrap();
        let b = run_simulation(&req, &provider).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
