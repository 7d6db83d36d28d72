//! End-to-end runs through real providers: CSV fixture, synthetic walk.

use chrono::NaiveDate;
use crosslab_core::data::{AdjustMode, CsvProvider, SyntheticProvider};
use crosslab_core::domain::Crossover;
use crosslab_runner::export::{import_json, write_result_json, write_trades_csv};
use crosslab_runner::{
    run_simulation, run_simulation_with, PerformanceMetrics, RunError, SimulationRequest,
    SimulationResponse,
};

const EXAMPLE_CSV: &str = "\
date,open,high,low,close,volume
2024-01-01,10,10,10,10,100
2024-01-02,10,10,10,10,100
2024-01-03,10,10,10,10,100
2024-01-04,12,12,12,12,100
2024-01-05,14,14,14,14,100
2024-01-06,16,16,16,16,100
2024-01-07,14,14,14,14,100
2024-01-08,12,12,12,12,100
2024-01-09,10,10,10,10,100
2024-01-10,10,10,10,10,100
";

fn csv_provider() -> (tempfile::TempDir, CsvProvider) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("EXMPL.csv"), EXAMPLE_CSV).unwrap();
    let provider = CsvProvider::new(dir.path());
    (dir, provider)
}

#[test]
fn worked_example_from_csv() {
    let (_dir, provider) = csv_provider();
    let req = SimulationRequest::new("EXMPL", "2024-01-01", "2024-02-01", 2, 4);
    let result = run_simulation(&req, &provider).unwrap();

    assert_eq!(result.period, "2024-01-01 to 2024-02-01");
    assert_eq!(result.ma_windows, "MA2 / MA4");
    assert_eq!(result.chart_data.len(), 10);
    assert!(result.chart_data.is_aligned());

    let kinds: Vec<Crossover> = result.trades.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![Crossover::Buy, Crossover::Sell]);
    assert_eq!(result.trades[0].price, 12.0);
    assert_eq!(result.trades[0].ma_short_value, 11.0);
    assert_eq!(result.trades[0].ma_long_value, 10.5);
    assert_eq!(result.trades[1].ma_short_value, 13.0);
    assert_eq!(result.trades[1].ma_long_value, 14.0);

    assert_eq!(result.metrics.total_trades, 2);
    assert_eq!(result.metrics.buy_hold_return, 0.0);
    assert_eq!(result.metrics.win_rate, 42.86);

    // Before the long average exists the chart shows 0.0
    assert_eq!(result.chart_data.ma_long[..3], [0.0, 0.0, 0.0]);
}

#[test]
fn end_date_is_exclusive() {
    let (_dir, provider) = csv_provider();
    let req = SimulationRequest::new("EXMPL", "2024-01-01", "2024-01-10", 2, 4);
    let result = run_simulation(&req, &provider).unwrap();
    assert_eq!(result.chart_data.len(), 9);
    assert_eq!(
        result.chart_data.dates.last().copied(),
        NaiveDate::from_ymd_opt(2024, 1, 9)
    );
}

#[test]
fn missing_symbol_file_is_fetch_failure() {
    let (_dir, provider) = csv_provider();
    let req = SimulationRequest::new("NOPE", "2024-01-01", "2024-02-01", 2, 4);
    let err = run_simulation(&req, &provider).unwrap_err();
    assert!(matches!(err, RunError::Fetch { .. }));

    let resp = SimulationResponse::from_outcome(Err(err));
    assert!(!resp.success);
    assert!(resp.data.is_none());
    assert!(resp
        .error
        .as_deref()
        .unwrap()
        .starts_with("Failed to fetch data for NOPE: "));
}

#[test]
fn window_longer_than_series_gives_zeroed_metrics() {
    let (_dir, provider) = csv_provider();
    let req = SimulationRequest::new("EXMPL", "2024-01-01", "2024-02-01", 20, 50);
    let result = run_simulation(&req, &provider).unwrap();
    assert!(result.trades.is_empty());
    assert_eq!(result.metrics, PerformanceMetrics::zeroed());
    assert_eq!(result.chart_data.len(), 10);
}

#[test]
fn synthetic_year_runs_clean() {
    let provider = SyntheticProvider::new();
    let req = SimulationRequest::new("SYNTH", "2023-01-01", "2024-01-01", 10, 30);
    let result = run_simulation_with(&req, &provider, AdjustMode::Raw).unwrap();

    assert_eq!(result.chart_data.len(), 260);
    assert!(result.chart_data.is_aligned());
    assert_eq!(result.metrics.total_trades, result.trades.len());
    for pair in result.trades.windows(2) {
        assert_ne!(pair[0].kind, pair[1].kind);
    }
    let m = &result.metrics;
    for v in [
        m.total_return,
        m.buy_hold_return,
        m.sharpe_ratio,
        m.max_drawdown,
        m.win_rate,
    ] {
        assert!(v.is_finite());
    }
}

#[test]
fn exported_artifacts_reload() {
    let provider = SyntheticProvider::new();
    let req = SimulationRequest::new("SYNTH", "2023-01-01", "2024-01-01", 5, 20);
    let result = run_simulation(&req, &provider).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("runs/synth.json");
    let csv_path = dir.path().join("runs/synth_trades.csv");
    write_result_json(&json_path, &result).unwrap();
    write_trades_csv(&csv_path, &result.trades).unwrap();

    let reloaded = import_json(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(reloaded, result);

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), result.trades.len() + 1);
}
