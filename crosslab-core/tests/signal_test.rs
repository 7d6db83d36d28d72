//! Signal engine tests on hand-computed series.

use chrono::NaiveDate;
use crosslab_core::domain::{Bar, Crossover, Signal, Windows};
use crosslab_core::engine::{annotate, extract_trades};

fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
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
            volume: 100.0,
        })
        .collect()
}

// ── Worked example ───────────────────────────────────────────────────

const EXAMPLE: [f64; 10] = [10.0, 10.0, 10.0, 12.0, 14.0, 16.0, 14.0, 12.0, 10.0, 10.0];

#[test]
fn example_averages() {
    let out = annotate(&bars_from_closes(&EXAMPLE), Windows::new(2, 4).unwrap());

    let ma_short: Vec<Option<f64>> = out.iter().map(|a| a.ma_short).collect();
    let ma_long: Vec<Option<f64>> = out.iter().map(|a| a.ma_long).collect();

    assert_eq!(
        ma_short,
        vec![
            None,
            Some(10.0),
            Some(10.0),
            Some(11.0),
            Some(13.0),
            Some(15.0),
            Some(15.0),
            Some(13.0),
            Some(11.0),
            Some(10.0),
        ]
    );
    assert_eq!(
        ma_long,
        vec![
            None,
            None,
            None,
            Some(10.5),
            Some(11.5),
            Some(13.0),
            Some(14.0),
            Some(14.0),
            Some(13.0),
            Some(11.5),
        ]
    );
}

#[test]
fn example_signals() {
    use Signal::*;
    let out = annotate(&bars_from_closes(&EXAMPLE), Windows::new(2, 4).unwrap());
    let signals: Vec<Signal> = out.iter().map(|a| a.signal).collect();
    assert_eq!(
        signals,
        vec![Flat, Flat, Short, Long, Long, Long, Long, Short, Short, Short]
    );
}

#[test]
fn example_one_buy_then_one_sell() {
    let bars = bars_from_closes(&EXAMPLE);
    let out = annotate(&bars, Windows::new(2, 4).unwrap());
    let trades = extract_trades(&out);

    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].kind, Crossover::Buy);
    assert_eq!(trades[0].date, bars[3].date);
    assert_eq!(trades[1].kind, Crossover::Sell);
    assert_eq!(trades[1].date, bars[7].date);

    let crossovers = out.iter().filter(|a| a.is_crossover()).count();
    assert_eq!(crossovers, trades.len());
}

// ── Edge cases ───────────────────────────────────────────────────────

#[test]
fn falling_series_never_buys() {
    let closes: Vec<f64> = (0..40).map(|i| 100.0 - i as f64).collect();
    let out = annotate(&bars_from_closes(&closes), Windows::new(3, 8).unwrap());
    assert!(extract_trades(&out).is_empty());
    assert!(out[3..].iter().all(|a| a.signal == Signal::Short));
}

#[test]
fn rising_series_buys_exactly_once() {
    let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
    let out = annotate(&bars_from_closes(&closes), Windows::new(3, 8).unwrap());
    let trades = extract_trades(&out);
    assert_eq!(trades.len(), 1);
    assert!(trades[0].is_buy());
    // First bar with the long average defined
    assert_eq!(trades[0].date, out[7].bar.date);
}

#[test]
fn series_exactly_short_window_long() {
    let out = annotate(&bars_from_closes(&[1.0, 2.0, 3.0]), Windows::new(3, 5).unwrap());
    assert!(out.iter().all(|a| a.signal.is_flat()));
    assert!(out[2].ma_short.is_some());
    assert!(extract_trades(&out).is_empty());
}

#[test]
fn trades_only_where_both_averages_exist() {
    let closes = [5.0, 9.0, 1.0, 8.0, 2.0, 7.0, 3.0, 6.0, 4.0, 5.0, 9.0, 1.0];
    let bars = bars_from_closes(&closes);
    let out = annotate(&bars, Windows::new(1, 3).unwrap());
    for (i, a) in out.iter().enumerate() {
        if a.is_crossover() {
            assert!(a.has_both_averages(), "crossover without averages at {i}");
        }
    }
    assert!(!extract_trades(&out).is_empty());
}
