//! Trade extraction: converts signal flips into buy/sell events.
//!
//! Post-processes the annotated series. Pure function: annotated bars in,
//! trades out, in date order.

use crate::domain::{crossover, AnnotatedBar, Trade};
use crate::numeric::{report, report_opt};
use tracing::debug;

/// Emit a trade at every bar where the signal flips between `Short` and `Long`.
///
/// Transitions out of `Flat` are never trades. Price and both averages are
/// rounded to 2 decimals here and nowhere earlier.
pub fn extract_trades(annotated: &[AnnotatedBar]) -> Vec<Trade> {
    let trades: Vec<Trade> = annotated
        .windows(2)
        .filter_map(|pair| {
            let (prev, cur) = (&pair[0], &pair[1]);
            let kind = crossover(prev.signal, cur.signal)?;
            debug_assert!(cur.has_both_averages());
            Some(Trade {
                date: cur.bar.date,
                price: report(cur.close()),
                kind,
                ma_short_value: report_opt(cur.ma_short),
                ma_long_value: report_opt(cur.ma_long),
            })
        })
        .collect();

    debug!(
        bars = annotated.len(),
        trades = trades.len(),
        "extracted trades"
    );
    trades
}
