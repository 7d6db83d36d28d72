//! Moving-average and signal annotation.
//!
//! Both averages are computed once over the whole series, then a single
//! forward scan derives the signal and position delta for each bar.

use crate::domain::{next_signal, AnnotatedBar, Bar, Signal, Windows};
use crate::indicators::{Indicator, Sma};
use tracing::debug;

/// Annotate every bar with both averages, its signal and its position delta.
///
/// The output has one entry per input bar, in input order.
///
/// - `ma_short` is defined from index `short - 1`, `ma_long` from `long - 1`.
/// - The signal is evaluated from index `short` onward; earlier bars are `Flat`.
///   Between `short` and `long - 1` the long average is still undefined and
///   the signal is `Short`.
/// - `position_delta[0]` is 0.
pub fn annotate(bars: &[Bar], windows: Windows) -> Vec<AnnotatedBar> {
    let short = Sma::new(windows.short());
    let long = Sma::new(windows.long());
    let ma_short = short.compute(bars);
    let ma_long = long.compute(bars);

    debug_assert_eq!(ma_short.len(), bars.len());
    debug_assert_eq!(ma_long.len(), bars.len());

    let first_signal = windows.short();
    let mut prev = Signal::Flat;

    let annotated: Vec<AnnotatedBar> = bars
        .iter()
        .zip(ma_short.into_iter().zip(ma_long))
        .enumerate()
        .map(|(i, (bar, (ma_short, ma_long)))| {
            let signal = if i < first_signal {
                Signal::Flat
            } else {
                next_signal(prev, ma_short, ma_long)
            };
            let position_delta = if i == 0 {
                0
            } else {
                signal.code() - prev.code()
            };
            prev = signal;

            AnnotatedBar {
                bar: bar.clone(),
                ma_short,
                ma_long,
                signal,
                position_delta,
            }
        })
        .collect();

    debug!(
        bars = annotated.len(),
        %windows,
        short = short.name(),
        long = long.name(),
        "annotated series"
    );
    annotated
}
