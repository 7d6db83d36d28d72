//! AnnotatedBar: a bar with its moving averages and signal.

use super::bar::Bar;
use super::signal::Signal;
use serde::{Deserialize, Serialize};

/// A bar plus everything the signal engine derived for it.
///
/// Averages are `None` until their window is filled. They are never zero-filled
/// here; that only happens when a value crosses the output boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedBar {
    pub bar: Bar,
    pub ma_short: Option<f64>,
    pub ma_long: Option<f64>,
    pub signal: Signal,
    /// `signal.code() - previous.signal.code()`; 0 on the first bar.
    pub position_delta: i8,
}

impl AnnotatedBar {
    pub fn close(&self) -> f64 {
        self.bar.close
    }

    /// True when the signal flipped between `Long` and `Short` on this bar.
    pub fn is_crossover(&self) -> bool {
        self.position_delta.abs() == 2
    }

    pub fn has_both_averages(&self) -> bool {
        self.ma_short.is_some() && self.ma_long.is_some()
    }
}
