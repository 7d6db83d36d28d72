//! Bar, the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily OHLCV bar.
///
/// Bars are produced by the `PriceSeries` adapter and are immutable from then
/// on. Within a series, dates are strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Returns true if any OHLC field is NaN (void bar).
    pub fn is_void(&self) -> bool {
        self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan()
    }

    /// Minimum requirements for a bar to enter the engine: finite prices,
    /// positive close and non-negative volume.
    ///
    /// High/low consistency is not required. Providers occasionally report an
    /// adjusted close a hair outside the unadjusted range and the engine only
    /// reads `close`.
    pub fn is_usable(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.close.is_finite() && self.close > 0.0 && self.volume >= 0.0
    }

    /// Stricter OHLC sanity check: high >= low, open and close inside the range.
    pub fn is_sane(&self) -> bool {
        self.is_usable()
            && self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
    }
}
