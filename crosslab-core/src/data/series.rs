//! PriceSeries adapter: raw provider bars to an engine-ready daily series.
//!
//! Guarantees on the output:
//! - dates strictly increasing, no duplicates (first bar of a date wins)
//! - every bar has finite OHLC, a positive close and non-negative volume
//! - non-empty

use super::provider::{DataError, RawBar};
use crate::domain::Bar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Whether OHLC is rescaled by `adj_close / close`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustMode {
    /// Split/dividend adjusted prices, like Yahoo's auto-adjusted history.
    #[default]
    Adjusted,
    /// Prices exactly as traded.
    Raw,
}

impl AdjustMode {
    pub fn from_flag(adjust: bool) -> Self {
        if adjust {
            AdjustMode::Adjusted
        } else {
            AdjustMode::Raw
        }
    }
}

/// Ordered, validated daily bars for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Normalize raw bars. Fails with `NoData` if nothing usable remains.
    pub fn from_raw(
        symbol: &str,
        mut raw: Vec<RawBar>,
        mode: AdjustMode,
    ) -> Result<Self, DataError> {
        let received = raw.len();

        // Stable sort keeps the provider's order among equal dates.
        raw.sort_by_key(|b| b.date);
        raw.dedup_by_key(|b| b.date);
        let duplicates = received - raw.len();

        let bars: Vec<Bar> = raw
            .into_iter()
            .map(|r| to_bar(r, mode))
            .filter(Bar::is_usable)
            .collect();

        let dropped = received - duplicates - bars.len();
        if duplicates > 0 || dropped > 0 {
            warn!(symbol, duplicates, dropped, "discarded raw bars");
        }

        if bars.is_empty() {
            return Err(DataError::NoData {
                symbol: symbol.to_string(),
            });
        }

        debug!(symbol, bars = bars.len(), ?mode, "built price series");
        Ok(Self {
            symbol: symbol.to_string(),
            bars,
        })
    }

    /// Wrap bars that are already ordered and clean. Same checks as
    /// `from_raw` without adjustment.
    pub fn from_bars(symbol: &str, bars: Vec<Bar>) -> Result<Self, DataError> {
        let raw = bars
            .into_iter()
            .map(|b| RawBar::unadjusted(b.date, b.open, b.high, b.low, b.close, b.volume))
            .collect();
        Self::from_raw(symbol, raw, AdjustMode::Raw)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a constructed series; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.bars[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.bars[self.bars.len() - 1].date
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn into_bars(self) -> Vec<Bar> {
        self.bars
    }
}

fn to_bar(raw: RawBar, mode: AdjustMode) -> Bar {
    let ratio = match mode {
        AdjustMode::Adjusted
            if raw.adj_close.is_finite() && raw.close.is_finite() && raw.close != 0.0 =>
        {
            raw.adj_close / raw.close
        }
        _ => 1.0,
    };

    Bar {
        date: raw.date,
        open: raw.open * ratio,
        high: raw.high * ratio,
        low: raw.low * ratio,
        close: raw.close * ratio,
        volume: raw.volume,
    }
}
