//! Chart-ready per-bar arrays.

use chrono::NaiveDate;
use crosslab_core::domain::AnnotatedBar;
use crosslab_core::numeric::{report, report_opt};
use serde::{Deserialize, Serialize};

/// Parallel arrays, one entry per input bar, in input order.
///
/// Undefined averages and any non-finite value are emitted as `0.0`; every
/// number is rounded to 2 decimals. Field names on the wire follow the chart
/// client (`ma1`, `ma2`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub dates: Vec<NaiveDate>,
    pub prices: Vec<f64>,
    #[serde(rename = "ma1")]
    pub ma_short: Vec<f64>,
    #[serde(rename = "ma2")]
    pub ma_long: Vec<f64>,
    pub volume: Vec<f64>,
}

impl ChartData {
    pub fn from_annotated(annotated: &[AnnotatedBar]) -> Self {
        let n = annotated.len();
        let mut chart = ChartData {
            dates: Vec::with_capacity(n),
            prices: Vec::with_capacity(n),
            ma_short: Vec::with_capacity(n),
            ma_long: Vec::with_capacity(n),
            volume: Vec::with_capacity(n),
        };

        for a in annotated {
            chart.dates.push(a.bar.date);
            chart.prices.push(report(a.bar.close));
            chart.ma_short.push(report_opt(a.ma_short));
            chart.ma_long.push(report_opt(a.ma_long));
            chart.volume.push(report(a.bar.volume));
        }

        chart
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// True when every array has the same length.
    pub fn is_aligned(&self) -> bool {
        let n = self.dates.len();
        self.prices.len() == n
            && self.ma_short.len() == n
            && self.ma_long.len() == n
            && self.volume.len() == n
    }
}
