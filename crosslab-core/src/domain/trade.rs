//! Trade: a crossover event reported to the caller.

use super::signal::Crossover;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A buy or sell event at a moving-average crossover.
///
/// `price`, `ma_short_value` and `ma_long_value` are rounded to 2 decimals at
/// emission. Field names on the wire follow the chart client
/// (`type`, `ma1`, `ma2`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub date: NaiveDate,
    pub price: f64,
    #[serde(rename = "type")]
    pub kind: Crossover,
    #[serde(rename = "ma1")]
    pub ma_short_value: f64,
    #[serde(rename = "ma2")]
    pub ma_long_value: f64,
}

impl Trade {
    pub fn is_buy(&self) -> bool {
        self.kind == Crossover::Buy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_serializes_with_client_field_names() {
        let trade = Trade {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            price: 101.25,
            kind: Crossover::Buy,
            ma_short_value: 100.5,
            ma_long_value: 99.75,
        };
        let json = serde_json::to_value(&trade).unwrap();
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["type"], "buy");
        assert_eq!(json["ma1"], 100.5);
        assert_eq!(json["ma2"], 99.75);
        assert!(trade.is_buy());
    }
}
