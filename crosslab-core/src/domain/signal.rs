//! Tri-state position signal and the crossover transitions between signals.

use serde::{Deserialize, Serialize};

/// Position implied by the moving-average comparison at the close of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Long,
    Short,
    /// No signal yet (warmup).
    #[default]
    Flat,
}

impl Signal {
    /// Numeric position: Long = +1, Short = -1, Flat = 0.
    pub fn code(self) -> i8 {
        match self {
            Signal::Long => 1,
            Signal::Short => -1,
            Signal::Flat => 0,
        }
    }

    /// Position multiplier applied to the next bar's return.
    pub fn exposure(self) -> f64 {
        f64::from(self.code())
    }

    pub fn is_flat(self) -> bool {
        self == Signal::Flat
    }
}

/// Direction of a crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Crossover {
    /// Short average crossed above the long average.
    Buy,
    /// Short average crossed below the long average.
    Sell,
}

/// Signal for a bar whose short-window average is filled.
///
/// `Long` only on a strict `ma_short > ma_long`. Ties and an undefined long
/// average both resolve to `Short`. With no short average there is nothing to
/// compare, so the previous signal carries over.
pub fn next_signal(prev: Signal, ma_short: Option<f64>, ma_long: Option<f64>) -> Signal {
    match (ma_short, ma_long) {
        (Some(short), Some(long)) if short > long => Signal::Long,
        (Some(_), _) => Signal::Short,
        (None, _) => prev,
    }
}

/// Crossover implied by moving from `prev` to `next`.
///
/// Only a full flip between `Short` and `Long` is a crossover. Leaving `Flat`
/// never is.
pub fn crossover(prev: Signal, next: Signal) -> Option<Crossover> {
    match (prev, next) {
        (Signal::Short, Signal::Long) => Some(Crossover::Buy),
        (Signal::Long, Signal::Short) => Some(Crossover::Sell),
        _ => None,
    }
}
