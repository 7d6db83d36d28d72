//! Simulation result and the success/error envelope sent to clients.

use crosslab_core::domain::Trade;
use serde::{Deserialize, Serialize};

use crate::chart::ChartData;
use crate::metrics::PerformanceMetrics;
use crate::runner::RunError;

/// Complete result of one simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub symbol: String,
    /// `"<start> to <end>"`
    pub period: String,
    /// `"MA<short> / MA<long>"`
    pub ma_windows: String,
    pub chart_data: ChartData,
    pub trades: Vec<Trade>,
    pub metrics: PerformanceMetrics,
}

impl SimulationResult {
    pub fn buy_count(&self) -> usize {
        self.trades.iter().filter(|t| t.is_buy()).count()
    }

    pub fn sell_count(&self) -> usize {
        self.trades.len() - self.buy_count()
    }
}

/// `{ success, data, error }`: exactly one of `data` / `error` is set.
///
/// Failures never surface as transport errors; clients always read this
/// envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResponse {
    pub success: bool,
    pub data: Option<SimulationResult>,
    pub error: Option<String>,
}

impl SimulationResponse {
    pub fn ok(result: SimulationResult) -> Self {
        Self {
            success: true,
            data: Some(result),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn from_outcome(outcome: Result<SimulationResult, RunError>) -> Self {
        match outcome {
            Ok(result) => Self::ok(result),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}
