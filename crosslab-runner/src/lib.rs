//! CrossLab Runner: simulation orchestration on top of `crosslab-core`.
//!
//! This crate provides:
//! - Request validation (`SimulationRequest` → `ValidatedRequest`)
//! - The simulation runner (fetch → annotate → trades + metrics → chart)
//! - Performance metrics and chart-ready output
//! - The `{ success, data, error }` response envelope
//! - TOML configuration and JSON/CSV/Markdown export

pub mod chart;
pub mod config;
pub mod export;
pub mod metrics;
pub mod request;
pub mod result;
pub mod runner;

pub use chart::ChartData;
pub use config::{AppConfig, ConfigError, DataConfig, DataSourceKind, ServerConfig, SimulationConfig};
pub use metrics::PerformanceMetrics;
pub use request::{Period, SimulationRequest, ValidatedRequest, ValidationError};
pub use result::{SimulationResponse, SimulationResult};
pub use runner::{run_simulation, run_simulation_with, simulate_from_series, RunError};
