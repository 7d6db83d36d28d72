//! TOML application configuration.
//!
//! ```toml
//! [simulation]
//! symbol = "AAPL"
//! start_date = "2023-01-01"
//! end_date = "2024-01-01"
//! ma1_window = 20
//! ma2_window = 50
//!
//! [data]
//! source = "yahoo"      # yahoo | csv | synthetic
//! csv_dir = "data"
//! adjust = true
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//! frontend_dir = "frontend"
//! ```
//!
//! Every section and field is optional; missing values take the defaults above.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crosslab_core::data::{
    AdjustMode, CircuitBreaker, CsvProvider, DataError, DataProvider, SyntheticProvider,
    YahooProvider,
};

use crate::request::SimulationRequest;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("build data provider: {0}")]
    Provider(#[from] DataError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub data: DataConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Default request parameters for `crosslab simulate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub symbol: String,
    pub start_date: String,
    pub end_date: String,
    pub ma1_window: i64,
    pub ma2_window: i64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            symbol: "AAPL".into(),
            start_date: "2023-01-01".into(),
            end_date: "2024-01-01".into(),
            ma1_window: 20,
            ma2_window: 50,
        }
    }
}

impl SimulationConfig {
    pub fn to_request(&self) -> SimulationRequest {
        SimulationRequest::new(
            self.symbol.clone(),
            self.start_date.clone(),
            self.end_date.clone(),
            self.ma1_window,
            self.ma2_window,
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    #[default]
    Yahoo,
    Csv,
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub source: DataSourceKind,
    pub csv_dir: PathBuf,
    pub adjust: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: DataSourceKind::Yahoo,
            csv_dir: PathBuf::from("data"),
            adjust: true,
        }
    }
}

impl DataConfig {
    pub fn adjust_mode(&self) -> AdjustMode {
        AdjustMode::from_flag(self.adjust)
    }

    /// Construct the configured provider. One provider (and for Yahoo one
    /// circuit breaker) is meant to be shared by every request.
    pub fn build_provider(&self) -> Result<Arc<dyn DataProvider>, ConfigError> {
        let provider: Arc<dyn DataProvider> = match self.source {
            DataSourceKind::Yahoo => Arc::new(YahooProvider::new(Arc::new(
                CircuitBreaker::default_provider(),
            ))?),
            DataSourceKind::Csv => Arc::new(CsvProvider::new(&self.csv_dir)),
            DataSourceKind::Synthetic => Arc::new(SyntheticProvider::new()),
        };
        Ok(provider)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub frontend_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            frontend_dir: PathBuf::from("frontend"),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
