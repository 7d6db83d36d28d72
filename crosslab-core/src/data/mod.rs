//! Market data: providers and the normalized price series.

pub mod circuit_breaker;
pub mod csv_import;
pub mod provider;
pub mod series;
pub mod synthetic;
pub mod yahoo;

pub use circuit_breaker::{BreakerState, CircuitBreaker};
pub use csv_import::{read_bars, CsvProvider};
pub use provider::{DataError, DataProvider, DataSource, FetchResult, RawBar};
pub use series::{AdjustMode, PriceSeries};
pub use synthetic::SyntheticProvider;
pub use yahoo::YahooProvider;
