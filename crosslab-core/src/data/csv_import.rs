//! CSV file provider.
//!
//! Reads `<dir>/<SYMBOL>.csv` with a header row. Accepts both the lowercase
//! layout written by this project (`date,open,high,low,close,volume[,adj_close]`)
//! and Yahoo's download layout (`Date,Open,High,Low,Close,Adj Close,Volume`).

use super::provider::{DataError, DataProvider, DataSource, FetchResult, RawBar};
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "Date")]
    date: NaiveDate,
    #[serde(alias = "Open")]
    open: f64,
    #[serde(alias = "High")]
    high: f64,
    #[serde(alias = "Low")]
    low: f64,
    #[serde(alias = "Close")]
    close: f64,
    #[serde(alias = "Volume", default)]
    volume: f64,
    #[serde(
        alias = "Adj Close",
        alias = "adj close",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    adj_close: Option<f64>,
}

impl From<CsvRow> for RawBar {
    fn from(row: CsvRow) -> Self {
        RawBar {
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
            adj_close: row.adj_close.unwrap_or(row.close),
        }
    }
}

/// Provider backed by a directory of per-symbol CSV files.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<symbol>.csv`, or `None` when the symbol is not a single plain
    /// file name (`..`, separators, absolute paths), so lookups stay inside `dir`.
    pub fn path_for(&self, symbol: &str) -> Option<PathBuf> {
        let mut components = Path::new(symbol).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == symbol => {
                Some(self.dir.join(format!("{symbol}.csv")))
            }
            _ => None,
        }
    }
}

/// Parse CSV bars from any reader. Rows that fail to parse are an error;
/// value-level checks happen later in `PriceSeries::from_raw`.
pub fn read_bars<R: Read>(reader: R) -> Result<Vec<RawBar>, DataError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    rdr.deserialize::<CsvRow>()
        .map(|row| row.map(RawBar::from).map_err(|e| DataError::Csv(e.to_string())))
        .collect()
}

impl DataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        let path = self.path_for(symbol).ok_or_else(|| {
            warn!(symbol, "rejected symbol that is not a plain file name");
            DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            }
        })?;
        let file = std::fs::File::open(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), "no CSV file for symbol");
                DataError::SymbolNotFound {
                    symbol: symbol.to_string(),
                }
            } else {
                DataError::Csv(format!("{}: {e}", path.display()))
            }
        })?;

        let mut bars = read_bars(file)?;
        bars.retain(|b| b.date >= start && b.date < end);

        if bars.is_empty() {
            return Err(DataError::NoData {
                symbol: symbol.to_string(),
            });
        }

        debug!(symbol, bars = bars.len(), path = %path.display(), "loaded CSV");
        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::CsvImport,
        })
    }

    fn is_available(&self) -> bool {
        self.dir.is_dir()
    }
}
