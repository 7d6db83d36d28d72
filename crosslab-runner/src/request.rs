//! Simulation request parsing and validation.
//!
//! `SimulationRequest` is the loosely typed input as it arrives (HTTP JSON
//! body, CLI flags, config file). `validate` turns it into a
//! `ValidatedRequest` whose fields the runner can trust.

use chrono::NaiveDate;
use crosslab_core::domain::{ParamError, Windows};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Date format accepted for `start_date` / `end_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Params(#[from] ParamError),

    #[error("Symbol must not be empty")]
    EmptySymbol,

    #[error("Invalid {field} '{value}': expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    #[error("Start date must be before end date")]
    DateOrder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub symbol: String,
    pub start_date: String,
    pub end_date: String,
    pub ma1_window: i64,
    pub ma2_window: i64,
}

/// Half-open date range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub symbol: String,
    pub period: Period,
    pub windows: Windows,
}

impl SimulationRequest {
    pub fn new(
        symbol: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        ma1_window: i64,
        ma2_window: i64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            ma1_window,
            ma2_window,
        }
    }

    /// Checks run in a fixed order: windows, dates, date order, symbol. The
    /// first failure is reported.
    pub fn validate(&self) -> Result<ValidatedRequest, ValidationError> {
        let windows = Windows::new(self.ma1_window, self.ma2_window)?;

        let start = parse_date("start_date", &self.start_date)?;
        let end = parse_date("end_date", &self.end_date)?;
        if start >= end {
            return Err(ValidationError::DateOrder);
        }

        // The symbol is passed to the provider as-is.
        if self.symbol.trim().is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        Ok(ValidatedRequest {
            symbol: self.symbol.clone(),
            period: Period { start, end },
            windows,
        })
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidDate {
            field,
            value: value.to_string(),
        }
    })
}
