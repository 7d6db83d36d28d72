//! Moving-average window pair.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Rejected window parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("Moving average windows must be positive")]
    NonPositiveWindow,

    #[error("MA1 window should be smaller than MA2 window")]
    WindowOrder,
}

/// A validated `(short, long)` window pair with `0 < short < long`.
///
/// The engine only accepts this type, so malformed parameters are rejected
/// before any computation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWindows", into = "RawWindows")]
pub struct Windows {
    short: usize,
    long: usize,
}

impl Windows {
    pub fn new(short: i64, long: i64) -> Result<Self, ParamError> {
        if short <= 0 || long <= 0 {
            return Err(ParamError::NonPositiveWindow);
        }
        if short >= long {
            return Err(ParamError::WindowOrder);
        }
        let short = usize::try_from(short).map_err(|_| ParamError::NonPositiveWindow)?;
        let long = usize::try_from(long).map_err(|_| ParamError::NonPositiveWindow)?;
        Ok(Self { short, long })
    }

    pub fn short(&self) -> usize {
        self.short
    }

    pub fn long(&self) -> usize {
        self.long
    }
}

impl fmt::Display for Windows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MA{} / MA{}", self.short, self.long)
    }
}

#[derive(Serialize, Deserialize)]
struct RawWindows {
    short: i64,
    long: i64,
}

impl TryFrom<RawWindows> for Windows {
    type Error = ParamError;

    fn try_from(raw: RawWindows) -> Result<Self, Self::Error> {
        Windows::new(raw.short, raw.long)
    }
}

impl From<Windows> for RawWindows {
    fn from(w: Windows) -> Self {
        RawWindows {
            short: w.short as i64,
            long: w.long as i64,
        }
    }
}
