//! Backtesting engine: annotation and trade extraction.
//!
//! The engine consumes a normalized price series and a validated window pair:
//!
//! 1. Annotate: both moving averages, signal and position delta per bar
//! 2. Extract: buy/sell events at every full signal flip
//!
//! Both stages are pure. They perform no I/O and hold no state between calls.

pub mod annotate;
pub mod trade_extraction;

pub use annotate::annotate;
pub use trade_extraction::extract_trades;
