//! CrossLab Core: domain types, data providers and the crossover engine.
//!
//! This crate contains the heart of the backtester:
//! - Domain types (bars, signals, annotated bars, trades, window pairs)
//! - Data providers (Yahoo Finance, CSV, synthetic) and the `PriceSeries` adapter
//! - Moving-average indicators
//! - Annotation and trade extraction
//!
//! Nothing here knows about HTTP, configuration files or presentation.

pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod numeric;
