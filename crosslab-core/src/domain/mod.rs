//! Domain types for CrossLab

pub mod annotated;
pub mod bar;
pub mod signal;
pub mod trade;
pub mod windows;

pub use annotated::AnnotatedBar;
pub use bar::Bar;
pub use signal::{crossover, next_signal, Crossover, Signal};
pub use trade::Trade;
pub use windows::{ParamError, Windows};
