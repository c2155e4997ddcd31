//! breakscan - trend channel breakout scanner for equity price data

pub mod config;
pub mod error;
pub mod notify;
pub mod services;
pub mod sources;
pub mod types;

// Re-export commonly used types
pub use config::{Config, ShortWindowPolicy, TrendConfig};
pub use error::{Result, ScanError};
pub use services::{classify, deliver_report, select_window, PassReport, Scanner};
pub use types::*;
