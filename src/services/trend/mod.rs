//! Trend channel detection.
//!
//! Two pure stages evaluated in sequence per symbol: the window selector
//! finds the lookback whose linear fit to closing price is strongest, and
//! the channel classifier builds an envelope over exactly that window and
//! classifies the latest close against it.

pub mod channel;
pub mod regression;
pub mod selector;

pub use channel::{classify, TrendChannel};
pub use regression::{linear_fit, population_std, LinearFit};
pub use selector::{select_window, TrendSelection};
