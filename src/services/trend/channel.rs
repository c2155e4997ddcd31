//! Channel construction and breakout classification.

use crate::config::TrendConfig;
use crate::services::trend::regression::{linear_fit, population_std, LinearFit};
use crate::types::{BreakoutDirection, BreakoutEvent, PriceSeries, TrendStrength};

/// A fitted trendline with its envelope, aligned index-for-index with the
/// window's closes.
#[derive(Debug, Clone)]
pub struct TrendChannel {
    pub fit: LinearFit,
    pub trendline: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

impl TrendChannel {
    /// Build the channel for a window of closes. The envelope offset is
    /// `multiplier` times the population std deviation of the trendline
    /// itself, not of the residuals.
    pub fn from_closes(closes: &[f64], multiplier: f64) -> Option<Self> {
        let fit = linear_fit(closes)?;
        let trendline: Vec<f64> = (0..closes.len())
            .map(|i| fit.slope * i as f64 + fit.intercept)
            .collect();
        let offset = population_std(&trendline) * multiplier;
        let upper = trendline.iter().map(|t| t + offset).collect();
        let lower = trendline.iter().map(|t| t - offset).collect();
        Some(Self {
            fit,
            trendline,
            upper,
            lower,
        })
    }
}

/// Classify the latest close of `series` against a channel fitted over its
/// last `window` bars.
///
/// The regression is recomputed here rather than reusing the selector's
/// fit, so the envelope always derives from exactly the window given.
/// Returns `None` when the fit fails the |r| gate or the close stays
/// inside the envelope.
pub fn classify(series: &PriceSeries, window: usize, cfg: &TrendConfig) -> Option<BreakoutEvent> {
    let closes = series.closes();
    if closes.len() < 2 || window < 2 {
        return None;
    }
    let window = window.min(closes.len());
    let tail = &closes[closes.len() - window..];

    let channel = TrendChannel::from_closes(tail, cfg.band_multiplier)?;
    let abs_r = channel.fit.r.abs();

    let last_close = *tail.last()?;
    let last_upper_diff = channel.upper.last()? - last_close;
    let last_lower_diff = last_close - channel.lower.last()?;

    // Strength always reflects the strong-trend threshold, not the gate.
    let strength = TrendStrength::from_abs_r(abs_r, cfg.strong_trend_r);

    if abs_r <= cfg.min_abs_r {
        return None;
    }

    // Upward check first; the bands cannot both be crossed since upper >= lower.
    let direction = if last_upper_diff < 0.0 {
        BreakoutDirection::Up
    } else if last_lower_diff < 0.0 {
        BreakoutDirection::Down
    } else {
        return None;
    };

    Some(BreakoutEvent::new(
        series.symbol(),
        direction,
        strength,
        abs_r,
        last_close,
        window,
    ))
}
