//! Lookback window selection.
//!
//! Scans the fixed family of candidate windows and keeps the one whose
//! linear fit to closing price is strongest by |r|.

use crate::config::{ShortWindowPolicy, TrendConfig};
use crate::services::trend::regression::{linear_fit, LinearFit};
use crate::types::PriceSeries;

/// The chosen lookback window and its fit.
///
/// `window` is the effective length the fit ran over; under the clamp
/// policy this can be shorter than the nominal candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendSelection {
    pub window: usize,
    pub fit: LinearFit,
}

/// Pick the candidate window whose regression over the series tail has the
/// highest |r|.
///
/// The scan only overwrites the running best on strict improvement, so the
/// first candidate establishes the baseline and later ties keep the
/// earlier (smaller) window. Returns `None` when no candidate leaves at
/// least two usable closes.
pub fn select_window(series: &PriceSeries, cfg: &TrendConfig) -> Option<TrendSelection> {
    let closes = series.closes();
    let mut best: Option<TrendSelection> = None;

    for candidate in cfg.candidate_windows() {
        let effective = match cfg.short_window_policy {
            ShortWindowPolicy::Skip => {
                if candidate > closes.len() {
                    continue;
                }
                candidate
            }
            ShortWindowPolicy::Clamp => candidate.min(closes.len()),
        };

        let tail = &closes[closes.len() - effective..];
        let Some(fit) = linear_fit(tail) else {
            continue;
        };

        let improves = best
            .as_ref()
            .map(|b| fit.r.abs() > b.fit.r.abs())
            .unwrap_or(true);
        if improves {
            best = Some(TrendSelection {
                window: effective,
                fit,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PriceBar;

    fn series_from_closes(closes: &[f64]) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                time: i as i64 * 3_600_000,
                open: close,
                high: close,
                low: close,
                close,
                volume: 0.0,
            })
            .collect();
        PriceSeries::new("TEST", bars)
    }

    #[test]
    fn test_perfect_line_keeps_first_candidate_on_tie() {
        // Every window fits perfectly (|r| = 1), so the strict-improvement
        // rule keeps the smallest window.
        let series = series_from_closes(&(0..150).map(|i| i as f64).collect::<Vec<_>>());
        let sel = select_window(&series, &TrendConfig::default()).unwrap();
        assert_eq!(sel.window, 100);
        assert!((sel.fit.r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_skip_policy_returns_none_for_short_series() {
        let series = series_from_closes(&(0..50).map(|i| i as f64).collect::<Vec<_>>());
        assert!(select_window(&series, &TrendConfig::default()).is_none());
    }

    #[test]
    fn test_clamp_policy_truncates_to_available_length() {
        let series = series_from_closes(&(0..50).map(|i| i as f64).collect::<Vec<_>>());
        let cfg = TrendConfig {
            short_window_policy: ShortWindowPolicy::Clamp,
            ..TrendConfig::default()
        };
        let sel = select_window(&series, &cfg).unwrap();
        // Never larger than the usable length.
        assert_eq!(sel.window, 50);
        assert!((sel.fit.r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_flat_series_selects_with_zero_r() {
        let series = series_from_closes(&[42.0; 150]);
        let sel = select_window(&series, &TrendConfig::default()).unwrap();
        assert_eq!(sel.window, 100);
        assert_eq!(sel.fit.r, 0.0);
    }

    #[test]
    fn test_empty_series_returns_none() {
        let series = series_from_closes(&[]);
        assert!(select_window(&series, &TrendConfig::default()).is_none());
        let cfg = TrendConfig {
            short_window_policy: ShortWindowPolicy::Clamp,
            ..TrendConfig::default()
        };
        assert!(select_window(&series, &cfg).is_none());
    }

    #[test]
    fn test_selection_is_deterministic() {
        let closes: Vec<f64> = (0..160)
            .map(|i| 20.0 + 0.1 * i as f64 + if i % 3 == 0 { 0.5 } else { -0.2 })
            .collect();
        let series = series_from_closes(&closes);
        let cfg = TrendConfig::default();
        let a = select_window(&series, &cfg).unwrap();
        let b = select_window(&series, &cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_reported_r_within_unit_interval() {
        let closes: Vec<f64> = (0..200)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + 0.05 * i as f64)
            .collect();
        let series = series_from_closes(&closes);
        let sel = select_window(&series, &TrendConfig::default()).unwrap();
        assert!(sel.fit.r.abs() <= 1.0);
    }
}
