//! End-to-end tests for the trend pipeline: window selection feeding
//! channel classification on constructed price series.

use breakscan::config::{ShortWindowPolicy, TrendConfig};
use breakscan::services::{classify, select_window};
use breakscan::types::{BreakoutDirection, PriceBar, PriceSeries, TrendStrength};

fn series(symbol: &str, closes: &[f64]) -> PriceSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar {
            time: i as i64 * 3_600_000,
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000.0,
        })
        .collect();
    PriceSeries::new(symbol, bars)
}

fn ascending(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

#[test]
fn perfect_linear_series_selects_smallest_window_at_full_correlation() {
    let s = series("LIN", &ascending(150));
    let sel = select_window(&s, &TrendConfig::default()).unwrap();
    // Every candidate ties at |r| = 1; strict improvement keeps the first.
    assert_eq!(sel.window, 100);
    assert!((sel.fit.r - 1.0).abs() < 1e-12);
}

#[test]
fn forced_final_spike_classifies_as_upward_breakout() {
    let mut closes = ascending(150);
    *closes.last_mut().unwrap() = 200.0;
    let s = series("LIN", &closes);
    let cfg = TrendConfig::default();

    let sel = select_window(&s, &cfg).unwrap();
    let event = classify(&s, sel.window, &cfg).unwrap();
    assert_eq!(event.direction, BreakoutDirection::Up);
    assert_eq!(event.strength, TrendStrength::Strong);
    assert_eq!(event.price, 200.0);
    assert!(event.abs_r > cfg.min_abs_r);
    assert!(event.message.contains("LIN"));
    assert!(event.message.contains("200.00"));
}

#[test]
fn forced_final_plunge_classifies_as_downward_breakout() {
    let mut closes: Vec<f64> = (0..150).map(|i| 300.0 - i as f64).collect();
    *closes.last_mut().unwrap() = 100.0;
    let s = series("DESC", &closes);
    let cfg = TrendConfig::default();

    let sel = select_window(&s, &cfg).unwrap();
    let event = classify(&s, sel.window, &cfg).unwrap();
    assert_eq!(event.direction, BreakoutDirection::Down);
}

#[test]
fn flat_series_never_breaks_out() {
    let s = series("FLAT", &[42.0; 150]);
    let cfg = TrendConfig::default();

    let sel = select_window(&s, &cfg).unwrap();
    assert_eq!(sel.fit.r, 0.0);
    assert!(classify(&s, sel.window, &cfg).is_none());
}

#[test]
fn series_shorter_than_smallest_candidate_yields_no_selection() {
    let s = series("SHORT", &ascending(50));
    assert!(select_window(&s, &TrendConfig::default()).is_none());
}

#[test]
fn clamp_policy_still_selects_short_series_with_truncated_window() {
    let s = series("SHORT", &ascending(50));
    let cfg = TrendConfig {
        short_window_policy: ShortWindowPolicy::Clamp,
        ..TrendConfig::default()
    };
    let sel = select_window(&s, &cfg).unwrap();
    assert!(sel.window <= s.len());
    assert_eq!(sel.window, 50);
}

#[test]
fn selected_window_never_exceeds_usable_length() {
    for len in [50usize, 120, 150, 250] {
        for policy in [ShortWindowPolicy::Skip, ShortWindowPolicy::Clamp] {
            let cfg = TrendConfig {
                short_window_policy: policy,
                ..TrendConfig::default()
            };
            let s = series("ANY", &ascending(len));
            if let Some(sel) = select_window(&s, &cfg) {
                assert!(sel.window <= len);
                assert!(sel.fit.r.abs() <= 1.0);
            }
        }
    }
}

#[test]
fn raising_the_gate_above_the_fit_suppresses_the_breakout() {
    let mut closes = ascending(150);
    *closes.last_mut().unwrap() = 200.0;
    let s = series("LIN", &closes);

    let cfg = TrendConfig::default();
    let sel = select_window(&s, &cfg).unwrap();
    let event = classify(&s, sel.window, &cfg).unwrap();

    let strict = TrendConfig {
        min_abs_r: (event.abs_r + 1.0) / 2.0 + 0.002,
        ..cfg
    };
    assert!(strict.min_abs_r > event.abs_r);
    assert!(classify(&s, sel.window, &strict).is_none());
}

#[test]
fn pipeline_is_deterministic() {
    let mut closes = ascending(150);
    *closes.last_mut().unwrap() = 200.0;
    let s = series("LIN", &closes);
    let cfg = TrendConfig::default();

    let first = select_window(&s, &cfg).unwrap();
    let second = select_window(&s, &cfg).unwrap();
    assert_eq!(first, second);

    let a = classify(&s, first.window, &cfg).unwrap();
    let b = classify(&s, second.window, &cfg).unwrap();
    assert_eq!(a.message, b.message);
}
