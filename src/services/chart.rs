//! SVG chart rendering for breakout notifications.
//!
//! Draws the closing prices, the fitted trendline over the selected
//! window, the dashed channel bounds, and a marker on the breakout bar.
//! Presentation only; all numbers come from the same fit the classifier
//! uses.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, ScanError};
use crate::services::scanner::ChartRenderer;
use crate::services::trend::TrendChannel;
use crate::types::{BreakoutDirection, BreakoutEvent, PriceSeries};

const WIDTH: f64 = 1120.0;
const HEIGHT: f64 = 560.0;
const MARGIN: f64 = 40.0;

/// Renders one SVG file per symbol into a target directory.
pub struct SvgChartRenderer {
    out_dir: PathBuf,
    band_multiplier: f64,
}

impl SvgChartRenderer {
    pub fn new(out_dir: impl Into<PathBuf>, band_multiplier: f64) -> Self {
        Self {
            out_dir: out_dir.into(),
            band_multiplier,
        }
    }

    fn polyline(points: &[(f64, f64)], color: &str, dashed: bool) -> String {
        let coords: Vec<String> = points
            .iter()
            .map(|(x, y)| format!("{:.1},{:.1}", x, y))
            .collect();
        let dash = if dashed { " stroke-dasharray=\"6,4\"" } else { "" };
        format!(
            "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\"{} points=\"{}\"/>",
            color,
            dash,
            coords.join(" ")
        )
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(
        &self,
        series: &PriceSeries,
        window: usize,
        event: Option<&BreakoutEvent>,
    ) -> Result<PathBuf> {
        let closes = series.closes();
        if closes.len() < 2 {
            return Err(ScanError::InsufficientData {
                symbol: series.symbol().to_string(),
                len: closes.len(),
            });
        }
        let window = window.min(closes.len()).max(2);
        let tail = &closes[closes.len() - window..];
        let channel = TrendChannel::from_closes(tail, self.band_multiplier).ok_or_else(|| {
            ScanError::InsufficientData {
                symbol: series.symbol().to_string(),
                len: tail.len(),
            }
        })?;

        // Scale all drawn values into the viewport.
        let mut min_v = f64::INFINITY;
        let mut max_v = f64::NEG_INFINITY;
        for &v in closes.iter().chain(&channel.upper).chain(&channel.lower) {
            min_v = min_v.min(v);
            max_v = max_v.max(v);
        }
        let span = (max_v - min_v).max(f64::EPSILON);
        let x_step = (WIDTH - 2.0 * MARGIN) / (closes.len().max(2) - 1) as f64;
        let to_x = |i: usize| MARGIN + i as f64 * x_step;
        let to_y = |v: f64| HEIGHT - MARGIN - (v - min_v) / span * (HEIGHT - 2.0 * MARGIN);

        let close_pts: Vec<(f64, f64)> = closes
            .iter()
            .enumerate()
            .map(|(i, &v)| (to_x(i), to_y(v)))
            .collect();
        let offset = closes.len() - window;
        let line_pts = |values: &[f64]| -> Vec<(f64, f64)> {
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| (to_x(offset + i), to_y(v)))
                .collect()
        };

        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.0}\" height=\"{:.0}\" viewBox=\"0 0 {:.0} {:.0}\">",
            WIDTH, HEIGHT, WIDTH, HEIGHT
        ));
        svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"white\"/>");
        svg.push_str(&format!(
            "<text x=\"{:.0}\" y=\"24\" font-family=\"sans-serif\" font-size=\"16\">{} price and trend channel</text>",
            MARGIN,
            series.symbol()
        ));
        svg.push_str(&Self::polyline(&close_pts, "steelblue", false));
        svg.push_str(&Self::polyline(&line_pts(&channel.trendline), "orange", false));
        svg.push_str(&Self::polyline(&line_pts(&channel.upper), "green", true));
        svg.push_str(&Self::polyline(&line_pts(&channel.lower), "red", true));

        if let (Some(event), Some(&(x, y))) = (event, close_pts.last()) {
            let color = match event.direction {
                BreakoutDirection::Up => "green",
                BreakoutDirection::Down => "red",
            };
            svg.push_str(&format!(
                "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"6\" fill=\"{}\"/>",
                x, y, color
            ));
        }
        svg.push_str("</svg>");

        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(format!("{}_trend.svg", series.symbol()));
        fs::write(&path, svg)?;
        info!("chart saved: {}", path.display());
        Ok(path)
    }
}
