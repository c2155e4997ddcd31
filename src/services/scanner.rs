//! Per-symbol scan pass.
//!
//! Walks the symbol universe with bounded concurrency and runs the trend
//! pipeline on each symbol independently: fetch history, select a window,
//! classify. Failures skip the symbol and never abort the pass.

use std::path::PathBuf;

use futures_util::{stream, StreamExt};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::services::trend::{classify, select_window};
use crate::types::{BreakoutDirection, BreakoutEvent, PriceSeries};

/// Provider of the symbol universe to analyze.
pub trait SymbolUniverse {
    /// An empty result means "nothing to analyze", not an error.
    async fn symbols(&self) -> Result<Vec<String>>;
}

/// Provider of per-symbol price history.
pub trait PriceHistory {
    async fn history(&self, symbol: &str) -> Result<PriceSeries>;
}

/// Delivery channel for messages and chart artifacts.
pub trait NotificationSink {
    async fn send_message(&self, text: &str) -> Result<()>;
    async fn send_chart(&self, caption: &str, path: &std::path::Path) -> Result<()>;
}

/// Presentation-only chart renderer; carries no decision logic.
pub trait ChartRenderer {
    fn render(
        &self,
        series: &PriceSeries,
        window: usize,
        event: Option<&BreakoutEvent>,
    ) -> Result<PathBuf>;
}

/// A chart artifact keyed by symbol.
#[derive(Debug, Clone)]
pub struct ChartArtifact {
    pub symbol: String,
    pub path: PathBuf,
}

/// Outcome of one scan pass.
#[derive(Debug, Default)]
pub struct PassReport {
    /// Symbols that made it through classification (breakout or not).
    pub analyzed: usize,
    /// Symbols abandoned before classification.
    pub skipped: usize,
    pub events: Vec<BreakoutEvent>,
    pub charts: Vec<ChartArtifact>,
    /// Unix timestamp (milliseconds) when the pass finished.
    pub timestamp: i64,
}

enum SymbolOutcome {
    Breakout(BreakoutEvent, Option<PathBuf>),
    Quiet,
    Skipped,
}

/// Drives one analysis pass over the universe.
pub struct Scanner<U, H, R> {
    universe: U,
    history: H,
    renderer: Option<R>,
    config: Config,
}

impl<U, H, R> Scanner<U, H, R>
where
    U: SymbolUniverse,
    H: PriceHistory,
    R: ChartRenderer,
{
    pub fn new(universe: U, history: H, renderer: Option<R>, config: Config) -> Self {
        Self {
            universe,
            history,
            renderer,
            config,
        }
    }

    /// Run one full pass: fetch the universe, analyze every symbol, and
    /// collect events and chart artifacts.
    pub async fn run_pass(&self) -> Result<PassReport> {
        let symbols = self.universe.symbols().await?;
        if symbols.is_empty() {
            info!("symbol universe is empty, nothing to analyze");
            return Ok(PassReport {
                timestamp: chrono::Utc::now().timestamp_millis(),
                ..PassReport::default()
            });
        }
        info!("scanning {} symbols", symbols.len());

        let outcomes: Vec<SymbolOutcome> = stream::iter(symbols)
            .map(|symbol| self.scan_symbol(symbol))
            .buffer_unordered(self.config.scan_concurrency.max(1))
            .collect()
            .await;

        let mut report = PassReport {
            timestamp: chrono::Utc::now().timestamp_millis(),
            ..PassReport::default()
        };
        for outcome in outcomes {
            match outcome {
                SymbolOutcome::Breakout(event, chart) => {
                    report.analyzed += 1;
                    if let Some(path) = chart {
                        report.charts.push(ChartArtifact {
                            symbol: event.symbol.clone(),
                            path,
                        });
                    }
                    report.events.push(event);
                }
                SymbolOutcome::Quiet => report.analyzed += 1,
                SymbolOutcome::Skipped => report.skipped += 1,
            }
        }

        info!(
            "pass complete: {} analyzed, {} skipped, {} breakouts",
            report.analyzed,
            report.skipped,
            report.events.len()
        );
        Ok(report)
    }

    async fn scan_symbol(&self, symbol: String) -> SymbolOutcome {
        let series = match self.history.history(&symbol).await {
            Ok(series) => series,
            Err(e) => {
                warn!("{}: price history unavailable: {}", symbol, e);
                return SymbolOutcome::Skipped;
            }
        };
        if series.is_empty() {
            warn!("{}: empty price series", symbol);
            return SymbolOutcome::Skipped;
        }

        let Some(selection) = select_window(&series, &self.config.trend) else {
            warn!(
                "{}: no usable trend window ({} bars)",
                symbol,
                series.len()
            );
            return SymbolOutcome::Skipped;
        };

        match classify(&series, selection.window, &self.config.trend) {
            Some(event) => {
                info!("{}: {}", symbol, event.message.replace('\n', " | "));
                let chart = self.render_chart(&series, selection.window, &event);
                SymbolOutcome::Breakout(event, chart)
            }
            None => SymbolOutcome::Quiet,
        }
    }

    fn render_chart(
        &self,
        series: &PriceSeries,
        window: usize,
        event: &BreakoutEvent,
    ) -> Option<PathBuf> {
        let renderer = self.renderer.as_ref()?;
        match renderer.render(series, window, Some(event)) {
            Ok(path) => Some(path),
            Err(e) => {
                // Rendering is presentation-only; the event still stands.
                error!("{}: chart rendering failed: {}", event.symbol, e);
                None
            }
        }
    }
}

/// Deliver a pass report through the sink. Each message and chart is
/// isolated so one delivery failure does not suppress the rest.
pub async fn deliver_report<N: NotificationSink>(report: &PassReport, sink: &N) {
    let up: Vec<&str> = direction_messages(report, BreakoutDirection::Up);
    let down: Vec<&str> = direction_messages(report, BreakoutDirection::Down);

    let up_message = if up.is_empty() {
        "📈 No upward breakouts detected.".to_string()
    } else {
        format!("📈 Upward breakouts:\n{}", up.join("\n\n"))
    };
    let down_message = if down.is_empty() {
        "📉 No downward breakouts detected.".to_string()
    } else {
        format!("📉 Downward breakouts:\n{}", down.join("\n\n"))
    };

    for message in [&up_message, &down_message] {
        if let Err(e) = sink.send_message(message).await {
            error!("failed to send summary message: {}", e);
        }
    }

    for chart in &report.charts {
        if let Err(e) = sink.send_chart(&chart.symbol, &chart.path).await {
            error!("{}: failed to send chart: {}", chart.symbol, e);
        }
    }
}

fn direction_messages(report: &PassReport, direction: BreakoutDirection) -> Vec<&str> {
    report
        .events
        .iter()
        .filter(|e| e.direction == direction)
        .map(|e| e.message.as_str())
        .collect()
}
