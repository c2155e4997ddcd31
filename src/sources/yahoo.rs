//! Yahoo Finance client for price history.
//!
//! Uses the unofficial v8 chart API. Bars with a missing or non-positive
//! close are dropped before the series is built.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, ScanError};
use crate::services::scanner::PriceHistory;
use crate::types::{PriceBar, PriceSeries};

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteBlock {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<u64>>>,
}

/// Yahoo uses hyphens instead of dots for share classes (BRK-B, not BRK.B).
fn normalize_symbol(symbol: &str) -> String {
    symbol.to_uppercase().replace('.', "-")
}

/// Yahoo Finance API client.
pub struct YahooHistoryClient {
    client: Client,
    range: String,
    interval: String,
}

impl YahooHistoryClient {
    /// Create a client fetching the given range/interval (e.g. "5d"/"1h").
    pub fn new(range: impl Into<String>, interval: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            range: range.into(),
            interval: interval.into(),
        }
    }

    /// Fetch the configured history window for a symbol.
    pub async fn fetch_history(&self, symbol: &str) -> Result<PriceSeries> {
        let url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{}?range={}&interval={}&includePrePost=false",
            normalize_symbol(symbol),
            self.range,
            self.interval,
        );
        debug!("fetching history: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ScanError::ExternalApi(format!(
                "{}: history request failed: {}",
                symbol,
                response.status()
            )));
        }

        let data: ChartResponse = response.json().await?;
        if let Some(error) = data.chart.error {
            return Err(ScanError::ExternalApi(format!(
                "{}: {} - {}",
                symbol, error.code, error.description
            )));
        }

        let result = data
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| ScanError::DataUnavailable(symbol.to_string()))?;

        let bars = bars_from_result(result);
        Ok(PriceSeries::new(symbol, bars))
    }
}

fn bars_from_result(result: ChartResult) -> Vec<PriceBar> {
    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .unwrap_or_default();

    let opens = quote.open.unwrap_or_default();
    let highs = quote.high.unwrap_or_default();
    let lows = quote.low.unwrap_or_default();
    let closes = quote.close.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();
    let at = |v: &Vec<Option<f64>>, i: usize| v.get(i).copied().flatten().unwrap_or(0.0);

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let close = at(&closes, i);
        if close <= 0.0 {
            continue;
        }
        bars.push(PriceBar {
            time: ts * 1000,
            open: at(&opens, i),
            high: at(&highs, i),
            low: at(&lows, i),
            close,
            volume: volumes.get(i).copied().flatten().unwrap_or(0) as f64,
        });
    }
    bars
}

impl PriceHistory for YahooHistoryClient {
    async fn history(&self, symbol: &str) -> Result<PriceSeries> {
        self.fetch_history(symbol).await
    }
}
