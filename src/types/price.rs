use serde::{Deserialize, Serialize};

/// A single OHLCV bar. Immutable once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceBar {
    /// Unix timestamp in milliseconds.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Ordered price history for one symbol.
///
/// Bars are strictly ascending by timestamp with duplicates dropped; the
/// constructor enforces this so analysis code can rely on it.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Build a series from raw bars, sorting by timestamp and dropping
    /// duplicate timestamps (first occurrence wins).
    pub fn new(symbol: impl Into<String>, mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.time);
        bars.dedup_by_key(|b| b.time);
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices in timestamp order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// The most recent closing price.
    pub fn last_close(&self) -> Option<f64> {
        self.bars.last().map(|b| b.close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(time: i64, close: f64) -> PriceBar {
        PriceBar {
            time,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0.0,
        }
    }

    #[test]
    fn test_series_sorts_bars_by_time() {
        let series = PriceSeries::new("AAPL", vec![bar(300, 3.0), bar(100, 1.0), bar(200, 2.0)]);
        let times: Vec<i64> = series.bars().iter().map(|b| b.time).collect();
        assert_eq!(times, vec![100, 200, 300]);
        assert_eq!(series.closes(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_series_drops_duplicate_timestamps() {
        let series = PriceSeries::new("AAPL", vec![bar(100, 1.0), bar(100, 9.0), bar(200, 2.0)]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_last_close() {
        let series = PriceSeries::new("AAPL", vec![bar(100, 1.0), bar(200, 2.5)]);
        assert_eq!(series.last_close(), Some(2.5));
        assert_eq!(PriceSeries::new("AAPL", vec![]).last_close(), None);
    }

    #[test]
    fn test_price_bar_serialization() {
        let b = bar(1700000000000, 153.0);
        let json = serde_json::to_string(&b).unwrap();
        assert!(json.contains("1700000000000"));
        let back: PriceBar = serde_json::from_str(&json).unwrap();
        assert_eq!(back.close, 153.0);
    }
}
