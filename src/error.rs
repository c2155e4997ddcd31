use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("no price data available for {0}")]
    DataUnavailable(String),

    #[error("insufficient price history for {symbol}: {len} bars")]
    InsufficientData { symbol: String, len: usize },

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("notification delivery failed: {0}")]
    Delivery(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl ScanError {
    /// Whether this error only skips the current symbol rather than
    /// failing the whole pass.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            ScanError::DataUnavailable(_) | ScanError::InsufficientData { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skippable_errors() {
        assert!(ScanError::DataUnavailable("AAPL".into()).is_skippable());
        assert!(ScanError::InsufficientData {
            symbol: "AAPL".into(),
            len: 12
        }
        .is_skippable());
        assert!(!ScanError::ExternalApi("rate limited".into()).is_skippable());
    }

    #[test]
    fn test_error_display() {
        let err = ScanError::InsufficientData {
            symbol: "SPY".into(),
            len: 50,
        };
        assert_eq!(
            err.to_string(),
            "insufficient price history for SPY: 50 bars"
        );
    }
}
