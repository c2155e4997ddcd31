use serde::{Deserialize, Serialize};

/// Direction of a trend channel breakout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakoutDirection {
    Up,
    Down,
}

impl BreakoutDirection {
    /// Get display label for this direction.
    pub fn label(&self) -> &'static str {
        match self {
            BreakoutDirection::Up => "upward breakout",
            BreakoutDirection::Down => "downward breakout",
        }
    }

    /// Chart/message glyph for this direction.
    pub fn glyph(&self) -> &'static str {
        match self {
            BreakoutDirection::Up => "📈",
            BreakoutDirection::Down => "📉",
        }
    }
}

/// Coarse reliability label for a fitted trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStrength {
    Strong,
    Weak,
}

impl TrendStrength {
    /// Classify |r| against the strong-trend threshold.
    pub fn from_abs_r(abs_r: f64, threshold: f64) -> Self {
        if abs_r > threshold {
            TrendStrength::Strong
        } else {
            TrendStrength::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrendStrength::Strong => "STRONG TREND",
            TrendStrength::Weak => "WEAK TREND",
        }
    }
}

/// A detected breakout for one symbol in one scan pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakoutEvent {
    pub symbol: String,
    pub direction: BreakoutDirection,
    pub strength: TrendStrength,
    /// |r| of the regression the channel was built from.
    pub abs_r: f64,
    /// Closing price at the breakout bar.
    pub price: f64,
    /// Lookback window the channel was fitted over.
    pub window: usize,
    /// Human-readable notification text.
    pub message: String,
}

impl BreakoutEvent {
    pub fn new(
        symbol: impl Into<String>,
        direction: BreakoutDirection,
        strength: TrendStrength,
        abs_r: f64,
        price: f64,
        window: usize,
    ) -> Self {
        let symbol = symbol.into();
        let message = format!(
            "{}: {} {}\nTrend strength: {:.2} - {}\nBreakout price: {:.2}",
            symbol,
            direction.glyph(),
            direction.label(),
            abs_r,
            strength.label(),
            price,
        );
        Self {
            symbol,
            direction,
            strength,
            abs_r,
            price,
            window,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_labels() {
        assert_eq!(BreakoutDirection::Up.label(), "upward breakout");
        assert_eq!(BreakoutDirection::Down.glyph(), "📉");
    }

    #[test]
    fn test_strength_from_abs_r() {
        assert_eq!(
            TrendStrength::from_abs_r(0.51, 0.5),
            TrendStrength::Strong
        );
        assert_eq!(TrendStrength::from_abs_r(0.5, 0.5), TrendStrength::Weak);
        assert_eq!(TrendStrength::from_abs_r(0.12, 0.5), TrendStrength::Weak);
    }

    #[test]
    fn test_event_message_formatting() {
        let event = BreakoutEvent::new(
            "EREGL.IS",
            BreakoutDirection::Up,
            TrendStrength::Strong,
            0.956,
            48.25,
            150,
        );
        assert_eq!(
            event.message,
            "EREGL.IS: 📈 upward breakout\nTrend strength: 0.96 - STRONG TREND\nBreakout price: 48.25"
        );
    }

    #[test]
    fn test_direction_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&BreakoutDirection::Up).unwrap(),
            "\"up\""
        );
        assert_eq!(
            serde_json::to_string(&BreakoutDirection::Down).unwrap(),
            "\"down\""
        );
    }
}
