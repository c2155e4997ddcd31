//! CSV export of breakout events.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::types::BreakoutEvent;

/// One row of the breakout report.
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    symbol: &'a str,
    breakout: &'a str,
    trend_strength: String,
    breakout_price: String,
    direction: &'a str,
}

impl<'a> ReportRow<'a> {
    fn from_event(event: &'a BreakoutEvent) -> Self {
        Self {
            symbol: &event.symbol,
            breakout: event.direction.label(),
            trend_strength: format!("{:.2} - {}", event.abs_r, event.strength.label()),
            breakout_price: format!("{:.2}", event.price),
            direction: match event.direction {
                crate::types::BreakoutDirection::Up => "up",
                crate::types::BreakoutDirection::Down => "down",
            },
        }
    }
}

/// Write one row per event to `path`, creating or truncating the file.
pub fn write_report(events: &[BreakoutEvent], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for event in events {
        writer.serialize(ReportRow::from_event(event))?;
    }
    writer.flush()?;
    info!("breakout report written: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BreakoutDirection, TrendStrength};

    fn sample_event(symbol: &str, direction: BreakoutDirection) -> BreakoutEvent {
        BreakoutEvent::new(symbol, direction, TrendStrength::Strong, 0.91, 123.456, 150)
    }

    #[test]
    fn test_report_contains_one_row_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let events = vec![
            sample_event("AAPL", BreakoutDirection::Up),
            sample_event("SPY", BreakoutDirection::Down),
        ];
        write_report(&events, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3); // header + 2 rows
        assert_eq!(
            lines[0],
            "symbol,breakout,trend_strength,breakout_price,direction"
        );
        assert!(lines[1].starts_with("AAPL,upward breakout,0.91 - STRONG TREND,123.46,up"));
        assert!(lines[2].contains("SPY"));
        assert!(lines[2].ends_with(",down"));
    }

    #[test]
    fn test_empty_report_has_only_header_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_report(&[], &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        // csv only writes headers alongside the first record.
        assert!(contents.trim().is_empty());
    }
}
