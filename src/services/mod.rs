pub mod chart;
pub mod report;
pub mod scanner;
pub mod trend;

pub use chart::SvgChartRenderer;
pub use report::write_report;
pub use scanner::{
    deliver_report, ChartArtifact, ChartRenderer, NotificationSink, PassReport, PriceHistory,
    Scanner, SymbolUniverse,
};
pub use trend::{classify, select_window, TrendChannel, TrendSelection};
