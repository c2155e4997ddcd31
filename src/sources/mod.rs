pub mod alphavantage;
pub mod yahoo;

pub use alphavantage::AlphaVantageClient;
pub use yahoo::YahooHistoryClient;
