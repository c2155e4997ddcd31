//! Alpha Vantage client for the symbol universe.
//!
//! Uses the LISTING_STATUS endpoint, which returns a CSV body of all
//! actively listed US symbols. Free tier rate limits are severe
//! (25 requests/day), but this endpoint is hit once per pass.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Result, ScanError};
use crate::services::scanner::SymbolUniverse;

const ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co/query";

/// One row of the LISTING_STATUS CSV.
#[derive(Debug, Deserialize)]
struct ListingRow {
    symbol: String,
    #[serde(rename = "assetType")]
    asset_type: String,
    status: String,
}

/// Alpha Vantage API client.
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
}

impl AlphaVantageClient {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build HTTP client");
        Self { client, api_key }
    }

    /// Fetch all actively listed stock symbols.
    pub async fn list_symbols(&self) -> Result<Vec<String>> {
        let url = format!(
            "{}?function=LISTING_STATUS&apikey={}",
            ALPHA_VANTAGE_URL, self.api_key
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ScanError::ExternalApi(format!(
                "listing status request failed: {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        let symbols = parse_listing_csv(&body)?;
        info!("fetched {} listed symbols", symbols.len());
        Ok(symbols)
    }
}

fn parse_listing_csv(body: &str) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let mut symbols = Vec::new();
    for record in reader.deserialize::<ListingRow>() {
        let row = match record {
            Ok(row) => row,
            Err(e) => {
                debug!("skipping malformed listing row: {}", e);
                continue;
            }
        };
        if row.status.eq_ignore_ascii_case("active") && row.asset_type == "Stock" {
            symbols.push(row.symbol);
        }
    }
    Ok(symbols)
}

impl SymbolUniverse for AlphaVantageClient {
    async fn symbols(&self) -> Result<Vec<String>> {
        self.list_symbols().await
    }
}
