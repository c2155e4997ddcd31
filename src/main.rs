use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use breakscan::config::Config;
use breakscan::notify::TelegramNotifier;
use breakscan::services::{deliver_report, write_report, Scanner, SvgChartRenderer};
use breakscan::sources::{AlphaVantageClient, YahooHistoryClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "breakscan=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; only the universe credential is required.
    let config = Config::from_env();
    let api_key = config
        .alpha_vantage_api_key
        .clone()
        .context("ALPHA_VANTAGE_API_KEY is not set")?;

    let notifier = match (&config.telegram_api_token, &config.telegram_chat_id) {
        (Some(token), Some(chat_id)) => {
            Some(TelegramNotifier::new(token.clone(), chat_id.clone()))
        }
        _ => {
            info!("Telegram credentials not set, notifications disabled");
            None
        }
    };

    let universe = AlphaVantageClient::new(api_key);
    let history = YahooHistoryClient::new(
        config.history_range.clone(),
        config.history_interval.clone(),
    );
    let renderer = SvgChartRenderer::new(config.plot_dir.clone(), config.trend.band_multiplier);
    let report_path = std::path::PathBuf::from(config.report_path.clone());

    let scanner = Scanner::new(universe, history, Some(renderer), config);
    let report = scanner.run_pass().await?;

    write_report(&report.events, &report_path)?;

    if let Some(notifier) = notifier {
        deliver_report(&report, &notifier).await;
    }

    info!(
        "done: {} breakouts across {} analyzed symbols",
        report.events.len(),
        report.analyzed
    );
    Ok(())
}
