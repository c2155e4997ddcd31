//! Telegram Bot API notification sink.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, ScanError};
use crate::services::scanner::NotificationSink;

const TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

/// Telegram Bot API client.
pub struct TelegramNotifier {
    client: Client,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(token: String, chat_id: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            token,
            chat_id,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", TELEGRAM_API_URL, self.token, method)
    }

    async fn check(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();
        let body: ApiResponse = response.json().await?;
        if !body.ok {
            return Err(ScanError::Delivery(format!(
                "telegram responded {}: {}",
                status,
                body.description.unwrap_or_else(|| "unknown error".into())
            )));
        }
        Ok(())
    }

    /// Send a Markdown-formatted text message to the configured chat.
    pub async fn send_text(&self, text: &str) -> Result<()> {
        debug!("sending telegram message ({} chars)", text.len());
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .form(&[
                ("chat_id", self.chat_id.as_str()),
                ("text", text),
                ("parse_mode", "Markdown"),
            ])
            .send()
            .await?;
        self.check(response).await
    }

    /// Upload a chart file to the configured chat.
    pub async fn send_photo_file(&self, caption: &str, path: &Path) -> Result<()> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "chart.svg".to_string());

        let form = multipart::Form::new()
            .text("chat_id", self.chat_id.clone())
            .text("caption", caption.to_string())
            .part(
                "document",
                multipart::Part::bytes(bytes).file_name(file_name),
            );

        let response = self
            .client
            .post(self.method_url("sendDocument"))
            .multipart(form)
            .send()
            .await?;
        self.check(response).await
    }
}

impl NotificationSink for TelegramNotifier {
    async fn send_message(&self, text: &str) -> Result<()> {
        self.send_text(text).await
    }

    async fn send_chart(&self, caption: &str, path: &Path) -> Result<()> {
        self.send_photo_file(caption, path).await
    }
}
