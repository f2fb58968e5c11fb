use crate::domain::ports::Notifier;
use crate::utils::error::{PrecioLuzError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

/// Sends messages through the Telegram Bot API `sendMessage` method.
pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(
        api_base: impl Into<String>,
        bot_token: impl Into<String>,
        chat_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let api_base: String = api_base.into();
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, message: &str) -> Result<()> {
        let body = SendMessageRequest {
            chat_id: &self.chat_id,
            text: message,
        };

        // the URL carries the bot token, keep it out of the logs
        tracing::debug!("Sending Telegram message to chat {}", self.chat_id);
        let response = self
            .client
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let parsed: Option<ApiResponse> = serde_json::from_str(&text).ok();

        match parsed {
            Some(api) if status.is_success() && api.ok => {
                tracing::info!("Telegram message sent.");
                Ok(())
            }
            Some(api) => Err(PrecioLuzError::TelegramError {
                status: status.as_u16(),
                description: api
                    .description
                    .unwrap_or_else(|| "request was not accepted".to_string()),
            }),
            None => Err(PrecioLuzError::TelegramError {
                status: status.as_u16(),
                description: if text.is_empty() {
                    status.to_string()
                } else {
                    text
                },
            }),
        }
    }
}
