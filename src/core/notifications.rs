use crate::core::error::NotificationError;
use crate::core::settings::TelegramSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Destination for status and error messages.
#[async_trait]
pub trait StatusNotifier: Send + Sync {
    fn name(&self) -> &'static str;
    async fn send(&self, text: &str) -> Result<(), NotificationError>;
}

pub struct TelegramNotifier {
    client: reqwest::Client,
    api_url: String,
    token: String,
    chat_id: String,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct TelegramReply {
    ok: bool,
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(settings: &TelegramSettings, token: String, chat_id: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build Telegram HTTP client")?;

        Ok(Self {
            client,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            token,
            chat_id,
        })
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, self.token)
    }
}

#[async_trait]
impl StatusNotifier for TelegramNotifier {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, text: &str) -> Result<(), NotificationError> {
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text,
        };

        // The bot token is part of the URL, so it is stripped from every error.
        let response = self
            .client
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotificationError::Transport(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NotificationError::Transport(e.without_url()))?;
        let reply = serde_json::from_str::<TelegramReply>(&body).ok();

        match reply {
            Some(reply) if status.is_success() && reply.ok => Ok(()),
            Some(reply) => Err(NotificationError::Rejected {
                status: status.as_u16(),
                description: reply.description.unwrap_or(body),
            }),
            None => Err(NotificationError::Rejected {
                status: status.as_u16(),
                description: body,
            }),
        }
    }
}
