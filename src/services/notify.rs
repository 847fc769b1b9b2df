// SPDX-License-Identifier: MIT

//! Telegram notification channel.

use crate::error::{AppError, Result};
use crate::models::Program;
use std::time::Duration;

/// Notification capability consumed by the watcher.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    /// Announce a single newly-seen program. Failure affects only this
    /// record; the caller retries it on a later cycle.
    async fn notify(&self, program: &Program) -> Result<()>;
}

/// Notifier that posts to a Telegram channel via the Bot API.
#[derive(Clone)]
pub struct TelegramNotifier {
    http: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("http client: {}", e)))?;

        Ok(Self {
            http,
            api_base: "https://api.telegram.org".to_string(),
            bot_token,
            chat_id,
        })
    }

    /// Point the notifier at a different Bot API host (tests).
    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base;
        self
    }

    /// Render the announcement message for a program.
    pub fn format_message(program: &Program) -> String {
        let description = program.short_description.as_deref().unwrap_or("-");
        let max_payout = program.max_payout.as_deref().unwrap_or("-");
        // Date part only
        let created = program
            .created
            .as_deref()
            .map(|c| c.split('T').next().unwrap_or(c))
            .unwrap_or("-");
        let logo = program.logo.as_deref().unwrap_or("");

        format!(
            "\u{1F195} *New Program Alert!*\n\
             *Name:* {}\n\
             *Reports:* {}\n\
             *Description:* {}\n\
             *Max Payout:* {}\n\
             *Created:* {}\n\
             [View logo]({})",
            program.name, program.reports.count, description, max_payout, created, logo
        )
    }
}

impl Notifier for TelegramNotifier {
    async fn notify(&self, program: &Program) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": Self::format_message(program),
            "parse_mode": "Markdown",
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Notify(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Notify(format!("HTTP {}: {}", status, body)));
        }

        Ok(())
    }
}
