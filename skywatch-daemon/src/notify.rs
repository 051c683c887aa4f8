//! Telegram notification delivery.
//!
//! Sends rendered alert text via the Bot API `sendMessage` endpoint and
//! reports delivery status. Failures are the caller's to log; the engine
//! has already recorded the cooldown by the time delivery is attempted.

use skywatch_core::types::{Result, SkywatchError};

/// Delivers alert text to a Telegram chat.
pub struct TelegramNotifier {
    token: String,
    chat_id: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(token: &str, chat_id: &str) -> Self {
        TelegramNotifier {
            token: token.to_string(),
            chat_id: chat_id.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Send one message. A non-success HTTP status is a delivery failure;
    /// the notifier never retries.
    pub async fn send(&self, text: &str) -> Result<()> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.token);
        let response = self
            .client
            .get(&url)
            .query(&[("chat_id", self.chat_id.as_str()), ("text", text)])
            .send()
            .await
            .map_err(|e| SkywatchError::Notify(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SkywatchError::Notify(format!(
                "sendMessage returned status {status}"
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
