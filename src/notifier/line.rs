// notifier/line.rs

use crate::model::NotifyError;
use crate::notifier::Notify;

use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

/// LINE Notify caps the message field at 1000 characters.
pub const MAX_MESSAGE_CHARS: usize = 1000;

pub struct LineNotifier {
    client: Client,
    token: String,
    endpoint: String,
}

impl LineNotifier {
    pub fn new(token: String, endpoint: String, timeout_secs: u64) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            token,
            endpoint,
        })
    }
}

pub fn truncate_message(message: &str) -> &str {
    match message.char_indices().nth(MAX_MESSAGE_CHARS) {
        Some((idx, _)) => &message[..idx],
        None => message,
    }
}

#[async_trait::async_trait]
impl Notify for LineNotifier {
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .form(&[("message", truncate_message(message))])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown".into());
            warn!("❌ Webhook rejected message [{}]: {}", status, body);
            return Err(NotifyError::Rejected { status, body });
        }

        info!("✅ Notification sent [{}]", status);
        Ok(())
    }
}
