//! Delivery through Slack incoming webhooks.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error, instrument};

use crate::error::DeliveryError;
use crate::notification::message::WebhookMessage;

/// Per-request timeout used unless one is given explicitly.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts a message to an incoming webhook URL.
#[async_trait]
pub trait WebhookSender: Send + Sync {
    async fn post(&self, url: &str, message: &WebhookMessage) -> Result<(), DeliveryError>;
}

/// A [`WebhookSender`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpWebhookSender {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpWebhookSender {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }
}

impl Default for HttpWebhookSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WebhookSender for HttpWebhookSender {
    #[instrument(skip_all, fields(blocks = message.blocks.len()))]
    async fn post(&self, url: &str, message: &WebhookMessage) -> Result<(), DeliveryError> {
        let request = self.client.post(url).timeout(self.timeout).json(message);
        let response = match request.send().await {
            Ok(res) => res,
            Err(e) => {
                error!(error = %e, "HTTP request to Slack webhook failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!("Slack webhook accepted the message.");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        error!(
            status = %status,
            body = %body,
            "Failed to send Slack notification"
        );
        Err(DeliveryError::Status { status, body })
    }
}
