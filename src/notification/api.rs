//! Token-authenticated delivery through the Slack Web API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, instrument};

use crate::error::DeliveryError;
use crate::notification::message::{Block, WebhookMessage};
use crate::notification::webhook::DEFAULT_TIMEOUT;

/// Base URL of the Slack Web API.
pub const SLACK_API_URL: &str = "https://slack.com/api";

/// A minimal Web API client able to post messages.
#[derive(Clone)]
pub struct SlackApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    #[serde(skip_serializing_if = "<[Block]>::is_empty")]
    blocks: &'a [Block],
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

impl SlackApiClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: SLACK_API_URL.to_string(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Points the client at another API root, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Calls `chat.postMessage` for `channel`.
    ///
    /// Only the non-empty parts of `message` are sent. Its `channel` field is
    /// ignored in favour of the `channel` argument.
    #[instrument(skip(self, message), fields(blocks = message.blocks.len()))]
    pub async fn post_message(
        &self,
        channel: &str,
        message: &WebhookMessage,
    ) -> Result<(), DeliveryError> {
        let url = format!("{}/chat.postMessage", self.base_url.trim_end_matches('/'));
        let request = PostMessageRequest {
            channel,
            blocks: &message.blocks,
            text: message.non_empty_text(),
        };

        let response = match self
            .http
            .post(&url)
            .timeout(self.timeout)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                error!(error = %e, "HTTP request to Slack API failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            error!(status = %status, body = %body, "Slack API returned an error status");
            return Err(DeliveryError::Status { status, body });
        }

        let parsed: ApiResponse = serde_json::from_str(&body)?;
        if !parsed.ok {
            let reason = parsed.error.unwrap_or_else(|| "unknown_error".to_string());
            error!(error = %reason, "Slack API rejected the message");
            return Err(DeliveryError::Api(reason));
        }

        debug!("Slack API accepted the message.");
        Ok(())
    }
}

impl fmt::Debug for SlackApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlackApiClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}
