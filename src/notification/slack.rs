//! The Slack notification provider.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::core::{AppContext, Event, Provider};
use crate::env::{EnvSource, SystemEnv};
use crate::error::DeliveryError;
use crate::formatting::SlackBlockFormatter;
use crate::notification::api::{SlackApiClient, SLACK_API_URL};
use crate::notification::message::WebhookMessage;
use crate::notification::provider_config::{ConfigMap, Credentials, SlackConfig};
use crate::notification::webhook::{HttpWebhookSender, WebhookSender};

pub const PROVIDER_NAME: &str = "Slack";

/// The outbound endpoints a [`Slack`] provider is bound to at construction.
#[derive(Clone)]
pub struct Transport {
    /// Used in webhook mode
    pub webhook: Arc<dyn WebhookSender>,
    /// Web API root used in token mode
    pub api_base_url: String,
}

impl Default for Transport {
    fn default() -> Self {
        Self {
            webhook: Arc::new(HttpWebhookSender::new()),
            api_base_url: SLACK_API_URL.to_string(),
        }
    }
}

impl Transport {
    pub fn with_webhook_sender(sender: Arc<dyn WebhookSender>) -> Self {
        Self {
            webhook: sender,
            ..Default::default()
        }
    }
}

/// How the provider delivers, fixed at construction.
pub enum DeliveryMode {
    /// `chat.postMessage` to a fixed channel
    Token {
        channel: String,
        client: SlackApiClient,
    },
    /// Incoming webhook, with an optional per-message channel override
    Webhook {
        url: String,
        channel: Option<String>,
        sender: Arc<dyn WebhookSender>,
    },
}

/// Sends pod crash alerts to Slack.
pub struct Slack {
    formatter: SlackBlockFormatter,
    mode: DeliveryMode,
}

impl Slack {
    /// Creates a provider from a raw config map, using the process environment
    /// as fallback.
    ///
    /// Returns `None` (and logs a warning) when no delivery mode can be set up.
    pub fn new(config: &ConfigMap, app: &AppContext) -> Option<Self> {
        Self::with_env(config, app, &SystemEnv, Transport::default())
    }

    /// Like [`Slack::new`], with an explicit environment and transport.
    pub fn with_env(
        config: &ConfigMap,
        app: &AppContext,
        env: &dyn EnvSource,
        transport: Transport,
    ) -> Option<Self> {
        Self::from_config(SlackConfig::resolve(config, env), app, transport)
    }

    /// Creates a provider from already resolved settings.
    pub fn from_config(
        config: SlackConfig,
        app: &AppContext,
        transport: Transport,
    ) -> Option<Self> {
        let credentials = match config.credentials() {
            Ok(credentials) => credentials,
            Err(e) => {
                warn!(error = %e, "Slack notifications disabled");
                return None;
            }
        };

        let mode = match credentials {
            Credentials::Token { token, channel } => {
                info!(channel = %channel, "initializing slack with token");
                DeliveryMode::Token {
                    channel,
                    client: SlackApiClient::new(token).with_base_url(transport.api_base_url),
                }
            }
            Credentials::Webhook { url, channel } => {
                info!(channel = ?channel, "initializing slack with webhook url");
                DeliveryMode::Webhook {
                    url,
                    channel,
                    sender: transport.webhook,
                }
            }
        };

        Some(Self {
            formatter: SlackBlockFormatter::new(
                app.cluster_name.clone(),
                config.title,
                config.text,
            ),
            mode,
        })
    }

    pub fn mode(&self) -> &DeliveryMode {
        &self.mode
    }

    pub fn formatter(&self) -> &SlackBlockFormatter {
        &self.formatter
    }

    /// Sends `message` once through the active mode.
    async fn deliver(&self, mut message: WebhookMessage) -> Result<(), DeliveryError> {
        match &self.mode {
            DeliveryMode::Token { channel, client } => client.post_message(channel, &message).await,
            DeliveryMode::Webhook {
                url,
                channel,
                sender,
            } => {
                if let Some(channel) = channel {
                    message.channel = Some(channel.clone());
                }
                sender.post(url, &message).await
            }
        }
    }
}

#[async_trait]
impl Provider for Slack {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    #[instrument(skip_all, fields(pod = %event.pod_name, container = %event.container_name))]
    async fn send_event(&self, event: &Event) -> Result<(), DeliveryError> {
        info!(reason = %event.reason, namespace = %event.namespace, "sending event to slack");
        let blocks = self.formatter.format_event(event);
        self.deliver(WebhookMessage::from_blocks(blocks)).await
    }

    #[instrument(skip_all)]
    async fn send_message(&self, message: &str) -> Result<(), DeliveryError> {
        self.deliver(WebhookMessage::from_text(message)).await
    }
}
