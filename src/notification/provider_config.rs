//! Resolution of Slack provider settings.
//!
//! Settings come from a loosely typed configuration map first. Any credential
//! missing from the map is looked up in the environment. The result is a typed
//! [`SlackConfig`] from which the delivery [`Credentials`] are chosen.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::env::EnvSource;
use crate::error::ConfigError;

/// Environment fallback for the API token.
pub const ENV_SLACK_TOKEN: &str = "SLACK_TOKEN";
/// Environment fallback for the target channel.
pub const ENV_SLACK_CHANNEL: &str = "SLACK_CHANNEL";
/// Environment fallback for the incoming webhook URL.
pub const ENV_SLACK_WEBHOOK: &str = "SLACK_WEBHOOK";

/// A raw, string-keyed provider configuration as found in the config file.
pub type ConfigMap = serde_json::Map<String, Value>;

/// Resolved settings for the Slack provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackConfig {
    /// Bot token for `chat.postMessage`
    pub token: Option<String>,
    /// Incoming webhook URL
    pub webhook: Option<String>,
    /// Target channel; required with a token, an override with a webhook
    pub channel: Option<String>,
    /// Custom message title
    pub title: Option<String>,
    /// Custom message text
    pub text: Option<String>,
}

/// How a message reaches Slack, chosen once from a [`SlackConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Token { token: String, channel: String },
    Webhook { url: String, channel: Option<String> },
}

impl SlackConfig {
    /// Builds the config from `map`, falling back to `env` for token, channel and webhook.
    ///
    /// Only non-empty string values count as set. Values of any other type are ignored.
    pub fn resolve(map: &ConfigMap, env: &dyn EnvSource) -> Self {
        Self {
            token: string_field(map, "token").or_else(|| env_field(env, ENV_SLACK_TOKEN)),
            webhook: string_field(map, "webhook").or_else(|| env_field(env, ENV_SLACK_WEBHOOK)),
            channel: string_field(map, "channel").or_else(|| env_field(env, ENV_SLACK_CHANNEL)),
            title: string_field(map, "title"),
            text: string_field(map, "text"),
        }
    }

    /// Picks the delivery credentials. A token wins over a webhook.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        if let Some(token) = &self.token {
            let channel = self.channel.clone().ok_or(ConfigError::MissingChannel)?;
            return Ok(Credentials::Token {
                token: token.clone(),
                channel,
            });
        }

        match &self.webhook {
            Some(url) => Ok(Credentials::Webhook {
                url: url.clone(),
                channel: self.channel.clone(),
            }),
            None => Err(ConfigError::MissingCredentials),
        }
    }
}

fn string_field(map: &ConfigMap, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn env_field(env: &dyn EnvSource, key: &str) -> Option<String> {
    env.var(key).filter(|value| !value.is_empty())
}
