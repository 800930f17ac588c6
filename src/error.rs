//! Error types for provider construction and delivery.

use thiserror::Error;

/// Reasons a provider cannot be constructed from its configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither a token nor a webhook URL was supplied
    #[error("neither token nor webhook url is configured")]
    MissingCredentials,

    /// Token-based delivery needs a target channel
    #[error("token-based delivery requires a channel")]
    MissingChannel,
}

/// Errors returned when a message could not be delivered.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The Web API answered `ok: false`
    #[error("Slack API error: {0}")]
    Api(String),

    /// The payload or response could not be (de)serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
