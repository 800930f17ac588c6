//! Delivery of alerts to Slack.
//!
//! [`slack::Slack`] is the provider. It resolves its settings through
//! [`provider_config`], lays events out with [`crate::formatting`], and sends
//! them either through an incoming webhook ([`webhook`]) or the Web API
//! ([`api`]).
pub mod api;
pub mod message;
pub mod provider_config;
pub mod slack;
pub mod webhook;
