//! podalert - Slack delivery for Kubernetes pod crash alerts
//!
//! This library formats pod crash events as Slack messages and delivers them
//! through an incoming webhook or the token-authenticated Web API.

pub mod cli;
pub mod config;
pub mod core;
pub mod env;
pub mod error;
pub mod formatting;
pub mod notification;

// Re-export core types for convenience
pub use crate::core::*;
pub use error::{ConfigError, DeliveryError};
pub use notification::slack::Slack;
