//! Configuration management for podalert
//!
//! This module defines the main `Config` struct. It uses the `figment` crate to
//! layer built-in defaults, an optional `podalert.toml` file, environment
//! variables and command-line flags.
//!
//! The provider section is kept as a raw map so the provider applies its own
//! typing and environment fallback rules.

use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::core::AppContext;
use crate::notification::provider_config::ConfigMap;

/// Prefix for environment overrides, e.g. `PODALERT_APP__CLUSTER_NAME=prod`.
pub const ENV_PREFIX: &str = "PODALERT_";

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// Settings shared by every provider.
    pub app: AppContext,
    /// Per-provider alert settings.
    #[serde(default)]
    pub alert: AlertConfig,
}

/// Per-provider alert settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct AlertConfig {
    /// Raw Slack settings (`token`, `webhook`, `channel`, `title`, `text`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack: Option<ConfigMap>,
}

impl Config {
    /// Loads the configuration, layering defaults, the file named by `cli`,
    /// the environment and finally the command-line flags.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(path) = &cli.config {
            if !path.is_file() {
                bail!("configuration file not found at {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }

        let config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }

    /// The Slack settings, empty when the section is absent.
    pub fn slack(&self) -> ConfigMap {
        self.alert.slack.clone().unwrap_or_default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            app: AppContext::default(),
            alert: AlertConfig::default(),
        }
    }
}
