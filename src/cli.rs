//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using the
//! `clap` crate. These arguments are parsed at startup and then merged with
//! the configuration from the `podalert.toml` file and environment variables.

use clap::{Parser, Subcommand};
use figment::{
    providers::Serialized,
    value::{Dict, Map},
    Error, Metadata, Profile, Provider,
};
use serde::Serialize;
use std::path::PathBuf;

/// Sends Kubernetes pod crash alerts to Slack.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None, subcommand_required = true)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Cluster name shown in alerts.
    #[arg(long, value_name = "NAME", global = true)]
    pub cluster_name: Option<String>,

    /// Log level filter (e.g. "info", "debug").
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send a pod crash event, read as JSON from a file or stdin.
    Event {
        /// JSON file holding the event. Reads stdin when omitted.
        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Send a plain text message.
    Message {
        /// The message to send.
        text: String,
    },
}

// Only the flags that were actually given are serialized, so absent flags
// never mask values from lower layers.
#[derive(Serialize)]
struct Overrides<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    log_level: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    app: Option<AppOverrides<'a>>,
}

#[derive(Serialize)]
struct AppOverrides<'a> {
    cluster_name: &'a str,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let overrides = Overrides {
            log_level: self.log_level.as_deref(),
            app: self
                .cluster_name
                .as_deref()
                .map(|cluster_name| AppOverrides { cluster_name }),
        };
        Serialized::defaults(overrides).data()
    }
}
