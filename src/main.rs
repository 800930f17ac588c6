//! podalert - sends a single pod crash alert or message to Slack.

use anyhow::{bail, Context, Result};
use clap::Parser;
use podalert::{
    cli::{Cli, Command},
    config::Config,
    Event, Provider, Slack,
};
use std::io::Read;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(&cli).context("Failed to load configuration")?;

    // RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(cluster = %config.app.cluster_name, "podalert starting up");

    let Some(provider) = Slack::new(&config.slack(), &config.app) else {
        bail!("no Slack provider could be configured: set a webhook, or a token and channel");
    };

    let result = match cli.command {
        Some(Command::Event { file }) => {
            let event = read_event(file.as_deref())?;
            provider.send_event(&event).await
        }
        Some(Command::Message { text }) => provider.send_message(&text).await,
        None => bail!("no command given"),
    };

    if let Err(e) = result {
        error!(provider = provider.name(), error = %e, "delivery failed");
        return Err(e).context(format!("Failed to deliver to {}", provider.name()));
    }

    info!(provider = provider.name(), "notification delivered");
    Ok(())
}

/// Reads an [`Event`] as JSON from `path`, or from stdin when `path` is `None`.
fn read_event(path: Option<&Path>) -> Result<Event> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read event from stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("Failed to parse event JSON")
}
