//! # Logging Module
//!
//! Logger setup for the viewer binary. The library modules log through the
//! `log` facade and the interaction layer through `tracing`; both end up in
//! whichever backend is installed here.
//!
//! - `Text`: `env_logger`, filtered by `RUST_LOG`. `tracing` events are
//!   forwarded to it through the `log` feature.
//! - `Json`: `tracing-subscriber` JSON lines, filtered by `RUST_LOG`. `log`
//!   records are bridged into it.

use anyhow::{anyhow, Result};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

use crate::errors::RecipeError;

/// Output format of the installed logger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = RecipeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "text" | "plain" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(RecipeError::InvalidConfig(format!(
                "unknown log format '{other}'"
            ))),
        }
    }
}

/// Install the global logger
///
/// Fails if a logger was already installed.
pub fn init(format: LogFormat) -> Result<()> {
    match format {
        LogFormat::Text => env_logger::try_init()?,
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init()
            .map_err(|e| anyhow!("Failed to install JSON logger: {e}"))?,
    }
    Ok(())
}
