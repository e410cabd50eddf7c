//! # Viewer Configuration Module
//!
//! This module defines the runtime configuration of the recipe viewer. Values
//! come from the process environment, which `main` first fills from a `.env`
//! file when one exists.

use log::debug;
use std::env;
use std::time::Duration;

use crate::errors::RecipeError;
use crate::keyword_matcher::TieBreak;
use crate::logging::LogFormat;

// Constants for viewer configuration
pub const DEFAULT_RECIPES_FILE: &str = "recipes.json";
pub const DEFAULT_NOTIFICATION_TTL_SECS: u64 = 10;

pub const RECIPES_FILE_VAR: &str = "RECIPES_FILE";
pub const NOTIFICATION_TTL_VAR: &str = "NOTIFICATION_TTL_SECS";
pub const TIE_BREAK_VAR: &str = "KEYWORD_TIE_BREAK";
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

/// Runtime configuration for the recipe viewer
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Path of the recipe snapshot (JSON, `{"recipes": [...]}`)
    pub recipes_file: String,
    /// How long a transient notification stays visible
    pub notification_ttl: Duration,
    /// Resolution of equal-length overlapping keywords
    pub tie_break: TieBreak,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            recipes_file: DEFAULT_RECIPES_FILE.to_string(),
            notification_ttl: Duration::from_secs(DEFAULT_NOTIFICATION_TTL_SECS),
            tie_break: TieBreak::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl ViewerConfig {
    /// Load configuration from the process environment
    ///
    /// Unset variables fall back to defaults; set but unparsable values are
    /// reported as [`RecipeError::InvalidConfig`].
    pub fn from_env() -> Result<Self, RecipeError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RecipeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(RECIPES_FILE_VAR) {
            config.recipes_file = path;
        }

        if let Some(ttl) = lookup(NOTIFICATION_TTL_VAR) {
            let secs = ttl.trim().parse::<u64>().map_err(|e| {
                RecipeError::InvalidConfig(format!("{NOTIFICATION_TTL_VAR}='{ttl}': {e}"))
            })?;
            config.notification_ttl = Duration::from_secs(secs);
        }

        if let Some(tie_break) = lookup(TIE_BREAK_VAR) {
            config.tie_break = tie_break.parse()?;
        }

        if let Some(format) = lookup(LOG_FORMAT_VAR) {
            config.log_format = format.parse()?;
        }

        debug!("Loaded viewer configuration: {:?}", config);
        Ok(config)
    }
}
