//! Recipe snapshot loading.
//!
//! A snapshot is the JSON document returned by the recipe API's list endpoint:
//! `{"recipes": [...]}`.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::recipe_model::Recipe;

/// The recipe list as delivered by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSnapshot {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

/// Parse a snapshot from JSON text
pub fn parse_snapshot(json: &str) -> Result<RecipeSnapshot> {
    serde_json::from_str(json).context("Failed to parse recipe snapshot")
}

/// Read and parse a snapshot file
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<RecipeSnapshot> {
    let path = path.as_ref();
    info!("Loading recipe snapshot from: {}", path.display());

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read recipe snapshot {}", path.display()))?;
    let snapshot = parse_snapshot(&content)
        .with_context(|| format!("Invalid recipe snapshot {}", path.display()))?;

    info!("Loaded {} recipes", snapshot.recipes.len());
    Ok(snapshot)
}
