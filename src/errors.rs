//! # Error Types Module
//!
//! This module defines the error type shared by the recipe-book operations that
//! can fail: draft editing, catalog maintenance and configuration loading.
//! Keyword matching, segmentation and ingredient ordering never fail.

use thiserror::Error;

/// Errors returned by recipe-book operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecipeError {
    /// Recipe name is blank once trimmed
    #[error("Recipe name cannot be empty")]
    EmptyName,

    /// Recipe name longer than the allowed number of bytes
    #[error("Recipe name is {len} bytes, at most {max} allowed")]
    NameTooLong { len: usize, max: usize },

    /// Another recipe already uses this name
    #[error("A recipe named '{0}' already exists")]
    DuplicateName(String),

    /// An ingredient or step index outside the list
    #[error("Index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    /// Removing the only remaining ingredient or step
    #[error("Cannot remove the last {0}")]
    LastEntry(&'static str),

    /// Moving a step past the start or end of the list
    #[error("Cannot move step {0} any further")]
    AtEdge(usize),

    /// No recipe with that name in the catalog
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    /// Configuration value could not be parsed
    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RecipeError::IndexOutOfRange { index: 3, len: 2 }.to_string(),
            "Index 3 out of range for 2 entries"
        );
        assert_eq!(
            RecipeError::LastEntry("step").to_string(),
            "Cannot remove the last step"
        );
        assert_eq!(
            RecipeError::DuplicateName("Soup".to_string()).to_string(),
            "A recipe named 'Soup' already exists"
        );
        assert_eq!(
            RecipeError::RecipeNotFound("Soup".to_string()).to_string(),
            "Recipe not found: Soup"
        );
    }
}
