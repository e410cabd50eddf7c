//! # Recipe Data Model
//!
//! This module defines the data structures for recipes as they arrive from the
//! recipe API: a recipe with its tags, an ordered list of ingredients and an
//! ordered list of steps.
//!
//! ## Core Concepts
//!
//! - **Ingredient**: A free-text entry (e.g. "2 onions, diced") plus the keywords
//!   used to find that ingredient inside the step text
//! - **Step**: A free-text instruction, or a heading that groups the steps below it
//! - **Recipe**: Name, description, serving note, tags, ingredients and steps
//!
//! ## Usage
//!
//! ```rust
//! use recipes::recipe_model::{Ingredient, Recipe, Step};
//!
//! let recipe = Recipe::new("Fried onions")
//!     .with_tag("side")
//!     .with_ingredient(Ingredient::new("2 onions").with_keyword("onion"))
//!     .with_ingredient(Ingredient::new("1 tbsp oil").with_keyword("oil"))
//!     .with_step(Step::heading("Prep"))
//!     .with_step(Step::new("Heat the oil"))
//!     .with_step(Step::new("Fry the onion"));
//!
//! assert_eq!(recipe.step_numbers(), vec![None, Some(1), Some(2)]);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A recipe as served by the recipe API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique name of the recipe
    pub name: String,

    /// Free-text description, may contain links
    #[serde(default)]
    pub description: String,

    /// Serving note as typed by the author (e.g. "4", "4-6")
    #[serde(default)]
    pub serves: String,

    /// Tags used for filtering, in author order
    #[serde(default)]
    pub tags: Vec<String>,

    /// Ingredients in author order
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    /// Steps in author order, headings included
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// An ingredient line and the keywords that link it to the steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// The ingredient line shown to the reader (e.g. "2 cups flour")
    pub entry: String,

    /// Substrings expected to appear in the step text (e.g. "flour")
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A single recipe step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// The step text
    pub text: String,

    /// Headings are section titles: unnumbered and never keyword matched
    #[serde(default)]
    pub is_heading: bool,
}

impl Recipe {
    /// Create an empty recipe with just a name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            serves: String::new(),
            tags: Vec::new(),
            ingredients: Vec::new(),
            steps: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Set the serving note
    pub fn with_serves(mut self, serves: &str) -> Self {
        self.serves = serves.to_string();
        self
    }

    /// Add a tag, ignoring duplicates
    pub fn with_tag(mut self, tag: &str) -> Self {
        if !self.has_tag(tag) {
            self.tags.push(tag.to_string());
        }
        self
    }

    /// Append an ingredient
    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }

    /// Append a step
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Check whether the recipe carries the given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Steps that take part in keyword matching, with their index in `steps`
    pub fn instruction_steps(&self) -> impl Iterator<Item = (usize, &Step)> {
        self.steps.iter().enumerate().filter(|(_, step)| !step.is_heading)
    }

    /// Display number of every step; headings get `None`
    ///
    /// Numbering skips headings, so the step after a heading continues
    /// where the previous section stopped.
    pub fn step_numbers(&self) -> Vec<Option<usize>> {
        let mut next = 1;
        self.steps
            .iter()
            .map(|step| {
                if step.is_heading {
                    None
                } else {
                    next += 1;
                    Some(next - 1)
                }
            })
            .collect()
    }

    /// All keywords of all ingredients, in declaration order
    pub fn all_keywords(&self) -> Vec<String> {
        self.ingredients
            .iter()
            .flat_map(|ingredient| ingredient.keywords.iter().cloned())
            .collect()
    }
}

impl Ingredient {
    /// Create an ingredient without keywords
    pub fn new(entry: &str) -> Self {
        Self {
            entry: entry.to_string(),
            keywords: Vec::new(),
        }
    }

    /// Add a keyword, ignoring duplicates
    pub fn with_keyword(mut self, keyword: &str) -> Self {
        if !self.has_keyword(keyword) {
            self.keywords.push(keyword.to_string());
        }
        self
    }

    /// Check whether this ingredient declares the keyword
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }
}

impl Step {
    /// Create a regular, numbered step
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_heading: false,
        }
    }

    /// Create a heading step
    pub fn heading(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_heading: true,
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.entry)?;

        if !self.keywords.is_empty() {
            write!(f, " [{}]", self.keywords.join(", "))?;
        }

        Ok(())
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({} ingredients, {} steps)",
            self.name,
            self.ingredients.len(),
            self.steps.len()
        )?;

        for ingredient in &self.ingredients {
            writeln!(f, "  • {}", ingredient)?;
        }

        for (step, number) in self.steps.iter().zip(self.step_numbers()) {
            match number {
                Some(n) => writeln!(f, "  {}) {}", n, step.text)?,
                None => writeln!(f, "  ## {}", step.text)?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_builder() {
        let recipe = Recipe::new("Pancakes")
            .with_description("Fluffy")
            .with_serves("4")
            .with_tag("breakfast")
            .with_tag("breakfast")
            .with_ingredient(Ingredient::new("2 eggs").with_keyword("egg").with_keyword("eggs"));

        assert_eq!(recipe.name, "Pancakes");
        assert_eq!(recipe.tags, vec!["breakfast"]);
        assert_eq!(recipe.ingredients[0].keywords, vec!["egg", "eggs"]);
        assert!(recipe.has_tag("breakfast"));
        assert!(!recipe.has_tag("dinner"));
    }

    #[test]
    fn test_step_numbers_skip_headings() {
        let recipe = Recipe::new("Layered")
            .with_step(Step::new("one"))
            .with_step(Step::heading("Sauce"))
            .with_step(Step::new("two"))
            .with_step(Step::new("three"))
            .with_step(Step::heading("Assembly"))
            .with_step(Step::new("four"));

        assert_eq!(
            recipe.step_numbers(),
            vec![Some(1), None, Some(2), Some(3), None, Some(4)]
        );
    }

    #[test]
    fn test_instruction_steps_keep_original_index() {
        let recipe = Recipe::new("r")
            .with_step(Step::heading("Prep"))
            .with_step(Step::new("chop"));

        let steps: Vec<usize> = recipe.instruction_steps().map(|(i, _)| i).collect();
        assert_eq!(steps, vec![1]);
    }

    #[test]
    fn test_all_keywords_in_declaration_order() {
        let recipe = Recipe::new("r")
            .with_ingredient(Ingredient::new("salt").with_keyword("salt"))
            .with_ingredient(Ingredient::new("sea salt").with_keyword("sea salt").with_keyword("sea"));

        assert_eq!(recipe.all_keywords(), vec!["salt", "sea salt", "sea"]);
    }

    #[test]
    fn test_json_field_names() {
        let json = r#"{
            "name": "Soup",
            "ingredients": [{"entry": "1 leek", "keywords": ["leek"]}],
            "steps": [{"text": "Base", "isHeading": true}, {"text": "Slice the leek"}]
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.description, "");
        assert!(recipe.steps[0].is_heading);
        assert!(!recipe.steps[1].is_heading);

        let back = serde_json::to_value(&recipe.steps[0]).unwrap();
        assert_eq!(back["isHeading"], serde_json::Value::Bool(true));
    }

    #[test]
    fn test_display_formatting() {
        let recipe = Recipe::new("Toast")
            .with_ingredient(Ingredient::new("1 slice bread").with_keyword("bread"))
            .with_step(Step::heading("Cook"))
            .with_step(Step::new("Toast the bread"));

        let display = format!("{}", recipe);
        assert!(display.contains("Toast (1 ingredients, 2 steps)"));
        assert!(display.contains("1 slice bread [bread]"));
        assert!(display.contains("## Cook"));
        assert!(display.contains("1) Toast the bread"));
    }
}
