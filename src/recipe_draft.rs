//! # Recipe Draft Module
//!
//! An in-progress recipe being created or edited. A draft is an immutable
//! value: every edit returns a new draft holding new ingredient and step
//! records, so a presentation layer can keep the previous value for undo or
//! change detection.
//!
//! ## Usage
//!
//! ```rust
//! use recipes::recipe_draft::{DraftMode, RecipeDraft};
//!
//! let draft = RecipeDraft::new()
//!     .with_name("Tomato soup")
//!     .set_ingredient_entry(0, "6 tomatoes")?
//!     .set_ingredient_keywords(0, vec!["tomato".to_string()])?
//!     .set_step_text(0, "Roast the tomatoes")?;
//!
//! let submission = draft.submission("secret", DraftMode::Create)?;
//! assert_eq!(submission.recipe.name, "Tomato soup");
//! # Ok::<(), recipes::errors::RecipeError>(())
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::RecipeError;
use crate::recipe_model::{Ingredient, Recipe, Step};

/// Maximum recipe name length in bytes
pub const MAX_NAME_LENGTH: usize = 255;

/// Whether the draft creates a new recipe or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftMode {
    Create,
    /// Editing the recipe currently stored under this name
    Edit { previous_name: String },
}

/// An in-progress recipe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    recipe: Recipe,
}

/// Payload sent to the recipe API when saving a draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSubmission {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub password: String,
    pub edit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_name: Option<String>,
}

/// Check a recipe name and return it trimmed
///
/// The name is the recipe's key in the catalog and on the API, so it must
/// hold something besides whitespace and fit in [`MAX_NAME_LENGTH`] bytes.
pub fn normalize_recipe_name(name: &str) -> Result<String, RecipeError> {
    match name.trim() {
        "" => Err(RecipeError::EmptyName),
        trimmed if trimmed.len() > MAX_NAME_LENGTH => Err(RecipeError::NameTooLong {
            len: trimmed.len(),
            max: MAX_NAME_LENGTH,
        }),
        trimmed => Ok(trimmed.to_string()),
    }
}

fn check_index(index: usize, len: usize) -> Result<(), RecipeError> {
    if index >= len {
        return Err(RecipeError::IndexOutOfRange { index, len });
    }
    Ok(())
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeDraft {
    /// A blank draft with one empty ingredient and one empty step
    pub fn new() -> Self {
        Self {
            recipe: Recipe::new("")
                .with_ingredient(Ingredient::new(""))
                .with_step(Step::new("")),
        }
    }

    /// A draft pre-filled from an existing recipe
    pub fn from_recipe(recipe: &Recipe) -> Self {
        debug!("Starting draft from recipe '{}'", recipe.name);
        let mut recipe = recipe.clone();
        if recipe.ingredients.is_empty() {
            recipe.ingredients.push(Ingredient::new(""));
        }
        if recipe.steps.is_empty() {
            recipe.steps.push(Step::new(""));
        }
        Self { recipe }
    }

    /// The recipe as currently drafted
    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    fn edited(&self, edit: impl FnOnce(&mut Recipe)) -> Self {
        let mut recipe = self.recipe.clone();
        edit(&mut recipe);
        Self { recipe }
    }

    pub fn with_name(&self, name: &str) -> Self {
        self.edited(|r| r.name = name.to_string())
    }

    pub fn with_description(&self, description: &str) -> Self {
        self.edited(|r| r.description = description.to_string())
    }

    pub fn with_serves(&self, serves: &str) -> Self {
        self.edited(|r| r.serves = serves.to_string())
    }

    pub fn with_tags(&self, tags: Vec<String>) -> Self {
        self.edited(|r| r.tags = tags)
    }

    pub fn set_ingredient_entry(&self, index: usize, entry: &str) -> Result<Self, RecipeError> {
        check_index(index, self.recipe.ingredients.len())?;
        Ok(self.edited(|r| {
            r.ingredients[index] = Ingredient {
                entry: entry.to_string(),
                keywords: r.ingredients[index].keywords.clone(),
            }
        }))
    }

    pub fn set_ingredient_keywords(
        &self,
        index: usize,
        keywords: Vec<String>,
    ) -> Result<Self, RecipeError> {
        check_index(index, self.recipe.ingredients.len())?;
        Ok(self.edited(|r| {
            r.ingredients[index] = Ingredient {
                entry: r.ingredients[index].entry.clone(),
                keywords,
            }
        }))
    }

    /// Append a blank ingredient
    pub fn add_ingredient(&self) -> Self {
        self.edited(|r| r.ingredients.push(Ingredient::new("")))
    }

    /// Remove an ingredient; the last one cannot be removed
    pub fn remove_ingredient(&self, index: usize) -> Result<Self, RecipeError> {
        check_index(index, self.recipe.ingredients.len())?;
        if self.recipe.ingredients.len() == 1 {
            return Err(RecipeError::LastEntry("ingredient"));
        }
        Ok(self.edited(|r| {
            r.ingredients.remove(index);
        }))
    }

    pub fn set_step_text(&self, index: usize, text: &str) -> Result<Self, RecipeError> {
        check_index(index, self.recipe.steps.len())?;
        Ok(self.edited(|r| {
            r.steps[index] = Step {
                text: text.to_string(),
                is_heading: r.steps[index].is_heading,
            }
        }))
    }

    pub fn set_step_heading(&self, index: usize, is_heading: bool) -> Result<Self, RecipeError> {
        check_index(index, self.recipe.steps.len())?;
        Ok(self.edited(|r| {
            r.steps[index] = Step {
                text: r.steps[index].text.clone(),
                is_heading,
            }
        }))
    }

    /// Append a blank, non-heading step
    pub fn add_step(&self) -> Self {
        self.edited(|r| r.steps.push(Step::new("")))
    }

    /// Remove a step; the last one cannot be removed
    pub fn remove_step(&self, index: usize) -> Result<Self, RecipeError> {
        check_index(index, self.recipe.steps.len())?;
        if self.recipe.steps.len() == 1 {
            return Err(RecipeError::LastEntry("step"));
        }
        Ok(self.edited(|r| {
            r.steps.remove(index);
        }))
    }

    /// Swap a step with the one above it
    pub fn move_step_up(&self, index: usize) -> Result<Self, RecipeError> {
        check_index(index, self.recipe.steps.len())?;
        if index == 0 {
            return Err(RecipeError::AtEdge(index));
        }
        Ok(self.edited(|r| r.steps.swap(index - 1, index)))
    }

    /// Swap a step with the one below it
    pub fn move_step_down(&self, index: usize) -> Result<Self, RecipeError> {
        check_index(index, self.recipe.steps.len())?;
        if index + 1 == self.recipe.steps.len() {
            return Err(RecipeError::AtEdge(index));
        }
        Ok(self.edited(|r| r.steps.swap(index, index + 1)))
    }

    /// Check the draft can be submitted
    pub fn validate(&self) -> Result<(), RecipeError> {
        normalize_recipe_name(&self.recipe.name).map(|_| ())
    }

    /// Build the save payload; the name is trimmed
    pub fn submission(&self, password: &str, mode: DraftMode) -> Result<RecipeSubmission, RecipeError> {
        let name = normalize_recipe_name(&self.recipe.name)?;
        let mut recipe = self.recipe.clone();
        recipe.name = name;

        let (edit, previous_name) = match mode {
            DraftMode::Create => (false, None),
            DraftMode::Edit { previous_name } => (true, Some(previous_name)),
        };

        Ok(RecipeSubmission {
            recipe,
            password: password.to_string(),
            edit,
            previous_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_recipe_name() {
        assert_eq!(normalize_recipe_name("  Soup "), Ok("Soup".to_string()));
        assert_eq!(normalize_recipe_name(" \t "), Err(RecipeError::EmptyName));
        assert_eq!(
            normalize_recipe_name(&"a".repeat(256)),
            Err(RecipeError::NameTooLong { len: 256, max: 255 })
        );
        // trailing spaces do not count towards the limit
        assert!(normalize_recipe_name(&format!("{}  ", "a".repeat(255))).is_ok());
    }

    #[test]
    fn test_new_draft_has_one_blank_row_each() {
        let draft = RecipeDraft::new();
        assert_eq!(draft.recipe().ingredients, vec![Ingredient::new("")]);
        assert_eq!(draft.recipe().steps, vec![Step::new("")]);
    }

    #[test]
    fn test_edits_leave_previous_draft_untouched() {
        let first = RecipeDraft::new();
        let second = first.set_ingredient_entry(0, "2 eggs").unwrap();

        assert_eq!(first.recipe().ingredients[0].entry, "");
        assert_eq!(second.recipe().ingredients[0].entry, "2 eggs");
    }

    #[test]
    fn test_keywords_and_entry_kept_independently() {
        let draft = RecipeDraft::new()
            .set_ingredient_keywords(0, vec!["egg".to_string()])
            .unwrap()
            .set_ingredient_entry(0, "2 eggs")
            .unwrap();

        assert_eq!(draft.recipe().ingredients[0], Ingredient::new("2 eggs").with_keyword("egg"));
    }

    #[test]
    fn test_cannot_remove_last_rows() {
        let draft = RecipeDraft::new();
        assert_eq!(draft.remove_ingredient(0), Err(RecipeError::LastEntry("ingredient")));
        assert_eq!(draft.remove_step(0), Err(RecipeError::LastEntry("step")));
        assert_eq!(
            draft.remove_step(4),
            Err(RecipeError::IndexOutOfRange { index: 4, len: 1 })
        );

        let two = draft.add_ingredient().set_ingredient_entry(1, "salt").unwrap();
        let one = two.remove_ingredient(0).unwrap();
        assert_eq!(one.recipe().ingredients, vec![Ingredient::new("salt")]);
    }

    #[test]
    fn test_move_steps() {
        let draft = RecipeDraft::new()
            .set_step_text(0, "a")
            .unwrap()
            .add_step()
            .set_step_text(1, "b")
            .unwrap()
            .add_step()
            .set_step_text(2, "c")
            .unwrap()
            .set_step_heading(2, true)
            .unwrap();

        let moved = draft.move_step_up(2).unwrap();
        let texts: Vec<&str> = moved.recipe().steps.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "c", "b"]);
        assert!(moved.recipe().steps[1].is_heading);

        let moved = draft.move_step_down(0).unwrap();
        let texts: Vec<&str> = moved.recipe().steps.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "a", "c"]);

        assert_eq!(draft.move_step_up(0), Err(RecipeError::AtEdge(0)));
        assert_eq!(draft.move_step_down(2), Err(RecipeError::AtEdge(2)));
    }

    #[test]
    fn test_from_recipe_round_trip() {
        let recipe = Recipe::new("Bread")
            .with_tag("baking")
            .with_ingredient(Ingredient::new("500g flour").with_keyword("flour"))
            .with_step(Step::new("Knead the flour"));

        let draft = RecipeDraft::from_recipe(&recipe);
        assert_eq!(draft.recipe(), &recipe);
    }

    #[test]
    fn test_submission_payload() {
        let draft = RecipeDraft::new()
            .with_name(" Bread ")
            .with_serves("2")
            .with_tags(vec!["baking".to_string()]);
        let submission = draft
            .submission(
                "pw",
                DraftMode::Edit {
                    previous_name: "Loaf".to_string(),
                },
            )
            .unwrap();

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["name"], "Bread");
        assert_eq!(json["serves"], "2");
        assert_eq!(json["tags"][0], "baking");
        assert_eq!(json["password"], "pw");
        assert_eq!(json["edit"], true);
        assert_eq!(json["previousName"], "Loaf");
        assert_eq!(json["steps"][0]["isHeading"], false);
    }

    #[test]
    fn test_submission_requires_name() {
        let draft = RecipeDraft::new();
        assert_eq!(
            draft.submission("pw", DraftMode::Create),
            Err(RecipeError::EmptyName)
        );
        assert!(draft.validate().is_err());
        assert!(draft.with_name("Soup").validate().is_ok());
    }
}
