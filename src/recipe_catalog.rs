//! # Recipe Catalog Module
//!
//! The list of recipes held for the session: tag filtering, tag facets with
//! match counts, alphabetical ordering and the list maintenance that follows a
//! create, edit or delete.
//!
//! Maintenance operations return a new catalog; the one they were called on is
//! left untouched.

use log::{debug, info, warn};
use std::cmp::Ordering;

use crate::errors::RecipeError;
use crate::recipe_model::Recipe;

/// Recipes available in the current session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeCatalog {
    recipes: Vec<Recipe>,
}

/// Case-insensitive comparison, falling back to a byte comparison on ties
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn distinct_sorted<'a>(tags: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::new();
    for tag in tags {
        if !distinct.contains(tag) {
            distinct.push(tag.clone());
        }
    }
    distinct.sort_by(|a, b| compare_names(a, b));
    distinct
}

impl RecipeCatalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        info!("Catalog holds {} recipes", recipes.len());
        Self { recipes }
    }

    /// Recipes in snapshot order
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Find a recipe by its exact name
    pub fn find(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| recipe.name == name)
    }

    /// Every tag used by any recipe, distinct and sorted
    pub fn all_tags(&self) -> Vec<String> {
        distinct_sorted(self.recipes.iter().flat_map(|recipe| recipe.tags.iter()))
    }

    /// Recipes carrying every selected tag, sorted by name
    ///
    /// With no tag selected every recipe matches.
    pub fn filter_by_tags<S: AsRef<str>>(&self, selected: &[S]) -> Vec<&Recipe> {
        let mut filtered: Vec<&Recipe> = self
            .recipes
            .iter()
            .filter(|recipe| selected.iter().all(|tag| recipe.has_tag(tag.as_ref())))
            .collect();
        filtered.sort_by(|a, b| compare_names(&a.name, &b.name));

        debug!(
            "{} of {} recipes match {} selected tags",
            filtered.len(),
            self.recipes.len(),
            selected.len()
        );
        filtered
    }

    /// Number of recipes in `filtered` carrying `tag`
    pub fn tag_match_count(tag: &str, filtered: &[&Recipe]) -> usize {
        filtered.iter().filter(|recipe| recipe.has_tag(tag)).count()
    }

    /// Tags offered for further filtering, with their match counts
    ///
    /// Tags of the recipes left after filtering, most frequent first; equally
    /// frequent tags stay alphabetical.
    pub fn selectable_tags<S: AsRef<str>>(&self, selected: &[S]) -> Vec<(String, usize)> {
        let filtered = self.filter_by_tags(selected);
        let mut tags: Vec<(String, usize)> =
            distinct_sorted(filtered.iter().flat_map(|recipe| recipe.tags.iter()))
                .into_iter()
                .map(|tag| {
                    let count = Self::tag_match_count(&tag, &filtered);
                    (tag, count)
                })
                .collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1));
        tags
    }

    /// Catalog after saving `recipe`
    ///
    /// When `previous_name` is given (an edit) the recipe stored under that
    /// name is dropped first. The saved recipe goes to the end of the list.
    /// Names are unique: saving under a name held by any other recipe fails
    /// with [`RecipeError::DuplicateName`].
    pub fn upsert(&self, recipe: Recipe, previous_name: Option<&str>) -> Result<Self, RecipeError> {
        let mut recipes = match previous_name {
            Some(previous) => self.without(previous)?,
            None => self.recipes.clone(),
        };
        if recipes.iter().any(|existing| existing.name == recipe.name) {
            warn!("Refusing to save duplicate recipe name '{}'", recipe.name);
            return Err(RecipeError::DuplicateName(recipe.name));
        }
        info!("Saving recipe '{}'", recipe.name);
        recipes.push(recipe);
        Ok(Self { recipes })
    }

    /// Catalog after deleting the recipe called `name`
    pub fn remove(&self, name: &str) -> Result<Self, RecipeError> {
        info!("Removing recipe '{}'", name);
        Ok(Self {
            recipes: self.without(name)?,
        })
    }

    fn without(&self, name: &str) -> Result<Vec<Recipe>, RecipeError> {
        let position = self
            .recipes
            .iter()
            .position(|recipe| recipe.name == name)
            .ok_or_else(|| RecipeError::RecipeNotFound(name.to_string()))?;
        let mut recipes = self.recipes.clone();
        recipes.remove(position);
        Ok(recipes)
    }
}
