//! # Ingredient Order Module
//!
//! Orders a recipe's ingredient list by where each ingredient is first used in
//! the steps, so the list reads in cooking order.
//!
//! ## Ordering rules
//!
//! - An ingredient is *used* in a step when one of its keywords is the
//!   authoritative match there (see [`crate::keyword_matcher`]); headings are skipped
//! - Used ingredients come first, ordered by the first step using them, then by
//!   the byte offset of their earliest keyword in that step
//! - Unused ingredients (including ingredients without keywords) follow, in
//!   their original order
//!
//! Ties keep the original order; the sort is stable.
//!
//! ## Usage
//!
//! ```rust
//! use recipes::ingredient_order::order_ingredients;
//! use recipes::recipe_model::{Ingredient, Step};
//!
//! let steps = vec![Step::new("Heat the oil"), Step::new("Add the onion and oil")];
//! let ingredients = vec![
//!     Ingredient::new("2 onions").with_keyword("onion"),
//!     Ingredient::new("1 cup oil").with_keyword("oil"),
//! ];
//!
//! let ordered = order_ingredients(&ingredients, &steps);
//! assert_eq!(ordered[0].entry, "1 cup oil");
//! assert_eq!(ordered[1].entry, "2 onions");
//! ```

use log::{debug, trace};
use std::cmp::Ordering;

use crate::keyword_matcher::{find_keyword, KeywordIndex};
use crate::recipe_model::{Ingredient, Step};

/// Where an ingredient is first used
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FirstAppearance {
    /// Index of the step in the full step list (headings included)
    pub step: usize,
    /// Byte offset of the ingredient's earliest keyword in that step
    pub offset: usize,
}

/// Find the first non-heading step using `ingredient`
///
/// The offset is the earliest occurrence of any of the ingredient's keywords in
/// that step, authoritative or not.
pub fn first_appearance(
    ingredient: &Ingredient,
    steps: &[Step],
    index: &KeywordIndex,
) -> Option<FirstAppearance> {
    let (step, text) = steps
        .iter()
        .enumerate()
        .filter(|(_, step)| !step.is_heading)
        .find(|(_, step)| index.any_authoritative(&step.text, &ingredient.keywords))
        .map(|(i, step)| (i, step.text.as_str()))?;

    let offset = ingredient
        .keywords
        .iter()
        .filter_map(|keyword| find_keyword(text, keyword))
        .map(|range| range.start)
        .min()
        .unwrap_or(0);

    trace!(
        "Ingredient '{}' first used in step {} at offset {}",
        ingredient.entry,
        step,
        offset
    );
    Some(FirstAppearance { step, offset })
}

/// Compare two first appearances; unused ingredients sort last
pub fn compare_appearances(a: Option<FirstAppearance>, b: Option<FirstAppearance>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Display order of `ingredients` as indices into the input
pub fn order_indices(ingredients: &[Ingredient], steps: &[Step], index: &KeywordIndex) -> Vec<usize> {
    let ranks: Vec<Option<FirstAppearance>> = ingredients
        .iter()
        .map(|ingredient| first_appearance(ingredient, steps, index))
        .collect();

    let mut order: Vec<usize> = (0..ingredients.len()).collect();
    order.sort_by(|&a, &b| compare_appearances(ranks[a], ranks[b]));

    debug!(
        "Ordered {} ingredients, {} used in steps",
        ingredients.len(),
        ranks.iter().filter(|rank| rank.is_some()).count()
    );
    order
}

/// Order ingredients for display using the recipe's own keyword set
pub fn order_ingredients(ingredients: &[Ingredient], steps: &[Step]) -> Vec<Ingredient> {
    let index = KeywordIndex::from_ingredients(ingredients);
    order_ingredients_with(ingredients, steps, &index)
}

/// Order ingredients for display with an explicit keyword index
pub fn order_ingredients_with(
    ingredients: &[Ingredient],
    steps: &[Step],
    index: &KeywordIndex,
) -> Vec<Ingredient> {
    order_indices(ingredients, steps, index)
        .into_iter()
        .map(|i| ingredients[i].clone())
        .collect()
}

/// Order ingredients with a comparator that recomputes first appearance per pair
///
/// Slower than [`order_ingredients_with`] and always yields the same order.
pub fn order_ingredients_pairwise(
    ingredients: &[Ingredient],
    steps: &[Step],
    index: &KeywordIndex,
) -> Vec<Ingredient> {
    let mut ordered = ingredients.to_vec();
    ordered.sort_by(|a, b| {
        compare_appearances(
            first_appearance(a, steps, index),
            first_appearance(b, steps, index),
        )
    });
    ordered
}
