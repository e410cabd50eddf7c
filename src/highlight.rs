//! Hover-highlight state shared between the ingredient list and the steps.
//!
//! Two independent channels:
//!
//! - **step highlight**: set while an ingredient row is hovered; holds that
//!   ingredient's keywords and highlights every step where one of them is the
//!   authoritative match.
//! - **ingredient highlight**: set while a keyword inside a step is hovered;
//!   holds the keyword and highlights the ingredient row declaring it.
//!
//! Both channels may be active at once and point at different entities.

use tracing::debug;

use crate::keyword_matcher::KeywordIndex;
use crate::recipe_model::{Ingredient, Recipe, Step};
use crate::segmentation::Segment;

/// Pointer events coming from the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverEvent {
    /// Pointer entered an ingredient row; carries the ingredient's keywords
    IngredientEntered(Vec<String>),
    /// Pointer left the ingredient row
    IngredientLeft,
    /// Pointer entered a keyword segment inside a step
    KeywordEntered(String),
    /// Pointer left the keyword segment
    KeywordLeft,
}

/// Coarse view of which channels are active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverPhase {
    Idle,
    IngredientHovered,
    StepKeywordHovered,
    Both,
}

/// Current hover state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverState {
    /// Whether an ingredient row is under the pointer
    pub ingredient_hovered: bool,
    /// Keywords of the hovered ingredient; may be empty even while hovered
    pub step_highlight: Vec<String>,
    /// Keyword hovered inside a step
    pub ingredient_highlight: Option<String>,
}

impl HoverState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a pointer event
    pub fn on_event(&mut self, event: HoverEvent) {
        debug!(?event, phase = ?self.phase(), "hover event");
        match event {
            HoverEvent::IngredientEntered(keywords) => {
                self.ingredient_hovered = true;
                self.step_highlight = keywords;
            }
            HoverEvent::IngredientLeft => {
                self.ingredient_hovered = false;
                self.step_highlight.clear();
            }
            HoverEvent::KeywordEntered(keyword) => self.ingredient_highlight = Some(keyword),
            HoverEvent::KeywordLeft => self.ingredient_highlight = None,
        }
    }

    /// Return the state after `event`, leaving `self` untouched
    pub fn after(&self, event: HoverEvent) -> Self {
        let mut next = self.clone();
        next.on_event(event);
        next
    }

    pub fn phase(&self) -> HoverPhase {
        match (self.ingredient_hovered, self.ingredient_highlight.is_some()) {
            (false, false) => HoverPhase::Idle,
            (true, false) => HoverPhase::IngredientHovered,
            (false, true) => HoverPhase::StepKeywordHovered,
            (true, true) => HoverPhase::Both,
        }
    }

    /// Whether the step should be highlighted for the hovered ingredient
    pub fn is_step_highlighted(&self, step: &Step, index: &KeywordIndex) -> bool {
        !step.is_heading
            && !self.step_highlight.is_empty()
            && index.any_authoritative(&step.text, &self.step_highlight)
    }

    /// Indices of all highlighted steps of `recipe`
    pub fn highlighted_steps(&self, recipe: &Recipe, index: &KeywordIndex) -> Vec<usize> {
        recipe
            .steps
            .iter()
            .enumerate()
            .filter(|(_, step)| self.is_step_highlighted(step, index))
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether a keyword segment belongs to the hovered ingredient
    pub fn is_segment_highlighted(&self, segment: &Segment) -> bool {
        segment.is_keyword
            && segment.authoritative
            && self.step_highlight.iter().any(|k| *k == segment.text)
    }

    /// Whether the ingredient row should be highlighted for the hovered keyword
    pub fn is_ingredient_highlighted(&self, ingredient: &Ingredient) -> bool {
        self.ingredient_highlight
            .as_deref()
            .is_some_and(|keyword| ingredient.has_keyword(keyword))
    }

    /// Entry of the ingredient owning the hovered keyword, for a tooltip
    ///
    /// `None` when nothing is hovered or no ingredient declares the keyword.
    pub fn tooltip<'a>(&self, index: &KeywordIndex, ingredients: &'a [Ingredient]) -> Option<&'a str> {
        let keyword = self.ingredient_highlight.as_deref()?;
        let owner = index.owner_of(keyword)?;
        ingredients.get(owner).map(|ingredient| ingredient.entry.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe() -> Recipe {
        Recipe::new("Omelette")
            .with_ingredient(Ingredient::new("3 eggs").with_keyword("egg").with_keyword("eggs"))
            .with_ingredient(Ingredient::new("knob of butter").with_keyword("butter"))
            .with_step(Step::heading("Eggs"))
            .with_step(Step::new("Beat the eggs"))
            .with_step(Step::new("Melt the butter"))
            .with_step(Step::new("Pour in the egg and fold"))
    }

    #[test]
    fn test_phase_transitions() {
        let mut state = HoverState::new();
        assert_eq!(state.phase(), HoverPhase::Idle);

        state.on_event(HoverEvent::IngredientEntered(vec!["butter".to_string()]));
        assert_eq!(state.phase(), HoverPhase::IngredientHovered);

        state.on_event(HoverEvent::KeywordEntered("egg".to_string()));
        assert_eq!(state.phase(), HoverPhase::Both);

        state.on_event(HoverEvent::IngredientLeft);
        assert_eq!(state.phase(), HoverPhase::StepKeywordHovered);

        state.on_event(HoverEvent::KeywordLeft);
        assert_eq!(state.phase(), HoverPhase::Idle);
    }

    #[test]
    fn test_ingredient_without_keywords_still_hovered() {
        let recipe = recipe();
        let index = KeywordIndex::from_ingredients(&recipe.ingredients);
        let mut state = HoverState::new();

        state.on_event(HoverEvent::IngredientEntered(Vec::new()));
        assert_eq!(state.phase(), HoverPhase::IngredientHovered);
        assert!(state.highlighted_steps(&recipe, &index).is_empty());

        state.on_event(HoverEvent::IngredientLeft);
        assert_eq!(state.phase(), HoverPhase::Idle);
    }

    #[test]
    fn test_ingredient_hover_highlights_steps_with_any_keyword() {
        let recipe = recipe();
        let index = KeywordIndex::from_ingredients(&recipe.ingredients);
        let state = HoverState::new().after(HoverEvent::IngredientEntered(
            recipe.ingredients[0].keywords.clone(),
        ));

        // heading "Eggs" never highlights
        assert_eq!(state.highlighted_steps(&recipe, &index), vec![1, 3]);
    }

    #[test]
    fn test_keyword_hover_highlights_ingredient() {
        let recipe = recipe();
        let index = KeywordIndex::from_ingredients(&recipe.ingredients);
        let state = HoverState::new().after(HoverEvent::KeywordEntered("butter".to_string()));

        assert!(!state.is_ingredient_highlighted(&recipe.ingredients[0]));
        assert!(state.is_ingredient_highlighted(&recipe.ingredients[1]));
        assert_eq!(state.tooltip(&index, &recipe.ingredients), Some("knob of butter"));
    }

    #[test]
    fn test_unknown_keyword_has_no_tooltip() {
        let recipe = recipe();
        let index = KeywordIndex::from_ingredients(&recipe.ingredients);
        let state = HoverState::new().after(HoverEvent::KeywordEntered("truffle".to_string()));

        assert_eq!(state.tooltip(&index, &recipe.ingredients), None);
        assert!(recipe
            .ingredients
            .iter()
            .all(|ingredient| !state.is_ingredient_highlighted(ingredient)));
    }

    #[test]
    fn test_after_does_not_mutate() {
        let state = HoverState::new();
        let next = state.after(HoverEvent::KeywordEntered("egg".to_string()));
        assert_eq!(state.phase(), HoverPhase::Idle);
        assert_eq!(next.phase(), HoverPhase::StepKeywordHovered);
    }
}
