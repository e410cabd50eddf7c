//! Plain-text formatting of recipes for the command line viewer

use crate::highlight::HoverState;
use crate::ingredient_order::order_indices;
use crate::keyword_matcher::KeywordIndex;
use crate::linkify::{link_segments, TextSpan};
use crate::recipe_model::Recipe;
use crate::segmentation::resolve_matches;

/// Marker placed in front of highlighted rows
const HIGHLIGHT_MARK: &str = ">>";

/// Format the recipe list with the tags offered for further filtering
pub fn format_recipe_list(recipes: &[&Recipe], selectable_tags: &[(String, usize)]) -> String {
    let mut result = String::new();

    for recipe in recipes {
        result.push_str(&format!("• {}\n", recipe.name));
    }

    if !selectable_tags.is_empty() {
        let tags: Vec<String> = selectable_tags
            .iter()
            .map(|(tag, count)| format!("{} ({})", tag, count))
            .collect();
        result.push_str(&format!("\nFilter by tag: {}\n", tags.join(", ")));
    }

    result
}

/// Format a recipe: header, ingredients in cooking order, numbered steps
///
/// Keywords inside steps are wrapped in brackets; suppressed occurrences are
/// left unmarked. Rows highlighted by `hover` are prefixed with `>>`, keywords
/// of the hovered ingredient are wrapped in `**`.
pub fn format_recipe(
    recipe: &Recipe,
    index: &KeywordIndex,
    hover: &HoverState,
    selected_tags: &[String],
) -> String {
    let mut result = String::new();

    result.push_str(&format!("# {}\n", recipe.name));
    if !recipe.description.is_empty() {
        result.push_str(&format_description(&recipe.description));
        result.push('\n');
    }
    if !recipe.serves.is_empty() {
        result.push_str(&format!("Serves: {}\n", recipe.serves));
    }
    if !recipe.tags.is_empty() {
        let tags: Vec<String> = recipe
            .tags
            .iter()
            .map(|tag| {
                if selected_tags.contains(tag) {
                    format!("*{}*", tag)
                } else {
                    tag.clone()
                }
            })
            .collect();
        result.push_str(&format!("Tags: {}\n", tags.join(", ")));
    }

    result.push_str("\n## Ingredients\n");
    for i in order_indices(&recipe.ingredients, &recipe.steps, index) {
        let ingredient = &recipe.ingredients[i];
        let mark = if hover.is_ingredient_highlighted(ingredient) {
            HIGHLIGHT_MARK
        } else {
            "  "
        };
        result.push_str(&format!("{} • {}\n", mark, ingredient.entry));
    }

    result.push_str("\n## Steps\n");
    for (step, number) in recipe.steps.iter().zip(recipe.step_numbers()) {
        let Some(number) = number else {
            result.push_str(&format!("\n### {}\n", step.text));
            continue;
        };

        let mark = if hover.is_step_highlighted(step, index) {
            HIGHLIGHT_MARK
        } else {
            "  "
        };
        let text: String = resolve_matches(&step.text, index)
            .iter()
            .map(|segment| {
                if !segment.is_keyword || !segment.authoritative {
                    segment.text.clone()
                } else if hover.is_segment_highlighted(segment) {
                    format!("[**{}**]", segment.text)
                } else {
                    format!("[{}]", segment.text)
                }
            })
            .collect();
        result.push_str(&format!("{} {}) {}\n", mark, number, text));
    }

    if let Some(tooltip) = hover.tooltip(index, &recipe.ingredients) {
        result.push_str(&format!("\n({})\n", tooltip));
    }

    result
}

fn format_description(description: &str) -> String {
    link_segments(description)
        .iter()
        .map(|span| match span {
            TextSpan::Plain(text) => text.clone(),
            TextSpan::Link { text, href } if text == href => format!("<{}>", href),
            TextSpan::Link { text, href } => format!("{} <{}>", text, href),
        })
        .collect()
}
