//! # Recipe Viewer Example
//!
//! This example walks through a viewing and editing session: keyword
//! segmentation of the steps, ingredient ordering, hover highlighting, then an
//! edit through an immutable draft and a failed save reported as a transient
//! notification.

use chrono::Utc;
use recipes::config::ViewerConfig;
use recipes::highlight::{HoverEvent, HoverState};
use recipes::keyword_matcher::KeywordIndex;
use recipes::notification::NotificationSlot;
use recipes::recipe_catalog::RecipeCatalog;
use recipes::recipe_draft::{DraftMode, RecipeDraft};
use recipes::recipe_model::{Ingredient, Recipe, Step};
use recipes::recipe_view::format_recipe;
use recipes::segmentation::resolve_matches;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ViewerConfig::from_env()?;

    let recipe = Recipe::new("Pan-fried fish")
        .with_description("Adapted from https://example.com/fish")
        .with_serves("2")
        .with_tag("dinner")
        .with_ingredient(Ingredient::new("1 tsp salt").with_keyword("salt"))
        .with_ingredient(Ingredient::new("Flaky sea salt").with_keyword("sea salt"))
        .with_ingredient(Ingredient::new("2 fish fillets").with_keyword("fish"))
        .with_ingredient(Ingredient::new("2 tbsp olive oil").with_keyword("olive oil").with_keyword("oil"))
        .with_step(Step::heading("Prep"))
        .with_step(Step::new("Pat the fish dry and season with salt"))
        .with_step(Step::heading("Cook"))
        .with_step(Step::new("Heat the olive oil, fry the fish, finish with sea salt"));

    let index = KeywordIndex::from_ingredients(&recipe.ingredients).with_tie_break(config.tie_break);

    println!("Segments of the last step:");
    for segment in resolve_matches(&recipe.steps[3].text, &index) {
        println!(
            "  {:?} keyword={} owner={:?} authoritative={}",
            segment.text, segment.is_keyword, segment.owner, segment.authoritative
        );
    }

    let hover = HoverState::new().after(HoverEvent::IngredientEntered(vec!["sea salt".to_string()]));
    println!("\n{}", format_recipe(&recipe, &index, &hover, &[]));

    let catalog = RecipeCatalog::new(vec![recipe.clone()]);
    let draft = RecipeDraft::from_recipe(&recipe)
        .with_name("Crispy fish")
        .add_step()
        .set_step_text(4, "Serve with lemon")?;
    let submission = draft.submission(
        "secret",
        DraftMode::Edit {
            previous_name: recipe.name.clone(),
        },
    )?;
    let catalog = catalog.upsert(submission.recipe, Some(&recipe.name))?;
    println!("Catalog after edit: {:?}", catalog.recipes().iter().map(|r| &r.name).collect::<Vec<_>>());

    let mut notifications = NotificationSlot::new();
    let ttl = chrono::Duration::from_std(config.notification_ttl)?;
    let now = Utc::now();
    if let Err(e) = RecipeDraft::new().submission("secret", DraftMode::Create) {
        notifications.post(&e.to_string(), ttl, now);
    }
    if let Some(notification) = notifications.current(now) {
        println!("Notification until {}: {}", notification.expires_at, notification.message);
    }

    Ok(())
}
