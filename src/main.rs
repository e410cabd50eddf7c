use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::info;
use recipes::config::ViewerConfig;
use recipes::highlight::{HoverEvent, HoverState};
use recipes::keyword_matcher::KeywordIndex;
use recipes::recipe_catalog::RecipeCatalog;
use recipes::recipe_view::{format_recipe, format_recipe_list};
use recipes::{logging, snapshot};

#[derive(Parser)]
#[command(name = "recipes")]
#[command(about = "Browse a recipe book snapshot")]
#[command(
    after_help = "Environment:\n  RECIPES_FILE           Snapshot path (default recipes.json)\n  KEYWORD_TIE_BREAK      earliest | keep-both\n  LOG_FORMAT             text | json\n  RUST_LOG               Log filter"
)]
struct Cli {
    /// Recipe snapshot to read, overrides RECIPES_FILE
    #[arg(long, global = true)]
    file: Option<String>,
    /// Only show recipes carrying this tag; repeatable
    #[arg(long = "tag", global = true)]
    tags: Vec<String>,
    /// Emit logs as JSON lines
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List recipes matching the selected tags
    List,
    /// List every tag in the book
    Tags,
    /// Show one recipe
    Show {
        name: String,
        /// Simulate hovering the ingredient at this position (1-based, as listed in the snapshot)
        #[arg(long)]
        hover_ingredient: Option<usize>,
        /// Simulate hovering this keyword inside a step
        #[arg(long)]
        hover_keyword: Option<String>,
    },
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let mut config = ViewerConfig::from_env()?;
    if cli.json_logs {
        config.log_format = logging::LogFormat::Json;
    }
    if let Some(file) = cli.file {
        config.recipes_file = file;
    }

    // Initialize logging
    logging::init(config.log_format)?;
    info!("Starting recipe viewer");

    let snapshot = snapshot::load_snapshot(&config.recipes_file)?;
    let catalog = RecipeCatalog::new(snapshot.recipes);

    match cli.command {
        Command::List => {
            let filtered = catalog.filter_by_tags(&cli.tags);
            let selectable = catalog.selectable_tags(&cli.tags);
            print!("{}", format_recipe_list(&filtered, &selectable));
        }
        Command::Tags => {
            for tag in catalog.all_tags() {
                println!("{}", tag);
            }
        }
        Command::Show {
            name,
            hover_ingredient,
            hover_keyword,
        } => {
            let recipe = catalog
                .find(&name)
                .ok_or_else(|| anyhow!("No recipe named '{}'", name))?;
            let index =
                KeywordIndex::from_ingredients(&recipe.ingredients).with_tie_break(config.tie_break);

            let mut hover = HoverState::new();
            if let Some(position) = hover_ingredient {
                let ingredient = position
                    .checked_sub(1)
                    .and_then(|i| recipe.ingredients.get(i))
                    .ok_or_else(|| anyhow!("No ingredient at position {}", position))?;
                hover.on_event(HoverEvent::IngredientEntered(ingredient.keywords.clone()));
            }
            if let Some(keyword) = hover_keyword {
                hover.on_event(HoverEvent::KeywordEntered(keyword));
            }

            print!("{}", format_recipe(recipe, &index, &hover, &cli.tags));
        }
    }

    Ok(())
}
