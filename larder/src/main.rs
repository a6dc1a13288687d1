//! larder - command line recipe library
//!
//! Searches and browses TheMealDB, keeps each signed-in user's recipes and
//! favorites in a local SQLite database under the root folder.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use larder::{render, remember, RecipeBook};
use larder_api::{browse_categories, find_browse_category, MealDbClient, RecipeSource};
use larder_common::config::{load_toml_config, resolve_root_folder, RootFolder, TomlConfig};
use larder_common::db::init_database;
use larder_common::events::SessionBus;
use larder_common::RecipeDraft;
use larder_store::{IdentityProvider, LocalIdentity, UserLibrary};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "larder", version)]
#[command(about = "Search, browse and keep recipes")]
struct Args {
    /// Root folder holding the database and session file
    #[arg(long, global = true, value_name = "DIR")]
    root_folder: Option<PathBuf>,

    /// Config file (defaults to LARDER_CONFIG or the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account and sign in
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "LARDER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign in to an existing account
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long, env = "LARDER_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out
    Signout,
    /// Show who is signed in
    Whoami,
    /// List your recipes (seeded with samples when empty)
    Home,
    /// Search recipes by name
    Search { query: String },
    /// List recipes of a cuisine or category
    Browse { name: String },
    /// List the browsable cuisines and categories
    Categories,
    /// Show one recipe
    Show { id: String },
    /// Add a recipe of your own
    Add {
        #[arg(long)]
        title: String,
        /// One ingredient; repeat for more
        #[arg(long = "ingredient", value_name = "TEXT")]
        ingredients: Vec<String>,
        /// One step; repeat for more
        #[arg(long = "step", value_name = "TEXT")]
        steps: Vec<String>,
        #[arg(long, default_value = "")]
        time: String,
        #[arg(long, default_value = "")]
        servings: String,
        #[arg(long)]
        image: Option<String>,
    },
    /// Toggle a recipe in your favorites
    Favorite { id: String },
    /// List your favorites
    Favorites,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_toml_config(path)?,
        None => TomlConfig::load()?,
    };

    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting larder v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let root = RootFolder::new(resolve_root_folder(args.root_folder.as_deref(), &config));
    root.ensure_directory_exists()?;
    info!("Database path: {}", root.database_path().display());

    let pool = init_database(&root.database_path())
        .await
        .context("Failed to open database")?;
    let identity = Arc::new(LocalIdentity::new(pool.clone(), SessionBus::default()));
    remember::restore_session(&identity, &root.session_path()).await?;

    let client = MealDbClient::from_config(config.api_base_url(), &config.api)?;
    let source: Arc<dyn RecipeSource> = Arc::new(client);
    let book = RecipeBook::new(UserLibrary::new(pool, identity.clone()), source);

    run(args.command, args.json, &book, &identity, &root).await
}

async fn run(
    command: Command,
    json: bool,
    book: &RecipeBook,
    identity: &LocalIdentity,
    root: &RootFolder,
) -> Result<()> {
    match command {
        Command::Signup {
            name,
            email,
            password,
        } => {
            let session = identity.sign_up(&name, &email, &password).await?;
            remember::remember_session(&root.session_path(), &session.user_id)?;
            println!("Welcome, {}!", session.display_name());
        }
        Command::Signin { email, password } => {
            let session = identity.sign_in(&email, &password).await?;
            remember::remember_session(&root.session_path(), &session.user_id)?;
            println!("Welcome back, {}!", session.display_name());
        }
        Command::Signout => {
            identity.sign_out();
            remember::forget_session(&root.session_path())?;
            println!("Signed out.");
        }
        Command::Whoami => match identity.current_session() {
            Some(session) => emit(json, &session, || format!("{}\n", session.display_name()))?,
            None => println!("Guest (not signed in)"),
        },
        Command::Home => {
            let recipes = book.home_feed().await?;
            emit(json, &recipes, || render::recipe_list(&recipes))?;
        }
        Command::Search { query } => {
            let local = book.local_recipes().await?;
            let recipes = book.search(&local, &query).await;
            emit(json, &recipes, || render::recipe_list(&recipes))?;
        }
        Command::Browse { name } => {
            let Some(category) = find_browse_category(&name) else {
                bail!("Unknown cuisine or category: {} (see `larder categories`)", name);
            };
            let recipes = book.browse(&category).await;
            emit(json, &recipes, || render::recipe_list(&recipes))?;
        }
        Command::Categories => {
            for category in browse_categories() {
                println!("{:<12} {}", category.name, category.mode);
            }
        }
        Command::Show { id } => match book.resolve_detail(&id).await? {
            Some(detail) => emit(json, &detail, || render::recipe_detail(&detail))?,
            None => bail!("Recipe not found: {}", id),
        },
        Command::Add {
            title,
            ingredients,
            steps,
            time,
            servings,
            image,
        } => {
            let draft = RecipeDraft {
                title,
                ingredients: ingredients.join("\n"),
                steps: steps.join("\n"),
                time,
                servings,
                image,
            };
            let recipe = book.add_recipe(draft).await?;
            println!("Added \"{}\" ({})", recipe.title, recipe.id);
        }
        Command::Favorite { id } => {
            if identity.current_session().is_none() {
                bail!("You must be logged in to manage favorites");
            }
            match book.toggle_favorite(&id).await? {
                Some(true) => println!("Added {} to favorites", id),
                Some(false) => println!("Removed {} from favorites", id),
                None => bail!("Recipe not found: {}", id),
            }
        }
        Command::Favorites => {
            let entries = book.library().list_favorites().await?;
            emit(json, &entries, || render::favorite_list(&entries))?;
        }
    }
    Ok(())
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text());
    }
    Ok(())
}
