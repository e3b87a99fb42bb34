use std::sync::Arc;

use clap::{Parser, Subcommand};
use fodmap_chef::client::types::{Difficulty, RecipeGenerationRequest, RegisterRequest};
use fodmap_chef::{ClientConfig, FileStorage, FodmapChefClient, TokenStore};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fodmap-chef")]
#[command(about = "Command-line client for the FODMAP Chef backend")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session token
    Login { email: String, password: String },
    /// Create an account
    Register {
        username: String,
        email: String,
        password: String,
    },
    /// Sign out and forget the session token
    Logout,
    /// Show the signed in profile, if any
    Status,
    /// Show the dietary profile
    Profile,
    /// List recipes
    Recipes,
    /// Show one recipe
    Recipe { id: i64 },
    /// Generate a recipe with the AI assistant
    Generate {
        /// Maximum preparation time in minutes
        #[arg(long)]
        max_prep_time: Option<u32>,
        /// easy, medium or hard
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// Ingredient to build the recipe around (repeatable)
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,
    },
    /// List ingredients, or search them when a query is given
    Ingredients { query: Option<String> },
    /// List shopping lists
    ShoppingLists,
    /// Create a shopping list from a recipe
    Shop { recipe_id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env()?;
    tracing::debug!("Using backend {} and token file {}", config.base_url, config.token_file.display());

    let tokens = TokenStore::new(Arc::new(FileStorage::new(&config.token_file)));
    let client = FodmapChefClient::new(config, tokens)?;

    if let Err(e) = run(&client, cli.command).await {
        tracing::error!("Command failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run(client: &FodmapChefClient, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Login { email, password } => print_json(&client.login(&email, &password).await?),
        Commands::Register {
            username,
            email,
            password,
        } => {
            let request = RegisterRequest::new(username, email, password);
            print_json(&client.register(&request).await?)
        }
        Commands::Logout => {
            // Local session is gone either way; report the backend's answer.
            client.logout().await?;
            println!("logged out");
            Ok(())
        }
        Commands::Status => {
            match client.restore_session().await? {
                Some(profile) => print_json(&profile)?,
                None => println!("not signed in"),
            }
            Ok(())
        }
        Commands::Profile => print_json(&client.get_user_profile().await?),
        Commands::Recipes => print_json(&client.list_recipes().await?),
        Commands::Recipe { id } => print_json(&client.get_recipe(id).await?),
        Commands::Generate {
            max_prep_time,
            difficulty,
            ingredients,
        } => {
            let request = RecipeGenerationRequest {
                ingredients: (!ingredients.is_empty()).then_some(ingredients),
                max_prep_time,
                difficulty,
                ..Default::default()
            };
            print_json(&client.generate_recipe(&request).await?)
        }
        Commands::Ingredients { query: None } => print_json(&client.list_ingredients().await?),
        Commands::Ingredients { query: Some(query) } => print_json(&client.search_ingredients(&query).await?),
        Commands::ShoppingLists => print_json(&client.list_shopping_lists().await?),
        Commands::Shop { recipe_id } => print_json(&client.create_shopping_list_from_recipe(recipe_id).await?),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_arguments() {
        let cli = Cli::try_parse_from([
            "fodmap-chef",
            "generate",
            "--max-prep-time",
            "30",
            "--difficulty",
            "easy",
            "--ingredient",
            "rice",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate {
                max_prep_time,
                difficulty,
                ingredients,
            } => {
                assert_eq!(max_prep_time, Some(30));
                assert_eq!(difficulty, Some(Difficulty::Easy));
                assert_eq!(ingredients, vec!["rice".to_string()]);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_rejects_non_numeric_recipe_id() {
        assert!(Cli::try_parse_from(["fodmap-chef", "recipe", "abc"]).is_err());
        assert!(Cli::try_parse_from(["fodmap-chef", "generate", "--difficulty", "extreme"]).is_err());
    }
}
