mod inputs;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pantry_core::{
    create_provider, generate_meal_plan, parse_meal_plan, render_prompt, ErrorMessages,
    GeminiConfig, MealPlan, PlanError,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pantry")]
#[command(about = "Turn a pantry inventory into an AI-generated meal plan", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the prompt that would be sent to the model
    Prompt {
        /// JSON file with pantry items and preferences
        #[arg(long)]
        params: PathBuf,
    },
    /// Generate a meal plan with Gemini (reads GEMINI_API_KEY)
    Generate {
        /// JSON file with pantry items and preferences
        #[arg(long)]
        params: PathBuf,
        /// JSON file with localized error messages (default: built-in table for
        /// the params language)
        #[arg(long)]
        messages: Option<PathBuf>,
        /// Model name (overrides PANTRY_AI_MODEL)
        #[arg(long)]
        model: Option<String>,
        /// Use the offline fake provider (same as PANTRY_AI_PROVIDER=fake)
        #[arg(long)]
        fake: bool,
        /// Print only the deduplicated shopping list
        #[arg(long)]
        shopping_list: bool,
    },
    /// Parse a model response pasted from elsewhere (file or stdin)
    Parse {
        /// File with the raw response; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
        /// JSON file with localized error messages
        #[arg(long)]
        messages: Option<PathBuf>,
        /// Language for the built-in message table when --messages is not given
        #[arg(long, default_value = "English")]
        language: String,
        /// Print only the deduplicated shopping list
        #[arg(long)]
        shopping_list: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Prompt { params } => {
            let params = inputs::load_params(&params)?;
            println!("{}", render_prompt(&params));
        }
        Commands::Generate {
            params,
            messages,
            model,
            fake,
            shopping_list,
        } => {
            let params = inputs::load_params(&params)?;
            let messages = inputs::load_messages(messages.as_deref(), &params.language)?;

            let provider_name = if fake {
                "fake".to_string()
            } else {
                std::env::var("PANTRY_AI_PROVIDER").unwrap_or_else(|_| "gemini".to_string())
            };
            let mut config = GeminiConfig::from_env();
            if let Some(model) = model {
                config = config.with_model(model);
            }
            let provider = create_provider(&provider_name, config)?;

            let result = generate_meal_plan(provider.as_ref(), &params).await;
            print_result(result, &messages, shopping_list)?;
        }
        Commands::Parse {
            input,
            messages,
            language,
            shopping_list,
        } => {
            let raw = inputs::read_raw_response(input.as_deref()).await?;
            let messages = inputs::load_messages(messages.as_deref(), &language)?;
            print_result(parse_meal_plan(&raw), &messages, shopping_list)?;
        }
    }

    Ok(())
}

/// Print the plan as JSON, or fail with the localized message.
fn print_result(
    result: Result<MealPlan, PlanError>,
    messages: &ErrorMessages,
    shopping_list: bool,
) -> Result<()> {
    let plan = match result {
        Ok(plan) => plan,
        Err(e) => {
            tracing::debug!(error = %e, kind = ?e.kind(), "Meal plan failed");
            anyhow::bail!(e.user_message(messages));
        }
    };

    let output = if shopping_list {
        serde_json::to_string_pretty(&plan.shopping_list_deduplicated())?
    } else {
        serde_json::to_string_pretty(&plan)?
    };
    println!("{}", output);

    Ok(())
}
