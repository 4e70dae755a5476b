mod render;

use anyhow::Context;
use clap::{Parser, Subcommand};
use gamescout_core::SearchMode;
use gamescout_scanner::{check_game_prices, GeminiClient, ScanError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "gamescout")]
#[command(about = "Find current PC game prices and free keys across major storefronts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare current prices for a title across the major storefronts
    Prices {
        /// Game, edition, or DLC name to look up
        title: String,
        /// Print the result as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Hunt for active giveaways and 100%-off keys
    Free {
        /// Limit the hunt to one title; omit for trending free games
        title: Option<String>,
        /// Print the result as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List quick-search titles
    Trending,
}

/// One scan the user asked for.
#[derive(Debug, PartialEq, Eq)]
struct ScanRequest {
    title: String,
    mode: SearchMode,
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match scan_request(cli.command)? {
        Some(request) => run_scan(&request).await,
        None => {
            print!("{}", render::render_trending());
            Ok(())
        }
    }
}

/// Map a parsed command onto the scan it requests, or `None` for commands
/// that need no scan.
///
/// # Errors
///
/// Returns an error if a price check is given a blank title. This runs
/// before any configuration is loaded.
fn scan_request(command: Commands) -> anyhow::Result<Option<ScanRequest>> {
    match command {
        Commands::Prices { title, json } => {
            if title.trim().is_empty() {
                anyhow::bail!("a game title is required for a price check");
            }
            Ok(Some(ScanRequest {
                title,
                mode: SearchMode::PriceCheck,
                json,
            }))
        }
        Commands::Free { title, json } => Ok(Some(ScanRequest {
            title: title.unwrap_or_default(),
            mode: SearchMode::FreeKeys,
            json,
        })),
        Commands::Trending => Ok(None),
    }
}

/// Load config, run one scan, and print the result.
///
/// # Errors
///
/// Returns an error if configuration is missing or invalid, or if the model
/// call fails. Scan failures carry the user-facing message only; the
/// underlying cause is logged.
async fn run_scan(request: &ScanRequest) -> anyhow::Result<()> {
    let ScanRequest { title, mode, json } = request;
    let config = gamescout_core::load_app_config()
        .context("failed to load configuration; set GEMINI_API_KEY in your environment or .env file")?;
    init_tracing(&config.log_level)?;

    let client = GeminiClient::from_config(&config).map_err(scan_failure)?;
    let result = check_game_prices(&client, title, *mode)
        .await
        .map_err(scan_failure)?;

    if *json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!(
            "{}",
            render::render_result(&mode.display_title(title), &result)
        );
    }

    Ok(())
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn scan_failure(err: ScanError) -> anyhow::Error {
    tracing::error!(error = %err, configuration = err.is_configuration(), "scan failed");
    anyhow::anyhow!(err.user_message())
}
