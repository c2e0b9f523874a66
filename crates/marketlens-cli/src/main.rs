mod normalize;
mod search;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "marketlens")]
#[command(about = "Marketplace product search from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the upstream marketplace and show one carousel window
    Search {
        /// Query text; defaults to `MARKETLENS_DEFAULT_QUERY`
        query: Option<String>,
        /// Viewport width in pixels, used to pick cards per view
        #[arg(long, default_value_t = 1280)]
        width: u32,
        /// Carousel position, clamped to the last reachable index
        #[arg(long, default_value_t = 0)]
        index: usize,
        /// Print the window as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Normalize a saved upstream response body and print canonical products
    Normalize {
        /// Path to a JSON file in either upstream layout
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            query,
            width,
            index,
            json,
        } => {
            let config = marketlens_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            let query = query
                .map(|q| q.trim().to_owned())
                .filter(|q| !q.is_empty())
                .unwrap_or_else(|| config.default_query.clone());
            search::run_search(&config, &query, width, index, json).await?;
        }
        Commands::Normalize { path } => {
            init_tracing("warn")?;
            normalize::run_normalize(&path)?;
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays clean for piping JSON.
fn init_tracing(fallback: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
