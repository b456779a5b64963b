mod render;
mod search;

use std::path::PathBuf;

use bookfinder_core::{AppConfig, ConfigError, QuerySettings, SettingsError};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bookfinder")]
#[command(about = "Search the Google Books catalogue from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one search and print the results
    Search {
        #[command(flatten)]
        query: QueryArgs,
        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the request URL a search would use, without sending it
    Url {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Parse a saved volumes response from disk
    Parse {
        /// Path to a JSON response body
        file: PathBuf,
        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Read search terms from stdin; each new line supersedes the previous search
    Interactive {
        #[command(flatten)]
        query: QueryArgs,
    },
}

/// Overrides for the configured default search.
#[derive(Debug, Clone, Default, Args)]
struct QueryArgs {
    /// Free-text search term
    #[arg(long, short)]
    query: Option<String>,
    /// Number of results to request (0-40)
    #[arg(long)]
    max_results: Option<u32>,
    /// Result ordering key, e.g. relevance or newest
    #[arg(long)]
    order_by: Option<String>,
}

impl QueryArgs {
    /// Merges these overrides onto `defaults` and re-validates.
    fn resolve(&self, defaults: &QuerySettings) -> Result<QuerySettings, SettingsError> {
        QuerySettings::new(
            self.query.as_deref().unwrap_or(defaults.query()),
            self.max_results.unwrap_or(defaults.max_results()),
            self.order_by.as_deref().unwrap_or(defaults.order_by()),
        )
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(bookfinder_core::load_log_level()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    run(cli.command, bookfinder_core::load_app_config).await
}

/// Dispatch a command. `load_config` is only called by commands that talk to
/// the book service.
async fn run<F>(command: Commands, load_config: F) -> anyhow::Result<()>
where
    F: FnOnce() -> Result<AppConfig, ConfigError>,
{
    match command {
        Commands::Parse { file, json } => search::run_parse(&file, json),
        Commands::Search { query, json } => {
            let config = load_config()?;
            let settings = query.resolve(&config.default_settings)?;
            search::run_search(&config, settings, json).await
        }
        Commands::Url { query } => {
            let config = load_config()?;
            let settings = query.resolve(&config.default_settings)?;
            search::run_url(&config, &settings)
        }
        Commands::Interactive { query } => {
            let config = load_config()?;
            let settings = query.resolve(&config.default_settings)?;
            search::run_interactive(&config, settings).await
        }
    }
}
