//! Command handlers. Each builds a [`BooksClient`] from the loaded config and
//! drives it through a [`BookLoader`], printing whatever is delivered.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use bookfinder_client::{parse_books, BookLoader, BooksClient};
use bookfinder_core::{AppConfig, QuerySettings};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render::{print_outcome, Outcome};

fn book_loader(config: &AppConfig) -> anyhow::Result<BookLoader> {
    let client = BooksClient::from_config(config)?;
    Ok(BookLoader::new(Arc::new(client)))
}

/// Run a single search and print its results.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the service is
/// unreachable, or the response cannot be parsed.
pub(crate) async fn run_search(
    config: &AppConfig,
    settings: QuerySettings,
    json: bool,
) -> anyhow::Result<()> {
    let mut loader = book_loader(config)?;
    loader.start(settings);

    let delivery = loader
        .next_delivery()
        .await
        .context("book loader stopped before delivering results")?;
    print_outcome(Outcome::from(delivery.result), json)
}

/// Print the request URL for `settings`.
///
/// # Errors
///
/// Returns an error if the configured base URL is invalid.
pub(crate) fn run_url(config: &AppConfig, settings: &QuerySettings) -> anyhow::Result<()> {
    let client = BooksClient::from_config(config)?;
    println!("{}", client.query_url(settings));
    Ok(())
}

/// Parse a saved response file and print its results.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its JSON is malformed.
pub(crate) fn run_parse(file: &Path, json: bool) -> anyhow::Result<()> {
    let body = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let books = parse_books(&body).with_context(|| format!("failed to parse {}", file.display()))?;
    print_outcome(Outcome::from(Ok(books)), json)
}

/// Read search terms line by line; each line starts a new search that
/// supersedes any still in flight. An empty line or EOF quits.
///
/// # Errors
///
/// Returns an error if the client cannot be built or stdin cannot be read.
pub(crate) async fn run_interactive(
    config: &AppConfig,
    defaults: QuerySettings,
) -> anyhow::Result<()> {
    let mut loader = book_loader(config)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("enter a search term (empty line to quit)");
    loader.start(defaults.clone());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                let term = line.trim();
                if term.is_empty() {
                    break;
                }
                match defaults.with_query(term) {
                    Ok(settings) => {
                        let generation = loader.start(settings);
                        tracing::debug!(generation, query = term, "started search");
                    }
                    Err(e) => eprintln!("{e}"),
                }
            }
            Some(delivery) = loader.next_delivery() => {
                if let Err(e) = print_outcome(Outcome::from(delivery.result), false) {
                    eprintln!("{e:#}");
                }
            }
        }
    }

    loader.cancel();
    Ok(())
}
