//! HTTP client for the volumes search endpoint.
//!
//! Wraps `reqwest` with fixed connect/read timeouts and a single GET per call.
//! There is no retry: every failure ends the fetch cycle and is logged here
//! before being returned to the caller.

use std::time::Duration;

use bookfinder_core::{AppConfig, BookRecord, QuerySettings, DEFAULT_API_BASE_URL};
use reqwest::{Client, StatusCode, Url};

use crate::error::{FetchError, LoadError};
use crate::parse::parse_books;
use crate::query::{build_query_url, parse_request_url};

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_READ_TIMEOUT_SECS: u64 = 10;
const DEFAULT_USER_AGENT: &str = "bookfinder/0.1";

/// Client for the book search API.
///
/// Use [`BooksClient::new`] for production defaults,
/// [`BooksClient::from_config`] to honour env-driven settings, or
/// [`BooksClient::with_base_url`] to point at a mock server in tests.
#[derive(Debug)]
pub struct BooksClient {
    client: Client,
    base_url: Url,
}

impl BooksClient {
    /// Creates a client pointed at the public volumes endpoint with a 15 s
    /// connect timeout and a 10 s read timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(
            DEFAULT_API_BASE_URL,
            DEFAULT_CONNECT_TIMEOUT_SECS,
            DEFAULT_READ_TIMEOUT_SECS,
            DEFAULT_USER_AGENT,
        )
    }

    /// Creates a client from loaded application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`BooksClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FetchError> {
        Self::with_base_url(
            &config.api_base_url,
            config.connect_timeout_secs,
            config.read_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with a custom search endpoint and timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if `base_url` is not an absolute
    /// `http`/`https` URL, or [`FetchError::Http`] if the `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        base_url: &str,
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        let base_url = parse_request_url(base_url)?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .read_timeout(Duration::from_secs(read_timeout_secs))
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the search URL for `settings` against this client's endpoint.
    #[must_use]
    pub fn query_url(&self, settings: &QuerySettings) -> Url {
        build_query_url(&self.base_url, settings)
    }

    /// Performs one GET and returns the whole body as text.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidUrl`] if `url` is malformed; no request is made.
    /// - [`FetchError::UnexpectedStatus`] for any status other than 200.
    /// - [`FetchError::Http`] on connection, timeout, or body read failure.
    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let url = parse_request_url(url)
            .inspect_err(|e| tracing::error!(error = %e, "problem building the request URL"))?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .inspect_err(|e| tracing::error!(url = %url, error = %e, "book request failed"))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!(url = %url, status = status.as_u16(), "error response code");
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.inspect_err(
            |e| tracing::error!(url = %url, error = %e, "problem reading the book response body"),
        )?;
        tracing::debug!(url = %url, bytes = body.len(), "fetched book response");
        Ok(body)
    }

    /// Fetches `url` and parses the body into book records.
    ///
    /// `Ok(None)` means the server returned an empty body. The parser is
    /// never invoked when the fetch fails.
    ///
    /// # Errors
    ///
    /// - [`LoadError::Fetch`] for any [`FetchError`].
    /// - [`LoadError::Parse`] if the body is malformed JSON or has an
    ///   unexpected top-level structure.
    pub async fn fetch_books(&self, url: &str) -> Result<Option<Vec<BookRecord>>, LoadError> {
        let body = self.fetch_text(url).await?;
        let books = parse_books(&body)
            .inspect_err(|e| tracing::error!(error = %e, "problem parsing the book JSON results"))?;
        if let Some(books) = &books {
            tracing::info!(count = books.len(), "parsed book results");
        }
        Ok(books)
    }

    /// Runs one search: builds the URL from `settings`, fetches, and parses.
    ///
    /// # Errors
    ///
    /// Same as [`BooksClient::fetch_books`].
    pub async fn search(
        &self,
        settings: &QuerySettings,
    ) -> Result<Option<Vec<BookRecord>>, LoadError> {
        let url = self.query_url(settings);
        tracing::info!(
            query = settings.query(),
            max_results = settings.max_results(),
            order_by = settings.order_by(),
            "searching books"
        );
        self.fetch_books(url.as_str()).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
