use thiserror::Error;

/// Failures while retrieving a response body.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request URL could not be parsed or uses an unsupported scheme.
    #[error("invalid request URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Connection, timeout, or body read failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with anything other than `200 OK`.
    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}

/// Failures that abort parsing of a whole response.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected response structure: {0}")]
    Structure(String),
}

/// Failure of one fetch cycle, as delivered to the caller.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The load task was cancelled or panicked before producing a result.
    #[error("book load aborted before completing")]
    Aborted,
}

impl LoadError {
    /// Returns `true` when the book service could not be reached or answered
    /// with an error status, as opposed to returning unusable data.
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            LoadError::Fetch(FetchError::Http(_) | FetchError::UnexpectedStatus { .. })
        )
    }
}
