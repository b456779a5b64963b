//! Request URL assembly for the volumes search endpoint.

use bookfinder_core::QuerySettings;
use reqwest::Url;

use crate::error::FetchError;

/// Parses an absolute `http`/`https` URL.
///
/// # Errors
///
/// Returns [`FetchError::InvalidUrl`] if `raw` does not parse or uses any
/// other scheme.
pub fn parse_request_url(raw: &str) -> Result<Url, FetchError> {
    let url = Url::parse(raw).map_err(|e| FetchError::InvalidUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "https" | "http" => Ok(url),
        other => Err(FetchError::InvalidUrl {
            url: raw.to_owned(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

/// Builds the search URL: `base` plus `q`, `maxResults`, and `orderBy`.
///
/// Query values are percent-encoded via [`Url::query_pairs_mut`]. Any query
/// string already on `base` is kept and the search parameters are appended
/// after it. `maxResults` is not range-checked here; [`QuerySettings`] has
/// already done that.
#[must_use]
pub fn build_query_url(base: &Url, settings: &QuerySettings) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("q", settings.query())
        .append_pair("maxResults", &settings.max_results().to_string())
        .append_pair("orderBy", settings.order_by());
    url
}

#[cfg(test)]
mod tests {
    use bookfinder_core::OrderBy;

    use super::*;

    fn base() -> Url {
        parse_request_url("https://www.googleapis.com/books/v1/volumes").unwrap()
    }

    #[test]
    fn build_query_url_appends_all_three_parameters() {
        let settings = QuerySettings::new("android", 10, OrderBy::NEWEST).unwrap();
        let url = build_query_url(&base(), &settings);
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/books/v1/volumes?q=android&maxResults=10&orderBy=newest"
        );
    }

    #[test]
    fn build_query_url_encodes_query_term() {
        let settings = QuerySettings::new("rust & c++", 5, OrderBy::RELEVANCE).unwrap();
        let url = build_query_url(&base(), &settings);
        assert!(
            url.as_str().contains("q=rust+%26+c%2B%2B"),
            "query term should be percent-encoded: {url}"
        );
    }

    #[test]
    fn build_query_url_passes_order_by_verbatim() {
        let settings = QuerySettings::new("android", 0, "oldest").unwrap();
        let url = build_query_url(&base(), &settings);
        let order_by = url
            .query_pairs()
            .find(|(k, _)| k == "orderBy")
            .map(|(_, v)| v.into_owned());
        assert_eq!(order_by.as_deref(), Some("oldest"));
    }

    #[test]
    fn build_query_url_keeps_existing_query() {
        let base = parse_request_url("https://example.test/volumes?key=abc").unwrap();
        let settings = QuerySettings::new("android", 10, OrderBy::RELEVANCE).unwrap();
        let url = build_query_url(&base, &settings);
        assert_eq!(
            url.as_str(),
            "https://example.test/volumes?key=abc&q=android&maxResults=10&orderBy=relevance"
        );
    }

    #[test]
    fn parse_request_url_rejects_relative_url() {
        let err = parse_request_url("books/v1/volumes").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { ref url, .. } if url == "books/v1/volumes"));
    }

    #[test]
    fn parse_request_url_rejects_unsupported_scheme() {
        let err = parse_request_url("ftp://example.test/volumes").unwrap_err();
        assert!(
            err.to_string().contains("unsupported scheme 'ftp'"),
            "unexpected error: {err}"
        );
    }
}
