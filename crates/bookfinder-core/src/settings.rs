//! Query parameters for a single book search.
//!
//! [`QuerySettings`] is passed explicitly into every fetch so no request reads
//! ambient configuration. Only `max_results` is range-checked; the ordering key
//! is forwarded to the API verbatim.

use crate::SettingsError;

/// Largest `maxResults` value the volumes endpoint accepts.
pub const MAX_RESULTS_LIMIT: u32 = 40;

/// Ordering keys documented by the volumes endpoint.
///
/// [`QuerySettings::order_by`] is a plain string; these are the values worth
/// offering as defaults.
pub struct OrderBy;

impl OrderBy {
    pub const RELEVANCE: &'static str = "relevance";
    pub const NEWEST: &'static str = "newest";
}

/// Immutable search parameters: query term, page size, ordering key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySettings {
    query: String,
    max_results: u32,
    order_by: String,
}

impl QuerySettings {
    /// Builds validated settings.
    ///
    /// # Errors
    ///
    /// - [`SettingsError::EmptyQuery`] if `query` is blank.
    /// - [`SettingsError::MaxResultsOutOfRange`] if `max_results` exceeds
    ///   [`MAX_RESULTS_LIMIT`].
    pub fn new(
        query: impl Into<String>,
        max_results: u32,
        order_by: impl Into<String>,
    ) -> Result<Self, SettingsError> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(SettingsError::EmptyQuery);
        }
        if max_results > MAX_RESULTS_LIMIT {
            return Err(SettingsError::MaxResultsOutOfRange(max_results));
        }
        Ok(Self {
            query,
            max_results,
            order_by: order_by.into(),
        })
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    #[must_use]
    pub fn order_by(&self) -> &str {
        &self.order_by
    }

    /// Returns a copy with a different query term, keeping the other settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::EmptyQuery`] if `query` is blank.
    pub fn with_query(&self, query: impl Into<String>) -> Result<Self, SettingsError> {
        Self::new(query, self.max_results, self.order_by.clone())
    }
}

/// Parses a raw `maxResults` value (as typed into a settings field) and
/// range-checks it.
///
/// # Errors
///
/// Returns [`SettingsError::MaxResultsOutOfRange`] for values above
/// [`MAX_RESULTS_LIMIT`], and [`SettingsError::InvalidMaxResults`] when the
/// text is not a non-negative integer.
pub fn parse_max_results(raw: &str) -> Result<u32, SettingsError> {
    let value = raw
        .trim()
        .parse::<u32>()
        .map_err(|_| SettingsError::InvalidMaxResults(raw.to_string()))?;
    if value > MAX_RESULTS_LIMIT {
        return Err(SettingsError::MaxResultsOutOfRange(value));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
