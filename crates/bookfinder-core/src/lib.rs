pub mod app_config;
pub mod books;
pub mod config;
pub mod settings;

pub use app_config::AppConfig;
pub use books::{BookRecord, NOT_FOR_SALE, UNKNOWN_AUTHOR};
pub use config::{load_app_config, load_app_config_from_env, load_log_level, DEFAULT_API_BASE_URL};
pub use settings::{parse_max_results, OrderBy, QuerySettings, MAX_RESULTS_LIMIT};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("invalid query settings: {0}")]
    Settings(#[from] SettingsError),
}

/// Validation failures for a [`QuerySettings`] value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("search query must be non-empty")]
    EmptyQuery,

    #[error("max results must be between 0 and 40, got {0}")]
    MaxResultsOutOfRange(u32),

    #[error("max results must be a whole number, got \"{0}\"")]
    InvalidMaxResults(String),
}
