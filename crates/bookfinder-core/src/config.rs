use crate::app_config::AppConfig;
use crate::settings::{parse_max_results, QuerySettings};
use crate::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Read only the log filter directive, without validating the rest of the
/// configuration.
///
/// Loads `.env` like [`load_app_config`]. Commands that never touch the
/// network use this so a bad search setting cannot stop them from starting.
#[must_use]
pub fn load_log_level() -> String {
    dotenvy::dotenv().ok();
    log_level_from(|key| std::env::var(key))
}

fn log_level_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    lookup("BOOKFINDER_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_base_url = or_default("BOOKFINDER_API_BASE_URL", DEFAULT_API_BASE_URL);
    let log_level = log_level_from(&lookup);

    let connect_timeout_secs = parse_u64("BOOKFINDER_CONNECT_TIMEOUT_SECS", "15")?;
    let read_timeout_secs = parse_u64("BOOKFINDER_READ_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("BOOKFINDER_USER_AGENT", "bookfinder/0.1");

    let query = or_default("BOOKFINDER_QUERY", "android");
    let max_results = parse_max_results(&or_default("BOOKFINDER_MAX_RESULTS", "10")).map_err(
        |e| ConfigError::InvalidEnvVar {
            var: "BOOKFINDER_MAX_RESULTS".to_string(),
            reason: e.to_string(),
        },
    )?;
    let order_by = or_default("BOOKFINDER_ORDER_BY", "relevance");
    let default_settings = QuerySettings::new(query, max_results, order_by)?;

    Ok(AppConfig {
        api_base_url,
        log_level,
        connect_timeout_secs,
        read_timeout_secs,
        user_agent,
        default_settings,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
