use crate::settings::QuerySettings;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub log_level: String,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    pub user_agent: String,
    /// Default search used when the caller does not override it.
    pub default_settings: QuerySettings,
}
