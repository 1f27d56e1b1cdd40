use std::path::PathBuf;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Only commands that open a pool need it; see
    /// [`AppConfig::require_database_url`].
    pub database_url: Option<String>,
    pub env: Environment,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    /// Optional at load time; the places client rejects a missing key when
    /// it is first constructed.
    pub google_maps_api_key: Option<String>,
    pub places_timeout_secs: u64,
    pub places_page_size: u32,
    pub audit_timeout_secs: u64,
    pub audit_followup_timeout_secs: u64,
    pub audit_user_agent: String,
    pub audit_lists_path: Option<PathBuf>,
    pub search_delay_ms: u64,
    pub search_error_delay_ms: u64,
    pub audit_delay_ms: u64,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if `DATABASE_URL` was not set.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("database_url", &self.database_url.as_ref().map(|_| "[redacted]"))
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field(
                "google_maps_api_key",
                &self.google_maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("places_timeout_secs", &self.places_timeout_secs)
            .field("places_page_size", &self.places_page_size)
            .field("audit_timeout_secs", &self.audit_timeout_secs)
            .field("audit_followup_timeout_secs", &self.audit_followup_timeout_secs)
            .field("audit_user_agent", &self.audit_user_agent)
            .field("audit_lists_path", &self.audit_lists_path)
            .field("search_delay_ms", &self.search_delay_ms)
            .field("search_error_delay_ms", &self.search_error_delay_ms)
            .field("audit_delay_ms", &self.audit_delay_ms)
            .finish()
    }
}
