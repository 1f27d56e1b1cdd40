use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_AUDIT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; SiteAuditBot/1.0; +https://example.com/bot)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = lookup("DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty());
    let env = parse_environment(&or_default("LEADSCOUT_ENV", "development"))?;
    let log_level = or_default("LEADSCOUT_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("LEADSCOUT_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("LEADSCOUT_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("LEADSCOUT_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let google_maps_api_key = lookup("GOOGLE_MAPS_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());
    let places_timeout_secs = parse_u64("LEADSCOUT_PLACES_TIMEOUT_SECS", "30")?;
    let places_page_size = parse_u32("LEADSCOUT_PLACES_PAGE_SIZE", "20")?;
    if places_page_size == 0 || places_page_size > 20 {
        return Err(ConfigError::InvalidEnvVar {
            var: "LEADSCOUT_PLACES_PAGE_SIZE".to_string(),
            reason: format!("{places_page_size} is outside 1..=20"),
        });
    }

    let audit_timeout_secs = parse_u64("LEADSCOUT_AUDIT_TIMEOUT_SECS", "10")?;
    let audit_followup_timeout_secs = parse_u64("LEADSCOUT_AUDIT_FOLLOWUP_TIMEOUT_SECS", "5")?;
    let audit_user_agent = or_default("LEADSCOUT_AUDIT_USER_AGENT", DEFAULT_AUDIT_USER_AGENT);
    let audit_lists_path = lookup("LEADSCOUT_AUDIT_LISTS_PATH").ok().map(PathBuf::from);

    let search_delay_ms = parse_u64("LEADSCOUT_SEARCH_DELAY_MS", "150")?;
    let search_error_delay_ms = parse_u64("LEADSCOUT_SEARCH_ERROR_DELAY_MS", "500")?;
    let audit_delay_ms = parse_u64("LEADSCOUT_AUDIT_DELAY_MS", "1000")?;

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        google_maps_api_key,
        places_timeout_secs,
        places_page_size,
        audit_timeout_secs,
        audit_followup_timeout_secs,
        audit_user_agent,
        audit_lists_path,
        search_delay_ms,
        search_error_delay_ms,
        audit_delay_ms,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LEADSCOUT_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
