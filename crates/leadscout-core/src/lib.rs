pub mod app_config;
pub mod audit;
pub mod audit_lists;
pub mod config;
pub mod places;
pub mod populate;
pub mod scoring;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use audit::ScrapeResult;
pub use audit_lists::{load_audit_lists, AuditLists};
pub use config::{load_app_config, load_app_config_from_env};
pub use places::{BusinessStatus, LocationBias, Place, PriceLevel};
pub use populate::{
    load_populate_plan, parse_populate_plan, City, CitySelection, PopulatePlan, PopulateQuery,
    StateFilter,
};
pub use scoring::{get_top_leads, score_leads, score_place, ScoredLead, DEFAULT_MIN_SCORE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read config file {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    FileParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config validation failed: {0}")]
    Validation(String),
}
