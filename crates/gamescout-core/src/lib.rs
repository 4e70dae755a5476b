//! Shared domain types and configuration for Game Scout.

pub mod app_config;
pub mod config;
pub mod deals;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use deals::{
    is_zero_cost, Deal, GroundingReference, ScanResult, SearchMode, GLOBAL_FREE_KEYS_TITLE,
    MEGA_SALE_THRESHOLD, TRENDING_TITLES,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
