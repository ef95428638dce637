//! Shared data model, text helpers, and process configuration for the SEO
//! metadata service.

pub mod app_config;
pub mod config;
pub mod products;
pub mod text;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{
    ProductInput, SeoMetaOutput, SkuInput, DEFAULT_COUNTRY, DEFAULT_LANGUAGE,
    META_DESCRIPTION_MAX_LEN, META_TITLE_MAX_LEN,
};
pub use text::truncate;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
