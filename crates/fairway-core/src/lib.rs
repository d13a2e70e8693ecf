//! Shared configuration and domain types for the fairway offer pipeline.

use thiserror::Error;

pub mod app_config;
pub mod category;
pub mod config;
pub mod product;
pub mod queries;

pub use app_config::{AppConfig, Environment};
pub use category::{classify, Category};
pub use config::{load_app_config, load_app_config_from_env};
pub use product::{GroupedProduct, Offer};
pub use queries::{load_queries, QueriesFile};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read queries file {path}: {source}")]
    QueriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse queries file: {0}")]
    QueriesFileParse(#[from] serde_yaml::Error),

    #[error("configuration validation failed: {0}")]
    Validation(String),
}
