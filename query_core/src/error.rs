//! Error types for configuration loading, search request building and
//! repository URL parsing
//!
//! The interpreter itself never fails; everything here belongs to the layers
//! wrapped around it.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("query too short: need at least {min} characters, got {actual}")]
    QueryTooShort { min: usize, actual: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse lookup tables: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not a GitHub repository URL: {0}")]
    InvalidRepoUrl(String),

    #[error("invalid search url: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, QueryError>;
