//! Configuration for the interpreter and the search request layer
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file
//! at all) gives the stock Git2Prompt behavior.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{QueryError, Result};
use crate::tables::QueryTables;

/// GitHub caps `per_page` at 100
const MAX_PER_PAGE: u32 = 100;
/// Fuzzy matching never applies to tokens of 3 characters or fewer
const FUZZY_FLOOR: usize = 4;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    #[serde(default)]
    pub interpreter: InterpreterConfig,
    #[serde(default)]
    pub search: SearchConfig,
    /// JSON file replacing the built-in lookup tables
    #[serde(default)]
    pub tables: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterpreterConfig {
    /// Residual free-text keywords kept in the query (default: 2)
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,

    /// Tolerate one-character typos in topic keywords (default: true)
    #[serde(default = "default_true")]
    pub fuzzy_topics: bool,

    /// Shorter tokens are discarded before matching (default: 3)
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,

    /// Token and keyword must both be this long to fuzzy match (default: 5)
    #[serde(default = "default_fuzzy_min_len")]
    pub fuzzy_min_len: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_keywords: default_max_keywords(),
            fuzzy_topics: true,
            min_token_len: default_min_token_len(),
            fuzzy_min_len: default_fuzzy_min_len(),
        }
    }
}

/// What to search for when the interpreter extracts nothing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Send the trimmed user input as a literal query
    #[default]
    Raw,
    /// Send the trending query (`stars:>500`)
    Trending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Trimmed queries shorter than this are rejected (default: 3)
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    #[serde(default)]
    pub fallback: FallbackPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            per_page: default_per_page(),
            min_query_len: default_min_query_len(),
            fallback: FallbackPolicy::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_keywords() -> usize {
    2
}

fn default_min_token_len() -> usize {
    3
}

fn default_fuzzy_min_len() -> usize {
    5
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_per_page() -> u32 {
    6
}

fn default_min_query_len() -> usize {
    3
}

impl QueryConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: QueryConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading config");
        let content = fs::read_to_string(path).map_err(|source| QueryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;

        // relative table paths are resolved against the config file
        if let Some(tables) = config.tables.as_mut() {
            if tables.is_relative() {
                if let Some(dir) = path.parent() {
                    *tables = dir.join(&*tables);
                }
            }
        }

        Ok(config)
    }

    /// The configured lookup tables, or the built-in ones
    pub fn load_tables(&self) -> Result<QueryTables> {
        match &self.tables {
            Some(path) => QueryTables::from_path(path),
            None => Ok(QueryTables::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let interpreter = &self.interpreter;
        if interpreter.max_keywords == 0 {
            return Err(QueryError::InvalidConfig(
                "interpreter.max_keywords must be at least 1".to_string(),
            ));
        }
        if interpreter.min_token_len == 0 {
            return Err(QueryError::InvalidConfig(
                "interpreter.min_token_len must be at least 1".to_string(),
            ));
        }
        if interpreter.fuzzy_min_len < FUZZY_FLOOR {
            return Err(QueryError::InvalidConfig(format!(
                "interpreter.fuzzy_min_len must be at least {}",
                FUZZY_FLOOR
            )));
        }

        let search = &self.search;
        if search.per_page == 0 || search.per_page > MAX_PER_PAGE {
            return Err(QueryError::InvalidConfig(format!(
                "search.per_page must be between 1 and {}",
                MAX_PER_PAGE
            )));
        }
        if search.min_query_len == 0 {
            return Err(QueryError::InvalidConfig(
                "search.min_query_len must be at least 1".to_string(),
            ));
        }
        url::Url::parse(&search.api_base)?;

        Ok(())
    }
}
