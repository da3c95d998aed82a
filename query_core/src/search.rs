//! GitHub repository-search request building

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::config::{FallbackPolicy, SearchConfig};
use crate::error::{QueryError, Result};
use crate::interpreter::QueryInterpreter;
use crate::types::StarClause;

const SEARCH_PATH: &str = "search/repositories";

/// A repository search ready to be sent to the GitHub API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub original_query: String,
    pub converted_query: String,
    /// True when the interpreter found nothing and the fallback policy applied
    pub fell_back: bool,
    pub per_page: u32,
}

impl SearchRequest {
    /// Interpret a natural-language query, applying the fallback policy when
    /// nothing usable comes out of it
    pub fn from_user_query(
        input: &str,
        interpreter: &QueryInterpreter,
        config: &SearchConfig,
    ) -> Result<Self> {
        let trimmed = validate(input, config)?;

        let converted = interpreter.convert(trimmed);
        let (converted_query, fell_back) = if converted.is_empty() {
            let fallback = match config.fallback {
                FallbackPolicy::Raw => trimmed.to_string(),
                FallbackPolicy::Trending => StarClause::popular().to_string(),
            };
            warn!(
                input = %trimmed,
                policy = ?config.fallback,
                fallback = %fallback,
                "no search signal extracted, falling back"
            );
            (fallback, true)
        } else {
            (converted, false)
        };

        debug!(original = %input, converted = %converted_query, "search request");

        Ok(Self {
            original_query: input.to_string(),
            converted_query,
            fell_back,
            per_page: config.per_page,
        })
    }

    /// Pass an already formatted query (e.g. from a category spin) through
    /// untouched apart from trimming
    pub fn from_spin_text(input: &str, config: &SearchConfig) -> Result<Self> {
        let trimmed = validate(input, config)?;

        Ok(Self {
            original_query: input.to_string(),
            converted_query: trimmed.to_string(),
            fell_back: false,
            per_page: config.per_page,
        })
    }

    /// Full search URL, sorted by stars descending
    pub fn url(&self, api_base: &str) -> Result<Url> {
        let mut base = Url::parse(api_base)?;
        // keep any path prefix (GitHub Enterprise serves the API under /api/v3)
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let mut url = base.join(SEARCH_PATH)?;
        url.query_pairs_mut()
            .append_pair("q", &self.converted_query)
            .append_pair("sort", "stars")
            .append_pair("order", "desc")
            .append_pair("per_page", &self.per_page.to_string());
        Ok(url)
    }
}

fn validate<'a>(input: &'a str, config: &SearchConfig) -> Result<&'a str> {
    let trimmed = input.trim();
    let actual = trimmed.chars().count();
    if actual < config.min_query_len {
        return Err(QueryError::QueryTooShort {
            min: config.min_query_len,
            actual,
        });
    }
    Ok(trimmed)
}
