//! Core data types for interpreter results

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operator of a `stars:` qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarOp {
    Exact,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl StarOp {
    /// Parse an operator as written by the user. `=` and no operator both mean exact.
    pub fn parse(op: &str) -> Option<Self> {
        match op {
            "" | "=" => Some(StarOp::Exact),
            ">" => Some(StarOp::Greater),
            ">=" | "=>" => Some(StarOp::GreaterOrEqual),
            "<" => Some(StarOp::Less),
            "<=" | "=<" => Some(StarOp::LessOrEqual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StarOp::Exact => "",
            StarOp::Greater => ">",
            StarOp::GreaterOrEqual => ">=",
            StarOp::Less => "<",
            StarOp::LessOrEqual => "<=",
        }
    }
}

/// Canonical `stars:<op><n>` clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarClause {
    pub op: StarOp,
    /// Digits exactly as typed, so very large values round-trip untouched
    pub count: String,
}

impl StarClause {
    pub fn new(op: StarOp, count: impl Into<String>) -> Self {
        Self {
            op,
            count: count.into(),
        }
    }

    /// The clause substituted for "popular" / "trending"
    pub fn popular() -> Self {
        Self::new(StarOp::Greater, "500")
    }
}

impl fmt::Display for StarClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stars:{}{}", self.op.as_str(), self.count)
    }
}

/// Structured GitHub repository-search query
///
/// Fragments render in a fixed order: stars, free text, languages, topics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredQuery {
    pub stars: Option<StarClause>,
    pub keywords: Vec<String>,
    pub languages: Vec<String>,
    pub topics: Vec<String>,
}

impl StructuredQuery {
    /// True when nothing usable was extracted from the input
    pub fn is_empty(&self) -> bool {
        self.stars.is_none()
            && self.keywords.is_empty()
            && self.languages.is_empty()
            && self.topics.is_empty()
    }

    /// Ordered fragments as they appear in the final query string
    pub fn fragments(&self) -> Vec<String> {
        let mut fragments = Vec::with_capacity(2 + self.languages.len() + self.topics.len());

        if let Some(stars) = &self.stars {
            fragments.push(stars.to_string());
        }
        if !self.keywords.is_empty() {
            fragments.push(self.keywords.join(" "));
        }
        fragments.extend(self.languages.iter().map(|l| format!("language:{}", l)));
        fragments.extend(self.topics.iter().map(|t| format!("topic:{}", t)));

        fragments
    }
}

impl fmt::Display for StructuredQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fragments().join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_clause_display() {
        assert_eq!(StarClause::new(StarOp::GreaterOrEqual, "100").to_string(), "stars:>=100");
        assert_eq!(StarClause::new(StarOp::Exact, "42").to_string(), "stars:42");
        assert_eq!(StarClause::popular().to_string(), "stars:>500");
    }

    #[test]
    fn test_fragment_order() {
        let query = StructuredQuery {
            stars: Some(StarClause::popular()),
            keywords: vec!["dashboard".to_string(), "charts".to_string()],
            languages: vec!["rust".to_string()],
            topics: vec!["web".to_string(), "cli".to_string()],
        };

        assert_eq!(
            query.to_string(),
            "stars:>500 dashboard charts language:rust topic:web topic:cli"
        );
    }

    #[test]
    fn test_empty_query_renders_empty() {
        let query = StructuredQuery::default();
        assert!(query.is_empty());
        assert_eq!(query.to_string(), "");
    }
}
