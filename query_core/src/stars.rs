//! Star / popularity qualifier extraction

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::types::{StarClause, StarOp};

// Patterns are constant, compiling them can only fail on a typo here
static STAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bstars?\b\s*:?\s*(>=|<=|=>|=<|>|<|=)?\s*(\d+)").expect("Invalid regex pattern")
});

// A "stars" qualifier too garbled to parse, e.g. "stars:>>5"
static MALFORMED_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bstars?\s*[:<>=][\s:<>=]*\d*").expect("Invalid regex pattern")
});

static POPULARITY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(popular|trending)\b").expect("Invalid regex pattern"));

/// Outcome of scanning a query for star qualifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarExtraction {
    pub clause: Option<StarClause>,
    /// Input with every star qualifier (parsed or garbled) and, when a clause
    /// was emitted, every popularity word cut out, so none of it leaks into
    /// free-text keywords
    pub remainder: String,
}

/// Find the star qualifier in normalized (lowercased, trimmed) text
///
/// The first explicit `stars` qualifier wins; later ones are dropped. Without
/// one, "popular" or "trending" stands in for `stars:>500`.
pub fn extract_stars(text: &str) -> StarExtraction {
    let explicit = STAR_PATTERN.captures(text).and_then(|cap| {
        let op = cap.get(1).map(|m| m.as_str()).unwrap_or("");
        let count = cap.get(2)?.as_str();
        StarOp::parse(op).map(|op| StarClause::new(op, count))
    });

    let clause = match explicit {
        Some(clause) => {
            trace!(clause = %clause, "explicit star qualifier");
            Some(clause)
        }
        None if POPULARITY_PATTERN.is_match(text) => {
            trace!("popularity word, using default star qualifier");
            Some(StarClause::popular())
        }
        None => None,
    };

    let remainder = STAR_PATTERN.replace_all(text, " ");
    let remainder = MALFORMED_PATTERN.replace_all(&remainder, " ");
    let remainder = if clause.is_some() {
        POPULARITY_PATTERN.replace_all(&remainder, " ").into_owned()
    } else {
        remainder.into_owned()
    };

    StarExtraction { clause, remainder }
}
