//! Static lookup tables driving query interpretation
//!
//! Tables are plain configuration data: built once (from the built-in
//! defaults or a JSON file) and then only read. A [`QueryTables`] value is
//! `Send + Sync` and can be shared across any number of interpreters.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{QueryError, Result};
use crate::tokenize::normalize_token;

const STOP_WORDS: &[&str] = &[
    "i", "want", "to", "make", "build", "create", "develop", "an", "a", "the", "for", "with",
    "using", "based", "on", "of", "project", "app", "application", "tool", "idea",
];

const QUESTION_WORDS: &[&str] = &[
    "how", "what", "which", "can", "could", "should", "would", "is", "are", "do", "does", "did",
];

const LANGUAGES: &[&str] = &[
    "javascript", "typescript", "python", "java", "go", "rust", "c++", "c#", "php", "ruby",
    "swift", "kotlin",
];

const TOPICS: &[(&str, &[&str])] = &[
    ("cli", &["cli", "commandline", "terminal", "cmd"]),
    (
        "web",
        &["web", "frontend", "front-end", "front end", "website", "ui", "interface"],
    ),
    ("api", &["api", "rest", "graphql", "endpoint"]),
    (
        "machine-learning",
        &["machinelearning", "ml", "tensorflow", "pytorch", "scikit", "sklearn"],
    ),
    ("ai", &["ai", "gpt", "chatgpt", "openai", "llm", "bert", "transformer"]),
    (
        "mobile",
        &["mobile", "android", "ios", "kotlin", "swift", "reactnative", "flutter"],
    ),
    (
        "backend",
        &["backend", "server", "express", "node", "api", "django", "rails", "springboot"],
    ),
    (
        "security",
        &["security", "auth", "authentication", "jwt", "oauth", "encryption"],
    ),
    (
        "devops",
        &["devops", "docker", "kubernetes", "ci", "cd", "infrastructure", "ansible", "terraform"],
    ),
    (
        "database",
        &["database", "sql", "nosql", "postgres", "mysql", "mongodb", "redis", "sqlite"],
    ),
];

const SYNONYMS: &[(&str, &str)] = &[
    ("react", "web"),
    ("vue", "web"),
    ("angular", "web"),
    ("svelte", "web"),
    ("reactnative", "mobile"),
    ("flask", "backend"),
    ("django", "backend"),
    ("node", "backend"),
    ("express", "backend"),
    ("fastapi", "backend"),
    ("mongodb", "database"),
    ("postgres", "database"),
    ("mysql", "database"),
    ("tensorflow", "machine-learning"),
    ("pytorch", "machine-learning"),
    ("langchain", "ai"),
    ("huggingface", "ai"),
];

/// A topic and the keywords that trigger it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicEntry {
    pub name: String,
    pub keywords: Vec<String>,
}

/// On-disk form of the tables. Every field is optional and falls back to the
/// built-in table of the same name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TablesFile {
    pub stop_words: Vec<String>,
    pub question_words: Vec<String>,
    pub languages: Vec<String>,
    /// Ordered: earlier topics win fuzzy ties
    pub topics: Vec<TopicEntry>,
    pub synonyms: BTreeMap<String, String>,
}

impl Default for TablesFile {
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();

        Self {
            stop_words: owned(STOP_WORDS),
            question_words: owned(QUESTION_WORDS),
            languages: owned(LANGUAGES),
            topics: TOPICS
                .iter()
                .map(|(name, keywords)| TopicEntry {
                    name: name.to_string(),
                    keywords: owned(keywords),
                })
                .collect(),
            synonyms: SYNONYMS
                .iter()
                .map(|(word, topic)| (word.to_string(), topic.to_string()))
                .collect(),
        }
    }
}

/// Lookup tables in the form the interpreter queries them
#[derive(Debug, Clone)]
pub struct QueryTables {
    stop_words: AHashSet<String>,
    question_words: AHashSet<String>,
    languages: Vec<String>,
    topic_names: AHashSet<String>,
    /// Flattened (normalized keyword, topic) pairs in table order
    topic_keywords: Vec<(String, String)>,
    synonyms: AHashMap<String, String>,
    /// Words that must never show up as free text
    known_words: AHashSet<String>,
}

impl Default for QueryTables {
    fn default() -> Self {
        Self::from_file(TablesFile::default())
    }
}

impl QueryTables {
    pub fn from_file(file: TablesFile) -> Self {
        let lower_set = |words: Vec<String>| -> AHashSet<String> {
            words.into_iter().map(|w| w.to_lowercase()).collect()
        };

        let languages: Vec<String> = file
            .languages
            .iter()
            .map(|l| normalize_token(l))
            .filter(|l| !l.is_empty())
            .collect();

        let topic_names: AHashSet<String> = file.topics.iter().map(|t| t.name.clone()).collect();

        let topic_keywords: Vec<(String, String)> = file
            .topics
            .iter()
            .flat_map(|topic| {
                topic
                    .keywords
                    .iter()
                    .map(|k| (normalize_token(k), topic.name.clone()))
            })
            .filter(|(keyword, _)| !keyword.is_empty())
            .collect();

        let synonyms: AHashMap<String, String> = file
            .synonyms
            .into_iter()
            .map(|(word, topic)| (normalize_token(&word), topic))
            .collect();

        let mut known_words: AHashSet<String> = languages.iter().cloned().collect();
        known_words.extend(synonyms.keys().cloned());
        known_words.extend(synonyms.values().map(|t| normalize_token(t)));
        known_words.extend(topic_keywords.iter().map(|(k, _)| k.clone()));

        debug!(
            languages = languages.len(),
            topics = topic_names.len(),
            keywords = topic_keywords.len(),
            synonyms = synonyms.len(),
            "lookup tables built"
        );

        Self {
            stop_words: lower_set(file.stop_words),
            question_words: lower_set(file.question_words),
            languages,
            topic_names,
            topic_keywords,
            synonyms,
            known_words,
        }
    }

    /// Parse tables from JSON; missing tables keep their built-in contents
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: TablesFile = serde_json::from_str(json)?;
        Ok(Self::from_file(file))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| QueryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading lookup tables");
        Self::from_json_str(&json)
    }

    pub fn is_filler(&self, token: &str) -> bool {
        self.stop_words.contains(token) || self.question_words.contains(token)
    }

    /// Exact language lookup, returning the canonical table entry
    pub fn language(&self, token: &str) -> Option<&str> {
        self.languages
            .iter()
            .find(|l| l.as_str() == token)
            .map(String::as_str)
    }

    /// Topic implied by a synonym, only if that topic exists in the topic table
    pub fn synonym_topic(&self, token: &str) -> Option<&str> {
        self.synonyms
            .get(token)
            .filter(|topic| self.topic_names.contains(topic.as_str()))
            .map(String::as_str)
    }

    pub fn topic_keywords(&self) -> impl Iterator<Item = (&str, &str)> {
        self.topic_keywords
            .iter()
            .map(|(keyword, topic)| (keyword.as_str(), topic.as_str()))
    }

    pub fn is_known_word(&self, token: &str) -> bool {
        self.known_words.contains(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookups() {
        let tables = QueryTables::default();
        assert_eq!(tables.language("rust"), Some("rust"));
        assert_eq!(tables.language("c++"), Some("c++"));
        assert_eq!(tables.language("rusty"), None);
        assert_eq!(tables.synonym_topic("react"), Some("web"));
        assert!(tables.is_filler("the"));
        assert!(tables.is_filler("how"));
        assert!(!tables.is_filler("dashboard"));
    }

    #[test]
    fn test_multiword_keywords_are_normalized() {
        let tables = QueryTables::default();
        let front: Vec<_> = tables
            .topic_keywords()
            .filter(|(k, _)| *k == "frontend")
            .collect();
        assert_eq!(front.len(), 3);
        assert!(front.iter().all(|(_, topic)| *topic == "web"));
    }

    #[test]
    fn test_known_words_cover_all_tables() {
        let tables = QueryTables::default();
        for word in ["python", "react", "web", "machinelearning", "docker"] {
            assert!(tables.is_known_word(word), "{} should be known", word);
        }
        assert!(!tables.is_known_word("dashboard"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tables = QueryTables::from_json_str(r#"{"languages": ["Zig", "rust"]}"#).unwrap();
        assert_eq!(tables.language("zig"), Some("zig"));
        assert_eq!(tables.language("python"), None);
        // untouched tables stay built-in
        assert_eq!(tables.synonym_topic("vue"), Some("web"));
    }

    #[test]
    fn test_synonym_to_unknown_topic_is_ignored() {
        let tables = QueryTables::from_json_str(
            r#"{"topics": [{"name": "games", "keywords": ["game"]}], "synonyms": {"unity": "games", "vue": "web"}}"#,
        )
        .unwrap();
        assert_eq!(tables.synonym_topic("unity"), Some("games"));
        assert_eq!(tables.synonym_topic("vue"), None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = QueryTables::from_json_str(r#"{"colours": []}"#).unwrap_err();
        assert!(matches!(err, QueryError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = QueryTables::from_path("/nonexistent/tables.json").unwrap_err();
        assert!(matches!(err, QueryError::Io { .. }));
    }
}
