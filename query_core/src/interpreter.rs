//! Query interpreter - natural language to GitHub repository search query
//!
//! Stages run in a fixed order: normalize, star extraction, phrase
//! tokenization, filler filtering, synonym/language/topic detection, residual
//! keyword selection, assembly. Nothing here can fail; an input with no
//! usable signal yields an empty [`StructuredQuery`].

use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::config::InterpreterConfig;
use crate::similarity::within_distance;
use crate::stars::extract_stars;
use crate::tables::QueryTables;
use crate::tokenize::{extract_tokens, LexiconTagger, PhraseTagger};
use crate::types::StructuredQuery;

/// Maximum edit distance for tolerant topic keyword matching
pub const FUZZY_MAX_DISTANCE: usize = 1;

static DEFAULT_INTERPRETER: Lazy<QueryInterpreter> = Lazy::new(QueryInterpreter::default);

/// Convert free text into a GitHub search query using the built-in tables
pub fn convert_to_search_query(input: &str) -> String {
    DEFAULT_INTERPRETER.convert(input)
}

/// Stateless converter; tables, tagger and config are fixed at construction
#[derive(Clone)]
pub struct QueryInterpreter {
    tables: Arc<QueryTables>,
    tagger: Arc<dyn PhraseTagger>,
    config: InterpreterConfig,
}

impl Default for QueryInterpreter {
    fn default() -> Self {
        Self::new(QueryTables::default(), InterpreterConfig::default())
    }
}

impl std::fmt::Debug for QueryInterpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryInterpreter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl QueryInterpreter {
    pub fn new(tables: QueryTables, config: InterpreterConfig) -> Self {
        Self::with_tagger(tables, config, LexiconTagger::new())
    }

    /// Use a different phrase tagger (e.g. a real part-of-speech model)
    pub fn with_tagger(
        tables: QueryTables,
        config: InterpreterConfig,
        tagger: impl PhraseTagger + 'static,
    ) -> Self {
        Self {
            tables: Arc::new(tables),
            tagger: Arc::new(tagger),
            config,
        }
    }

    pub fn tables(&self) -> &QueryTables {
        &self.tables
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Render the structured query as a search string
    pub fn convert(&self, input: &str) -> String {
        self.interpret(input).to_string()
    }

    pub fn interpret(&self, input: &str) -> StructuredQuery {
        let normalized = input.trim().to_lowercase();

        let stars = extract_stars(&normalized);

        let tokens: Vec<String> = extract_tokens(self.tagger.as_ref(), &stars.remainder)
            .into_iter()
            .filter(|t| !self.tables.is_filler(t))
            .filter(|t| t.chars().count() >= self.config.min_token_len)
            .collect();
        trace!(?tokens, "surviving tokens");

        let mut topics: Vec<String> = Vec::new();
        let mut languages: Vec<String> = Vec::new();
        // tokens consumed by a fuzzy topic match, kept out of the free text
        let mut fuzzy_consumed: Vec<&str> = Vec::new();

        for token in &tokens {
            if let Some(topic) = self.tables.synonym_topic(token) {
                push_unique(&mut topics, topic);
            }
        }

        for token in &tokens {
            if let Some(language) = self.tables.language(token) {
                push_unique(&mut languages, language);
            }
        }

        for token in &tokens {
            match self.match_topic(token) {
                Some((topic, false)) => push_unique(&mut topics, topic),
                Some((topic, true)) => {
                    trace!(token = %token, topic, "fuzzy topic match");
                    push_unique(&mut topics, topic);
                    fuzzy_consumed.push(token.as_str());
                }
                None => {}
            }
        }

        let keywords: Vec<String> = tokens
            .iter()
            .filter(|t| !self.tables.is_known_word(t))
            .filter(|t| !fuzzy_consumed.contains(&t.as_str()))
            .take(self.config.max_keywords)
            .cloned()
            .collect();

        let query = StructuredQuery {
            stars: stars.clause,
            keywords,
            languages,
            topics,
        };

        debug!(input = %input, query = %query, "interpreted query");
        query
    }

    /// Topic for a token; the flag is true when only the fuzzy fallback matched
    fn match_topic(&self, token: &str) -> Option<(&str, bool)> {
        if let Some((_, topic)) = self.tables.topic_keywords().find(|(k, _)| *k == token) {
            return Some((topic, false));
        }

        if !self.config.fuzzy_topics || token.chars().count() < self.config.fuzzy_min_len {
            return None;
        }

        self.tables
            .topic_keywords()
            .find(|(keyword, _)| {
                keyword.chars().count() >= self.config.fuzzy_min_len
                    && within_distance(token, keyword, FUZZY_MAX_DISTANCE)
            })
            .map(|(_, topic)| (topic, true))
    }
}

fn push_unique(items: &mut Vec<String>, item: &str) {
    if !items.iter().any(|existing| existing == item) {
        items.push(item.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(input: &str) -> String {
        convert_to_search_query(input)
    }

    fn fragments(input: &str) -> Vec<String> {
        convert(input).split(' ').map(str::to_string).collect()
    }

    fn star_count(output: &str) -> usize {
        output.split(' ').filter(|f| f.starts_with("stars:")).count()
    }

    #[test]
    fn test_explicit_stars_kept_once() {
        for (input, expected) in [
            ("rust web server stars:>1000", "stars:>1000"),
            ("python scraper stars >= 100", "stars:>=100"),
            ("stars : < 20 kotlin", "stars:<20"),
        ] {
            let output = convert(input);
            assert!(fragments(input).contains(&expected.to_string()), "{}", output);
            assert_eq!(star_count(&output), 1, "{}", output);
        }
    }

    #[test]
    fn test_popular_becomes_star_clause() {
        let output = convert("popular react libraries");
        assert_eq!(star_count(&output), 1);
        assert!(output.starts_with("stars:>500"));
        assert!(!output.contains("popular"));

        let output = convert("trending ai chatbot");
        assert_eq!(star_count(&output), 1);
        assert!(output.contains("stars:>500"));
    }

    #[test]
    fn test_repeated_star_mentions() {
        let output = convert("popular trending stars:>10 stars:>20 stars 30 database");
        assert_eq!(star_count(&output), 1);
        assert!(output.starts_with("stars:>10"));
    }

    #[test]
    fn test_garbled_star_qualifier_leaves_no_keyword() {
        assert_eq!(convert("stars:>>5 rust"), "language:rust");
    }

    #[test]
    fn test_contracted_question_words_dropped() {
        assert_eq!(
            convert("what's a good rust web framework"),
            "framework language:rust topic:web"
        );
        assert_eq!(
            convert("whats the best kotlin library"),
            "library language:kotlin topic:mobile"
        );

        let output = convert("don't know which python orm");
        assert!(!output.contains("dont"), "{}", output);
        assert!(output.starts_with("orm"), "{}", output);
        assert!(output.ends_with("language:python"), "{}", output);
    }

    #[test]
    fn test_synonym_topic_without_literal() {
        let output = convert("react dashboard with charts");
        assert_eq!(output, "dashboard charts topic:web");
        assert!(!fragments("react dashboard with charts").contains(&"react".to_string()));
    }

    #[test]
    fn test_language_and_topic() {
        let output = convert("I want to build a cli tool in rust");
        assert_eq!(output, "language:rust topic:cli");
        for word in ["want", "build", "tool"] {
            assert!(!output.split(' ').any(|f| f == word));
        }
    }

    #[test]
    fn test_normalization_idempotent() {
        let plain = "react dashboard with charts";
        assert_eq!(convert(plain), convert("   React DASHBOARD with Charts  \t"));
    }

    #[test]
    fn test_only_filler_words() {
        assert_eq!(convert("how do i make an app"), "");
        assert_eq!(convert("   "), "");
        assert_eq!(convert("?!"), "");
    }

    #[test]
    fn test_fuzzy_topic() {
        let output = convert("dockr container setup");
        assert_eq!(output, "container setup topic:devops");
    }

    #[test]
    fn test_short_tokens_never_fuzzy() {
        // "cle" is one edit from "cli" but too short for the fallback
        assert_eq!(convert("cle"), "cle");
        // four letters, one edit from "rest": still below the default minimum
        assert_eq!(convert("test runner"), "test runner");
    }

    #[test]
    fn test_fuzzy_can_be_disabled() {
        let interpreter = QueryInterpreter::new(
            QueryTables::default(),
            InterpreterConfig {
                fuzzy_topics: false,
                ..InterpreterConfig::default()
            },
        );
        assert_eq!(interpreter.convert("dockr container setup"), "dockr container");
    }

    #[test]
    fn test_residual_limit() {
        assert_eq!(convert("weather forecast widget calendar"), "weather forecast");

        let interpreter = QueryInterpreter::new(
            QueryTables::default(),
            InterpreterConfig {
                max_keywords: 1,
                ..InterpreterConfig::default()
            },
        );
        assert_eq!(interpreter.convert("weather forecast widget"), "weather");
    }

    #[test]
    fn test_assembly_order() {
        let output = convert("popular python telegram bot with docker and postgres");
        assert_eq!(
            output,
            "stars:>500 telegram bot language:python topic:database topic:devops"
        );
    }

    #[test]
    fn test_topics_collapse() {
        // django is both a synonym and a backend keyword
        let output = convert("django django backend");
        assert_eq!(output, "topic:backend");
    }

    #[test]
    fn test_language_exact_only() {
        let output = convert("pythn scripts");
        assert!(!output.contains("language:"));
    }

    #[test]
    fn test_deterministic() {
        let input = "Trending kubernetes operator written in go with a web ui";
        let first = convert(input);
        for _ in 0..10 {
            assert_eq!(convert(input), first);
        }
    }

    #[test]
    fn test_custom_tagger() {
        struct EveryWord;
        impl PhraseTagger for EveryWord {
            fn noun_phrases(&self, text: &str) -> Vec<String> {
                vec![text.to_string()]
            }
            fn verb_phrases(&self, _text: &str) -> Vec<String> {
                Vec::new()
            }
        }

        let interpreter = QueryInterpreter::with_tagger(
            QueryTables::default(),
            InterpreterConfig::default(),
            EveryWord,
        );
        // "really" is not a stop word, so a tagger that keeps everything lets it through
        assert_eq!(interpreter.convert("really fast rust"), "really fast language:rust");
    }
}
