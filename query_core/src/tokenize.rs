//! Phrase tagging and token normalization
//!
//! Only noun and verb phrases carry the subject of a search ("what to look
//! for"); determiners, pronouns, prepositions, adjectives and adverbs are
//! noise. The [`PhraseTagger`] trait is the seam for plugging in a real
//! part-of-speech tagger; [`LexiconTagger`] is the built-in, table-driven one.

use ahash::AHashSet;
use once_cell::sync::Lazy;

/// Extracts noun and verb phrases from already-lowercased text
pub trait PhraseTagger: Send + Sync {
    fn noun_phrases(&self, text: &str) -> Vec<String>;
    fn verb_phrases(&self, text: &str) -> Vec<String>;
}

/// Lowercase and keep only letters, digits, `+` and `#`
pub fn normalize_token(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_alphanumeric() || *c == '+' || *c == '#')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Noun phrases first, then verb phrases, each split into single normalized words
pub fn extract_tokens(tagger: &dyn PhraseTagger, text: &str) -> Vec<String> {
    tagger
        .noun_phrases(text)
        .into_iter()
        .chain(tagger.verb_phrases(text))
        .flat_map(|phrase| {
            phrase
                .split_whitespace()
                .map(normalize_token)
                .collect::<Vec<_>>()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordClass {
    Noun,
    Verb,
    Other,
}

static FUNCTION_WORDS: Lazy<AHashSet<&'static str>> = Lazy::new(|| {
    [
        // determiners
        "a", "an", "the", "this", "that", "these", "those", "some", "any", "every", "each",
        "all", "no", "my", "your", "our", "their", "its", "his", "her",
        // pronouns
        "i", "me", "we", "us", "you", "he", "she", "it", "they", "them", "something",
        "anything", "someone", "myself",
        // prepositions and conjunctions
        "to", "in", "on", "at", "of", "for", "with", "without", "from", "by", "about", "into",
        "like", "via", "using", "and", "or", "but", "so", "if", "than", "then", "as",
        // question words and auxiliaries
        "how", "what", "which", "who", "where", "when", "why", "can", "could", "should",
        "would", "will", "shall", "may", "might", "must", "is", "are", "was", "were", "be",
        "been", "am", "do", "does", "did", "have", "has", "had",
        // adverbs
        "not", "very", "really", "just", "also", "too", "there", "here", "please",
        // contractions, apostrophe already removed
        "whats", "hows", "wheres", "whos", "whens", "whys", "thats", "theres", "heres",
        "dont", "doesnt", "didnt", "cant", "cannot", "wont", "wouldnt", "couldnt",
        "shouldnt", "isnt", "arent", "wasnt", "werent", "havent", "hasnt", "im", "ive",
        "youre", "youve", "theyre", "weve", "lets",
    ]
    .into_iter()
    .collect()
});

static ADJECTIVES: Lazy<AHashSet<&'static str>> = Lazy::new(|| {
    [
        "good", "best", "better", "great", "simple", "easy", "new", "old", "fast", "quick",
        "small", "big", "large", "tiny", "cool", "nice", "awesome", "modern", "free",
        "open", "popular", "trending", "lightweight", "minimal", "basic", "advanced", "real",
        "many", "more", "most", "other", "own", "similar", "interesting",
    ]
    .into_iter()
    .collect()
});

static VERBS: Lazy<AHashSet<&'static str>> = Lazy::new(|| {
    [
        "want", "wants", "need", "needs", "make", "makes", "build", "builds", "building",
        "create", "creating", "develop", "developing", "write", "writing", "find", "search",
        "learn", "learning", "use", "run", "running", "deploy", "deploying", "show", "get",
        "try", "start", "help", "implement", "generate", "convert", "scrape", "track",
        "manage", "monitor", "automate", "analyze", "visualize", "host", "train", "looking",
        "look", "recommend", "suggest", "know",
    ]
    .into_iter()
    .collect()
});

/// Lexicon-driven tagger: closed-class words and a small adjective list are
/// dropped, a verb lexicon marks verbs, everything else is treated as a noun.
/// Adjacent words of the same class form one phrase.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconTagger;

impl LexiconTagger {
    pub fn new() -> Self {
        Self
    }

    fn classify(word: &str) -> WordClass {
        if word.is_empty() || FUNCTION_WORDS.contains(word) || ADJECTIVES.contains(word) {
            WordClass::Other
        } else if VERBS.contains(word) {
            WordClass::Verb
        } else {
            WordClass::Noun
        }
    }

    /// Class of a possibly contracted word, plus the part worth keeping
    ///
    /// "what's" and "don't" are judged as "whats" and "dont"; a possessive
    /// like "react's" is kept as "react".
    fn classify_clitic(word: &str) -> (WordClass, &str) {
        let lower = word.to_lowercase();
        if !lower.contains(is_apostrophe) {
            return (Self::classify(&lower), word);
        }

        let joined: String = lower.chars().filter(|c| !is_apostrophe(*c)).collect();
        if Self::classify(&joined) == WordClass::Other {
            return (WordClass::Other, word);
        }

        let stem = word.split(is_apostrophe).next().unwrap_or(word);
        (Self::classify(&stem.to_lowercase()), stem)
    }

    fn phrases(text: &str, wanted: WordClass) -> Vec<String> {
        let mut phrases = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for raw in text.split_whitespace() {
            // edge punctuation only, so "c++" and "c#" survive
            let word = raw.trim_matches(|c: char| {
                !(c.is_alphanumeric() || c == '+' || c == '#')
            });
            let (class, word) = Self::classify_clitic(word);

            if class == wanted {
                current.push(word);
            } else if !current.is_empty() {
                phrases.push(current.join(" "));
                current.clear();
            }

            // sentence punctuation closes a phrase
            if raw.ends_with([',', '.', ';', '?', '!']) && !current.is_empty() {
                phrases.push(current.join(" "));
                current.clear();
            }
        }

        if !current.is_empty() {
            phrases.push(current.join(" "));
        }

        phrases
    }
}

impl PhraseTagger for LexiconTagger {
    fn noun_phrases(&self, text: &str) -> Vec<String> {
        Self::phrases(text, WordClass::Noun)
    }

    fn verb_phrases(&self, text: &str) -> Vec<String> {
        Self::phrases(text, WordClass::Verb)
    }
}
