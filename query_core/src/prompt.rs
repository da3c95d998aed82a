//! README-to-prompt helpers: repository URL parsing, the LLM prompt template,
//! and clean-up of the model's reply

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::{QueryError, Result};

/// Stand-in when no README text is available
pub const MISSING_README: &str = "README could not be fetched.";

/// Stand-in when the model reply is empty after cleaning
pub const EMPTY_RESPONSE: &str = "No response from model.";

static GITHUB_REPO_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://(?:www\.)?github\.com/([\w-]+)/([\w.-]+?)/?$")
        .expect("Invalid regex pattern")
});

// Applied in order by `clean_model_output`
static PREAMBLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^.*(here('?s)? the prompt:?|sure!?|okay,?|prompt:)\s*")
        .expect("Invalid regex pattern")
});
static SIGN_OFFS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\n*feel free to.*$",
        r"(?i)\n*you can customize.*$",
        r"(?i)\n*let me know.*$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid regex pattern"))
    .collect()
});
static EXTRA_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("Invalid regex pattern"));

/// True for `http(s)://[www.]github.com/<owner>/<repo>[/]`
pub fn is_valid_github_url(input: &str) -> bool {
    RepoRef::parse(input).is_ok()
}

/// Owner and name of a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    /// Parse a repository URL; anything but a bare owner/repo URL is rejected
    pub fn parse(url: &str) -> Result<Self> {
        let trimmed = url.trim();
        let caps = GITHUB_REPO_URL
            .captures(trimmed)
            .ok_or_else(|| QueryError::InvalidRepoUrl(trimmed.to_string()))?;
        let repo = caps[2].strip_suffix(".git").unwrap_or(&caps[2]);
        if repo.is_empty() {
            return Err(QueryError::InvalidRepoUrl(trimmed.to_string()));
        }
        Ok(Self {
            owner: caps[1].to_string(),
            repo: repo.to_string(),
        })
    }

    /// Key prompts are cached under
    pub fn cache_key(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// REST endpoint serving the repository README
    pub fn readme_url(&self, api_base: &str) -> String {
        format!(
            "{}/repos/{}/{}/readme",
            api_base.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }
}

/// Wrap README text in the instructions sent to the model
pub fn build_prompt(readme: &str) -> String {
    let readme = match readme.trim() {
        "" => MISSING_README,
        text => text,
    };
    format!(
        "Given the following README from a GitHub repository:\n\n\
         {readme}\n\n\
         Generate a developer-oriented prompt that:\n\
         - Summarizes the purpose and tech stack.\n\
         - Proposes a modular folder structure.\n\
         - Suggests improvements or missing components.\n\
         - If incomplete, scaffolds an MVP structure with placeholders.\n\
         - Format the response as a prompt ready to paste into any AI coding assistant."
    )
}

/// Strip chatty preamble and sign-off lines from a model reply
pub fn clean_model_output(text: &str) -> String {
    let mut cleaned = PREAMBLE.replace(text, "").into_owned();
    for sign_off in SIGN_OFFS.iter() {
        cleaned = sign_off.replace(&cleaned, "").into_owned();
    }
    let cleaned = EXTRA_NEWLINES.replace_all(&cleaned, "\n\n");
    let cleaned = cleaned.trim();
    debug!(raw_len = text.len(), cleaned_len = cleaned.len(), "cleaned model output");
    if cleaned.is_empty() {
        EMPTY_RESPONSE.to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_urls() {
        assert!(is_valid_github_url("https://github.com/rust-lang/rust"));
        assert!(is_valid_github_url("http://www.github.com/serde-rs/serde.rs/"));
        assert!(is_valid_github_url("  HTTPS://GitHub.com/a/b  "));
        assert!(!is_valid_github_url("https://github.com/rust-lang"));
        assert!(!is_valid_github_url("https://github.com/a/b/tree/main"));
        assert!(!is_valid_github_url("https://gitlab.com/a/b"));
        assert!(!is_valid_github_url("github.com/a/b"));
        assert!(!is_valid_github_url("https://github.com/a/.git"));
    }

    #[test]
    fn test_repo_ref_parse() {
        let repo = RepoRef::parse(" https://github.com/tokio-rs/tokio/ ").unwrap();
        assert_eq!(repo.owner, "tokio-rs");
        assert_eq!(repo.repo, "tokio");
        assert_eq!(repo.cache_key(), "tokio-rs/tokio");

        let dotted = RepoRef::parse("https://github.com/serde-rs/serde.rs.git").unwrap();
        assert_eq!(dotted.repo, "serde.rs");
    }

    #[test]
    fn test_repo_ref_rejects_non_repo_urls() {
        for bad in ["https://github.com/tokio-rs", "not a url", "https://github.com/a/.git"] {
            match RepoRef::parse(bad) {
                Err(QueryError::InvalidRepoUrl(url)) => assert_eq!(url, bad.trim()),
                other => panic!("Expected InvalidRepoUrl for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_readme_url() {
        let repo = RepoRef::parse("https://github.com/tokio-rs/tokio").unwrap();
        assert_eq!(
            repo.readme_url("https://api.github.com/"),
            "https://api.github.com/repos/tokio-rs/tokio/readme"
        );
    }

    #[test]
    fn test_build_prompt() {
        let prompt = build_prompt("# Tokio\nAn async runtime.");
        assert!(prompt.starts_with("Given the following README from a GitHub repository:\n\n# Tokio"));
        assert!(prompt.contains("- Proposes a modular folder structure.\n"));
        assert!(prompt.ends_with("ready to paste into any AI coding assistant."));

        assert!(build_prompt("  \n").contains(MISSING_README));
    }

    #[test]
    fn test_clean_strips_preamble_and_sign_off() {
        let raw = "Sure! Here's the prompt:\n\nBuild a CLI in Rust.\n\n\n\nUse clap.\nFeel free to tweak it!";
        assert_eq!(clean_model_output(raw), "Build a CLI in Rust.\n\nUse clap.");

        let raw = "Okay, Prompt: Scaffold an MVP.\nLet me know if you need more.";
        assert_eq!(clean_model_output(raw), "Scaffold an MVP.");
    }

    #[test]
    fn test_clean_leaves_plain_text() {
        assert_eq!(
            clean_model_output("  Summarize the stack.\nPropose folders.  "),
            "Summarize the stack.\nPropose folders."
        );
    }

    #[test]
    fn test_clean_empty_reply() {
        assert_eq!(clean_model_output(""), EMPTY_RESPONSE);
        assert_eq!(clean_model_output("You can customize this."), EMPTY_RESPONSE);
    }
}
