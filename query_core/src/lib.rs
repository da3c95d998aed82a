//! Query core - natural-language to GitHub repository search conversion
//!
//! Turns free text such as "popular cli tool in rust" into a GitHub search
//! query (`stars:>500 language:rust topic:cli`), and builds the repository
//! search requests, category spins and README prompts Git2Prompt sends
//! upstream.

pub mod categories;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod prompt;
pub mod search;
pub mod similarity;
pub mod stars;
pub mod tables;
pub mod tokenize;
pub mod types;

pub use config::{FallbackPolicy, InterpreterConfig, QueryConfig, SearchConfig};
pub use error::{QueryError, Result};
pub use interpreter::{convert_to_search_query, QueryInterpreter};
pub use prompt::RepoRef;
pub use search::SearchRequest;
pub use tables::{QueryTables, TablesFile, TopicEntry};
pub use tokenize::{LexiconTagger, PhraseTagger};
pub use types::*;

// Python bindings
#[cfg(feature = "extension-module")]
pub mod py;

#[cfg(feature = "extension-module")]
use pyo3::prelude::*;

#[cfg(feature = "extension-module")]
#[pymodule]
fn query_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use py::*;
    m.add_class::<PyQueryInterpreter>()?;
    m.add_function(wrap_pyfunction!(py_convert_to_search_query, m)?)?;
    m.add_function(wrap_pyfunction!(py_is_valid_github_url, m)?)?;
    m.add_function(wrap_pyfunction!(py_clean_model_output, m)?)?;
    Ok(())
}
