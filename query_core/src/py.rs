//! Python bindings for the query core using PyO3

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::config::InterpreterConfig;
use crate::interpreter::{convert_to_search_query, QueryInterpreter};
use crate::prompt::{clean_model_output, is_valid_github_url};
use crate::tables::QueryTables;

/// Convert free text into a GitHub search query (Python function)
#[pyfunction]
pub fn py_convert_to_search_query(input: &str) -> String {
    convert_to_search_query(input)
}

/// True for a bare GitHub repository URL
#[pyfunction]
pub fn py_is_valid_github_url(input: &str) -> bool {
    is_valid_github_url(input)
}

/// Clean a model reply into a paste-ready prompt
#[pyfunction]
pub fn py_clean_model_output(text: &str) -> String {
    clean_model_output(text)
}

/// Python wrapper for the query interpreter
#[pyclass]
pub struct PyQueryInterpreter {
    interpreter: QueryInterpreter,
}

#[pymethods]
impl PyQueryInterpreter {
    /// Built-in tables, or tables from a JSON string
    #[new]
    #[pyo3(signature = (tables_json=None, max_keywords=2, fuzzy_topics=true))]
    fn new(tables_json: Option<&str>, max_keywords: usize, fuzzy_topics: bool) -> PyResult<Self> {
        let tables = match tables_json {
            Some(json) => QueryTables::from_json_str(json).map_err(|e| {
                PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                    "Failed to load tables: {}",
                    e
                ))
            })?,
            None => QueryTables::default(),
        };
        let config = InterpreterConfig {
            max_keywords: max_keywords.max(1),
            fuzzy_topics,
            ..InterpreterConfig::default()
        };

        Ok(Self {
            interpreter: QueryInterpreter::new(tables, config),
        })
    }

    /// Search query string for the input
    fn convert(&self, input: &str) -> String {
        self.interpreter.convert(input)
    }

    /// Structured pieces of the query as a dict
    fn interpret<'py>(&self, input: &str, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let query = self.interpreter.interpret(input);

        let dict = PyDict::new_bound(py);
        dict.set_item("stars", query.stars.as_ref().map(|s| s.to_string()))?;
        dict.set_item("keywords", &query.keywords)?;
        dict.set_item("languages", &query.languages)?;
        dict.set_item("topics", &query.topics)?;
        dict.set_item("query", query.to_string())?;
        Ok(dict)
    }
}
