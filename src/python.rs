//! Optional Python bindings for critnorm via PyO3.
//!
//! Enabled with the `python` feature flag.
//!
//! ## Usage from Python
//!
//! ```python
//! import critnorm
//!
//! out = critnorm.normalize('{"where": {"or": [{"id": "#12:0"}]}, "limit": 5}')
//! print(out)  # {"where": {"or": [{"@rid": "#12:0"}]}, "limit": 5}
//!
//! info = critnorm.analyze('{"where": {"id": 1, "colour": "red"}}', '{"name": "string"}')
//! print(info)  # {'remapped_ids': 1, 'unknown_fields': ['colour'], ...}
//! ```

use pyo3::prelude::*;
use pyo3::types::PyDict;
use serde_json::Value;

use crate::criteria::{self, CombinatorPolicy, Normalizer, Schema};

fn value_error(context: &str, err: impl std::fmt::Display) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(format!("{}: {}", context, err))
}

fn load_schema(schema_json: Option<&str>) -> PyResult<Schema> {
    match schema_json {
        Some(json) => Schema::from_json_str(json).map_err(|e| value_error("Schema error", e)),
        None => Ok(Schema::default()),
    }
}

/// Normalize a criteria JSON string for OrientDB.
///
/// Args:
///     criteria_json: The Waterline criteria as a JSON string.
///     schema_json: Optional Waterline schema as a JSON string.
///     strict: Raise instead of dropping malformed and/or/nor values.
///
/// Returns:
///     The normalized criteria as a JSON string.
///
/// Raises:
///     ValueError: If the input is not valid JSON, or a strict check fails.
#[pyfunction]
#[pyo3(signature = (criteria_json, schema_json=None, strict=false))]
fn normalize(criteria_json: &str, schema_json: Option<&str>, strict: bool) -> PyResult<String> {
    let criteria: Value =
        serde_json::from_str(criteria_json).map_err(|e| value_error("JSON parse error", e))?;
    let schema = load_schema(schema_json)?;
    let policy = if strict {
        CombinatorPolicy::Strict
    } else {
        CombinatorPolicy::Drop
    };

    let normalized = Normalizer::new(&schema)
        .with_policy(policy)
        .normalize_criteria(criteria)
        .map_err(|e| value_error("Normalization error", e))?;
    serde_json::to_string(&normalized).map_err(|e| value_error("JSON encode error", e))
}

/// Analyze the structure of a criteria JSON string.
///
/// Returns:
///     A dictionary with has_where, where_is_null, combinator_count,
///     max_depth, leaf_count, remapped_ids, malformed_combinators and
///     unknown_fields.
#[pyfunction]
#[pyo3(signature = (criteria_json, schema_json=None))]
fn analyze(py: Python<'_>, criteria_json: &str, schema_json: Option<&str>) -> PyResult<Py<PyDict>> {
    let criteria: Value =
        serde_json::from_str(criteria_json).map_err(|e| value_error("JSON parse error", e))?;
    let schema = load_schema(schema_json)?;
    let analysis = criteria::analyze_criteria(&criteria, &schema);

    let dict = PyDict::new_bound(py);
    dict.set_item("has_where", analysis.has_where)?;
    dict.set_item("where_is_null", analysis.where_is_null)?;
    dict.set_item("combinator_count", analysis.combinator_count)?;
    dict.set_item("max_depth", analysis.max_depth)?;
    dict.set_item("leaf_count", analysis.leaf_count)?;
    dict.set_item("remapped_ids", analysis.remapped_ids)?;
    dict.set_item("malformed_combinators", analysis.malformed_combinators)?;
    dict.set_item("unknown_fields", analysis.unknown_fields)?;
    Ok(dict.into())
}

/// critnorm Python module.
#[pymodule]
fn _critnorm(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(normalize, m)?)?;
    m.add_function(wrap_pyfunction!(analyze, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
