//! Python bindings for canonref
//!
//! Thin wrapper around `canonref-core` — ZERO logic here.
//! All behavior comes from the canonical Rust implementation.

use canonref_core::{Reference, Sections, Style, Table};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn to_py_err(e: canonref_core::Error) -> PyErr {
    PyValueError::new_err(format!("[{}] {}", e.kind(), e))
}

/// Run `f` against the bundled table, or a table decoded from `books_json`.
fn with_table<T>(books_json: Option<&str>, f: impl FnOnce(&Table) -> PyResult<T>) -> PyResult<T> {
    match books_json {
        Some(json) => f(&Table::from_json(json).map_err(to_py_err)?),
        None => f(canonref_core::bundled::table().map_err(to_py_err)?),
    }
}

fn reference_json(reference: &Reference, formatted: String) -> PyResult<String> {
    let output = serde_json::json!({
        "reference": reference,
        "formatted": formatted,
    });
    serde_json::to_string_pretty(&output)
        .map_err(|e| PyValueError::new_err(format!("Serialization error: {}", e)))
}

fn style_for<'a>(name: &str, registry: &'a dyn canonref_core::Registry) -> PyResult<Style<'a>> {
    match name {
        "canonical" => Ok(Style::Canonical),
        "dotted" => Ok(Style::Dotted),
        "human" => Ok(Style::Human(registry)),
        other => Err(PyValueError::new_err(format!(
            "unknown style {:?}, expected canonical, dotted or human",
            other
        ))),
    }
}

/// Parse a reference and return it as JSON.
///
/// Args:
///     text: reference such as "Proverbs 31:10-31"
///     books_json: optional JSON book table; the bundled table by default
///
/// Returns:
///     JSON string: {"reference": {...}, "formatted": "Prov 31:10–31"}
///
/// Raises:
///     ValueError: If the reference is malformed, unknown, or out of bounds
#[pyfunction]
#[pyo3(signature = (text, books_json=None))]
fn parse(text: &str, books_json: Option<&str>) -> PyResult<String> {
    with_table(books_json, |table| {
        let reference = canonref_core::parse(text, table).map_err(to_py_err)?;
        let formatted = reference.to_string();
        reference_json(&reference, formatted)
    })
}

/// Parse a reference and render it.
///
/// Args:
///     text: reference text
///     style: "canonical", "dotted" or "human"
///     books_json: optional JSON book table
///
/// Returns:
///     The rendered reference
#[pyfunction]
#[pyo3(signature = (text, style="canonical", books_json=None))]
fn format(text: &str, style: &str, books_json: Option<&str>) -> PyResult<String> {
    with_table(books_json, |table| {
        let style = style_for(style, table)?;
        let reference = canonref_core::parse(text, table).map_err(to_py_err)?;
        Ok(reference.format(style))
    })
}

/// Parse a Rule of Benedict reference ("RB 4:1-5") and return it as JSON.
#[pyfunction]
fn parse_section(text: &str) -> PyResult<String> {
    let section_ref = canonref_core::parse_section(text).map_err(to_py_err)?;
    let reference = section_ref.to_reference();
    reference_json(&reference, reference.format(Style::Human(&Sections)))
}

/// Normalize a book name to its alias lookup key.
#[pyfunction]
fn normalize_alias(text: &str) -> String {
    canonref_core::normalizer::normalize_alias(text)
}

/// canonref Python module — canonical citation parser
#[pymodule]
fn canonref(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(parse, m)?)?;
    m.add_function(wrap_pyfunction!(format, m)?)?;
    m.add_function(wrap_pyfunction!(parse_section, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_alias, m)?)?;
    Ok(())
}
