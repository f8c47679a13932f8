//! JavaScript/TypeScript bindings for canonref
//!
//! Thin wrapper around `canonref-core` compiled to WebAssembly.
//! ZERO logic here — all behavior from the canonical Rust implementation.

use canonref_core::{Style, Table};
use wasm_bindgen::prelude::*;

fn to_js_err(e: canonref_core::Error) -> JsError {
    JsError::new(&format!("[{}] {}", e.kind(), e))
}

fn with_table<T>(
    books_json: Option<String>,
    f: impl FnOnce(&Table) -> Result<T, JsError>,
) -> Result<T, JsError> {
    match books_json {
        Some(json) => f(&Table::from_json(&json).map_err(to_js_err)?),
        None => f(canonref_core::bundled::table().map_err(to_js_err)?),
    }
}

/// Parse a reference and return it as JSON.
///
/// @param text - reference such as "Proverbs 31:10-31"
/// @param booksJson - optional JSON book table; bundled table when omitted
/// @returns JSON string: { reference: {...}, formatted: "Prov 31:10–31" }
/// @throws Error if the reference is malformed, unknown, or out of bounds
#[wasm_bindgen]
pub fn parse(text: &str, books_json: Option<String>) -> Result<String, JsError> {
    with_table(books_json, |table| {
        let reference = canonref_core::parse(text, table).map_err(to_js_err)?;
        let output = serde_json::json!({
            "reference": reference,
            "formatted": reference.to_string(),
        });
        serde_json::to_string_pretty(&output)
            .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
    })
}

/// Parse a reference and render it.
///
/// @param text - reference text
/// @param style - "canonical" | "dotted" | "human"
/// @param booksJson - optional JSON book table
/// @returns The rendered reference
#[wasm_bindgen(js_name = "formatReference")]
pub fn format_reference(
    text: &str,
    style: &str,
    books_json: Option<String>,
) -> Result<String, JsError> {
    with_table(books_json, |table| {
        let style = match style {
            "canonical" => Style::Canonical,
            "dotted" => Style::Dotted,
            "human" => Style::Human(table),
            other => return Err(JsError::new(&format!("unknown style {:?}", other))),
        };
        let reference = canonref_core::parse(text, table).map_err(to_js_err)?;
        Ok(reference.format(style))
    })
}

/// Parse a Rule of Benedict reference ("RB 4:1-5") to canonical form.
///
/// @param text - section reference text
/// @returns Canonical form such as "RB 4:1–5"
#[wasm_bindgen(js_name = "parseSection")]
pub fn parse_section(text: &str) -> Result<String, JsError> {
    canonref_core::parse_section(text)
        .map(|r| r.to_string())
        .map_err(to_js_err)
}

/// Normalize a book name to its alias lookup key.
#[wasm_bindgen(js_name = "normalizeAlias")]
pub fn normalize_alias(text: &str) -> String {
    canonref_core::normalizer::normalize_alias(text)
}
