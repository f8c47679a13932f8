//! Bundled Bible book table (66 books plus common deuterocanonical books)
//!
//! Compiled in from `data/books.json`. Built on first use and shared.

use std::sync::OnceLock;

use crate::{Result, Table};

/// Raw JSON of the bundled table
pub const BOOKS_JSON: &str = include_str!("../data/books.json");

static TABLE: OnceLock<Table> = OnceLock::new();

/// The bundled table, built once per process.
///
/// # Errors
/// Only if the bundled data itself is malformed.
pub fn table() -> Result<&'static Table> {
    if let Some(table) = TABLE.get() {
        return Ok(table);
    }
    let table = Table::from_json(BOOKS_JSON)?;
    Ok(TABLE.get_or_init(|| table))
}
