//! Lexical splitter — separates the designator from the chapter token
//!
//! `"II  Kings 20:1-3"` → head `"II Kings"`, tail `"20:1-3"`.
//! Only the last whitespace field is the tail, so designators that start
//! with a digit (`"1 Samuel 3"`) keep their number.

use crate::{Error, Result};

/// A reference string split into head and tail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split<'a> {
    /// Designator fields joined by single spaces
    pub head: String,
    /// Final field, `chapter[:verse]`
    pub tail: &'a str,
}

/// Split a reference string on whitespace.
///
/// # Errors
/// `Parse` when the input is empty or has fewer than two fields.
pub fn split(text: &str) -> Result<Split<'_>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::parse(text, "empty"));
    }

    let mut fields: Vec<&str> = trimmed.split_whitespace().collect();
    let tail = match fields.pop() {
        Some(tail) if !fields.is_empty() => tail,
        _ => return Err(Error::parse(trimmed, "too few fields")),
    };

    Ok(Split {
        head: fields.join(" "),
        tail,
    })
}
