//! Reference parser — splitter, tail parser, and the parse entry points
//!
//! Parsing is atomic: each stage either hands a complete value to the
//! next or aborts with the first error. The last stage is always
//! [`crate::validator::validate`], so every returned value is in bounds.

pub mod splitter;
pub mod tail;

use crate::resolver::Registry;
use crate::section::{SectionRef, Sections};
use crate::{validator, Reference, Result, Table};

/// Parse a free-form reference against a [`Table`].
///
/// # Example
/// ```
/// # use canonref_core::{parse, EntityRecord, Table};
/// let table = Table::new(vec![EntityRecord {
///     id: "Prov".into(),
///     name: "Proverbs".into(),
///     aliases: vec!["pro".into()],
///     chapters: 31,
///     order: None,
///     group: None,
/// }])?;
/// let reference = parse("PRO 31:10-31", &table)?;
/// assert_eq!(reference.to_string(), "Prov 31:10\u{2013}31");
/// # Ok::<(), canonref_core::Error>(())
/// ```
///
/// # Errors
/// `Parse`, `UnknownEntity`, `InvalidChapter`, or `InvalidVerse`.
pub fn parse(text: &str, table: &Table) -> Result<Reference> {
    parse_with(text, table)
}

/// Parse a single-section reference (`"RB 4:1-5"`, `"Prologue 1"`).
pub fn parse_section(text: &str) -> Result<SectionRef> {
    let reference = parse_with(text, &Sections)?;
    SectionRef::try_from(reference)
}

/// Parse against any [`Registry`]. Both reference kinds go through here.
pub fn parse_with<R: Registry + ?Sized>(text: &str, registry: &R) -> Result<Reference> {
    let result = run_pipeline(text, registry);
    if let Err(ref e) = result {
        tracing::debug!(input = text, kind = %e.kind(), "rejected reference: {}", e);
    }
    result
}

/// Parse or panic. For callers that treat bad input as a bug, such as
/// references hard-coded in tests or fixtures.
///
/// # Panics
/// When [`parse`] returns an error.
pub fn must_parse(text: &str, table: &Table) -> Reference {
    match parse(text, table) {
        Ok(reference) => reference,
        Err(e) => panic!("failed to parse reference {:?}: {}", text, e),
    }
}

fn run_pipeline<R: Registry + ?Sized>(text: &str, registry: &R) -> Result<Reference> {
    let split = splitter::split(text)?;
    tracing::trace!(head = %split.head, tail = split.tail, "split reference");

    let entity_id = registry.resolve(&split.head)?;
    let (chapter, verse) = tail::parse_tail(split.tail)?;

    let reference = Reference {
        entity_id: entity_id.to_string(),
        chapter,
        verse,
    };
    validator::validate(&reference, registry)?;

    Ok(reference)
}
