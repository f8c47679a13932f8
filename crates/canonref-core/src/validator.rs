//! Reference validator — numeric bounds against a registry
//!
//! Runs as the last step of every parse and is also used directly for
//! references built by hand.
//!
//! # Checks, in order
//!
//! 1. **Entity** — the id is registered
//! 2. **Chapter** — `1 <= chapter <= max_chapter`
//! 3. **Verse** — start verse is at least 1
//! 4. **Range** — end verse is not before the start verse
//!
//! The first failing check wins.

use crate::resolver::Registry;
use crate::{Error, Reference, Result};

/// Validate a reference against a registry.
///
/// # Errors
/// `UnknownEntity`, `InvalidChapter` (message names the entity), or
/// `InvalidVerse`.
pub fn validate<R: Registry + ?Sized>(reference: &Reference, registry: &R) -> Result<()> {
    let Some(bounds) = registry.bounds(&reference.entity_id) else {
        return Err(Error::unknown_entity(
            &reference.entity_id,
            "id is not registered",
        ));
    };

    if reference.chapter < 1 || reference.chapter > bounds.max_chapter {
        return Err(Error::invalid_chapter(
            reference.chapter.to_string(),
            format!(
                "chapter {} out of range for {} (1-{})",
                reference.chapter, bounds.display_name, bounds.max_chapter
            ),
        ));
    }

    if let Some(verse) = reference.verse {
        if verse.start < 1 {
            return Err(Error::invalid_verse(
                verse.start.to_string(),
                format!("start verse must be a positive integer, got {}", verse.start),
            ));
        }
        if let Some(end) = verse.end {
            if end < verse.start {
                return Err(Error::invalid_verse(
                    format!("{}-{}", verse.start, end),
                    format!(
                        "reversed range: end verse {} is before start verse {}",
                        end, verse.start
                    ),
                ));
            }
        }
    }

    Ok(())
}
