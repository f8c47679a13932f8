//! canonref core — canonical parser and normalizer for citation references
//!
//! Turns free-form citations such as `"PRO 31:10-31"` or `"II Kings 20"`
//! into a validated [`Reference`], and renders it back into exactly one
//! canonical string (`"Prov 31:10–31"`).
//!
//! # Architecture
//!
//! ```text
//! text → normalizer → splitter → resolver ─┐
//!                              └→ tail ────┴→ validator → Reference → formatter
//! ```
//!
//! The resolver is the only part that differs between reference kinds:
//! a data-driven [`Table`] for multi-book texts, the fixed [`Section`]
//! enum for single-section texts. Both implement [`Registry`].
//!
//! # Guarantees
//!
//! - **Canonical**: one rendered form per reference, and it parses back
//!   to an equal value
//! - **Atomic**: parsing either yields a fully validated value or an error
//! - **Frozen**: a [`Table`] cannot change after construction and is
//!   safe to share across threads

pub mod error;
pub mod formatter;
pub mod normalizer;
pub mod parser;
pub mod resolver;
pub mod section;
pub mod table;
pub mod validator;

#[cfg(feature = "bundled")]
pub mod bundled;

pub use error::{Error, ErrorKind, Result};
pub use formatter::Style;
pub use parser::{must_parse, parse, parse_section, parse_with};
pub use resolver::{Bounds, Registry};
pub use section::{Section, SectionRef, Sections};
pub use table::{Entity, EntityRecord, Table};
pub use validator::validate;

/// A single verse or an inclusive verse range within one chapter.
///
/// Direction is not enforced here; [`validator::validate`] rejects a
/// reversed range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct VerseRange {
    pub start: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,
}

impl VerseRange {
    pub fn single(verse: u32) -> Self {
        VerseRange {
            start: verse,
            end: None,
        }
    }

    pub fn range(start: u32, end: u32) -> Self {
        VerseRange {
            start,
            end: Some(end),
        }
    }

    pub fn is_range(&self) -> bool {
        self.end.is_some()
    }
}

/// A parsed, validated reference to a chapter or verse(s) of one entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Reference {
    pub entity_id: String,
    pub chapter: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse: Option<VerseRange>,
}

impl Reference {
    /// Chapter-only reference. Not validated; see [`Reference::validate`].
    pub fn new(entity_id: impl Into<String>, chapter: u32) -> Self {
        Reference {
            entity_id: entity_id.into(),
            chapter,
            verse: None,
        }
    }

    pub fn with_verse(entity_id: impl Into<String>, chapter: u32, verse: u32) -> Self {
        Reference {
            verse: Some(VerseRange::single(verse)),
            ..Reference::new(entity_id, chapter)
        }
    }

    pub fn with_range(entity_id: impl Into<String>, chapter: u32, start: u32, end: u32) -> Self {
        Reference {
            verse: Some(VerseRange::range(start, end)),
            ..Reference::new(entity_id, chapter)
        }
    }

    pub fn is_chapter_only(&self) -> bool {
        self.verse.is_none()
    }

    pub fn is_single_verse(&self) -> bool {
        matches!(self.verse, Some(VerseRange { end: None, .. }))
    }

    pub fn is_range(&self) -> bool {
        self.verse.is_some_and(|v| v.is_range())
    }

    /// Check bounds against a registry. Same rules as the final parse step.
    pub fn validate(&self, registry: &impl Registry) -> Result<()> {
        validator::validate(self, registry)
    }

    /// Render in the given style
    pub fn format(&self, style: Style<'_>) -> String {
        formatter::format(self, style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_table() -> Table {
        Table::new(vec![EntityRecord {
            id: "Prov".into(),
            name: "Proverbs".into(),
            aliases: vec!["proverbs".into(), "prov".into(), "pro".into()],
            chapters: 31,
            order: Some(20),
            group: Some("OT".into()),
        }])
        .unwrap()
    }

    #[test]
    fn test_reference_serialization() {
        let reference = Reference::with_range("Prov", 31, 10, 31);
        let json = serde_json::to_string(&reference).unwrap();
        assert_eq!(
            json,
            r#"{"entity_id":"Prov","chapter":31,"verse":{"start":10,"end":31}}"#
        );
        let back: Reference = serde_json::from_str(&json).unwrap();
        assert_eq!(reference, back);
    }

    #[test]
    fn test_chapter_only_omits_verse() {
        let json = serde_json::to_string(&Reference::new("Prov", 3)).unwrap();
        assert_eq!(json, r#"{"entity_id":"Prov","chapter":3}"#);
    }

    #[test]
    fn test_shape_predicates() {
        let chapter = Reference::new("Prov", 3);
        let single = Reference::with_verse("Prov", 3, 16);
        let range = Reference::with_range("Prov", 3, 16, 18);

        assert!(chapter.is_chapter_only());
        assert!(!chapter.is_single_verse());
        assert!(!chapter.is_range());

        assert!(single.is_single_verse());
        assert!(!single.is_range());

        assert!(range.is_range());
        assert!(!range.is_single_verse());
        assert!(!range.is_chapter_only());
    }

    #[test]
    fn test_canonical_round_trip() {
        let table = test_table();
        let inputs = ["Proverbs 31:10-31", "PRO 31", "prov 3:16", "Prov. 1:1\u{2013}7"];
        for input in inputs {
            let reference = parse(input, &table).unwrap();
            let again = parse(&reference.to_string(), &table).unwrap();
            assert_eq!(reference, again, "round trip changed {:?}", input);
        }
    }

    #[test]
    fn test_parse_determinism_100_iterations() {
        let table = test_table();
        let first = parse("Proverbs 31:10-31", &table).unwrap();
        for i in 0..100 {
            let result = parse("Proverbs 31:10-31", &table).unwrap();
            assert_eq!(first, result, "Non-determinism at iteration {}", i);
        }
    }
}
