//! Single-section references into the Rule of Benedict
//!
//! The text has a fixed shape, a prologue and 73 chapters, so the
//! resolver is a closed enum instead of a loaded [`crate::Table`].
//! Parsing goes through the same pipeline as multi-book references.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::normalizer::normalize_alias;
use crate::resolver::{Bounds, Registry};
use crate::{Error, Reference, Result, Style, VerseRange};

/// A top-level division of the Rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    Prologue,
    Rule,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Prologue, Section::Rule];

    /// Canonical tag used in rendered references
    pub fn tag(self) -> &'static str {
        match self {
            Section::Prologue => "Prol",
            Section::Rule => "RB",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Section::Prologue => "Prologue",
            Section::Rule => "Rule of Benedict",
        }
    }

    pub fn max_chapter(self) -> u32 {
        match self {
            Section::Prologue => 1,
            Section::Rule => 73,
        }
    }

    /// Normalized aliases, in addition to the normalized tag
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Section::Prologue => &["prologue", "prol", "prologus", "rb prol", "rb prologue"],
            Section::Rule => &[
                "rule",
                "rb",
                "regula",
                "regula benedicti",
                "rule of benedict",
                "rule of st benedict",
                "rule of saint benedict",
            ],
        }
    }

    pub fn from_tag(tag: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.tag() == tag)
    }

    fn from_normalized(normalized: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| {
            normalize_alias(s.tag()) == normalized || s.aliases().contains(&normalized)
        })
    }

    fn bounds(self) -> Bounds<'static> {
        Bounds {
            id: self.tag(),
            display_name: self.display_name(),
            max_chapter: self.max_chapter(),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Registry over the fixed [`Section`] set.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sections;

impl Registry for Sections {
    fn resolve(&self, head: &str) -> Result<&str> {
        let normalized = normalize_alias(head);
        Section::from_normalized(&normalized)
            .map(Section::tag)
            .ok_or_else(|| {
                Error::unknown_entity(head.trim(), format!("no section matches {:?}", normalized))
            })
    }

    fn bounds(&self, id: &str) -> Option<Bounds<'_>> {
        Section::from_tag(id).map(Section::bounds)
    }
}

/// A parsed, validated reference into one [`Section`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionRef {
    pub section: Section,
    pub chapter: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verse: Option<VerseRange>,
}

impl SectionRef {
    pub fn to_reference(&self) -> Reference {
        Reference {
            entity_id: self.section.tag().to_string(),
            chapter: self.chapter,
            verse: self.verse,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.to_reference().validate(&Sections)
    }

    /// Render in the given style. `Style::Human` may be given [`Sections`].
    pub fn format(&self, style: Style<'_>) -> String {
        self.to_reference().format(style)
    }
}

impl TryFrom<Reference> for SectionRef {
    type Error = Error;

    fn try_from(reference: Reference) -> Result<Self> {
        let section = Section::from_tag(&reference.entity_id).ok_or_else(|| {
            Error::unknown_entity(&reference.entity_id, "not a section tag")
        })?;
        Ok(SectionRef {
            section,
            chapter: reference.chapter,
            verse: reference.verse,
        })
    }
}

impl FromStr for SectionRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::parser::parse_section(s)
    }
}

impl fmt::Display for SectionRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.to_reference(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_resolve_tags_and_aliases() {
        assert_eq!(Sections.resolve("RB").unwrap(), "RB");
        assert_eq!(Sections.resolve("Rule of St. Benedict").unwrap(), "RB");
        assert_eq!(Sections.resolve("prol.").unwrap(), "Prol");
        assert_eq!(Sections.resolve("RB Prol.").unwrap(), "Prol");
    }

    #[test]
    fn test_resolve_unknown_section() {
        let err = Sections.resolve("Epilogue").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownEntity);
    }

    #[test]
    fn test_parse_section_reference() {
        let r: SectionRef = "RB 4:1-5".parse().unwrap();
        assert_eq!(r.section, Section::Rule);
        assert_eq!(r.chapter, 4);
        assert_eq!(r.verse, Some(VerseRange::range(1, 5)));
        assert_eq!(r.to_string(), "RB 4:1\u{2013}5");
    }

    #[test]
    fn test_parse_prologue() {
        let r: SectionRef = "Prologue 1:1".parse().unwrap();
        assert_eq!(r.section, Section::Prologue);
        assert_eq!(r.to_string(), "Prol 1:1");
    }

    #[test]
    fn test_section_bounds() {
        assert!("RB 73".parse::<SectionRef>().is_ok());
        let err = "RB 74".parse::<SectionRef>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidChapter);
        assert!(err.to_string().contains("Rule of Benedict"));
        assert_eq!(
            "Prol 2".parse::<SectionRef>().unwrap_err().kind(),
            ErrorKind::InvalidChapter
        );
    }

    #[test]
    fn test_human_format_with_sections() {
        let r: SectionRef = "rule 7:10".parse().unwrap();
        assert_eq!(r.format(Style::Human(&Sections)), "Rule of Benedict 7:10");
        assert_eq!(r.format(Style::Dotted), "RB.7.10");
    }

    #[test]
    fn test_validate_constructed() {
        let r = SectionRef {
            section: Section::Rule,
            chapter: 2,
            verse: Some(VerseRange::range(9, 3)),
        };
        assert_eq!(r.validate().unwrap_err().kind(), ErrorKind::InvalidVerse);
    }

    #[test]
    fn test_try_from_reference() {
        let r = SectionRef::try_from(Reference::with_verse("RB", 1, 1)).unwrap();
        assert_eq!(r.section, Section::Rule);
        assert!(SectionRef::try_from(Reference::new("Prov", 1)).is_err());
    }

    #[test]
    fn test_tag_round_trip() {
        for section in Section::ALL {
            assert_eq!(Section::from_tag(section.tag()), Some(section));
        }
    }
}
