//! Reference formatter — renders a [`Reference`] as text
//!
//! | Style       | Example                 |
//! |-------------|-------------------------|
//! | `Canonical` | `Prov 31:10–31`         |
//! | `Dotted`    | `Prov.31.10–31`         |
//! | `Human`     | `Proverbs 31:10–31`     |
//!
//! Ranges always use an en-dash. `Canonical` is the one stable form and
//! is what `Display` produces.

use std::fmt;

use crate::normalizer::EN_DASH;
use crate::resolver::Registry;
use crate::{Reference, VerseRange};

/// Output style. `Human` needs display names, so it carries the registry.
#[derive(Clone, Copy)]
pub enum Style<'a> {
    Canonical,
    Dotted,
    Human(&'a dyn Registry),
}

impl fmt::Debug for Style<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Style::Canonical => write!(f, "Canonical"),
            Style::Dotted => write!(f, "Dotted"),
            Style::Human(_) => write!(f, "Human(..)"),
        }
    }
}

/// Render a reference in the given style.
///
/// With `Human`, an id the registry does not know is rendered as is.
pub fn format(reference: &Reference, style: Style<'_>) -> String {
    match style {
        Style::Canonical => reference.to_string(),
        Style::Dotted => match reference.verse {
            Some(verse) => format!("{}.{}.{}", reference.entity_id, reference.chapter, verse),
            None => format!("{}.{}", reference.entity_id, reference.chapter),
        },
        Style::Human(registry) => {
            let name = registry
                .bounds(&reference.entity_id)
                .map(|b| b.display_name)
                .unwrap_or(reference.entity_id.as_str());
            write_spaced(name, reference)
        }
    }
}

fn write_spaced(designator: &str, reference: &Reference) -> String {
    match reference.verse {
        Some(verse) => format!("{} {}:{}", designator, reference.chapter, verse),
        None => format!("{} {}", designator, reference.chapter),
    }
}

impl fmt::Display for VerseRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}{}{}", self.start, EN_DASH, end),
            None => write!(f, "{}", self.start),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&write_spaced(&self.entity_id, self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntityRecord, Table};

    fn test_table() -> Table {
        Table::new(vec![EntityRecord {
            id: "Prov".into(),
            name: "Proverbs".into(),
            aliases: vec![],
            chapters: 31,
            order: None,
            group: None,
        }])
        .unwrap()
    }

    #[test]
    fn test_verse_range_display() {
        assert_eq!(VerseRange::single(16).to_string(), "16");
        assert_eq!(VerseRange::range(10, 31).to_string(), "10\u{2013}31");
    }

    #[test]
    fn test_canonical() {
        let r = Reference::with_range("Prov", 31, 10, 31);
        assert_eq!(format(&r, Style::Canonical), "Prov 31:10\u{2013}31");
        assert_eq!(format(&Reference::new("Prov", 3), Style::Canonical), "Prov 3");
        assert_eq!(r.to_string(), format(&r, Style::Canonical));
    }

    #[test]
    fn test_dotted() {
        assert_eq!(
            format(&Reference::with_range("Prov", 31, 10, 31), Style::Dotted),
            "Prov.31.10\u{2013}31"
        );
        assert_eq!(
            format(&Reference::with_verse("Prov", 3, 16), Style::Dotted),
            "Prov.3.16"
        );
        assert_eq!(format(&Reference::new("Prov", 3), Style::Dotted), "Prov.3");
    }

    #[test]
    fn test_human() {
        let table = test_table();
        assert_eq!(
            format(&Reference::with_range("Prov", 31, 10, 31), Style::Human(&table)),
            "Proverbs 31:10\u{2013}31"
        );
        assert_eq!(
            Reference::new("Prov", 3).format(Style::Human(&table)),
            "Proverbs 3"
        );
    }

    #[test]
    fn test_human_unknown_id_falls_back() {
        let table = test_table();
        assert_eq!(
            format(&Reference::new("Gen", 1), Style::Human(&table)),
            "Gen 1"
        );
    }

    #[test]
    fn test_human_output_parses_back() {
        let table = test_table();
        let r = Reference::with_verse("Prov", 3, 5);
        let human = r.format(Style::Human(&table));
        assert_eq!(crate::parse(&human, &table).unwrap(), r);
    }
}
