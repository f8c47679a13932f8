//! Tail parser — `chapter[:verse[–verse]]`
//!
//! Builds the verse range unconditionally; range direction and bounds
//! belong to the validator.

use crate::normalizer::{normalize_verse_tail, EN_DASH};
use crate::{Error, Result, VerseRange};

/// Parse a tail token into a chapter number and optional verse range.
///
/// # Errors
/// - `Parse` for an empty tail, a non-`:` separator, or a range with
///   more than one dash
/// - `InvalidChapter` when the tail does not start with a digit or the
///   chapter overflows
/// - `InvalidVerse` for an empty or non-numeric verse
pub fn parse_tail(tail: &str) -> Result<(u32, Option<VerseRange>)> {
    if tail.is_empty() {
        return Err(Error::parse(tail, "tail cannot be empty"));
    }

    let digits = tail.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Err(Error::invalid_chapter(
            tail,
            "chapter must start with a digit",
        ));
    }

    let chapter_str = &tail[..digits];
    let chapter = chapter_str.parse::<u32>().map_err(|e| Error::InvalidChapter {
        input: chapter_str.to_string(),
        message: "chapter number out of range".to_string(),
        source: Some(e),
    })?;

    let rest = &tail[digits..];
    let Some(verses) = rest.strip_prefix(':') else {
        if rest.is_empty() {
            return Ok((chapter, None));
        }
        return Err(Error::parse(
            tail,
            format!("expected ':' after chapter {}, found {:?}", chapter, rest),
        ));
    };

    let verses = normalize_verse_tail(verses);
    if verses.is_empty() {
        return Err(Error::invalid_verse(tail, "verse cannot be empty after ':'"));
    }

    if verses.contains(EN_DASH) {
        let parts: Vec<&str> = verses.split(EN_DASH).collect();
        let [start, end] = parts.as_slice() else {
            return Err(Error::parse(verses.as_str(), "invalid verse range"));
        };
        let start = parse_verse_number(start, "start")?;
        let end = parse_verse_number(end, "end")?;
        Ok((chapter, Some(VerseRange::range(start, end))))
    } else {
        let verse = parse_verse_number(&verses, "verse")?;
        Ok((chapter, Some(VerseRange::single(verse))))
    }
}

fn parse_verse_number(fragment: &str, which: &str) -> Result<u32> {
    if !fragment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_verse(
            fragment,
            format!("{} must be a number", which),
        ));
    }
    fragment.parse::<u32>().map_err(|e| Error::InvalidVerse {
        input: fragment.to_string(),
        message: format!("{} must be a number", which),
        source: Some(e),
    })
}
