//! Input normalizer — canonicalizes raw designators and verse segments
//!
//! Runs before any structural parsing. Both functions are total: they
//! never fail, malformed input surfaces later as a parse or validation
//! error.
//!
//! # Guarantees
//!
//! - **Idempotent**: `normalize_alias(normalize_alias(x)) == normalize_alias(x)`
//! - **Deterministic**: same input always produces same output

/// Canonical verse-range separator
pub const EN_DASH: char = '\u{2013}';

/// Separator used inside normalized aliases
pub const HYPHEN: char = '-';

/// Roman ordinals recognised as a leading book-number prefix.
/// Matched against the whole first word, so `iii` never degrades into `i` + `ii`.
const ROMAN_PREFIXES: [(&str, &str); 3] = [("iii", "3"), ("ii", "2"), ("i", "1")];

/// Normalize a book/section designator for alias lookup.
///
/// Steps:
/// 1. Trim, lowercase, collapse whitespace runs to one space
/// 2. Strip periods
/// 3. En-dash → hyphen
/// 4. Curly quotes and apostrophes → ASCII
/// 5. Leading Roman ordinal (`i `, `ii `, `iii `) → Arabic digit
pub fn normalize_alias(s: &str) -> String {
    let lowered = s.to_lowercase();
    let mut words: Vec<String> = lowered
        .split_whitespace()
        .map(|word| word.chars().filter_map(fold_alias_char).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect();

    // Only a prefix counts: the ordinal must be followed by another word.
    if words.len() > 1 {
        if let Some((_, digit)) = ROMAN_PREFIXES.iter().find(|(roman, _)| words[0] == *roman) {
            words[0] = (*digit).to_string();
        }
    }

    words.join(" ")
}

fn fold_alias_char(c: char) -> Option<char> {
    match c {
        '.' => None,
        EN_DASH => Some(HYPHEN),
        '\u{2018}' | '\u{2019}' => Some('\''),
        '\u{201C}' | '\u{201D}' => Some('"'),
        other => Some(other),
    }
}

/// Normalize the verse segment of a tail (the part after `:`).
///
/// Trims, turns hyphens into en-dashes, and removes all whitespace, so
/// `"10 - 31"` and `"10–31"` both become `"10–31"`.
pub fn normalize_verse_tail(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == HYPHEN { EN_DASH } else { c })
        .collect()
}
