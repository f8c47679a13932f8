//! Error types for canonref
//!
//! All fallible operations return `Result<T, Error>`.
//! Every variant carries the offending input fragment so callers can
//! point at what was wrong, not just that something was.

use std::num::ParseIntError;

use thiserror::Error;

/// canonref error types
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed shape: missing tail, bad separators, empty input
    #[error("parse error at {input:?}: {message}")]
    Parse { input: String, message: String },

    /// Designator did not resolve via alias or literal id
    #[error("unknown book or section {input:?}: {message}")]
    UnknownEntity { input: String, message: String },

    /// Non-numeric, zero, or out-of-bounds chapter
    #[error("invalid chapter {input:?}: {message}")]
    InvalidChapter {
        input: String,
        message: String,
        #[source]
        source: Option<ParseIntError>,
    },

    /// Non-numeric, zero, or reversed verse
    #[error("invalid verse {input:?}: {message}")]
    InvalidVerse {
        input: String,
        message: String,
        #[source]
        source: Option<ParseIntError>,
    },

    /// Entity record rejected while building a table
    #[error("invalid entity record {input:?}: {message}")]
    InvalidEntity { input: String, message: String },

    /// One normalized alias claimed by two different entities
    #[error("alias {alias:?} maps to both {first} and {second}")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },

    /// Entity id registered twice
    #[error("entity id {0:?} registered more than once")]
    DuplicateId(String),

    /// Entity table JSON could not be decoded
    #[error("failed to load entity table: {0}")]
    Load(#[from] serde_json::Error),
}

/// Category of an [`Error`], for matching without destructuring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Parse,
    UnknownEntity,
    InvalidChapter,
    InvalidVerse,
    InvalidEntity,
    DuplicateAlias,
    DuplicateId,
    Load,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ErrorKind::Parse => write!(f, "parse"),
            ErrorKind::UnknownEntity => write!(f, "unknown-entity"),
            ErrorKind::InvalidChapter => write!(f, "invalid-chapter"),
            ErrorKind::InvalidVerse => write!(f, "invalid-verse"),
            ErrorKind::InvalidEntity => write!(f, "invalid-entity"),
            ErrorKind::DuplicateAlias => write!(f, "duplicate-alias"),
            ErrorKind::DuplicateId => write!(f, "duplicate-id"),
            ErrorKind::Load => write!(f, "load"),
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parse { .. } => ErrorKind::Parse,
            Error::UnknownEntity { .. } => ErrorKind::UnknownEntity,
            Error::InvalidChapter { .. } => ErrorKind::InvalidChapter,
            Error::InvalidVerse { .. } => ErrorKind::InvalidVerse,
            Error::InvalidEntity { .. } => ErrorKind::InvalidEntity,
            Error::DuplicateAlias { .. } => ErrorKind::DuplicateAlias,
            Error::DuplicateId(_) => ErrorKind::DuplicateId,
            Error::Load(_) => ErrorKind::Load,
        }
    }

    /// The input fragment the error refers to
    pub fn fragment(&self) -> &str {
        match self {
            Error::Parse { input, .. }
            | Error::UnknownEntity { input, .. }
            | Error::InvalidChapter { input, .. }
            | Error::InvalidVerse { input, .. }
            | Error::InvalidEntity { input, .. } => input,
            Error::DuplicateAlias { alias, .. } => alias,
            Error::DuplicateId(id) => id,
            Error::Load(_) => "",
        }
    }

    pub(crate) fn parse(input: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Parse {
            input: input.into(),
            message: message.into(),
        }
    }

    pub(crate) fn unknown_entity(input: impl Into<String>, message: impl Into<String>) -> Self {
        Error::UnknownEntity {
            input: input.into(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_chapter(input: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidChapter {
            input: input.into(),
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn invalid_verse(input: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidVerse {
            input: input.into(),
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn invalid_entity(input: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidEntity {
            input: input.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for canonref operations
pub type Result<T> = std::result::Result<T, Error>;
