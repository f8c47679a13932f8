//! Designator resolution — the seam between the shared pipeline and a
//! particular reference kind.

use crate::Result;

/// Per-entity facts the validator and formatter need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds<'a> {
    pub id: &'a str,
    pub display_name: &'a str,
    pub max_chapter: u32,
}

/// A read-only source of entities that references can point into.
///
/// Implemented by [`crate::Table`] (data-driven alias table) and
/// [`crate::Sections`] (fixed section enum).
pub trait Registry {
    /// Map a raw head (`"II Kings"`, `"prov."`) to a canonical id.
    ///
    /// # Errors
    /// `UnknownEntity` when neither an alias nor a literal id matches.
    fn resolve(&self, head: &str) -> Result<&str>;

    /// Bounds for a canonical id, `None` if the id is not registered.
    fn bounds(&self, id: &str) -> Option<Bounds<'_>>;
}

impl<R: Registry + ?Sized> Registry for &R {
    fn resolve(&self, head: &str) -> Result<&str> {
        (**self).resolve(head)
    }

    fn bounds(&self, id: &str) -> Option<Bounds<'_>> {
        (**self).bounds(id)
    }
}
