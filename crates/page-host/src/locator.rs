//! Element lookup
//!
//! The narrow interface a host exposes instead of a global document: find
//! elements by marker class, read their inner markup, write it back.

use serde::{Deserialize, Serialize};

/// Identifier of an element on the page
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create an element id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Access to the elements of a page
pub trait ElementLocator {
    /// Elements carrying the marker class, in document order
    fn find_marked(&self, marker: &str) -> Vec<ElementId>;

    /// Serialized inner markup of an element
    fn inner_html(&self, id: &ElementId) -> Option<String>;

    /// Replace the inner markup of an element
    ///
    /// Returns `false` if no element has this id.
    fn set_inner_html(&mut self, id: &ElementId, html: String) -> bool;

    /// Replace an element and its content with freshly rendered markup
    ///
    /// The new markup keeps answering to `id`. Returns `false` if no element
    /// has this id.
    fn replace_fragment(&mut self, id: &ElementId, html: String) -> bool;
}
