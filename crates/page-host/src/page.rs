//! In-memory page
//!
//! A flat list of elements with ids, classes and inner markup. Used by
//! server-side hosts that assemble pages before sending them, and by tests.

use crate::locator::{ElementId, ElementLocator};
use serde::{Deserialize, Serialize};

/// One element of a [`StaticPage`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Element id
    pub id: ElementId,
    /// Class names
    #[serde(default)]
    pub classes: Vec<String>,
    /// Inner markup
    #[serde(default)]
    pub inner_html: String,
}

impl Element {
    /// Create an element without classes
    pub fn new(id: impl Into<ElementId>, inner_html: impl Into<String>) -> Self {
        Self { id: id.into(), classes: Vec::new(), inner_html: inner_html.into() }
    }

    /// Add a class
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Check if the element carries a class
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Page held entirely in memory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticPage {
    elements: Vec<Element>,
}

impl StaticPage {
    /// Create an empty page
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element, builder style
    pub fn with_element(mut self, element: Element) -> Self {
        self.push(element);
        self
    }

    /// Append an element
    ///
    /// An element with an id already on the page replaces the earlier one.
    pub fn push(&mut self, element: Element) {
        match self.elements.iter_mut().find(|e| e.id == element.id) {
            Some(existing) => *existing = element,
            None => self.elements.push(element),
        }
    }

    /// Look up an element
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Inner markup of an element, by id string
    pub fn html(&self, id: &str) -> Option<&str> {
        self.elements.iter().find(|e| e.id.as_str() == id).map(|e| e.inner_html.as_str())
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the page has no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl ElementLocator for StaticPage {
    fn find_marked(&self, marker: &str) -> Vec<ElementId> {
        self.elements.iter().filter(|e| e.has_class(marker)).map(|e| e.id.clone()).collect()
    }

    fn inner_html(&self, id: &ElementId) -> Option<String> {
        self.element(id).map(|e| e.inner_html.clone())
    }

    fn set_inner_html(&mut self, id: &ElementId, html: String) -> bool {
        match self.elements.iter_mut().find(|e| &e.id == id) {
            Some(element) => {
                element.inner_html = html;
                true
            }
            None => false,
        }
    }

    // No element tree is kept, so the fragment becomes the content of the
    // element it replaces.
    fn replace_fragment(&mut self, id: &ElementId, html: String) -> bool {
        self.set_inner_html(id, html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> StaticPage {
        StaticPage::new()
            .with_element(Element::new("a", "one").with_class("embeds"))
            .with_element(Element::new("b", "two"))
            .with_element(Element::new("c", "three").with_class("embeds").with_class("mentionable"))
    }

    #[test]
    fn test_find_marked_in_document_order() {
        let page = page();
        assert_eq!(page.find_marked("embeds"), vec![ElementId::new("a"), ElementId::new("c")]);
        assert_eq!(page.find_marked("mentionable"), vec![ElementId::new("c")]);
        assert!(page.find_marked("missing").is_empty());
    }

    #[test]
    fn test_set_inner_html() {
        let mut page = page();
        assert!(page.set_inner_html(&"b".into(), "changed".to_string()));
        assert_eq!(page.html("b"), Some("changed"));
        assert!(!page.set_inner_html(&"zzz".into(), "x".to_string()));
    }

    #[test]
    fn test_replace_fragment_keeps_id_and_classes() {
        let mut page = page();
        assert!(page.replace_fragment(&"c".into(), "<nav>new</nav>".to_string()));
        let element = page.element(&"c".into()).unwrap();
        assert_eq!(element.inner_html, "<nav>new</nav>");
        assert!(element.has_class("mentionable"));
        assert!(!page.replace_fragment(&"zzz".into(), String::new()));
    }

    #[test]
    fn test_push_replaces_same_id() {
        let mut page = page();
        page.push(Element::new("a", "replaced"));
        assert_eq!(page.len(), 3);
        assert_eq!(page.html("a"), Some("replaced"));
        assert!(!page.element(&"a".into()).unwrap().has_class("embeds"));
    }

    #[test]
    fn test_page_from_json() {
        let page: StaticPage = serde_json::from_str(
            r#"{"elements": [{"id": "post", "classes": ["embeds"], "innerHtml": "[vimeo]1[/vimeo]"}]}"#,
        )
        .unwrap();
        assert_eq!(page.html("post"), Some("[vimeo]1[/vimeo]"));
        assert_eq!(page.find_marked("embeds"), vec![ElementId::new("post")]);
    }
}
