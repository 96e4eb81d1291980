// SPDX-License-Identifier: MPL-2.0
//! Elements stored in a [`Document`](super::Document) arena.

use std::collections::BTreeMap;

/// Handle to an element inside a [`Document`](super::Document).
///
/// Handles are only meaningful for the document that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(super) usize);

/// A single element: tag, attributes, classes and its own content.
///
/// Classes are tracked separately from attributes, so `attribute("class")`
/// is always `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    pub(super) parent: Option<ElementId>,
    pub(super) children: Vec<ElementId>,
    pub(super) text: String,
    pub(super) markup: Option<String>,
}

impl Element {
    pub(super) fn new(tag: &str, parent: Option<ElementId>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            parent,
            children: Vec::new(),
            text: String::new(),
            markup: None,
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) -> &mut Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn remove_attribute(&mut self, name: &str) -> &mut Self {
        self.attributes.remove(name);
        self
    }

    /// The `id` attribute, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) -> &mut Self {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
        self
    }

    pub fn remove_class(&mut self, class: &str) -> &mut Self {
        self.classes.retain(|c| c != class);
        self
    }

    /// Flips `class` and returns whether it is present afterwards.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }
}
