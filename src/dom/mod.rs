// SPDX-License-Identifier: MPL-2.0
//! In-memory host document.
//!
//! A small arena-backed element tree that stands in for the browser DOM.
//! It offers exactly the operations the translator and the language
//! selector need: id/class/attribute queries in document order, meta tag
//! lookup, title access, content replacement and ancestry checks for click
//! propagation.
//!
//! Elements removed by a content replacement stay in the arena but are
//! detached from the tree, so queries never see them again.

mod element;

pub use element::{Element, ElementId};

#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    root: ElementId,
    head: ElementId,
    body: ElementId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty `<html><head></head><body></body></html>` document.
    #[must_use]
    pub fn new() -> Self {
        let mut doc = Self {
            elements: vec![Element::new("html", None)],
            root: ElementId(0),
            head: ElementId(0),
            body: ElementId(0),
        };
        doc.head = doc.create_element(doc.root, "head");
        doc.body = doc.create_element(doc.root, "body");
        doc
    }

    /// The `<html>` element.
    #[must_use]
    pub fn root(&self) -> ElementId {
        self.root
    }

    #[must_use]
    pub fn head(&self) -> ElementId {
        self.head
    }

    #[must_use]
    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Appends a new element to `parent` and returns its handle.
    pub fn create_element(&mut self, parent: ElementId, tag: &str) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element::new(tag, Some(parent)));
        let parent = &mut self.elements[parent.0];
        // Appending children drops raw markup in favour of real nodes.
        parent.markup = None;
        parent.children.push(id);
        id
    }

    #[must_use]
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    /// All attached elements matching `predicate`, in document order.
    pub fn query(&self, predicate: impl Fn(&Element) -> bool) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let el = &self.elements[id.0];
            if predicate(el) {
                found.push(id);
            }
            stack.extend(el.children.iter().rev());
        }
        found
    }

    /// First attached element matching `predicate`, in document order.
    pub fn query_first(&self, predicate: impl Fn(&Element) -> bool) -> Option<ElementId> {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let el = &self.elements[id.0];
            if predicate(el) {
                return Some(id);
            }
            stack.extend(el.children.iter().rev());
        }
        None
    }

    #[must_use]
    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.query_first(|el| el.id() == Some(id))
    }

    /// Elements carrying `name` as an attribute (`[name]` selector).
    #[must_use]
    pub fn query_attribute(&self, name: &str) -> Vec<ElementId> {
        self.query(|el| el.has_attribute(name))
    }

    /// Elements carrying `class` (`.class` selector).
    #[must_use]
    pub fn query_class(&self, class: &str) -> Vec<ElementId> {
        self.query(|el| el.has_class(class))
    }

    /// `meta[<attr>="<value>"]`, e.g. `meta_tag("property", "og:title")`.
    #[must_use]
    pub fn meta_tag(&self, attr: &str, value: &str) -> Option<ElementId> {
        self.query_first(|el| el.tag() == "meta" && el.attribute(attr) == Some(value))
    }

    /// Text of the first `<title>` element, or an empty string.
    #[must_use]
    pub fn title(&self) -> String {
        self.query_first(|el| el.tag() == "title")
            .map(|id| self.text_content(id))
            .unwrap_or_default()
    }

    /// Replaces the text of the first `<title>`, creating one in `<head>` when absent.
    pub fn set_title(&mut self, title: &str) {
        let id = match self.query_first(|el| el.tag() == "title") {
            Some(id) => id,
            None => self.create_element(self.head, "title"),
        };
        self.set_text_content(id, title);
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    #[must_use]
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.elements[id.0].parent;
        }
        false
    }

    /// Concatenated text of `id` and its descendants.
    ///
    /// Raw markup is reported with its tags stripped.
    #[must_use]
    pub fn text_content(&self, id: ElementId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: ElementId, out: &mut String) {
        let el = &self.elements[id.0];
        if let Some(markup) = &el.markup {
            out.push_str(&strip_tags(markup));
            return;
        }
        out.push_str(&el.text);
        for child in &el.children {
            self.collect_text(*child, out);
        }
    }

    /// Replaces all content of `id` with plain text.
    pub fn set_text_content(&mut self, id: ElementId, text: &str) {
        self.detach_children(id);
        let el = &mut self.elements[id.0];
        el.markup = None;
        el.text = text.to_string();
    }

    /// Raw markup previously assigned with [`Document::set_inner_html`].
    #[must_use]
    pub fn inner_html(&self, id: ElementId) -> Option<&str> {
        self.elements[id.0].markup.as_deref()
    }

    /// Replaces all content of `id` with raw markup, stored verbatim.
    pub fn set_inner_html(&mut self, id: ElementId, markup: &str) {
        self.detach_children(id);
        let el = &mut self.elements[id.0];
        el.text.clear();
        el.markup = Some(markup.to_string());
    }

    fn detach_children(&mut self, id: ElementId) {
        let children = std::mem::take(&mut self.elements[id.0].children);
        for child in children {
            self.elements[child.0].parent = None;
        }
    }
}

fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
