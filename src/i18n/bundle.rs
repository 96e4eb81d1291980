// SPDX-License-Identifier: MPL-2.0
//! Translation bundles: nested JSON trees addressed by dot-path keys.

use crate::error::FetchError;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// The full set of translated strings for one language.
///
/// Always a JSON object at the top level. A bundle replaces the previous
/// one wholesale; bundles are never merged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TranslationBundle {
    root: Map<String, Value>,
}

impl TranslationBundle {
    /// A bundle where every lookup yields nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a translation file body. Anything but a JSON object is rejected.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FetchError> {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(root)) => Ok(Self { root }),
            Ok(other) => Err(FetchError::Decode(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
            Err(e) => Err(FetchError::Decode(e.to_string())),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Walks `path` segment by segment (split on `.`).
    ///
    /// Objects are entered by key and arrays by canonical decimal index
    /// (`projects.0.title`, not `projects.00.title`). Returns `None` as soon as a segment is missing,
    /// out of range, or the current value is a leaf.
    #[must_use]
    pub fn get_nested_property(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        segments.try_fold(self.root.get(first)?, |current, key| match current {
            Value::Object(map) => map.get(key),
            Value::Array(items) => key
                .parse::<usize>()
                .ok()
                .filter(|i| i.to_string() == key)
                .and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// Text usable for rewriting a node.
    ///
    /// Non-empty strings are returned as is; non-zero numbers and `true` are
    /// rendered as text. Empty strings, `0`, `false`, `null`, objects, arrays
    /// and missing keys yield `None`, which leaves the node untouched.
    #[must_use]
    pub fn text(&self, path: &str) -> Option<Cow<'_, str>> {
        match self.get_nested_property(path)? {
            Value::String(s) if !s.is_empty() => Some(Cow::Borrowed(s.as_str())),
            Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => {
                Some(Cow::Owned(n.to_string()))
            }
            Value::Bool(true) => Some(Cow::Borrowed("true")),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for TranslationBundle {
    fn from(root: Map<String, Value>) -> Self {
        Self { root }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bundle(value: Value) -> TranslationBundle {
        match value {
            Value::Object(map) => map.into(),
            _ => panic!("test bundles must be objects"),
        }
    }

    #[test]
    fn nested_lookup_walks_every_segment() {
        let b = bundle(json!({ "a": { "b": { "c": "x" } } }));
        assert_eq!(b.get_nested_property("a.b.c"), Some(&json!("x")));
        assert_eq!(b.text("a.b.c").as_deref(), Some("x"));
    }

    #[test]
    fn missing_segments_yield_nothing() {
        let b = TranslationBundle::empty();
        assert_eq!(b.get_nested_property("a.b"), None);

        let b = bundle(json!({ "user": { "profile": { "name": "Jane" } } }));
        assert_eq!(b.get_nested_property("missing.key"), None);
        assert_eq!(b.get_nested_property("user.profile.name.first"), None);
        assert_eq!(b.get_nested_property("user..name"), None);
    }

    #[test]
    fn intermediate_objects_are_returned_but_not_used_as_text() {
        let b = bundle(json!({ "nav": { "home": "Home" }, "items": ["a"], "blank": "" }));
        assert!(b.get_nested_property("nav").is_some_and(Value::is_object));
        assert_eq!(b.text("nav"), None);
        assert_eq!(b.text("items"), None);
        assert_eq!(b.text("blank"), None);
        assert_eq!(b.text("nav.home").as_deref(), Some("Home"));
    }

    #[test]
    fn array_segments_index_by_position() {
        let b = TranslationBundle::from_slice(
            br#"{"projects":[{"title":"Alpha"},{"title":"Beta","tags":["rust","wasm"]}]}"#,
        )
        .expect("object parses");
        assert_eq!(b.text("projects.0.title").as_deref(), Some("Alpha"));
        assert_eq!(b.text("projects.1.tags.1").as_deref(), Some("wasm"));
        assert_eq!(b.text("projects.2.title"), None);
        assert_eq!(b.text("projects.first.title"), None);
        assert_eq!(b.text("projects.-1.title"), None);
        assert_eq!(b.text("projects.01.title"), None);
    }

    #[test]
    fn truthy_scalars_render_as_text() {
        let b = bundle(json!({
            "year": 2024,
            "ratio": 1.5,
            "zero": 0,
            "yes": true,
            "no": false,
            "nothing": null
        }));
        assert_eq!(b.text("year").as_deref(), Some("2024"));
        assert_eq!(b.text("ratio").as_deref(), Some("1.5"));
        assert_eq!(b.text("yes").as_deref(), Some("true"));
        assert_eq!(b.text("zero"), None);
        assert_eq!(b.text("no"), None);
        assert_eq!(b.text("nothing"), None);
    }

    #[test]
    fn from_slice_accepts_objects_only() {
        let b = TranslationBundle::from_slice(br#"{"title":"T"}"#).expect("object parses");
        assert_eq!(b.text("title").as_deref(), Some("T"));

        assert!(matches!(
            TranslationBundle::from_slice(b"[1,2]"),
            Err(FetchError::Decode(_))
        ));
        assert!(matches!(
            TranslationBundle::from_slice(b"<html>404</html>"),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn empty_bundle_reports_empty() {
        assert!(TranslationBundle::empty().is_empty());
        assert!(!bundle(json!({ "title": "x" })).is_empty());
    }
}
