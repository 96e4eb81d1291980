// SPDX-License-Identifier: MPL-2.0
//! Applies a language to the host document.
//!
//! [`Translator`] owns everything the page's translation flow touches: the
//! bundle source, the preference store, the locale signal, a handle to the
//! shared document and the current [`TranslationState`]. Document borrows
//! are never held across the fetch, so the initial load and a selection made
//! from the dropdown can interleave safely on a single-threaded executor.
//!
//! When two applications overlap, the most recently *requested* language
//! wins: an application whose fetch completes after a newer request was made
//! is discarded without touching storage or the document.

use super::bundle::TranslationBundle;
use super::loader::{load_bundle, BundleSource};
use super::locale::LocaleSource;
use super::{resolve_current_language, Language};
use crate::app::storage::{PreferenceStore, LANGUAGE_KEY};
use crate::dom::{Document, ElementId};
use std::borrow::Cow;
use std::cell::{Cell, Ref, RefCell};
use std::future::Future;
use std::rc::Rc;

/// Attribute naming the key whose text replaces the element's content.
pub const TEXT_ATTR: &str = "data-translate";
/// Attribute naming the key whose text replaces the element's `alt`.
pub const ALT_ATTR: &str = "data-translate-alt";
/// Attribute naming the key whose raw markup replaces the element's content.
pub const HTML_ATTR: &str = "data-translate-html";

/// Top-level bundle key used for the page title.
pub const TITLE_KEY: &str = "title";
/// Top-level bundle key used for the description meta tags.
pub const DESCRIPTION_KEY: &str = "metaDescription";

/// The operations the language selector needs from the translator.
pub trait LanguageService {
    /// The language the page should currently show.
    fn current_language(&self) -> Language;

    /// Loads, persists and applies `lang`.
    fn apply_language(&self, lang: Language) -> impl Future<Output = ()>;
}

/// The language last applied and its bundle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationState {
    pub language: Language,
    pub bundle: TranslationBundle,
}

/// Result of a single [`Translator::apply`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// A newer request was made while this one was fetching.
    Superseded,
}

pub struct Translator<S, P, L> {
    source: S,
    store: RefCell<P>,
    locale: L,
    document: Rc<RefCell<Document>>,
    state: RefCell<TranslationState>,
    latest_request: Cell<u64>,
}

impl<S, P, L> Translator<S, P, L>
where
    S: BundleSource,
    P: PreferenceStore,
    L: LocaleSource,
{
    pub fn new(source: S, store: P, locale: L, document: Rc<RefCell<Document>>) -> Self {
        Self {
            source,
            store: RefCell::new(store),
            locale,
            document,
            state: RefCell::new(TranslationState::default()),
            latest_request: Cell::new(0),
        }
    }

    #[must_use]
    pub fn document(&self) -> &Rc<RefCell<Document>> {
        &self.document
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub fn store(&self) -> Ref<'_, P> {
        self.store.borrow()
    }

    /// Stored preference, else host locale, else English.
    #[must_use]
    pub fn current_language(&self) -> Language {
        resolve_current_language(&*self.store.borrow(), &self.locale)
    }

    /// The last applied language and bundle.
    #[must_use]
    pub fn state(&self) -> Ref<'_, TranslationState> {
        self.state.borrow()
    }

    /// Looks up `key` in the current bundle.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        self.state.borrow().bundle.text(key).map(Cow::into_owned)
    }

    /// Document-ready hook: resolves the current language and applies it.
    pub async fn initialize(&self) -> ApplyOutcome {
        self.apply(self.current_language()).await
    }

    /// Loads the bundle for `lang`, persists the choice and rewrites the document.
    ///
    /// The choice is persisted even when the bundle came from the English
    /// fallback or is empty.
    pub async fn apply(&self, lang: Language) -> ApplyOutcome {
        let request = self.latest_request.get() + 1;
        self.latest_request.set(request);

        let bundle = load_bundle(&self.source, lang).await;

        if request != self.latest_request.get() {
            log::debug!("Discarding translations for {lang}: a newer language was requested");
            return ApplyOutcome::Superseded;
        }

        if let Err(err) = self.store.borrow_mut().set(LANGUAGE_KEY, lang.code()) {
            log::warn!("Failed to persist language {lang}: {err}");
        }

        {
            let mut document = self.document.borrow_mut();
            update_document_meta(&mut document, lang, &bundle);
            update_translations(&mut document, &bundle);
        }

        log::info!("Applied language {lang}");
        *self.state.borrow_mut() = TranslationState {
            language: lang,
            bundle,
        };
        ApplyOutcome::Applied
    }
}

impl<S, P, L> LanguageService for Translator<S, P, L>
where
    S: BundleSource,
    P: PreferenceStore,
    L: LocaleSource,
{
    fn current_language(&self) -> Language {
        Translator::current_language(self)
    }

    async fn apply_language(&self, lang: Language) {
        self.apply(lang).await;
    }
}

/// Meta tags written by [`update_document_meta`], as `(attribute, value)` pairs.
pub const META_TAGS: [(&str, &str); 3] = [
    ("property", "og:title"),
    ("name", "description"),
    ("property", "og:description"),
];

/// A blank document whose head carries every tag in [`META_TAGS`].
#[must_use]
pub fn document_with_meta() -> Document {
    let mut document = Document::new();
    let head = document.head();
    for (attr, value) in META_TAGS {
        let meta = document.create_element(head, "meta");
        document.element_mut(meta).set_attribute(attr, value);
    }
    document
}

/// Sets the title, description/social meta tags and the root `lang` attribute.
///
/// Metadata whose bundle key is absent is left as is. Missing meta tags are
/// skipped with a warning.
pub fn update_document_meta(document: &mut Document, lang: Language, bundle: &TranslationBundle) {
    if let Some(title) = bundle.text(TITLE_KEY) {
        document.set_title(&title);
        set_meta_content(document, "property", "og:title", &title);
    }

    if let Some(description) = bundle.text(DESCRIPTION_KEY) {
        set_meta_content(document, "name", "description", &description);
        set_meta_content(document, "property", "og:description", &description);
    }

    let root = document.root();
    document.element_mut(root).set_attribute("lang", lang.code());
}

fn set_meta_content(document: &mut Document, attr: &str, value: &str, content: &str) {
    match document.meta_tag(attr, value) {
        Some(meta) => {
            document.element_mut(meta).set_attribute("content", content);
        }
        None => log::warn!("Document has no meta[{attr}=\"{value}\"] tag"),
    }
}

/// Rewrites every element bound to a bundle key.
///
/// Elements whose key has no text in `bundle` keep their current content.
pub fn update_translations(document: &mut Document, bundle: &TranslationBundle) {
    for id in document.query_attribute(TEXT_ATTR) {
        if let Some(value) = bound_text(document, id, TEXT_ATTR, bundle) {
            document.set_text_content(id, &value);
        }
    }

    for id in document.query_attribute(ALT_ATTR) {
        if let Some(value) = bound_text(document, id, ALT_ATTR, bundle) {
            document.element_mut(id).set_attribute("alt", &value);
        }
    }

    for id in document.query_attribute(HTML_ATTR) {
        if let Some(value) = bound_text(document, id, HTML_ATTR, bundle) {
            document.set_inner_html(id, &value);
        }
    }
}

fn bound_text(
    document: &Document,
    id: ElementId,
    attr: &str,
    bundle: &TranslationBundle,
) -> Option<String> {
    let key = document.element(id).attribute(attr)?;
    bundle.text(key).map(Cow::into_owned)
}
