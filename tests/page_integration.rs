// SPDX-License-Identifier: MPL-2.0
//! Integration tests for the page: initial load, dropdown interaction and
//! overlapping language selections.

use lang_selector::app::storage::{MemoryStore, PreferenceStore, LANGUAGE_KEY};
use lang_selector::dom::{Document, ElementId};
use lang_selector::error::FetchError;
use lang_selector::i18n::applier::{Translator, TEXT_ATTR};
use lang_selector::i18n::loader::{BundleSource, MemorySource};
use lang_selector::i18n::locale::FixedLocale;
use lang_selector::i18n::Language;
use lang_selector::ui::lang_selector::{
    DropdownState, LABEL_ID, OPEN_CLASS, OPTIONS_ID, OPTION_CLASS, ROOT_CLASS, SELECTED_CLASS,
    TRIGGER_ID, VALUE_ATTR,
};
use lang_selector::ui::page::Page;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tokio::sync::Semaphore;
use tokio::task::LocalSet;

const EN: &str = r#"{"title":"Portfolio","metaDescription":"My work","role":"Developer"}"#;
const ES: &str = r#"{"title":"Título","metaDescription":"Mi trabajo","role":"Desarrollador"}"#;
const FR: &str = r#"{"title":"Titre","metaDescription":"Mon travail","role":"Développeur"}"#;
const PT: &str = r#"{"title":"Título PT","metaDescription":"Meu trabalho","role":"Desenvolvedor"}"#;

/// Serves a [`MemorySource`], holding each language's fetch until its gate opens.
struct GatedSource {
    inner: MemorySource,
    gates: HashMap<Language, Rc<Semaphore>>,
}

impl GatedSource {
    fn new(inner: MemorySource) -> Self {
        let gates = Language::ALL
            .into_iter()
            .map(|lang| (lang, Rc::new(Semaphore::new(0))))
            .collect();
        Self { inner, gates }
    }

    fn release(&self, lang: Language) {
        self.gates[&lang].add_permits(1);
    }
}

impl BundleSource for GatedSource {
    async fn fetch(&self, lang: Language) -> Result<Vec<u8>, FetchError> {
        let gate = Rc::clone(&self.gates[&lang]);
        gate.acquire()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?
            .forget();
        self.inner.fetch(lang).await
    }
}

fn all_bundles() -> MemorySource {
    MemorySource::new()
        .with_file(Language::En, EN)
        .with_file(Language::Es, ES)
        .with_file(Language::Fr, FR)
        .with_file(Language::Pt, PT)
}

struct Elements {
    trigger: ElementId,
    label: ElementId,
    options: HashMap<Language, ElementId>,
    role: ElementId,
    outside: ElementId,
}

fn page_document() -> (Document, Elements) {
    let mut doc = Document::new();
    let head = doc.head();
    doc.set_title("Test");
    for (attr, value) in [
        ("name", "description"),
        ("property", "og:title"),
        ("property", "og:description"),
    ] {
        let meta = doc.create_element(head, "meta");
        doc.element_mut(meta)
            .set_attribute(attr, value)
            .set_attribute("content", "Test");
    }

    let body = doc.body();
    let header = doc.create_element(body, "header");
    let root = doc.create_element(header, "div");
    doc.element_mut(root).add_class(ROOT_CLASS);
    let trigger = doc.create_element(root, "div");
    doc.element_mut(trigger).set_attribute("id", TRIGGER_ID);
    let label = doc.create_element(trigger, "span");
    doc.element_mut(label).set_attribute("id", LABEL_ID);
    doc.set_text_content(label, "English");
    let list = doc.create_element(root, "div");
    doc.element_mut(list).set_attribute("id", OPTIONS_ID);
    let mut options = HashMap::new();
    for lang in Language::ALL {
        let option = doc.create_element(list, "div");
        doc.element_mut(option)
            .add_class(OPTION_CLASS)
            .set_attribute(VALUE_ATTR, lang.code());
        doc.set_text_content(option, lang.display_name());
        options.insert(lang, option);
    }

    let main = doc.create_element(body, "main");
    let role = doc.create_element(main, "p");
    doc.element_mut(role).set_attribute(TEXT_ATTR, "role");
    doc.set_text_content(role, "X");

    (
        doc,
        Elements {
            trigger,
            label,
            options,
            role,
            outside: main,
        },
    )
}

type TestTranslator<S> = Translator<S, MemoryStore, FixedLocale>;

fn setup<S: BundleSource + 'static>(
    source: S,
    store: MemoryStore,
) -> (Page<TestTranslator<S>>, Rc<TestTranslator<S>>, Elements) {
    let (doc, elements) = page_document();
    let document = Rc::new(RefCell::new(doc));
    let translator = Rc::new(Translator::new(
        source,
        store,
        FixedLocale::new("en-US"),
        Rc::clone(&document),
    ));
    let page = Page::new(document, Rc::clone(&translator)).expect("page markup is complete");
    (page, translator, elements)
}

async fn settle() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

fn is_open<S: BundleSource + 'static>(page: &Page<TestTranslator<S>>) -> bool {
    let doc = page.document().borrow();
    let root = page.selector().elements().root;
    doc.element(root).has_class(OPEN_CLASS)
}

#[tokio::test]
async fn apply_language_translates_document_and_persists_choice() {
    let (page, translator, el) = setup(all_bundles(), MemoryStore::default());

    translator.apply(Language::Es).await;

    let doc = page.document().borrow();
    assert_eq!(doc.text_content(el.role), "Desarrollador");
    assert_eq!(doc.title(), "Título");
    assert_eq!(
        translator.store().get(LANGUAGE_KEY),
        Some("es".to_string())
    );
}

#[tokio::test]
async fn ready_applies_stored_language_once() {
    let store = MemoryStore::with_entry(LANGUAGE_KEY, "fr");
    let (page, translator, el) = setup(all_bundles(), store);

    {
        let doc = page.document().borrow();
        assert_eq!(doc.text_content(el.label), "Français");
        assert_eq!(doc.text_content(el.role), "X");
    }
    assert!(translator.source().requests().is_empty());

    page.ready().await;

    assert_eq!(translator.source().requests(), vec![Language::Fr]);
    let doc = page.document().borrow();
    assert_eq!(doc.text_content(el.role), "Développeur");
    assert_eq!(doc.element(doc.root()).attribute("lang"), Some("fr"));
}

#[tokio::test]
async fn ready_with_unavailable_files_keeps_existing_content() {
    let (page, translator, el) = setup(MemorySource::new(), MemoryStore::default());

    page.ready().await;

    let doc = page.document().borrow();
    assert_eq!(doc.text_content(el.role), "X");
    assert_eq!(doc.title(), "Test");
    assert_eq!(translator.source().requests(), vec![Language::En]);
}

#[tokio::test]
async fn trigger_toggles_twice_back_to_closed() {
    let (mut page, _translator, el) = setup(all_bundles(), MemoryStore::default());
    assert!(!is_open(&page));

    assert!(page.click(el.trigger).is_none());
    assert!(is_open(&page));

    assert!(page.click(el.label).is_none());
    assert!(!is_open(&page));
    assert_eq!(page.selector().state(), DropdownState::Closed);
}

#[tokio::test]
async fn outside_click_closes_open_dropdown() {
    let (mut page, _translator, el) = setup(all_bundles(), MemoryStore::default());

    page.click(el.trigger);
    assert!(is_open(&page));

    page.click(el.outside);
    assert!(!is_open(&page));

    // Closed stays closed.
    page.click(el.outside);
    assert!(!is_open(&page));
}

#[tokio::test]
async fn trigger_click_is_not_undone_by_document_handler() {
    let (mut page, _translator, el) = setup(all_bundles(), MemoryStore::default());

    page.click(el.trigger);
    assert!(is_open(&page), "opening click must not also dismiss");

    page.click(el.trigger);
    assert!(!is_open(&page), "closing click must not reopen");
}

#[tokio::test]
async fn selection_updates_ui_before_fetch_resolves() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let (mut page, translator, el) =
                setup(GatedSource::new(all_bundles()), MemoryStore::default());

            page.click(el.trigger);
            let handle = page
                .click(el.options[&Language::Es])
                .expect("option click spawns an apply");

            {
                let doc = page.document().borrow();
                assert!(!is_open(&page));
                assert_eq!(doc.text_content(el.label), "Español");
                let selected = doc.query_class(SELECTED_CLASS);
                assert_eq!(selected, vec![el.options[&Language::Es]]);
                assert_eq!(doc.text_content(el.role), "X");
            }

            settle().await;
            assert_eq!(page.document().borrow().text_content(el.role), "X");
            assert_eq!(translator.store().get(LANGUAGE_KEY), None);

            translator.source().release(Language::Es);
            handle.await.expect("apply task completes");

            let doc = page.document().borrow();
            assert_eq!(doc.text_content(el.role), "Desarrollador");
            assert_eq!(doc.title(), "Título");
            assert_eq!(translator.store().get(LANGUAGE_KEY), Some("es".to_string()));
        })
        .await;
}

#[tokio::test]
async fn latest_selection_wins_when_fetches_complete_out_of_order() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let (mut page, translator, el) =
                setup(GatedSource::new(all_bundles()), MemoryStore::default());

            page.click(el.trigger);
            let first = page.click(el.options[&Language::Es]).expect("es apply");
            settle().await;
            page.click(el.trigger);
            let second = page.click(el.options[&Language::Fr]).expect("fr apply");
            settle().await;

            translator.source().release(Language::Fr);
            second.await.expect("fr apply completes");
            translator.source().release(Language::Es);
            first.await.expect("es apply completes");

            let doc = page.document().borrow();
            assert_eq!(doc.text_content(el.role), "Développeur");
            assert_eq!(doc.text_content(el.label), "Français");
            assert_eq!(translator.store().get(LANGUAGE_KEY), Some("fr".to_string()));
            assert_eq!(translator.state().language, Language::Fr);
        })
        .await;
}

#[tokio::test]
async fn selection_during_initial_load_overrides_it() {
    let local = LocalSet::new();
    local
        .run_until(async {
            let (mut page, translator, el) =
                setup(GatedSource::new(all_bundles()), MemoryStore::default());

            let initial = {
                let translator = Rc::clone(&translator);
                tokio::task::spawn_local(async move {
                    translator.initialize().await;
                })
            };
            settle().await;

            page.click(el.trigger);
            let selection = page.click(el.options[&Language::Pt]).expect("pt apply");
            settle().await;

            translator.source().release(Language::En);
            initial.await.expect("initial load completes");
            assert_eq!(page.document().borrow().text_content(el.role), "X");

            translator.source().release(Language::Pt);
            selection.await.expect("pt apply completes");

            let doc = page.document().borrow();
            assert_eq!(doc.text_content(el.role), "Desenvolvedor");
            assert_eq!(translator.store().get(LANGUAGE_KEY), Some("pt".to_string()));
        })
        .await;
}
