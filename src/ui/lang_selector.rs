// SPDX-License-Identifier: MPL-2.0
//! Language selector dropdown.
//!
//! Drives the language picker found in the page header:
//!
//! ```text
//! <div class="lang-selector">
//!   <div id="languageTrigger"><span id="selectedLanguage">English</span></div>
//!   <div id="languageOptions">
//!     <div class="lang-selector__option" data-value="en">English</div>
//!     ...
//!   </div>
//! </div>
//! ```
//!
//! The open/closed state is mirrored on the root element's classes. Picking
//! an option updates the selection, the label and the open state right away
//! and hands back the (not yet started) language application as an
//! [`Action`], so visual feedback never waits on the network.

use crate::dom::{Document, ElementId};
use crate::error::{Error, Result};
use crate::i18n::applier::LanguageService;
use crate::i18n::Language;
use futures_util::future::{FutureExt, LocalBoxFuture};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub const ROOT_CLASS: &str = "lang-selector";
pub const OPEN_CLASS: &str = "lang-selector--open";
pub const OPTION_CLASS: &str = "lang-selector__option";
pub const SELECTED_CLASS: &str = "lang-selector__option--selected";
pub const TRIGGER_ID: &str = "languageTrigger";
pub const OPTIONS_ID: &str = "languageOptions";
pub const LABEL_ID: &str = "selectedLanguage";
/// Attribute carrying an option's language code.
pub const VALUE_ATTR: &str = "data-value";

// =============================================================================
// Messages
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropdownState {
    #[default]
    Closed,
    Open,
}

/// Messages handled by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// The trigger was clicked. Toggles the dropdown.
    TriggerClicked,
    /// A click reached the document. Closes the dropdown.
    DocumentClicked,
    /// A click landed on (or inside) an option element.
    OptionClicked(ElementId),
}

/// Follow-up work requested by [`LanguageSelector::update`].
pub enum Action {
    None,
    /// Apply `language`; `task` must be driven to completion by the caller.
    ApplyLanguage {
        language: Language,
        task: LocalBoxFuture<'static, ()>,
    },
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::None => f.write_str("None"),
            Action::ApplyLanguage { language, .. } => f
                .debug_struct("ApplyLanguage")
                .field("language", language)
                .finish_non_exhaustive(),
        }
    }
}

// =============================================================================
// State
// =============================================================================

/// The DOM elements the selector is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorElements {
    pub root: ElementId,
    pub trigger: ElementId,
    pub options: ElementId,
    pub label: ElementId,
}

impl SelectorElements {
    /// Locates the selector's elements, failing on the first one missing.
    pub fn find(document: &Document) -> Result<Self> {
        let root = document
            .query_class(ROOT_CLASS)
            .first()
            .copied()
            .ok_or_else(|| Error::MissingElement(format!(".{ROOT_CLASS}")))?;
        let by_id = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| Error::MissingElement(format!("#{id}")))
        };
        Ok(Self {
            root,
            trigger: by_id(TRIGGER_ID)?,
            options: by_id(OPTIONS_ID)?,
            label: by_id(LABEL_ID)?,
        })
    }
}

pub struct LanguageSelector<S> {
    document: Rc<RefCell<Document>>,
    service: Rc<S>,
    elements: SelectorElements,
    state: DropdownState,
    selected: Language,
}

impl<S> LanguageSelector<S>
where
    S: LanguageService + 'static,
{
    /// Binds to the selector markup and shows the current language.
    ///
    /// No translation is fetched here; the page's initial load does that.
    pub fn attach(document: Rc<RefCell<Document>>, service: Rc<S>) -> Result<Self> {
        let elements = SelectorElements::find(&document.borrow())?;
        let current = service.current_language();

        let selector = Self {
            document,
            service,
            elements,
            state: DropdownState::Closed,
            selected: current,
        };

        {
            let mut doc = selector.document.borrow_mut();
            doc.element_mut(elements.root).remove_class(OPEN_CLASS);
            selector.show_selection(&mut doc, current);
        }
        Ok(selector)
    }

    #[must_use]
    pub fn elements(&self) -> SelectorElements {
        self.elements
    }

    #[must_use]
    pub fn state(&self) -> DropdownState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == DropdownState::Open
    }

    /// The language shown in the label.
    #[must_use]
    pub fn selected(&self) -> Language {
        self.selected
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::TriggerClicked => {
                let open = self.state == DropdownState::Closed;
                self.set_open(open);
                Action::None
            }
            Message::DocumentClicked => {
                if self.is_open() {
                    self.set_open(false);
                }
                Action::None
            }
            Message::OptionClicked(target) => {
                let Some(language) = self.option_language(target) else {
                    return Action::None;
                };
                {
                    let mut doc = self.document.borrow_mut();
                    self.show_selection(&mut doc, language);
                }
                self.selected = language;
                self.set_open(false);

                let service = Rc::clone(&self.service);
                Action::ApplyLanguage {
                    language,
                    task: async move { service.apply_language(language).await }.boxed_local(),
                }
            }
        }
    }

    fn set_open(&mut self, open: bool) {
        self.state = if open {
            DropdownState::Open
        } else {
            DropdownState::Closed
        };
        let mut doc = self.document.borrow_mut();
        let root = doc.element_mut(self.elements.root);
        if open {
            root.add_class(OPEN_CLASS);
        } else {
            root.remove_class(OPEN_CLASS);
        }
    }

    /// Marks the option for `language` as selected and updates the label.
    fn show_selection(&self, doc: &mut Document, language: Language) {
        for option in doc.query_class(OPTION_CLASS) {
            let el = doc.element_mut(option);
            if el.attribute(VALUE_ATTR) == Some(language.code()) {
                el.add_class(SELECTED_CLASS);
            } else {
                el.remove_class(SELECTED_CLASS);
            }
        }
        doc.set_text_content(self.elements.label, language.display_name());
    }

    /// The supported language of the option at or above `target`, if any.
    fn option_language(&self, target: ElementId) -> Option<Language> {
        let doc = self.document.borrow();
        let mut current = Some(target);
        while let Some(id) = current {
            if id == self.elements.options {
                return None;
            }
            let el = doc.element(id);
            if el.has_class(OPTION_CLASS) {
                return el.attribute(VALUE_ATTR).and_then(Language::from_code);
            }
            current = el.parent();
        }
        None
    }
}
