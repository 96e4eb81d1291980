// SPDX-License-Identifier: MPL-2.0
//! Page wiring: the initial translation load and click dispatch.
//!
//! Clicks are routed the way a browser would propagate them: a click inside
//! the trigger is handled there and stops, a click inside the options list
//! is handled by the selector and then bubbles to the document, and every
//! other click only reaches the document-level dismissal handler.
//!
//! Language applications are spawned with [`tokio::task::spawn_local`], so
//! [`Page::click`] must run inside a [`tokio::task::LocalSet`].

use super::lang_selector::{Action, LanguageSelector, Message};
use crate::dom::{Document, ElementId};
use crate::error::Result;
use crate::i18n::applier::LanguageService;
use std::cell::RefCell;
use std::rc::Rc;
use tokio::task::JoinHandle;

pub struct Page<S> {
    document: Rc<RefCell<Document>>,
    service: Rc<S>,
    selector: LanguageSelector<S>,
}

impl<S> Page<S>
where
    S: LanguageService + 'static,
{
    /// Attaches the language selector to `document`.
    pub fn new(document: Rc<RefCell<Document>>, service: Rc<S>) -> Result<Self> {
        let selector = LanguageSelector::attach(Rc::clone(&document), Rc::clone(&service))?;
        Ok(Self {
            document,
            service,
            selector,
        })
    }

    #[must_use]
    pub fn document(&self) -> &Rc<RefCell<Document>> {
        &self.document
    }

    #[must_use]
    pub fn selector(&self) -> &LanguageSelector<S> {
        &self.selector
    }

    /// Document-ready: applies the currently resolved language once.
    pub async fn ready(&self) {
        let lang = self.service.current_language();
        self.service.apply_language(lang).await;
    }

    /// Delivers a click on `target`.
    ///
    /// Returns the handle of the spawned language application when an
    /// option was picked. The dropdown state and label are already updated
    /// when this returns.
    pub fn click(&mut self, target: ElementId) -> Option<JoinHandle<()>> {
        let elements = self.selector.elements();
        let (in_trigger, in_options) = {
            let doc = self.document.borrow();
            (
                doc.contains(elements.trigger, target),
                doc.contains(elements.options, target),
            )
        };

        if in_trigger {
            // Handled here; never reaches the document handler.
            self.selector.update(Message::TriggerClicked);
            return None;
        }

        let mut spawned = None;
        if in_options {
            if let Action::ApplyLanguage { language, task } =
                self.selector.update(Message::OptionClicked(target))
            {
                log::debug!("Language {language} selected");
                spawned = Some(tokio::task::spawn_local(task));
            }
        }

        self.selector.update(Message::DocumentClicked);
        spawned
    }
}
