// SPDX-License-Identifier: MPL-2.0
//! Interactive page components.
//!
//! Components follow the Elm-style "state down, messages up" pattern: a
//! component receives a [`lang_selector::Message`], updates its own state and
//! the document synchronously, and returns any asynchronous follow-up work
//! as an action for the caller to run.
//!
//! - [`lang_selector`] - Language picker dropdown
//! - [`page`] - Click propagation and the initial translation load

pub mod lang_selector;
pub mod page;
