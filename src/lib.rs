// SPDX-License-Identifier: MPL-2.0
//! `lang_selector` translates a website's marked elements from JSON
//! translation files and drives the language picker dropdown.
//!
//! The host document is modelled in [`dom`], translation loading and
//! application live in [`i18n`], the dropdown in [`ui`], and durable
//! preferences and configuration in [`app`].

pub mod app;
pub mod dom;
pub mod error;
pub mod i18n;
pub mod ui;
