// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the page.
//!
//! This module resolves the active language, loads its JSON translation
//! bundle and rewrites the marked nodes of the host document.
//!
//! # Features
//!
//! - Language resolution from the stored preference, the host locale, or the default
//! - Asynchronous bundle loading with a single fallback hop to English
//! - Dot-path lookups into nested translation trees
//! - Text, `alt` attribute and raw markup rewriting

pub mod applier;
pub mod bundle;
pub mod loader;
pub mod locale;

use crate::app::storage::{PreferenceStore, LANGUAGE_KEY};
use locale::LocaleSource;
use std::fmt;
use unic_langid::LanguageIdentifier;

/// A supported page language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    Pt,
}

impl Language {
    pub const DEFAULT: Language = Language::En;

    pub const ALL: [Language; 4] = [Language::En, Language::Es, Language::Fr, Language::Pt];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::Pt => "pt",
        }
    }

    /// Human-readable name shown in the selector label.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Español",
            Language::Fr => "Français",
            Language::Pt => "Português",
        }
    }

    /// Exact (case-insensitive) match against the supported codes.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }

    /// Like [`Language::from_code`], coercing anything unsupported to the default.
    #[must_use]
    pub fn from_code_or_default(code: &str) -> Self {
        Self::from_code(code).unwrap_or(Self::DEFAULT)
    }

    /// Maps a locale string such as `"es-ES"` to its primary subtag, if supported.
    #[must_use]
    pub fn from_locale(locale: &str) -> Option<Self> {
        Self::from_code(&primary_subtag(locale))
    }

    #[must_use]
    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Leading locale component: `"es"` for `"es-ES"`, `"pt"` for `"pt_BR.UTF-8"`.
#[must_use]
pub fn primary_subtag(locale: &str) -> String {
    let head = locale
        .split(['-', '_', '.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    if head.is_empty() {
        return String::new();
    }
    match head.parse::<LanguageIdentifier>() {
        Ok(id) => id.language.as_str().to_string(),
        Err(_) => head.to_ascii_lowercase(),
    }
}

/// Determines the language to show.
///
/// Priority: a valid stored preference, then the host locale's primary
/// subtag when supported, then [`Language::DEFAULT`]. Nothing is written.
pub fn resolve_current_language(
    store: &impl PreferenceStore,
    locale: &impl LocaleSource,
) -> Language {
    // 1. Stored preference
    if let Some(lang) = store
        .get(LANGUAGE_KEY)
        .and_then(|stored| Language::from_code(&stored))
    {
        return lang;
    }

    // 2. Host locale
    if let Some(lang) = locale.locale().and_then(|l| Language::from_locale(&l)) {
        return lang;
    }

    Language::DEFAULT
}
