// SPDX-License-Identifier: MPL-2.0
//! Host locale signal.

/// Read-only access to the user's preferred locale (e.g. `"es-ES"`).
pub trait LocaleSource {
    fn locale(&self) -> Option<String>;
}

/// The operating system's locale, as reported by `sys-locale`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocale;

impl LocaleSource for SystemLocale {
    fn locale(&self) -> Option<String> {
        sys_locale::get_locale()
    }
}

/// A fixed locale value, or none at all.
#[derive(Debug, Clone, Default)]
pub struct FixedLocale(Option<String>);

impl FixedLocale {
    pub fn new(locale: impl Into<String>) -> Self {
        Self(Some(locale.into()))
    }

    #[must_use]
    pub fn none() -> Self {
        Self(None)
    }
}

impl LocaleSource for FixedLocale {
    fn locale(&self) -> Option<String> {
        self.0.clone()
    }
}
