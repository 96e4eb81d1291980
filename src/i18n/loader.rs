// SPDX-License-Identifier: MPL-2.0
//! Translation file retrieval.
//!
//! Bundles live at `<base>/<lang>.json`, where `<base>` is either an
//! `http(s)://` URL or a directory on disk. [`load_bundle`] never fails: a
//! missing or broken file falls back to English once, and an unavailable
//! English file yields an empty bundle.

use super::bundle::TranslationBundle;
use super::Language;
use crate::error::{Error, FetchError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;

/// Default location of the translation files, relative to the page.
pub const DEFAULT_LOCALES_BASE: &str = "./locales";

/// Something that can fetch the raw translation file for a language.
pub trait BundleSource {
    /// Fetches `<base>/<lang>.json`.
    fn fetch(&self, lang: Language) -> impl Future<Output = Result<Vec<u8>, FetchError>>;
}

/// Path of the translation file for `lang`, relative to the locales base.
#[must_use]
pub fn bundle_file_name(lang: Language) -> String {
    format!("{}.json", lang.code())
}

/// Loads the bundle for `lang`, falling back to English at most once.
///
/// Failures are logged and never returned to the caller.
pub async fn load_bundle(source: &impl BundleSource, lang: Language) -> TranslationBundle {
    match fetch_bundle(source, lang).await {
        Ok(bundle) => return bundle,
        Err(err) => log::warn!("Failed to load translations for {lang}: {err}"),
    }

    if lang.is_default() {
        return TranslationBundle::empty();
    }

    match fetch_bundle(source, Language::DEFAULT).await {
        Ok(bundle) => bundle,
        Err(err) => {
            log::warn!(
                "Failed to load translations for {}: {err}",
                Language::DEFAULT
            );
            TranslationBundle::empty()
        }
    }
}

async fn fetch_bundle(
    source: &impl BundleSource,
    lang: Language,
) -> Result<TranslationBundle, FetchError> {
    let bytes = source.fetch(lang).await?;
    TranslationBundle::from_slice(&bytes)
}

// =============================================================================
// HTTP
// =============================================================================

/// Fetches translation files over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base: String,
}

impl HttpSource {
    pub fn new(base: &str, user_agent: &str) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn url_for(&self, lang: Language) -> String {
        format!("{}/{}", self.base, bundle_file_name(lang))
    }
}

impl BundleSource for HttpSource {
    async fn fetch(&self, lang: Language) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(self.url_for(lang))
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(body.to_vec())
    }
}

// =============================================================================
// Directory
// =============================================================================

/// Reads translation files from a directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    base: PathBuf,
}

impl DirSource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    #[must_use]
    pub fn path_for(&self, lang: Language) -> PathBuf {
        self.base.join(bundle_file_name(lang))
    }
}

impl BundleSource for DirSource {
    async fn fetch(&self, lang: Language) -> Result<Vec<u8>, FetchError> {
        let path = self.path_for(lang);
        tokio::fs::read(&path)
            .await
            .map_err(|e| FetchError::Transport(format!("{}: {e}", path.display())))
    }
}

// =============================================================================
// Configured
// =============================================================================

/// Source chosen from a configured base: URLs go over HTTP, anything else is a directory.
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Http(HttpSource),
    Dir(DirSource),
}

impl ConfiguredSource {
    pub fn from_base(base: &str, user_agent: &str) -> Result<Self, Error> {
        if base.starts_with("http://") || base.starts_with("https://") {
            Ok(Self::Http(HttpSource::new(base, user_agent)?))
        } else {
            Ok(Self::Dir(DirSource::new(base)))
        }
    }
}

impl BundleSource for ConfiguredSource {
    async fn fetch(&self, lang: Language) -> Result<Vec<u8>, FetchError> {
        match self {
            Self::Http(source) => source.fetch(lang).await,
            Self::Dir(source) => source.fetch(lang).await,
        }
    }
}

// =============================================================================
// Memory
// =============================================================================

/// In-memory translation files, for embedding and tests.
///
/// Languages without an entry answer with status 404. Every request is
/// recorded and can be inspected with [`MemorySource::requests`].
#[derive(Debug, Default)]
pub struct MemorySource {
    files: HashMap<Language, Result<Vec<u8>, FetchError>>,
    requests: RefCell<Vec<Language>>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` for `lang`.
    #[must_use]
    pub fn with_file(mut self, lang: Language, body: impl Into<Vec<u8>>) -> Self {
        self.files.insert(lang, Ok(body.into()));
        self
    }

    /// Fails requests for `lang` with `error`.
    #[must_use]
    pub fn with_error(mut self, lang: Language, error: FetchError) -> Self {
        self.files.insert(lang, Err(error));
        self
    }

    /// Languages requested so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<Language> {
        self.requests.borrow().clone()
    }
}

impl BundleSource for MemorySource {
    async fn fetch(&self, lang: Language) -> Result<Vec<u8>, FetchError> {
        self.requests.borrow_mut().push(lang);
        self.files
            .get(&lang)
            .cloned()
            .unwrap_or(Err(FetchError::Status(404)))
    }
}
