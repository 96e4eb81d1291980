// SPDX-License-Identifier: MPL-2.0
//! Durable key/value storage for user preferences.
//!
//! This is the host's equivalent of browser local storage: string keys
//! mapped to string values, surviving restarts. Only the [`LANGUAGE_KEY`]
//! entry is used by the page.
//!
//! [`FileStore`] keeps the map in CBOR (`preferences.cbor`) inside the app
//! data directory. [`MemoryStore`] is a volatile stand-in.

use super::paths;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Storage key holding the chosen language code.
pub const LANGUAGE_KEY: &str = "language";

/// Preferences file name within the app data directory.
const PREFERENCES_FILE: &str = "preferences.cbor";

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Volatile in-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// CBOR-backed store; every `set` rewrites the file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store in the default data directory.
    ///
    /// Returns a tuple of (store, optional_warning). An unreadable or corrupted
    /// file yields an empty store and a warning; it is replaced on the next write.
    pub fn open() -> Result<(Self, Option<String>)> {
        Self::open_in(None)
    }

    /// Opens the store in `base_dir`, or the default data directory when `None`.
    pub fn open_in(base_dir: Option<PathBuf>) -> Result<(Self, Option<String>)> {
        let mut path = paths::get_app_data_dir_with_override(base_dir)
            .ok_or_else(|| Error::Storage("could not determine data directory".to_string()))?;
        path.push(PREFERENCES_FILE);
        Ok(Self::open_at(path))
    }

    /// Opens the store backed by the exact file `path`.
    pub fn open_at(path: PathBuf) -> (Self, Option<String>) {
        let (entries, warning) = match read_entries(&path) {
            Ok(entries) => (entries, None),
            Err(err) => (BTreeMap::new(), Some(err.to_string())),
        };
        (Self { path, entries }, warning)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the map is written to before being renamed over [`Self::path`].
    fn staging_path(&self) -> PathBuf {
        self.path.with_extension("cbor.tmp")
    }

    /// Replaces the file atomically: a failed write leaves the previous
    /// contents in place.
    fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let staging = self.staging_path();
        let result = write_entries(&staging, &self.entries)
            .and_then(|()| fs::rename(&staging, &self.path).map_err(Error::from));
        if result.is_err() {
            let _ = fs::remove_file(&staging);
        }
        result
    }
}

fn write_entries(path: &Path, entries: &BTreeMap<String, String>) -> Result<()> {
    let mut writer = BufWriter::new(fs::File::create(path)?);
    ciborium::into_writer(entries, &mut writer).map_err(|e| Error::Storage(e.to_string()))?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let file = fs::File::open(path)?;
    ciborium::from_reader(BufReader::new(file))
        .map_err(|e| Error::Storage(format!("{}: {e}", path.display())))
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.write()
    }
}
