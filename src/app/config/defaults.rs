// SPDX-License-Identifier: MPL-2.0
//! Default values for configuration settings.

pub use crate::i18n::loader::DEFAULT_LOCALES_BASE;

/// User agent sent when translation files are fetched over HTTP.
pub const DEFAULT_USER_AGENT: &str = concat!("lang-selector/", env!("CARGO_PKG_VERSION"));

/// Default `env_logger` filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";
