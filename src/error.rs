// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Storage(String),
    Fetch(FetchError),
    /// A DOM element required by a component is absent from the document.
    MissingElement(String),
}

/// Reasons a translation bundle could not be retrieved.
///
/// All of these are recovered by the loader (fallback or empty bundle);
/// they only surface in logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network failure, unreadable file, or other transport problem.
    Transport(String),

    /// The resource answered with a non-success status.
    Status(u16),

    /// The body was not a JSON object.
    Decode(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "transport failure: {}", msg),
            FetchError::Status(code) => write!(f, "unexpected status {}", code),
            FetchError::Decode(msg) => write!(f, "invalid translation file: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Storage(e) => write!(f, "Storage Error: {}", e),
            Error::Fetch(e) => write!(f, "Fetch Error: {}", e),
            Error::MissingElement(e) => write!(f, "Missing Element: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<FetchError> for Error {
    fn from(err: FetchError) -> Self {
        Error::Fetch(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
