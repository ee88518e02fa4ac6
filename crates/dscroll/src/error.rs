#![forbid(unsafe_code)]

//! dscroll error model.
//!
//! The widget itself never fails: a missing collection, a zero page size or
//! an out-of-range buffer degrade to a no-op or the empty state. Errors only
//! exist at the edges, where configuration is read and strings are looked up
//! strictly. Each edge has its own typed error; [`Error`] unifies them so an
//! application can use a single `?`.

use std::fmt;

use dscroll_i18n::I18nError;
use dscroll_widgets::data_scroller::ConfigError;

/// Top-level error type for dscroll apps.
#[derive(Debug)]
pub enum Error {
    /// Configuration could not be read or parsed.
    Config(ConfigError),
    /// Strict string lookup failed.
    I18n(I18nError),
}

/// Standard result type for dscroll APIs.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Error type label for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::I18n(_) => "i18n",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "config: {err}"),
            Self::I18n(err) => write!(f, "i18n: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::I18n(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<I18nError> for Error {
    fn from(err: I18nError) -> Self {
        Self::I18n(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Config(ConfigError::Io(err))
    }
}
