#![forbid(unsafe_code)]

//! Data scroller configuration.
//!
//! Captures every serializable option of a [`DataScroller`] as a single
//! [`DataScrollerConfig`] that can be loaded from TOML or JSON.
//!
//! ```toml
//! # feed.toml
//! rows = 20
//! inline = true
//! scroll_height = "500px"
//! buffer = 0.8
//! locale = "de"
//! ```
//!
//! ```rust,ignore
//! let config = DataScrollerConfig::from_toml_file("feed.toml")?;
//! ```
//!
//! Callbacks and templates cannot be serialized; set them on the widget.
//! Malformed values never fail loading: the widget degrades to a no-op or the
//! empty state instead. [`DataScrollerConfig::validate`] reports them.
//!
//! [`DataScroller`]: super::DataScroller

#[cfg(feature = "config")]
use std::path::Path;

use bitflags::bitflags;
#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use super::monitor::DEFAULT_BUFFER;

bitflags! {
    /// Mode flags of a data scroller.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ScrollerMode: u8 {
        /// The host fetches records; the widget only tracks offsets.
        const LAZY = 1 << 0;
        /// Scroll inside the content area instead of the page.
        const INLINE = 1 << 1;
        /// An explicit control drives loading; no scroll listener.
        const LOADER = 1 << 2;
    }
}

/// Serializable options of a data scroller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct DataScrollerConfig {
    /// Element id passthrough.
    pub id: Option<String>,
    /// Extra root class names.
    pub class_name: Option<String>,
    /// Inline style passthrough.
    pub style: Option<String>,
    /// Records per load step.
    pub rows: usize,
    /// Scroll inside the content area instead of the page.
    pub inline: bool,
    /// Bounded height of the content area, as a CSS length.
    pub scroll_height: Option<String>,
    /// Disable scroll-triggered loading.
    pub loader: bool,
    /// Fraction of the scrollable extent that triggers the next load.
    pub buffer: f64,
    /// Delegate fetching to the host.
    pub lazy: bool,
    /// Static header text.
    pub header: Option<String>,
    /// Static footer text.
    pub footer: Option<String>,
    /// Static empty-state text.
    pub empty_message: Option<String>,
    /// Locale for built-in strings.
    pub locale: String,
}

impl Default for DataScrollerConfig {
    fn default() -> Self {
        Self {
            id: None,
            class_name: None,
            style: None,
            rows: 0,
            inline: false,
            scroll_height: None,
            loader: false,
            buffer: DEFAULT_BUFFER,
            lazy: false,
            header: None,
            footer: None,
            empty_message: None,
            locale: "en".to_owned(),
        }
    }
}

impl DataScrollerConfig {
    /// Config with the given page size and defaults elsewhere.
    #[must_use]
    pub fn with_rows(rows: usize) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Mode flags derived from the boolean options.
    pub fn mode(&self) -> ScrollerMode {
        let mut mode = ScrollerMode::empty();
        mode.set(ScrollerMode::LAZY, self.lazy);
        mode.set(ScrollerMode::INLINE, self.inline);
        mode.set(ScrollerMode::LOADER, self.loader);
        mode
    }

    /// Apply mode flags to the boolean options.
    pub fn set_mode(&mut self, mode: ScrollerMode) {
        self.lazy = mode.contains(ScrollerMode::LAZY);
        self.inline = mode.contains(ScrollerMode::INLINE);
        self.loader = mode.contains(ScrollerMode::LOADER);
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Serialize to pretty JSON.
    #[cfg(feature = "config")]
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Json)
    }

    /// Report values the widget will tolerate but probably should not get.
    ///
    /// An empty list means the config is sound.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.rows == 0 {
            warnings.push("rows is 0: load steps materialize nothing".to_owned());
        }
        if !self.buffer.is_finite() || self.buffer <= 0.0 || self.buffer > 1.0 {
            warnings.push(format!("buffer must be in (0, 1], got {}", self.buffer));
        }
        if self.inline && self.scroll_height.is_none() {
            warnings.push("inline without scroll_height: content area is unbounded".to_owned());
        }
        if self.lazy && self.loader {
            warnings.push("lazy with loader: nothing requests pages automatically".to_owned());
        }
        warnings
    }
}

/// Errors that can occur when loading a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse or encode error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
