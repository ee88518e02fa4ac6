#![forbid(unsafe_code)]

//! String catalog with locale fallback.
//!
//! # Lookup order
//!
//! For a request `(locale, key)` the catalog tries, in order:
//!
//! 1. the exact locale (`de-CH`),
//! 2. each parent obtained by stripping the last `-` or `_` subtag (`de`),
//! 3. every locale in the fallback chain (default: `["en"]`).
//!
//! The first locale that defines `key` wins.

use std::fmt;

use ahash::AHashMap;

/// Well-known catalog keys.
pub mod keys {
    /// Content shown when a list has nothing to display.
    pub const EMPTY_MESSAGE: &str = "emptyMessage";
}

/// Errors from strict catalog operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// No strings are registered for the locale or any of its parents.
    UnknownLocale(String),
    /// No locale on the lookup path defines the key.
    MissingKey { locale: String, key: String },
    /// `try_add_locale` was called for a locale that already exists.
    DuplicateLocale(String),
}

impl fmt::Display for I18nError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLocale(locale) => write!(f, "unknown locale: {locale}"),
            Self::MissingKey { locale, key } => {
                write!(f, "missing key {key:?} for locale {locale}")
            }
            Self::DuplicateLocale(locale) => write!(f, "locale already registered: {locale}"),
        }
    }
}

impl std::error::Error for I18nError {}

/// Strings for a single locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleStrings {
    strings: AHashMap<String, String>,
}

impl LocaleStrings {
    /// Create an empty string table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a string.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    /// Look up a string.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    /// Number of strings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocaleStrings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut strings = Self::new();
        for (key, value) in iter {
            strings.insert(key, value);
        }
        strings
    }
}

/// A collection of per-locale string tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringCatalog {
    locales: AHashMap<String, LocaleStrings>,
    fallback_chain: Vec<String>,
}

impl Default for StringCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StringCatalog {
    /// Create an empty catalog falling back to `en`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            locales: AHashMap::new(),
            fallback_chain: vec!["en".to_owned()],
        }
    }

    /// Catalog preloaded with the widget strings shipped by dscroll.
    #[must_use]
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for (locale, empty) in [
            ("en", "No available options"),
            ("de", "Keine Einträge verfügbar"),
            ("es", "No hay opciones disponibles"),
            ("fr", "Aucune option disponible"),
        ] {
            catalog.add_locale(
                locale,
                LocaleStrings::from_iter([(keys::EMPTY_MESSAGE, empty)]),
            );
        }
        catalog
    }

    /// Register a locale, replacing any previous table for it.
    pub fn add_locale(&mut self, locale: impl Into<String>, strings: LocaleStrings) {
        self.locales.insert(locale.into(), strings);
    }

    /// Register a locale, refusing to replace an existing one.
    pub fn try_add_locale(
        &mut self,
        locale: impl Into<String>,
        strings: LocaleStrings,
    ) -> Result<(), I18nError> {
        let locale = locale.into();
        if self.locales.contains_key(&locale) {
            return Err(I18nError::DuplicateLocale(locale));
        }
        self.locales.insert(locale, strings);
        Ok(())
    }

    /// Replace the fallback chain consulted after the requested locale.
    pub fn set_fallback_chain<I, S>(&mut self, chain: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback_chain = chain.into_iter().map(Into::into).collect();
    }

    /// Current fallback chain.
    #[must_use]
    pub fn fallback_chain(&self) -> &[String] {
        &self.fallback_chain
    }

    /// Whether strings are registered for exactly this locale.
    #[must_use]
    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Registered locales, sorted.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    /// Look up a string along the fallback path.
    #[must_use]
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.lookup_path(locale)
            .into_iter()
            .filter_map(|candidate| self.locales.get(candidate))
            .find_map(|strings| strings.get(key))
    }

    /// Strict lookup distinguishing an unknown locale from a missing key.
    pub fn lookup(&self, locale: &str, key: &str) -> Result<&str, I18nError> {
        let known = self
            .lookup_path(locale)
            .into_iter()
            .any(|candidate| self.locales.contains_key(candidate));
        if !known {
            return Err(I18nError::UnknownLocale(locale.to_owned()));
        }
        self.get(locale, key).ok_or_else(|| I18nError::MissingKey {
            locale: locale.to_owned(),
            key: key.to_owned(),
        })
    }

    fn lookup_path<'a>(&'a self, locale: &'a str) -> Vec<&'a str> {
        let mut path = vec![locale];
        let mut current = locale;
        while let Some(split) = current.rfind(['-', '_']) {
            current = &current[..split];
            path.push(current);
        }
        for fallback in &self.fallback_chain {
            if !path.contains(&fallback.as_str()) {
                path.push(fallback);
            }
        }
        path
    }
}
