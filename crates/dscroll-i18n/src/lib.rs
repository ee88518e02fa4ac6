#![forbid(unsafe_code)]

//! Internationalization (i18n) for dscroll.
//!
//! Provides externalized string storage with key-based lookup and locale
//! fallback chains.
//!
//! # Role in dscroll
//! Widgets never hardcode user-facing text. When the host supplies no empty
//! state content, the widget resolves [`keys::EMPTY_MESSAGE`] through a
//! [`StringCatalog`] for its configured locale.

pub mod catalog;

pub use catalog::{I18nError, LocaleStrings, StringCatalog, keys};
