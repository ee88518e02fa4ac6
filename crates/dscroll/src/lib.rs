#![forbid(unsafe_code)]

//! dscroll public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from internal crates and offers a lightweight
//! prelude for day-to-day usage.

pub mod error;

// --- Core re-exports -------------------------------------------------------

pub use dscroll_core::{
    ContainerSurface, DocumentMetrics, ListenerGuard, ListenerId, ScrollMetrics, ScrollSurface,
    SurfaceKind, ViewportSurface,
};

// --- i18n re-exports -------------------------------------------------------

pub use dscroll_i18n::{I18nError, LocaleStrings, StringCatalog};

// --- Widget re-exports -----------------------------------------------------

pub use dscroll_widgets::data_scroller::{
    AsContent, ConfigError, Content, DataScroller, DataScrollerConfig, EmptyRenderer,
    ItemRenderer, LazyLoadMeta, ScrollerHandle, ScrollerMode, ScrollerView,
};

// --- Errors ---------------------------------------------------------------

pub use error::{Error, Result};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Content, DataScroller, DataScrollerConfig, Error, LazyLoadMeta, Result, ScrollSurface,
        ScrollerHandle, ViewportSurface,
    };

    pub use crate::{core, i18n, widgets};
}

pub use dscroll_core as core;
pub use dscroll_i18n as i18n;
pub use dscroll_widgets as widgets;
