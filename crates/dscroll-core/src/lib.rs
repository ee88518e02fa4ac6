#![forbid(unsafe_code)]

//! Scroll geometry and scroll surfaces for dscroll.
//!
//! # Role in dscroll
//! `dscroll-core` describes *where* scrolling happens without knowing what is
//! being scrolled. Widgets observe a [`surface::ScrollSurface`] and read its
//! [`geometry::ScrollMetrics`]; hosts feed real measurements into one of the
//! two concrete surfaces and drive scroll events through it.
//!
//! # How it fits in the system
//! The widget layer (`dscroll-widgets`) depends on this crate for the
//! listener plumbing. Nothing here depends on rendering, localization or the
//! widget state machine, so surfaces can be unit-tested in isolation.

pub mod geometry;
pub mod surface;

pub use geometry::{DocumentMetrics, ScrollMetrics};
pub use surface::{
    ContainerSurface, ListenerGuard, ListenerId, ScrollSurface, SurfaceKind, ViewportSurface,
};
