#![forbid(unsafe_code)]

//! Widgets for dscroll.
//!
//! The only widget today is the [`DataScroller`]: an incremental-loading list
//! that materializes one page of a host collection per load step, requesting
//! steps on scroll, through an imperative handle, or from the host in lazy
//! mode.
//!
//! It is not a virtualized list. Materialized records stay materialized until
//! the next reset.

pub mod data_scroller;

pub use data_scroller::{
    AsContent, Content, DataScroller, DataScrollerConfig, LazyLoadMeta, ScrollerHandle,
    ScrollerMode, ScrollerView,
};
