#![forbid(unsafe_code)]

//! Pagination cursor and materialized buffer.
//!
//! [`Paginator`] is the pure state half of the data scroller: it owns the
//! cursor (`first`), the buffer of records currently materialized for
//! display, and a handle to the host-owned source collection. It never calls
//! into the host; the lazy callback is driven by the controller around it.
//!
//! # Invariants
//!
//! 1. Non-lazy: `items()` is always a prefix of the source of length
//!    `min(first, source.len())`.
//! 2. Non-lazy: once the source is exhausted, `load_next` changes nothing.
//! 3. `version` increments by exactly 1 on every publish and never otherwise.

use std::rc::Rc;

/// Offsets handed to the host on each lazy load step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LazyLoadMeta {
    /// Offset of the first record requested.
    pub first: usize,
    /// Number of records requested.
    pub rows: usize,
}

/// Cursor plus materialized buffer over a shared source collection.
#[derive(Debug, Clone)]
pub struct Paginator<T> {
    source: Option<Rc<[T]>>,
    first: usize,
    buffer: Vec<T>,
    rows: usize,
    lazy: bool,
    version: u64,
}

impl<T: Clone> Paginator<T> {
    /// Create an empty paginator with no source.
    #[must_use]
    pub fn new(rows: usize, lazy: bool) -> Self {
        Self {
            source: None,
            first: 0,
            buffer: Vec::new(),
            rows,
            lazy,
            version: 0,
        }
    }

    /// Number of records consumed (non-lazy) or requested (lazy).
    #[inline]
    pub fn first(&self) -> usize {
        self.first
    }

    /// Page size.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Whether fetching is delegated to the host.
    #[inline]
    pub fn is_lazy(&self) -> bool {
        self.lazy
    }

    /// The host-owned source collection, if any.
    #[inline]
    pub fn source(&self) -> Option<&Rc<[T]>> {
        self.source.as_ref()
    }

    /// Records currently materialized for display.
    #[inline]
    pub fn items(&self) -> &[T] {
        &self.buffer
    }

    /// Number of materialized records.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether nothing is materialized.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Publish counter, bumped on every buffer change.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether every source record is already materialized.
    pub fn is_exhausted(&self) -> bool {
        self.source
            .as_ref()
            .is_none_or(|source| self.first >= source.len())
    }

    /// Metadata for the next lazy request.
    #[inline]
    pub fn lazy_meta(&self) -> LazyLoadMeta {
        LazyLoadMeta {
            first: self.first,
            rows: self.rows,
        }
    }

    /// Append the next page from the source and advance the cursor.
    ///
    /// Returns the number of records appended. Without a source, or once the
    /// source is exhausted, nothing changes and nothing is published.
    pub fn load_next(&mut self) -> usize {
        let Some(source) = self.source.as_ref() else {
            return 0;
        };
        if source.is_empty() || self.first >= source.len() {
            return 0;
        }
        let start = self.first;
        let end = start.saturating_add(self.rows).min(source.len());
        self.buffer.extend_from_slice(&source[start..end]);
        self.first = self.first.saturating_add(self.rows);
        self.publish();
        end - start
    }

    /// Advance the cursor by one page after a lazy request.
    ///
    /// The cursor is not capped: the host alone knows the dataset size.
    pub fn advance(&mut self) {
        self.first = self.first.saturating_add(self.rows);
    }

    /// Reset cursor to zero and clear the buffer.
    pub fn clear(&mut self) {
        self.first = 0;
        self.buffer.clear();
        self.publish();
    }

    /// Replace the source collection.
    ///
    /// Returns `true` if the identity changed (different allocation, or a
    /// transition between present and absent). Contents are not compared.
    pub fn set_source(&mut self, source: Option<Rc<[T]>>) -> bool {
        let changed = match (&self.source, &source) {
            (Some(current), Some(next)) => !Rc::ptr_eq(current, next),
            (None, None) => false,
            _ => true,
        };
        if changed {
            self.source = source;
        }
        changed
    }

    /// Lazy mode: render exactly what the host supplied.
    pub fn passthrough(&mut self) {
        self.buffer = self
            .source
            .as_deref()
            .map(<[T]>::to_vec)
            .unwrap_or_default();
        self.publish();
    }

    fn publish(&mut self) {
        self.version += 1;
    }
}
