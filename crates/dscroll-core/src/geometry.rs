#![forbid(unsafe_code)]

//! Scroll geometry.
//!
//! All values live in the host's logical pixel space and are expected to be
//! finite. Nothing here clamps or validates: the host measures, we compare.

/// A snapshot of a scrollable surface along the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Current scroll offset from the top.
    pub offset: f64,
    /// Total scrollable height of the content.
    pub extent: f64,
    /// Height of the visible portion.
    pub visible: f64,
}

impl ScrollMetrics {
    /// Create a new metrics snapshot.
    #[inline]
    pub const fn new(offset: f64, extent: f64, visible: f64) -> Self {
        Self {
            offset,
            extent,
            visible,
        }
    }

    /// Largest offset the content can be scrolled to.
    #[inline]
    pub fn max_offset(&self) -> f64 {
        (self.extent - self.visible).max(0.0)
    }

    /// Whether the content is taller than the visible area.
    #[inline]
    pub fn is_scrollable(&self) -> bool {
        self.extent > self.visible
    }

    /// Return a copy with a different offset.
    #[inline]
    #[must_use]
    pub const fn with_offset(self, offset: f64) -> Self {
        Self { offset, ..self }
    }
}

/// Raw page-level measurements for the document viewport.
///
/// Different engines disagree on which element reports the real document
/// height, so every candidate is kept and [`document_height`] takes the max.
///
/// [`document_height`]: DocumentMetrics::document_height
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DocumentMetrics {
    /// Page scroll offset from the top.
    pub scroll_offset: f64,
    /// Height of the visible viewport.
    pub viewport_height: f64,
    /// Scroll height of the body element.
    pub body_scroll_height: f64,
    /// Offset height of the body element.
    pub body_offset_height: f64,
    /// Scroll height of the root element.
    pub root_scroll_height: f64,
    /// Offset height of the root element.
    pub root_offset_height: f64,
}

impl DocumentMetrics {
    /// Total document height: the max of every height candidate, including
    /// the viewport itself.
    pub fn document_height(&self) -> f64 {
        [
            self.body_scroll_height,
            self.body_offset_height,
            self.viewport_height,
            self.root_scroll_height,
            self.root_offset_height,
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }

    /// Collapse into the generic [`ScrollMetrics`] form.
    pub fn to_scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics::new(
            self.scroll_offset,
            self.document_height(),
            self.viewport_height,
        )
    }
}
