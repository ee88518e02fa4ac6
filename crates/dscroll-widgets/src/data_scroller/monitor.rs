#![forbid(unsafe_code)]

//! Scroll-triggered loading.
//!
//! A [`ScrollMonitor`] holds at most one listener on one surface. Every scroll
//! event re-evaluates the threshold; there is no debouncing, so a user who
//! stays past the threshold triggers one load per event.

use dscroll_core::{ListenerGuard, ScrollMetrics, ScrollSurface, SurfaceKind};

/// Default fraction of the scrollable extent that triggers the next load.
pub const DEFAULT_BUFFER: f64 = 0.9;

/// Threshold test shared by both surface kinds.
///
/// True when `offset >= extent * buffer - visible`.
#[inline]
pub fn crosses_threshold(metrics: &ScrollMetrics, buffer: f64) -> bool {
    metrics.offset >= metrics.extent * buffer - metrics.visible
}

/// Owns the single scroll listener of a widget.
#[derive(Debug)]
pub struct ScrollMonitor {
    buffer: f64,
    guard: Option<ListenerGuard>,
}

impl Default for ScrollMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER)
    }
}

impl ScrollMonitor {
    /// Create an unbound monitor.
    #[must_use]
    pub fn new(buffer: f64) -> Self {
        Self {
            buffer,
            guard: None,
        }
    }

    /// Threshold fraction.
    #[inline]
    pub fn buffer(&self) -> f64 {
        self.buffer
    }

    /// Attach to `surface`, replacing any previous binding.
    ///
    /// `on_cross` runs once per scroll event that lands past the threshold.
    pub fn bind<S>(&mut self, surface: &S, on_cross: impl Fn() + 'static)
    where
        S: ScrollSurface + Clone + 'static,
    {
        self.unbind();
        let buffer = self.buffer;
        #[cfg(feature = "tracing")]
        let kind = surface.kind();
        self.guard = Some(surface.listen(move |metrics| {
            if crosses_threshold(&metrics, buffer) {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    message = "datascroller.threshold",
                    surface = kind.as_str(),
                    offset = metrics.offset,
                    extent = metrics.extent,
                    visible = metrics.visible,
                    buffer
                );
                on_cross();
            }
        }));
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "datascroller.bind", surface = kind.as_str());
    }

    /// Detach the listener. Returns `false` if nothing was bound.
    pub fn unbind(&mut self) -> bool {
        match self.guard.take() {
            Some(guard) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(message = "datascroller.unbind", surface = guard.kind().as_str());
                guard.detach();
                true
            }
            None => false,
        }
    }

    /// Whether a listener is attached.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.guard.is_some()
    }

    /// Kind of the bound surface, if any.
    pub fn surface_kind(&self) -> Option<SurfaceKind> {
        self.guard.as_ref().map(ListenerGuard::kind)
    }
}
