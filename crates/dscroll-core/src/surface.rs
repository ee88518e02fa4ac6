#![forbid(unsafe_code)]

//! Scroll surfaces: the things a widget can watch scroll.
//!
//! # Design
//!
//! A [`ScrollSurface`] exposes its current [`ScrollMetrics`] and a listener
//! registry. Two implementations exist:
//!
//! - [`ContainerSurface`]: a bounded, internally scrollable element owned by a
//!   widget (its own content area).
//! - [`ViewportSurface`]: the page viewport, whose height is derived from
//!   several [`DocumentMetrics`] candidates.
//!
//! Both are cheap handles over shared `Rc<RefCell<..>>` state: cloning a
//! surface yields another handle to the **same** surface. Hosts push
//! measurements in and call `scroll_to` when the real element scrolls; every
//! live listener then receives the new metrics in registration order.
//!
//! # Failure Modes
//!
//! - **Re-entrant scroll**: a listener may call `scroll_to` on the surface it
//!   listens to. No borrow is held while listeners run, so this recurses
//!   instead of panicking. Unbounded recursion is the caller's problem.
//! - **Leaked listeners**: [`ScrollSurface::subscribe`] hands out a bare
//!   [`ListenerId`]. Prefer [`ScrollSurface::listen`], whose
//!   [`ListenerGuard`] detaches on drop.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::geometry::{DocumentMetrics, ScrollMetrics};

type Listener = Rc<dyn Fn(ScrollMetrics)>;

/// Identifier of a registered scroll listener, unique per surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Raw numeric value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Which kind of surface a listener is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// A bounded, internally scrollable container.
    Container,
    /// The page viewport.
    Viewport,
}

impl SurfaceKind {
    /// Stable label for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Viewport => "viewport",
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scrollable region that can be observed.
pub trait ScrollSurface {
    /// Which kind of surface this is.
    fn kind(&self) -> SurfaceKind;

    /// Current measurements.
    fn metrics(&self) -> ScrollMetrics;

    /// Current scroll offset.
    fn current_offset(&self) -> f64 {
        self.metrics().offset
    }

    /// Total scrollable extent.
    fn extent(&self) -> f64 {
        self.metrics().extent
    }

    /// Register a listener invoked on every scroll event.
    fn subscribe(&self, listener: Box<dyn Fn(ScrollMetrics)>) -> ListenerId;

    /// Remove a listener. Returns `false` if it was not registered.
    fn unsubscribe(&self, id: ListenerId) -> bool;

    /// Number of registered listeners.
    fn listener_count(&self) -> usize;

    /// Register a listener and return a guard that removes it on drop.
    fn listen(&self, listener: impl Fn(ScrollMetrics) + 'static) -> ListenerGuard
    where
        Self: Clone + Sized + 'static,
    {
        let id = self.subscribe(Box::new(listener));
        ListenerGuard {
            surface: Box::new(self.clone()),
            id,
        }
    }
}

/// RAII guard for a scroll listener.
///
/// Dropping the guard unsubscribes the listener from its surface.
#[must_use = "dropping the guard detaches the listener"]
pub struct ListenerGuard {
    surface: Box<dyn ScrollSurface>,
    id: ListenerId,
}

impl ListenerGuard {
    /// Identifier of the guarded listener.
    #[inline]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Kind of the surface the listener is attached to.
    #[inline]
    pub fn kind(&self) -> SurfaceKind {
        self.surface.kind()
    }

    /// Detach the listener now. Equivalent to dropping the guard.
    pub fn detach(self) {}
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.surface.unsubscribe(self.id);
    }
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("kind", &self.surface.kind())
            .field("id", &self.id)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Shared listener plumbing
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ListenerSet {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl ListenerSet {
    fn insert(&mut self, listener: Listener) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push((id, listener));
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    fn snapshot(&self) -> Vec<Listener> {
        self.entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Default)]
struct SurfaceInner<M> {
    measurements: M,
    listeners: ListenerSet,
}

/// Run listeners outside of any borrow so they may touch the surface again.
fn dispatch(kind: SurfaceKind, listeners: Vec<Listener>, metrics: ScrollMetrics) {
    #[cfg(feature = "tracing")]
    tracing::trace!(
        message = "scroll_surface.dispatch",
        surface = kind.as_str(),
        listeners = listeners.len(),
        offset = metrics.offset
    );
    #[cfg(not(feature = "tracing"))]
    let _ = kind;
    for listener in &listeners {
        listener(metrics);
    }
}

// ---------------------------------------------------------------------------
// ContainerSurface
// ---------------------------------------------------------------------------

/// A bounded, internally scrollable element.
#[derive(Clone, Default)]
pub struct ContainerSurface {
    inner: Rc<RefCell<SurfaceInner<ScrollMetrics>>>,
}

impl ContainerSurface {
    /// Create an empty container with zero extent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container with the given content and visible heights.
    #[must_use]
    pub fn with_size(extent: f64, visible: f64) -> Self {
        let surface = Self::new();
        surface.set_size(extent, visible);
        surface
    }

    /// Update content and visible heights after layout.
    ///
    /// Layout changes are not scroll events, so no listener runs.
    pub fn set_size(&self, extent: f64, visible: f64) {
        let mut inner = self.inner.borrow_mut();
        inner.measurements.extent = extent;
        inner.measurements.visible = visible;
    }

    /// Scroll to an absolute offset and notify listeners.
    pub fn scroll_to(&self, offset: f64) {
        let (metrics, listeners) = {
            let mut inner = self.inner.borrow_mut();
            inner.measurements.offset = offset.max(0.0);
            (inner.measurements, inner.listeners.snapshot())
        };
        dispatch(SurfaceKind::Container, listeners, metrics);
    }

    /// Scroll by a relative delta and notify listeners.
    pub fn scroll_by(&self, delta: f64) {
        let offset = self.current_offset() + delta;
        self.scroll_to(offset);
    }
}

impl ScrollSurface for ContainerSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Container
    }

    fn metrics(&self) -> ScrollMetrics {
        self.inner.borrow().measurements
    }

    fn subscribe(&self, listener: Box<dyn Fn(ScrollMetrics)>) -> ListenerId {
        self.inner.borrow_mut().listeners.insert(Rc::from(listener))
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        self.inner.borrow_mut().listeners.remove(id)
    }

    fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl fmt::Debug for ContainerSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ContainerSurface")
            .field("metrics", &inner.measurements)
            .field("listener_count", &inner.listeners.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ViewportSurface
// ---------------------------------------------------------------------------

/// The page viewport.
#[derive(Clone, Default)]
pub struct ViewportSurface {
    inner: Rc<RefCell<SurfaceInner<DocumentMetrics>>>,
}

impl ViewportSurface {
    /// Create a viewport with all measurements at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a viewport from an initial set of document measurements.
    #[must_use]
    pub fn with_document(document: DocumentMetrics) -> Self {
        let surface = Self::new();
        surface.set_document(document);
        surface
    }

    /// Replace every document measurement. No listener runs.
    pub fn set_document(&self, document: DocumentMetrics) {
        self.inner.borrow_mut().measurements = document;
    }

    /// Current raw document measurements.
    pub fn document(&self) -> DocumentMetrics {
        self.inner.borrow().measurements
    }

    /// Update the viewport height after a window resize. No listener runs.
    pub fn resize(&self, viewport_height: f64) {
        self.inner.borrow_mut().measurements.viewport_height = viewport_height;
    }

    /// Scroll the page to an absolute offset and notify listeners.
    pub fn scroll_to(&self, offset: f64) {
        let (metrics, listeners) = {
            let mut inner = self.inner.borrow_mut();
            inner.measurements.scroll_offset = offset.max(0.0);
            (
                inner.measurements.to_scroll_metrics(),
                inner.listeners.snapshot(),
            )
        };
        dispatch(SurfaceKind::Viewport, listeners, metrics);
    }

    /// Scroll the page by a relative delta and notify listeners.
    pub fn scroll_by(&self, delta: f64) {
        let offset = self.current_offset() + delta;
        self.scroll_to(offset);
    }
}

impl ScrollSurface for ViewportSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Viewport
    }

    fn metrics(&self) -> ScrollMetrics {
        self.inner.borrow().measurements.to_scroll_metrics()
    }

    fn subscribe(&self, listener: Box<dyn Fn(ScrollMetrics)>) -> ListenerId {
        self.inner.borrow_mut().listeners.insert(Rc::from(listener))
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        self.inner.borrow_mut().listeners.remove(id)
    }

    fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl fmt::Debug for ViewportSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ViewportSurface")
            .field("document", &inner.measurements)
            .field("listener_count", &inner.listeners.len())
            .finish()
    }
}
