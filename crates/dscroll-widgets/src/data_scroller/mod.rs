#![forbid(unsafe_code)]

//! Data scroller widget.
//!
//! Renders a growing list, materializing one page of the host's collection
//! per load step. Load steps are triggered by scrolling past a threshold of
//! the active [`ScrollSurface`], by the host through a [`ScrollerHandle`], or
//! (in lazy mode) requested from the host via a callback.
//!
//! # Lifecycle
//!
//! ```text
//! new ── set_value ──> store only
//!  │
//! mount ──> clear + load + bind listener (unless `loader`)
//!          │
//!          ├─ set_value ──> reset + load        (lazy: passthrough)
//!          ├─ scroll past threshold ──> load
//!          ├─ set_loader(true) ──> unbind for good
//!          │
//!        unmount / drop ──> unbind
//! ```
//!
//! # Failure Modes
//!
//! - **Panicking host callback**: propagates to the caller of `load`. No
//!   isolation is attempted.
//! - **Re-entrant host callback**: the lazy callback runs with no internal
//!   borrow held, so it may call back into the handle. A nested `load` from
//!   inside the callback advances the cursor without invoking the callback
//!   again.
//! - **Handle captured by the callback**: the callback is owned by the
//!   controller, so a [`ScrollerHandle`] moved into it forms an `Rc` cycle
//!   and the pagination state is never freed.
//!
//! [`ScrollSurface`]: dscroll_core::ScrollSurface

mod config;
mod monitor;
mod pagination;
mod view;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dscroll_core::{ContainerSurface, ViewportSurface};
use dscroll_i18n::StringCatalog;

pub use config::{ConfigError, DataScrollerConfig, ScrollerMode};
pub use monitor::{DEFAULT_BUFFER, ScrollMonitor, crosses_threshold};
pub use pagination::{LazyLoadMeta, Paginator};
pub use view::{
    AsContent, COMPONENT_CLASS, CONTENT_CLASS, Content, ContentArea, EmptyRenderer, Entry,
    FOOTER_CLASS, HEADER_CLASS, INLINE_CLASS, ITEM_KEY_SUFFIX, ItemRenderer, LIST_CLASS,
    ROOT_CLASS, RenderHooks, ScrollerView, Section, class_names,
};

type LazyLoadHandler = Box<dyn FnMut(LazyLoadMeta)>;

/// Pagination state plus the lazy callback, shared with the scroll listener.
struct Controller<T> {
    pages: RefCell<Paginator<T>>,
    on_lazy_load: RefCell<Option<LazyLoadHandler>>,
    mounted: Cell<bool>,
}

impl<T: Clone> Controller<T> {
    fn new(rows: usize, lazy: bool, source: Option<Rc<[T]>>) -> Self {
        let mut pages = Paginator::new(rows, lazy);
        pages.set_source(source);
        Self {
            pages: RefCell::new(pages),
            on_lazy_load: RefCell::new(None),
            mounted: Cell::new(false),
        }
    }

    /// Start pagination from scratch for a fresh mount.
    ///
    /// Lazy scrollers show the collection supplied so far before requesting
    /// the first page.
    fn start(&self) {
        {
            let mut pages = self.pages.borrow_mut();
            pages.clear();
            if pages.is_lazy() {
                pages.passthrough();
            }
        }
        self.mounted.set(true);
        self.load();
    }

    fn load(&self) {
        let lazy_meta = {
            let pages = self.pages.borrow();
            pages.is_lazy().then(|| pages.lazy_meta())
        };

        #[cfg(feature = "tracing")]
        let load_span = tracing::debug_span!(
            "datascroller.load",
            lazy = lazy_meta.is_some(),
            first = self.pages.borrow().first(),
            rows = self.pages.borrow().rows(),
            appended = tracing::field::Empty
        );
        #[cfg(feature = "tracing")]
        let _load_guard = load_span.enter();

        match lazy_meta {
            Some(meta) => {
                let handler = self.on_lazy_load.borrow_mut().take();
                if let Some(mut handler) = handler {
                    handler(meta);
                    let mut slot = self.on_lazy_load.borrow_mut();
                    if slot.is_none() {
                        *slot = Some(handler);
                    }
                }
                self.pages.borrow_mut().advance();
            }
            None => {
                let _appended = self.pages.borrow_mut().load_next();
                #[cfg(feature = "tracing")]
                load_span.record("appended", _appended as u64);
            }
        }
    }

    fn reset(&self) {
        self.pages.borrow_mut().clear();
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "datascroller.reset");
        self.load();
    }

    fn set_value(&self, value: Option<Rc<[T]>>) -> bool {
        let lazy = {
            let mut pages = self.pages.borrow_mut();
            if !pages.set_source(value) {
                return false;
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(
                message = "datascroller.value_change",
                lazy = pages.is_lazy(),
                len = pages.source().map_or(0, |source| source.len())
            );
            pages.is_lazy()
        };
        // The first page is loaded by `start`.
        if !self.mounted.get() {
            return true;
        }
        if lazy {
            let mut pages = self.pages.borrow_mut();
            pages.clear();
            pages.passthrough();
        } else {
            self.reset();
        }
        true
    }
}

/// Imperative handle to a [`DataScroller`].
///
/// Cheap to clone. Outlives the widget safely: once the widget is dropped,
/// the handle keeps the pagination state alive but nothing listens to scroll
/// events any more.
pub struct ScrollerHandle<T> {
    controller: Rc<Controller<T>>,
}

impl<T> Clone for ScrollerHandle<T> {
    fn clone(&self) -> Self {
        Self {
            controller: Rc::clone(&self.controller),
        }
    }
}

impl<T> std::fmt::Debug for ScrollerHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollerHandle").finish_non_exhaustive()
    }
}

impl<T: Clone> ScrollerHandle<T> {
    /// Run one pagination step.
    pub fn load(&self) {
        self.controller.load();
    }

    /// Clear everything and load the first page again.
    pub fn reset(&self) {
        self.controller.reset();
    }

    /// Replace the source collection. See [`DataScroller::set_value`].
    ///
    /// Loads only while the widget is mounted.
    pub fn set_value(&self, value: Option<Rc<[T]>>) -> bool {
        self.controller.set_value(value)
    }

    /// Whether nothing is materialized.
    pub fn is_empty(&self) -> bool {
        self.controller.pages.borrow().is_empty()
    }

    /// Number of materialized records.
    pub fn len(&self) -> usize {
        self.controller.pages.borrow().len()
    }

    /// Current cursor.
    pub fn first(&self) -> usize {
        self.controller.pages.borrow().first()
    }

    /// Access the materialized records without cloning.
    pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(self.controller.pages.borrow().items())
    }
}

/// Incremental-loading list widget.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use dscroll_core::ViewportSurface;
/// use dscroll_widgets::data_scroller::{DataScroller, DataScrollerConfig};
///
/// let records: Rc<[u32]> = (0..25).collect();
/// let mut scroller = DataScroller::new(DataScrollerConfig::with_rows(10)).with_value(records);
/// scroller.mount(&ViewportSurface::new());
/// assert_eq!(scroller.len(), 10);
///
/// scroller.load();
/// scroller.load();
/// assert_eq!(scroller.len(), 25);
/// ```
pub struct DataScroller<T> {
    config: DataScrollerConfig,
    controller: Rc<Controller<T>>,
    hooks: RenderHooks<T>,
    catalog: StringCatalog,
    content_surface: ContainerSurface,
    monitor: ScrollMonitor,
}

impl<T> std::fmt::Debug for DataScroller<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataScroller")
            .field("config", &self.config)
            .field("hooks", &self.hooks)
            .field("monitor", &self.monitor)
            .field("mounted", &self.controller.mounted.get())
            .finish_non_exhaustive()
    }
}

impl<T: Clone + 'static> DataScroller<T> {
    /// Create an unmounted scroller with no source collection.
    #[must_use]
    pub fn new(config: DataScrollerConfig) -> Self {
        let monitor = ScrollMonitor::new(config.buffer);
        Self {
            controller: Rc::new(Controller::new(config.rows, config.lazy, None)),
            config,
            hooks: RenderHooks::default(),
            catalog: StringCatalog::builtin(),
            content_surface: ContainerSurface::new(),
            monitor,
        }
    }

    /// Set the initial source collection. The first page loads on mount.
    #[must_use]
    pub fn with_value(self, value: Rc<[T]>) -> Self {
        self.controller.pages.borrow_mut().set_source(Some(value));
        self
    }

    /// Callback invoked with `{first, rows}` on every lazy load step.
    #[must_use]
    pub fn on_lazy_load(self, handler: impl FnMut(LazyLoadMeta) + 'static) -> Self {
        *self.controller.on_lazy_load.borrow_mut() = Some(Box::new(handler));
        self
    }

    /// Template used to render each record.
    #[must_use]
    pub fn item_template(mut self, template: impl ItemRenderer<T> + 'static) -> Self {
        self.hooks.item_template = Some(Box::new(template));
        self
    }

    /// Empty-state content or content-producing function.
    #[must_use]
    pub fn empty_message(mut self, renderer: impl EmptyRenderer + 'static) -> Self {
        self.hooks.empty_message = Some(Box::new(renderer));
        self
    }

    /// Header block. Overrides `config.header`.
    #[must_use]
    pub fn header(mut self, content: impl Into<Content>) -> Self {
        self.hooks.header = Some(content.into());
        self
    }

    /// Footer block. Overrides `config.footer`.
    #[must_use]
    pub fn footer(mut self, content: impl Into<Content>) -> Self {
        self.hooks.footer = Some(content.into());
        self
    }

    /// String catalog used for the default empty message.
    #[must_use]
    pub fn catalog(mut self, catalog: StringCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Load the first page and, unless `loader` is set, start listening.
    ///
    /// Pagination always starts from an empty buffer, so mounting again after
    /// [`unmount`] shows the first page only. Inline scrollers listen to their
    /// own [`content_surface`]; the others listen to `viewport`. Mounting
    /// twice is a no-op.
    ///
    /// [`unmount`]: DataScroller::unmount
    ///
    /// [`content_surface`]: DataScroller::content_surface
    pub fn mount(&mut self, viewport: &ViewportSurface) {
        if self.controller.mounted.get() {
            return;
        }
        self.controller.start();
        if self.config.loader {
            return;
        }
        let controller = Rc::downgrade(&self.controller);
        let on_cross = move || {
            if let Some(controller) = controller.upgrade() {
                controller.load();
            }
        };
        if self.config.inline {
            self.monitor.bind(&self.content_surface, on_cross);
        } else {
            self.monitor.bind(viewport, on_cross);
        }
    }

    /// Detach the scroll listener. State is kept.
    pub fn unmount(&mut self) {
        self.monitor.unbind();
        self.controller.mounted.set(false);
    }

    /// Replace the source collection.
    ///
    /// A change of identity (not contents) discards all pagination state.
    /// Non-lazy scrollers then load the first page again; lazy scrollers
    /// render the new collection as-is. While unmounted the collection is
    /// only stored and the first page loads on [`mount`]. Returns whether
    /// anything changed.
    ///
    /// [`mount`]: DataScroller::mount
    pub fn set_value(&mut self, value: Option<Rc<[T]>>) -> bool {
        self.controller.set_value(value)
    }

    /// Toggle the explicit loader control.
    ///
    /// Turning it on while mounted detaches the scroll listener for the rest
    /// of this mount. Turning it off does not re-attach anything.
    pub fn set_loader(&mut self, loader: bool) {
        self.config.loader = loader;
        if loader {
            self.monitor.unbind();
        }
    }

    /// Run one pagination step.
    pub fn load(&self) {
        self.controller.load();
    }

    /// Clear everything and load the first page again.
    pub fn reset(&self) {
        self.controller.reset();
    }

    /// A cloneable handle exposing the imperative operations.
    pub fn handle(&self) -> ScrollerHandle<T> {
        ScrollerHandle {
            controller: Rc::clone(&self.controller),
        }
    }

    /// Whether nothing is materialized.
    pub fn is_empty(&self) -> bool {
        self.controller.pages.borrow().is_empty()
    }

    /// Number of materialized records.
    pub fn len(&self) -> usize {
        self.controller.pages.borrow().len()
    }

    /// Current cursor.
    pub fn first(&self) -> usize {
        self.controller.pages.borrow().first()
    }

    /// Publish counter. Changes whenever the rendered records may differ.
    pub fn version(&self) -> u64 {
        self.controller.pages.borrow().version()
    }

    /// Access the materialized records without cloning.
    pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(self.controller.pages.borrow().items())
    }

    /// Whether a scroll listener is attached.
    pub fn is_bound(&self) -> bool {
        self.monitor.is_bound()
    }

    /// Whether `mount` has run without a matching `unmount`.
    pub fn is_mounted(&self) -> bool {
        self.controller.mounted.get()
    }

    /// Current options.
    pub fn config(&self) -> &DataScrollerConfig {
        &self.config
    }

    /// Mode flags.
    pub fn mode(&self) -> ScrollerMode {
        self.config.mode()
    }

    /// The widget's own content area. Hosts feed it real measurements and
    /// scroll events in inline mode.
    pub fn content_surface(&self) -> &ContainerSurface {
        &self.content_surface
    }

    /// Compose the current view.
    pub fn view(&self) -> ScrollerView
    where
        T: AsContent,
    {
        let pages = self.controller.pages.borrow();
        view::compose(&self.config, &self.hooks, &self.catalog, pages.items())
    }
}
