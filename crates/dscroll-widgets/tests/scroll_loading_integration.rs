#![forbid(unsafe_code)]

//! Integration tests for scroll-triggered loading.
//!
//! These tests wire a data scroller to real surfaces and drive it purely
//! through scroll events, the way a host event loop would.
//!
//! # Invariants tested
//!
//! 1. Exactly one listener is attached while mounted without a loader.
//! 2. `loader = true` at mount attaches nothing; scrolling changes nothing.
//! 3. Turning the loader on post-mount detaches for the rest of the mount.
//! 4. Unmount and drop always detach.
//! 5. Inline scrollers listen to their own content area, never the page.
//! 6. Every scroll event past the threshold runs one load step.
//! 7. Every mount starts from the first page.

use std::cell::RefCell;
use std::rc::Rc;

use dscroll_core::{DocumentMetrics, ScrollSurface, SurfaceKind, ViewportSurface};
use dscroll_widgets::data_scroller::{DataScroller, DataScrollerConfig, LazyLoadMeta};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn records(len: u32) -> Rc<[u32]> {
    (0..len).collect()
}

/// A 5000px document in a 500px window: threshold at 5000 * 0.9 - 500 = 4000.
fn page() -> ViewportSurface {
    ViewportSurface::with_document(DocumentMetrics {
        viewport_height: 500.0,
        body_scroll_height: 4800.0,
        body_offset_height: 4800.0,
        root_scroll_height: 5000.0,
        root_offset_height: 5000.0,
        ..DocumentMetrics::default()
    })
}

fn scroller(rows: usize, len: u32) -> DataScroller<u32> {
    DataScroller::new(DataScrollerConfig::with_rows(rows)).with_value(records(len))
}

// ---------------------------------------------------------------------------
// Page viewport
// ---------------------------------------------------------------------------

#[test]
fn page_scroll_past_threshold_loads_next_page() {
    let viewport = page();
    let mut scroller = scroller(10, 100);
    scroller.mount(&viewport);
    assert_eq!(scroller.len(), 10);

    viewport.scroll_to(3999.0);
    assert_eq!(scroller.len(), 10);

    viewport.scroll_to(4000.0);
    assert_eq!(scroller.len(), 20);
}

#[test]
fn every_event_past_threshold_loads_again() {
    let viewport = page();
    let mut scroller = scroller(10, 100);
    scroller.mount(&viewport);

    for offset in [4100.0, 4200.0, 4300.0] {
        viewport.scroll_to(offset);
    }
    assert_eq!(scroller.len(), 40);
    scroller.with_items(|items| {
        assert!(items.iter().copied().eq(0..40));
    });
}

#[test]
fn scrolling_an_exhausted_source_changes_nothing() {
    let viewport = page();
    let mut scroller = scroller(10, 15);
    scroller.mount(&viewport);
    viewport.scroll_to(4500.0);
    assert_eq!(scroller.len(), 15);
    let (first, version) = (scroller.first(), scroller.version());

    viewport.scroll_to(4600.0);
    viewport.scroll_to(4700.0);
    assert_eq!(scroller.first(), first);
    assert_eq!(scroller.version(), version);
}

#[test]
fn one_listener_while_mounted() {
    let viewport = page();
    let mut scroller = scroller(10, 100);
    scroller.mount(&viewport);
    assert_eq!(viewport.listener_count(), 1);
    assert!(scroller.is_bound());

    scroller.unmount();
    assert_eq!(viewport.listener_count(), 0);
    assert!(!scroller.is_bound());
}

#[test]
fn drop_detaches_listener() {
    let viewport = page();
    {
        let mut scroller = scroller(10, 100);
        scroller.mount(&viewport);
        assert_eq!(viewport.listener_count(), 1);
    }
    assert_eq!(viewport.listener_count(), 0);
    viewport.scroll_to(4500.0);
}

#[test]
fn handle_outlives_widget_without_listener() {
    let viewport = page();
    let handle = {
        let mut scroller = scroller(10, 100);
        scroller.mount(&viewport);
        scroller.handle()
    };
    viewport.scroll_to(4500.0);
    assert_eq!(handle.len(), 10);

    handle.load();
    assert_eq!(handle.len(), 20);
}

#[test]
fn remount_pages_from_the_start_again() {
    let viewport = page();
    let mut scroller = scroller(10, 100);
    scroller.mount(&viewport);
    viewport.scroll_to(4100.0);
    viewport.scroll_to(4200.0);
    assert_eq!(scroller.len(), 30);

    scroller.unmount();
    scroller.mount(&viewport);
    assert_eq!(scroller.len(), 10);

    viewport.scroll_to(4300.0);
    assert_eq!(scroller.len(), 20);
    scroller.with_items(|items| {
        assert!(items.iter().copied().eq(0..20));
    });
}

#[test]
fn value_supplied_before_mount_loads_one_page() {
    let viewport = page();
    let mut scroller = DataScroller::new(DataScrollerConfig::with_rows(10));
    scroller.set_value(Some(records(25)));
    scroller.mount(&viewport);
    assert_eq!(scroller.len(), 10);

    viewport.scroll_to(4000.0);
    assert_eq!(scroller.len(), 20);
}

// ---------------------------------------------------------------------------
// Loader control
// ---------------------------------------------------------------------------

#[test]
fn loader_at_mount_registers_nothing() {
    let viewport = page();
    let config = DataScrollerConfig {
        rows: 10,
        loader: true,
        ..DataScrollerConfig::default()
    };
    let mut scroller = DataScroller::new(config).with_value(records(100));
    scroller.mount(&viewport);

    assert_eq!(viewport.listener_count(), 0);
    assert!(!scroller.is_bound());
    let version = scroller.version();

    viewport.scroll_to(4500.0);
    assert_eq!(scroller.len(), 10);
    assert_eq!(scroller.version(), version);

    // The host drives loading instead.
    scroller.handle().load();
    assert_eq!(scroller.len(), 20);
}

#[test]
fn loader_toggled_on_detaches_permanently() {
    let viewport = page();
    let mut scroller = scroller(10, 100);
    scroller.mount(&viewport);

    scroller.set_loader(true);
    assert_eq!(viewport.listener_count(), 0);

    scroller.set_loader(false);
    assert_eq!(viewport.listener_count(), 0);
    viewport.scroll_to(4500.0);
    assert_eq!(scroller.len(), 10);
}

#[test]
fn remount_after_loader_off_binds_again() {
    let viewport = page();
    let mut scroller = scroller(10, 100);
    scroller.mount(&viewport);
    scroller.set_loader(true);
    scroller.set_loader(false);

    scroller.unmount();
    scroller.mount(&viewport);
    assert_eq!(viewport.listener_count(), 1);
}

// ---------------------------------------------------------------------------
// Inline content area
// ---------------------------------------------------------------------------

#[test]
fn inline_listens_to_content_area_only() {
    let viewport = page();
    let config = DataScrollerConfig {
        rows: 5,
        inline: true,
        scroll_height: Some("300px".to_owned()),
        ..DataScrollerConfig::default()
    };
    let mut scroller = DataScroller::new(config).with_value(records(50));
    scroller.mount(&viewport);

    let content = scroller.content_surface().clone();
    assert_eq!(viewport.listener_count(), 0);
    assert_eq!(content.listener_count(), 1);
    assert_eq!(content.kind(), SurfaceKind::Container);

    // 1000 * 0.9 - 300 = 600
    content.set_size(1000.0, 300.0);
    viewport.scroll_to(4500.0);
    assert_eq!(scroller.len(), 5);

    content.scroll_to(599.0);
    assert_eq!(scroller.len(), 5);
    content.scroll_to(600.0);
    assert_eq!(scroller.len(), 10);
}

#[test]
fn custom_buffer_moves_threshold() {
    let viewport = page();
    let config = DataScrollerConfig {
        rows: 10,
        buffer: 0.5,
        ..DataScrollerConfig::default()
    };
    let mut scroller = DataScroller::new(config).with_value(records(100));
    scroller.mount(&viewport);

    // 5000 * 0.5 - 500 = 2000
    viewport.scroll_to(2000.0);
    assert_eq!(scroller.len(), 20);
}

// ---------------------------------------------------------------------------
// Lazy mode
// ---------------------------------------------------------------------------

#[test]
fn lazy_scroll_requests_pages_from_host() {
    let viewport = page();
    let requests = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&requests);
    let config = DataScrollerConfig {
        rows: 25,
        lazy: true,
        ..DataScrollerConfig::default()
    };
    let mut scroller: DataScroller<u32> =
        DataScroller::new(config).on_lazy_load(move |meta| sink.borrow_mut().push(meta));
    scroller.mount(&viewport);

    viewport.scroll_to(4200.0);
    viewport.scroll_to(4300.0);
    assert_eq!(
        *requests.borrow(),
        vec![
            LazyLoadMeta { first: 0, rows: 25 },
            LazyLoadMeta { first: 25, rows: 25 },
            LazyLoadMeta { first: 50, rows: 25 },
        ]
    );

    // The host answers later by supplying the accumulated collection.
    scroller.set_value(Some(records(75)));
    assert_eq!(scroller.len(), 75);
    assert_eq!(scroller.view().item_count(), 75);
}
