//! Property-based invariant tests for data scroller pagination.
//!
//! 1. After N loads (N * rows <= len) the buffer is the first N * rows records.
//! 2. The buffer is always a prefix of the source of length min(first, len).
//! 3. Loading past exhaustion mutates neither buffer nor cursor.
//! 4. reset() yields the first page regardless of prior state.
//! 5. Lazy: each load reports the pre-call cursor and advances by rows.
//! 6. is_empty() iff the buffer length is 0.
//! 7. A new source identity resets to exactly the first page.

use std::cell::RefCell;
use std::rc::Rc;

use dscroll_core::ViewportSurface;
use dscroll_widgets::data_scroller::{DataScroller, DataScrollerConfig, LazyLoadMeta};
use proptest::prelude::*;

fn records(len: usize) -> Rc<[usize]> {
    (0..len).collect()
}

fn mounted(rows: usize, len: usize) -> DataScroller<usize> {
    let mut scroller =
        DataScroller::new(DataScrollerConfig::with_rows(rows)).with_value(records(len));
    scroller.mount(&ViewportSurface::new());
    scroller
}

fn assert_prefix(scroller: &DataScroller<usize>, len: usize) -> Result<(), TestCaseError> {
    let expected = scroller.first().min(len);
    scroller.with_items(|items| {
        prop_assert_eq!(items.len(), expected);
        for (index, value) in items.iter().enumerate() {
            prop_assert_eq!(*value, index);
        }
        Ok(())
    })
}

proptest! {
    #[test]
    fn n_loads_materialize_n_pages(rows in 1usize..20, pages in 1usize..10, extra in 0usize..50) {
        let len = rows * pages + extra;
        let scroller = mounted(rows, len);
        for _ in 1..pages {
            scroller.load();
        }
        prop_assert_eq!(scroller.len(), rows * pages);
        assert_prefix(&scroller, len)?;
    }

    #[test]
    fn buffer_is_always_a_prefix(rows in 0usize..20, len in 0usize..200, loads in 0usize..30) {
        let scroller = mounted(rows, len);
        for _ in 0..loads {
            scroller.load();
            assert_prefix(&scroller, len)?;
        }
    }

    #[test]
    fn exhausted_load_is_noop(rows in 1usize..20, len in 1usize..100) {
        let scroller = mounted(rows, len);
        while scroller.len() < len {
            scroller.load();
        }
        let (first, size, version) = (scroller.first(), scroller.len(), scroller.version());
        scroller.load();
        scroller.load();
        prop_assert_eq!(scroller.first(), first);
        prop_assert_eq!(scroller.len(), size);
        prop_assert_eq!(scroller.version(), version);
    }

    #[test]
    fn reset_yields_first_page(rows in 0usize..20, len in 0usize..100, loads in 0usize..10) {
        let scroller = mounted(rows, len);
        for _ in 0..loads {
            scroller.load();
        }
        scroller.reset();
        prop_assert_eq!(scroller.len(), rows.min(len));
        assert_prefix(&scroller, len)?;
    }

    #[test]
    fn lazy_reports_pre_call_cursor(rows in 0usize..50, loads in 1usize..20) {
        let requests = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&requests);
        let config = DataScrollerConfig { rows, lazy: true, ..DataScrollerConfig::default() };
        let scroller: DataScroller<usize> =
            DataScroller::new(config).on_lazy_load(move |meta| sink.borrow_mut().push(meta));
        for _ in 0..loads {
            scroller.load();
        }
        let expected: Vec<LazyLoadMeta> =
            (0..loads).map(|step| LazyLoadMeta { first: step * rows, rows }).collect();
        prop_assert_eq!(&*requests.borrow(), &expected);
        prop_assert_eq!(scroller.first(), loads * rows);
    }

    #[test]
    fn is_empty_iff_len_zero(rows in 0usize..10, len in 0usize..30, loads in 0usize..5) {
        let scroller = mounted(rows, len);
        for _ in 0..loads {
            scroller.load();
        }
        prop_assert_eq!(scroller.is_empty(), scroller.len() == 0);
        prop_assert_eq!(scroller.view().is_empty_state(), scroller.is_empty());
    }

    #[test]
    fn new_source_resets_to_first_page(rows in 1usize..20, len in 0usize..100, next in 0usize..100) {
        let mut scroller = mounted(rows, len);
        scroller.load();
        prop_assert!(scroller.set_value(Some(records(next))));
        prop_assert_eq!(scroller.len(), rows.min(next));
        assert_prefix(&scroller, next)?;
    }
}
