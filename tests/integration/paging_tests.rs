//! Paging integration tests.
//!
//! Tests verify:
//! - Page coverage and page count laws
//! - Idempotent page reloads
//! - Windowed reads through a shared row store

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;

use em_gallery::config::PagingConfig;
use em_gallery::model::{
    page_count, row_to_page, EventKind, ModelEvent, PagedModel, PagedTableModel, Paging,
};
use em_gallery::store::{shared, CellValue, RowStore};

use super::test_utils::particle_store;

// =============================================================================
// Laws
// =============================================================================

proptest! {
    #[test]
    fn test_page_coverage(total in 1usize..5000, page_size in 1usize..300, seed in any::<usize>()) {
        let row = seed % total;
        let page = row_to_page(row, page_size).unwrap();
        prop_assert!(page * page_size <= row);
        prop_assert!(row < (page + 1) * page_size);
        prop_assert!(page < page_count(total, page_size));
    }

    #[test]
    fn test_page_count(total in 0usize..5000, page_size in 1usize..300) {
        let count = page_count(total, page_size);
        prop_assert_eq!(count, std::cmp::max(1, total.div_ceil(page_size)));
        if total <= page_size {
            prop_assert_eq!(count, 1);
        }
    }

    #[test]
    fn test_pages_partition_rows(total in 0usize..2000, page_size in 1usize..100) {
        let paging = Paging::new(total, page_size);
        let mut next = 0;
        for page in 0..paging.page_count() {
            let range = paging.page_range(page);
            prop_assert_eq!(range.start, next);
            prop_assert!(range.len() <= page_size);
            next = range.end;
        }
        prop_assert_eq!(next, total);
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_105_rows_by_10() {
    let mut model = PagedTableModel::new(
        shared(particle_store(105)),
        PagingConfig::new(10).unwrap(),
    );
    assert_eq!(model.page_count(), 11);
    assert_eq!(row_to_page(104, 10), Some(10));

    model.load_page(10, false);
    assert_eq!(model.paging().current_range(), 100..105);
    assert_eq!(model.window().len(), 5);
    assert_eq!(model.window()[4][0], CellValue::Int(104));
}

#[test]
fn test_idempotent_reload() {
    let mut model = PagedTableModel::new(
        shared(particle_store(105)),
        PagingConfig::new(10).unwrap(),
    );
    let count = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&count);
    model
        .observers()
        .subscribe(EventKind::PageChanged, move |_| *counter.borrow_mut() += 1);

    model.load_page(4, false);
    model.load_page(4, false);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_configure_emits_config_before_page() {
    let mut model = PagedTableModel::new(
        shared(particle_store(105)),
        PagingConfig::new(10).unwrap(),
    );
    let events = Rc::new(RefCell::new(Vec::new()));
    for kind in [EventKind::PageConfigChanged, EventKind::PageChanged] {
        let sink = Rc::clone(&events);
        model
            .observers()
            .subscribe(kind, move |e| sink.borrow_mut().push(*e));
    }

    model.configure_paging(25, 9);
    assert_eq!(
        *events.borrow(),
        vec![
            ModelEvent::PageConfigChanged {
                page: 4,
                page_count: 5,
                page_size: 25
            },
            ModelEvent::PageChanged { page: 4 },
        ]
    );
    assert_eq!(model.window().len(), 5);
}

#[test]
fn test_two_models_share_one_store() {
    let store = shared(particle_store(40));
    let mut editor = PagedTableModel::new(Rc::clone(&store), PagingConfig::new(10).unwrap());
    let viewer = PagedTableModel::new(Rc::clone(&store), PagingConfig::new(5).unwrap());

    editor.set_cell(7, 2, CellValue::Text("12345.5".to_string())).unwrap();

    // Not resident in the viewer's window, still visible through the store
    assert_eq!(viewer.cell(7, 2), CellValue::Float(12345.5));
    assert_eq!(store.borrow().cell(7, 2), Some(CellValue::Float(12345.5)));
}

#[test]
fn test_insert_then_page_through() {
    let mut model = PagedTableModel::new(
        shared(particle_store(20)),
        PagingConfig::new(10).unwrap(),
    );
    model.insert_rows(20, 5).unwrap();
    assert_eq!(model.page_count(), 3);

    model.load_page(2, false);
    assert_eq!(model.window().len(), 5);
    assert!(model.window().iter().all(|row| row.iter().all(CellValue::is_empty)));
}
