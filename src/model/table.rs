//! Paged view over a row store.
//!
//! The model keeps only the rows of the current page in memory. Every other
//! read goes through the store handle, so the model never holds a private
//! copy of the table and edits made elsewhere through the same handle are
//! seen after the next reload.

use tracing::{debug, warn};

use crate::address::Address;
use crate::config::PagingConfig;
use crate::error::StoreError;
use crate::store::{CellValue, ColumnDescriptor, Row, RowStore, SortKey, StoreHandle};

use super::events::{ModelEvent, Observers};
use super::paging::Paging;
use super::PagedModel;

/// Windowed view over a [`RowStore`].
///
/// # Example
///
/// ```
/// use em_gallery::config::PagingConfig;
/// use em_gallery::model::{PagedModel, PagedTableModel};
/// use em_gallery::store::{shared, ColumnDescriptor, ColumnType, MemoryRowStore};
///
/// let rows = (0..105).map(|i| vec![(i as i64).into()]).collect();
/// let store = MemoryRowStore::with_rows(vec![ColumnDescriptor::new("id", ColumnType::Int)], rows);
///
/// let mut model = PagedTableModel::new(shared(store), PagingConfig::new(10).unwrap());
/// assert_eq!(model.paging().page_count(), 11);
///
/// model.load_page(10, false);
/// assert_eq!(model.window().len(), 5);
/// ```
pub struct PagedTableModel<S: RowStore> {
    /// Shared handle to the backing rows
    store: StoreHandle<S>,

    paging: Paging,

    /// Copies of the rows on the current page
    window: Vec<Row>,

    observers: Observers,
}

impl<S: RowStore> PagedTableModel<S> {
    /// Create a model positioned on page 0.
    pub fn new(store: StoreHandle<S>, config: PagingConfig) -> Self {
        let total = store.borrow().len();
        let mut model = Self {
            store,
            paging: Paging::new(total, config.page_size()),
            window: Vec::new(),
            observers: Observers::new(),
        };
        model.fill_window();
        model
    }

    pub fn store(&self) -> &StoreHandle<S> {
        &self.store
    }

    /// Re-read the row count and reload the current page.
    ///
    /// Needed after the store was changed through another handle.
    pub fn refresh(&mut self) {
        let page_size = self.paging.page_size();
        let page = self.paging.page();
        self.configure_paging(page_size, page);
    }

    /// Insert `count` empty rows before position `at`.
    ///
    /// # Errors
    ///
    /// Fails when `at` is outside `[0, total]`.
    pub fn insert_rows(&mut self, at: usize, count: usize) -> Result<(), StoreError> {
        {
            let mut store = self.store.borrow_mut();
            let len = store.len();
            if at > len {
                return Err(StoreError::RowOutOfRange { row: at, len });
            }
            for offset in 0..count {
                let row = store.create_row();
                store.insert_row(at + offset, row)?;
            }
        }

        debug!(at, count, "inserted rows");
        self.refresh();
        Ok(())
    }

    /// Sort the store by one column and reload the current page.
    pub fn sort(&mut self, column: usize, descending: bool) -> Result<(), StoreError> {
        let name = self.column(column)?.name().to_string();
        let key = if descending {
            SortKey::descending(name)
        } else {
            SortKey::ascending(name)
        };

        self.store.borrow_mut().sort(&[key])?;
        let page = self.paging.page();
        self.load_page(page, true);
        Ok(())
    }

    /// Write one cell of an editable column.
    ///
    /// The value is written through to the store; the resident window is
    /// updated if the row is on the current page. Emits `RowChanged`.
    pub fn set_cell(&mut self, row: usize, column: usize, value: CellValue) -> Result<(), StoreError> {
        let descriptor = self.column(column)?;
        if !descriptor.is_editable() {
            return Err(StoreError::ReadOnlyColumn(descriptor.name().to_string()));
        }

        self.store.borrow_mut().set_cell(row, column, value)?;

        let range = self.paging.current_range();
        if range.contains(&row) {
            if let Some(updated) = self.store.borrow().row(row) {
                self.window[row - range.start] = updated;
            }
        }

        self.observers.emit(&ModelEvent::RowChanged { row });
        Ok(())
    }

    /// Toggle column visibility; `false` if the column is missing or locked.
    pub fn set_column_visible(&mut self, column: usize, visible: bool) -> bool {
        self.store
            .borrow_mut()
            .column_mut(column)
            .is_some_and(|c| c.set_visible(visible))
    }

    /// Toggle thumbnail rendering; `false` if the column is missing or locked.
    pub fn set_column_renderable(&mut self, column: usize, renderable: bool) -> bool {
        self.store
            .borrow_mut()
            .column_mut(column)
            .is_some_and(|c| c.set_renderable(renderable))
    }

    /// Indexes of the columns whose cells are addresses.
    pub fn renderable_columns(&self) -> Vec<usize> {
        self.store
            .borrow()
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_renderable())
            .map(|(i, _)| i)
            .collect()
    }

    /// Address held by a renderable cell, `None` when the column is not
    /// renderable or the cell does not parse as an address.
    pub fn address_at(&self, row: usize, column: usize) -> Option<Address> {
        let renderable = self
            .store
            .borrow()
            .columns()
            .get(column)
            .is_some_and(ColumnDescriptor::is_renderable);
        if !renderable {
            return None;
        }
        self.cell(row, column).as_str()?.parse().ok()
    }

    fn column(&self, column: usize) -> Result<ColumnDescriptor, StoreError> {
        let store = self.store.borrow();
        store
            .columns()
            .get(column)
            .cloned()
            .ok_or(StoreError::ColumnOutOfRange {
                column,
                count: store.column_count(),
            })
    }

    fn fill_window(&mut self) {
        self.window = self.store.borrow().rows(self.paging.current_range());
    }
}

impl<S: RowStore> PagedModel for PagedTableModel<S> {
    fn paging(&self) -> &Paging {
        &self.paging
    }

    fn configure_paging(&mut self, page_size: usize, requested_page: usize) {
        let total = self.store.borrow().len();
        self.paging.set_total(total);
        let page = self.paging.configure(page_size, requested_page);

        debug!(
            total,
            page_size = self.paging.page_size(),
            page_count = self.paging.page_count(),
            page,
            "configured paging"
        );

        self.observers.emit(&ModelEvent::PageConfigChanged {
            page,
            page_count: self.paging.page_count(),
            page_size: self.paging.page_size(),
        });
        self.load_page(page, true);
    }

    fn load_page(&mut self, index: usize, force: bool) {
        if index == self.paging.page() && !force {
            return;
        }
        if !self.paging.set_page(index) {
            warn!(
                page = index,
                page_count = self.paging.page_count(),
                "ignoring out-of-range page request"
            );
            return;
        }

        self.fill_window();
        debug!(page = index, rows = self.window.len(), "loaded page");
        self.observers.emit(&ModelEvent::PageChanged { page: index });
    }

    fn columns(&self) -> Vec<ColumnDescriptor> {
        self.store.borrow().columns().to_vec()
    }

    fn column_count(&self) -> usize {
        self.store.borrow().column_count()
    }

    /// Read any row directly from the store, resident or not.
    fn cell(&self, row: usize, column: usize) -> CellValue {
        let store = self.store.borrow();
        let Some(descriptor) = store.columns().get(column) else {
            return CellValue::Empty;
        };
        store
            .cell(row, column)
            .map(|value| value.convert(descriptor.column_type()))
            .unwrap_or_default()
    }

    fn window(&self) -> &[Row] {
        &self.window
    }

    fn observers(&mut self) -> &mut Observers {
        &mut self.observers
    }
}

// =============================================================================
// Tests
// =============================================================================
