//! Paged models.
//!
//! A paged model exposes a large dataset one page at a time. Only the rows of
//! the current page are resident; page arithmetic lives in [`Paging`] and
//! every change is announced through the model's [`Observers`].
//!
//! ```text
//!                 configure_paging / load_page
//!                           │
//!                           ▼
//! ┌───────────────────────────────────────────────────┐
//! │                   PagedModel                      │
//! │  ┌───────────────┐  ┌──────────┐  ┌────────────┐  │
//! │  │    Paging     │  │  window  │  │ Observers  │──┼──▶ callbacks
//! │  │ (page, size,  │  │ (rows of │  │ (kind ->   │  │
//! │  │  count,total) │  │  page)   │  │  handlers) │  │
//! │  └───────────────┘  └────┬─────┘  └────────────┘  │
//! └──────────────────────────┼────────────────────────┘
//!                            │ fill
//!              ┌─────────────┴─────────────┐
//!              ▼                           ▼
//!      RowStore handle              computed slices
//!     (PagedTableModel)            (VolumeAxisModel)
//! ```
//!
//! # Events
//!
//! - `PageConfigChanged` is emitted by `configure_paging` before the forced
//!   reload, so listeners see it ahead of the matching `PageChanged`.
//! - `PageChanged` is emitted for every successful load, forced or not.
//! - Out-of-range page requests emit nothing.

mod events;
mod paging;
mod table;
mod volume;

pub use events::{EventCallback, EventKind, ModelEvent, Observers, SubscriptionId};
pub use paging::{page_count, row_to_page, Paging};
pub use table::PagedTableModel;
pub use volume::{VolumeAxisModel, ENABLED_COLUMN, INDEX_COLUMN, SLICE_COLUMN};

use crate::address::Axis;
use crate::store::{CellValue, ColumnDescriptor, Row};

/// Windowed, observable access to a dataset.
pub trait PagedModel {
    /// Current paging state.
    fn paging(&self) -> &Paging;

    /// Apply a page size and requested page, then force-load the page.
    ///
    /// The page size is clamped to at least 1 and the page into
    /// `[0, page_count)`. Emits `PageConfigChanged` then `PageChanged`.
    fn configure_paging(&mut self, page_size: usize, requested_page: usize);

    /// Make page `index` resident.
    ///
    /// No-op when `index` is already current and `force` is false. Requests
    /// outside `[0, page_count)` are ignored.
    fn load_page(&mut self, index: usize, force: bool);

    /// Column descriptors in column order.
    fn columns(&self) -> Vec<ColumnDescriptor>;

    fn column_count(&self) -> usize;

    /// Typed value of any cell, resident or not. Out-of-range reads return
    /// [`CellValue::Empty`].
    fn cell(&self, row: usize, column: usize) -> CellValue;

    /// Rows of the current page.
    fn window(&self) -> &[Row];

    /// Callback registry for this model's events.
    fn observers(&mut self) -> &mut Observers;

    /// Switch the slicing axis. Models without an axis return `false`.
    fn set_axis(&mut self, _axis: Axis) -> bool {
        false
    }

    fn page(&self) -> usize {
        self.paging().page()
    }

    fn page_count(&self) -> usize {
        self.paging().page_count()
    }

    fn page_size(&self) -> usize {
        self.paging().page_size()
    }

    fn total(&self) -> usize {
        self.paging().total()
    }
}
