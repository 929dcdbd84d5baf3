//! Row store layer.
//!
//! Tabular metadata lives behind the [`RowStore`] trait. Paged models hold a
//! [`StoreHandle`] to it and never keep a private copy of the table.

mod memory;
mod row_store;
mod value;

pub use memory::MemoryRowStore;
pub use row_store::{shared, ColumnKey, RowStore, SortKey, StoreHandle, DESCENDING_SUFFIX};
pub use value::{CellValue, ColumnDescriptor, ColumnFlag, ColumnType, Row};
