//! RowStore trait for typed tabular data.
//!
//! Models never own rows. They hold a handle to a store and read through it,
//! so writes made by any holder of the handle are visible to all of them.

use std::cell::RefCell;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

use crate::error::StoreError;

use super::value::{CellValue, ColumnDescriptor, Row};

/// Shared, single-threaded handle to a row store.
pub type StoreHandle<S> = Rc<RefCell<S>>;

/// Wrap a store in a [`StoreHandle`].
pub fn shared<S: RowStore>(store: S) -> StoreHandle<S> {
    Rc::new(RefCell::new(store))
}

// =============================================================================
// Sort Keys
// =============================================================================

/// Suffix marking a descending sort key.
pub const DESCENDING_SUFFIX: &str = " DESC";

/// One sort criterion, written `name` or `name DESC`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub column: String,
    pub descending: bool,
}

impl SortKey {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }

    /// Parse the `name [DESC]` convention.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        match text.strip_suffix(DESCENDING_SUFFIX) {
            Some(column) => Self::descending(column.trim_end()),
            None => Self::ascending(text),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "{}{}", self.column, DESCENDING_SUFFIX)
        } else {
            f.write_str(&self.column)
        }
    }
}

// =============================================================================
// Column Keys
// =============================================================================

/// Column lookup by position or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKey<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for ColumnKey<'_> {
    fn from(index: usize) -> Self {
        ColumnKey::Index(index)
    }
}

impl<'a> From<&'a str> for ColumnKey<'a> {
    fn from(name: &'a str) -> Self {
        ColumnKey::Name(name)
    }
}

// =============================================================================
// RowStore Trait
// =============================================================================

/// Backing store of typed rows.
pub trait RowStore {
    /// Number of rows.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column descriptors, in column order.
    fn columns(&self) -> &[ColumnDescriptor];

    /// Mutable access to one descriptor, for flag toggles.
    fn column_mut(&mut self, index: usize) -> Option<&mut ColumnDescriptor>;

    /// Copy of the row at `index`, `None` when out of range.
    fn row(&self, index: usize) -> Option<Row>;

    /// Raw value of one cell, `None` when out of range.
    fn cell(&self, row: usize, column: usize) -> Option<CellValue>;

    /// Overwrite one cell. The value is converted to the column type.
    fn set_cell(&mut self, row: usize, column: usize, value: CellValue) -> Result<(), StoreError>;

    /// Insert `row` before position `at`; `at == len()` appends.
    fn insert_row(&mut self, at: usize, row: Row) -> Result<(), StoreError>;

    /// Reorder rows by the given keys, first key most significant.
    fn sort(&mut self, keys: &[SortKey]) -> Result<(), StoreError>;

    /// A fresh row with every cell empty.
    fn create_row(&self) -> Row {
        vec![CellValue::Empty; self.columns().len()]
    }

    /// Append a row, returning its index.
    fn add_row(&mut self, row: Row) -> Result<usize, StoreError> {
        let at = self.len();
        self.insert_row(at, row)?;
        Ok(at)
    }

    fn column_count(&self) -> usize {
        self.columns().len()
    }

    /// Descriptor by index or name.
    fn column(&self, key: ColumnKey<'_>) -> Option<&ColumnDescriptor> {
        match key {
            ColumnKey::Index(index) => self.columns().get(index),
            ColumnKey::Name(name) => self.columns().iter().find(|c| c.name() == name),
        }
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns().iter().position(|c| c.name() == name)
    }

    /// Copies of the rows in `range`, clipped to the store size.
    fn rows(&self, range: Range<usize>) -> Vec<Row> {
        let end = range.end.min(self.len());
        (range.start.min(end)..end)
            .filter_map(|i| self.row(i))
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
