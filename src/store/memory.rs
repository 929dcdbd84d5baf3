//! In-memory row store with JSON loading.
//!
//! # JSON Layout
//!
//! ```text
//! {
//!   "columns": [
//!     {"name": "image", "label": "Image", "type": "string",
//!      "renderable": {"value": true}},
//!     {"name": "defocus", "type": "float", "editable": {"value": true}}
//!   ],
//!   "rows": [["1@/data/particles.mrcs", 12000.5], ...]
//! }
//! ```
//!
//! Rows shorter than the column list are padded with empty cells, longer
//! rows are truncated.

use std::cmp::Ordering;
use std::io::Read;

use serde::Deserialize;
use tracing::debug;

use crate::error::StoreError;

use super::row_store::{RowStore, SortKey};
use super::value::{CellValue, ColumnDescriptor, ColumnType, Row};

#[derive(Deserialize)]
struct TableFile {
    columns: Vec<ColumnDescriptor>,
    #[serde(default)]
    rows: Vec<Row>,
}

/// Row store keeping every row in a `Vec`.
#[derive(Debug, Clone, Default)]
pub struct MemoryRowStore {
    columns: Vec<ColumnDescriptor>,
    rows: Vec<Row>,
}

impl MemoryRowStore {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a store from descriptors and rows, normalizing row width.
    pub fn with_rows(columns: Vec<ColumnDescriptor>, rows: Vec<Row>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Load a table from JSON.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, StoreError> {
        let file: TableFile =
            serde_json::from_reader(reader).map_err(|e| StoreError::Json(e.to_string()))?;
        debug!(
            columns = file.columns.len(),
            rows = file.rows.len(),
            "loaded table"
        );
        Ok(Self::with_rows(file.columns, file.rows))
    }

    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        Self::from_json_reader(json.as_bytes())
    }

    fn check_row(&self, row: usize) -> Result<(), StoreError> {
        if row >= self.rows.len() {
            return Err(StoreError::RowOutOfRange {
                row,
                len: self.rows.len(),
            });
        }
        Ok(())
    }

    fn check_column(&self, column: usize) -> Result<&ColumnDescriptor, StoreError> {
        self.columns
            .get(column)
            .ok_or(StoreError::ColumnOutOfRange {
                column,
                count: self.columns.len(),
            })
    }
}

impl RowStore for MemoryRowStore {
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    fn column_mut(&mut self, index: usize) -> Option<&mut ColumnDescriptor> {
        self.columns.get_mut(index)
    }

    fn row(&self, index: usize) -> Option<Row> {
        self.rows.get(index).cloned()
    }

    fn cell(&self, row: usize, column: usize) -> Option<CellValue> {
        self.rows.get(row)?.get(column).cloned()
    }

    fn set_cell(&mut self, row: usize, column: usize, value: CellValue) -> Result<(), StoreError> {
        self.check_row(row)?;
        let descriptor = self.check_column(column)?;

        let column_type = descriptor.column_type();
        if !value.fits(column_type) {
            return Err(StoreError::TypeMismatch {
                column: descriptor.name().to_string(),
                expected: column_type.name(),
                value: value.to_string(),
            });
        }

        self.rows[row][column] = value.convert(column_type);
        Ok(())
    }

    fn insert_row(&mut self, at: usize, mut row: Row) -> Result<(), StoreError> {
        if at > self.rows.len() {
            return Err(StoreError::RowOutOfRange {
                row: at,
                len: self.rows.len(),
            });
        }
        row.resize(self.columns.len(), CellValue::Empty);
        self.rows.insert(at, row);
        Ok(())
    }

    fn sort(&mut self, keys: &[SortKey]) -> Result<(), StoreError> {
        let mut resolved = Vec::with_capacity(keys.len());
        for key in keys {
            let index = self
                .column_index(&key.column)
                .ok_or_else(|| StoreError::UnknownColumn(key.column.clone()))?;
            resolved.push((index, self.columns[index].column_type(), key.descending));
        }

        // Stable, so equal keys keep their previous order
        self.rows.sort_by(|a, b| {
            for &(index, column_type, descending) in &resolved {
                let ordering = compare_cells(&a[index], &b[index], column_type, descending);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            Ordering::Equal
        });

        debug!(keys = ?keys, "sorted table");
        Ok(())
    }
}

/// Order two cells as values of `column_type`. Empty cells sort last in
/// both directions.
fn compare_cells(a: &CellValue, b: &CellValue, column_type: ColumnType, descending: bool) -> Ordering {
    let a = a.convert(column_type);
    let b = b.convert(column_type);
    let ordering = match (&a, &b) {
        (CellValue::Empty, CellValue::Empty) => return Ordering::Equal,
        (CellValue::Empty, _) => return Ordering::Greater,
        (_, CellValue::Empty) => return Ordering::Less,
        (CellValue::Bool(x), CellValue::Bool(y)) => x.cmp(y),
        (CellValue::Int(x), CellValue::Int(y)) => x.cmp(y),
        (CellValue::Float(x), CellValue::Float(y)) => x.total_cmp(y),
        (CellValue::Text(x), CellValue::Text(y)) => x.cmp(y),
        _ => Ordering::Equal,
    };
    if descending {
        ordering.reverse()
    } else {
        ordering
    }
}

// =============================================================================
// Tests
// =============================================================================
