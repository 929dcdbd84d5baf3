//! Shared selection of absolute row indices.

use std::collections::BTreeSet;
use std::ops::Range;

/// Set of selected rows, kept as absolute indices so it survives page
/// changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    rows: BTreeSet<usize>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the row was not selected before.
    pub fn select(&mut self, row: usize) -> bool {
        self.rows.insert(row)
    }

    /// Returns `true` if the row was selected before.
    pub fn deselect(&mut self, row: usize) -> bool {
        self.rows.remove(&row)
    }

    /// Flip one row; returns its new state.
    pub fn toggle(&mut self, row: usize) -> bool {
        if self.rows.remove(&row) {
            false
        } else {
            self.rows.insert(row);
            true
        }
    }

    /// Select every row between `from` and `to`, both included, in either
    /// order.
    pub fn select_range(&mut self, from: usize, to: usize) {
        let (low, high) = if from <= to { (from, to) } else { (to, from) };
        self.rows.extend(low..=high);
    }

    /// Select rows `0..total`.
    pub fn select_all(&mut self, total: usize) {
        self.rows.extend(0..total);
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Replace the selection with its complement in `0..total`.
    ///
    /// Selected rows at or beyond `total` are dropped.
    pub fn invert(&mut self, total: usize) {
        self.rows = (0..total).filter(|row| !self.rows.contains(row)).collect();
    }

    pub fn contains(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Selected rows in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().copied()
    }

    /// Offsets, relative to `range.start`, of the selected rows inside
    /// `range`.
    pub fn offsets_in(&self, range: Range<usize>) -> Vec<usize> {
        let start = range.start;
        self.rows.range(range).map(|row| row - start).collect()
    }
}

impl FromIterator<usize> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
