//! DataProvider Trait
//!
//! Row-oriented read access over a grid, in display order.

use std::ops::Range;

use super::cell_ref::CellRef;
use super::data_grid::DataGrid;
use crate::domain::Value;

/// Trait for reading displayed rows
pub trait DataProvider {
    type Row: Clone;

    /// Get the total number of rows
    fn len(&self) -> usize;

    /// Check if empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a row by index
    fn row(&self, index: usize) -> Option<Self::Row>;

    /// Get multiple rows in a range
    fn rows(&self, range: Range<usize>) -> Vec<Self::Row> {
        range.filter_map(|i| self.row(i)).collect()
    }

    /// Get page `index` of `size` rows (the last page may be short)
    fn page(&self, index: usize, size: usize) -> Vec<Self::Row> {
        let start = index.saturating_mul(size).min(self.len());
        let end = start.saturating_add(size).min(self.len());
        self.rows(start..end)
    }

    /// Number of pages of `size` rows
    fn page_count(&self, size: usize) -> usize {
        if size == 0 {
            return 0;
        }
        self.len().div_ceil(size)
    }
}

impl DataProvider for DataGrid {
    /// Cell values of one displayed row; unreadable cells are `Null`
    type Row = Vec<Value>;

    fn len(&self) -> usize {
        self.row_count()
    }

    fn row(&self, index: usize) -> Option<Self::Row> {
        if index >= self.row_count() {
            return None;
        }
        let row = (0..self.column_count())
            .map(|column| {
                self.cell_value(CellRef::new(index, column))
                    .unwrap_or_default()
            })
            .collect();
        Some(row)
    }
}
