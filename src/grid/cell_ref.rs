//! CellRef - Display-Coordinate Cell Address

use std::fmt;

use serde::{Deserialize, Serialize};

/// A (row, column) address in display coordinates
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct CellRef {
    row: usize,
    column: usize,
}

impl CellRef {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    pub const fn row(&self) -> usize {
        self.row
    }

    pub const fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.column)
    }
}

impl From<(usize, usize)> for CellRef {
    fn from((row, column): (usize, usize)) -> Self {
        Self::new(row, column)
    }
}
