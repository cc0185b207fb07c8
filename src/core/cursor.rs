//! Cursor and dimension state
//!
//! Both are bounded values: an assignment outside the allowed range is
//! rejected and the previous value is kept.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Allowed number of rows
pub const ROWS_RANGE: RangeInclusive<usize> = 10..=80;
/// Allowed number of columns
pub const COLS_RANGE: RangeInclusive<usize> = 10..=160;

pub const DEFAULT_ROWS: usize = 15;
pub const DEFAULT_COLS: usize = 40;

/// Console dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Whether both values lie inside their allowed ranges
    pub fn is_valid(&self) -> bool {
        ROWS_RANGE.contains(&self.rows) && COLS_RANGE.contains(&self.cols)
    }

    /// Set the row count; returns false (and keeps the old value) if out of range
    pub fn set_rows(&mut self, rows: usize) -> bool {
        if !ROWS_RANGE.contains(&rows) {
            return false;
        }
        self.rows = rows;
        true
    }

    /// Set the column count; returns false (and keeps the old value) if out of range
    pub fn set_cols(&mut self, cols: usize) -> bool {
        if !COLS_RANGE.contains(&cols) {
            return false;
        }
        self.cols = cols;
        true
    }

    /// Number of cells in the grid
    pub fn area(&self) -> usize {
        self.rows * self.cols
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

/// Cursor position and visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cursor {
    /// Row position (0-indexed)
    pub row: usize,
    /// Column position (0-indexed)
    pub col: usize,
    /// Whether the cursor indicator is shown
    pub visible: bool,
}

impl Cursor {
    /// Create a hidden cursor at (0, 0)
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to `row` if it fits inside `dims`
    pub fn set_row(&mut self, row: usize, dims: Dimensions) -> bool {
        if row >= dims.rows {
            return false;
        }
        self.row = row;
        true
    }

    /// Move to `col` if it fits inside `dims`
    pub fn set_col(&mut self, col: usize, dims: Dimensions) -> bool {
        if col >= dims.cols {
            return false;
        }
        self.col = col;
        true
    }

    /// Pull the cursor back inside `dims`; returns true if it moved
    pub fn clamp_to(&mut self, dims: Dimensions) -> bool {
        let row = self.row.min(dims.rows.saturating_sub(1));
        let col = self.col.min(dims.cols.saturating_sub(1));
        let moved = row != self.row || col != self.col;
        self.row = row;
        self.col = col;
        moved
    }

    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }
}
