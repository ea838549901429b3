//! Occupancy matrix backing the panel grid.
//!
//! The matrix has a fixed number of rows and a column count that only grows.
//! Every row is stored as its own vector and all rows always share the same
//! length; growth appends free cells to each of them.

use std::fmt;

use thiserror::Error;

use crate::geometry::CellArea;

/// Errors raised by the grid allocator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The grid needs at least one row.
    #[error("grid must have at least one row")]
    InvalidConfiguration,

    /// A block taller than the grid can never fit since growth only adds columns.
    #[error("row span {row_span} exceeds the grid's {rows} row(s)")]
    OversizedRequest { row_span: usize, rows: usize },

    /// Both spans must cover at least one cell.
    #[error("row and column spans must be at least 1 (got {row_span}x{col_span})")]
    EmptySpan { row_span: usize, col_span: usize },
}

/// Boolean occupancy matrix, `true` meaning free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    cells: Vec<Vec<bool>>,
}

impl OccupancyGrid {
    /// Create a grid with `rows` empty rows and zero columns.
    pub fn new(rows: usize) -> Self {
        Self {
            cells: vec![Vec::new(); rows],
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn col_count(&self) -> usize {
        self.cells.first().map(Vec::len).unwrap_or(0)
    }

    /// Out-of-bounds cells are reported as not free.
    pub fn is_free(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// True when every cell of `area` lies inside the grid and is free.
    pub fn is_block_free(&self, area: &CellArea) -> bool {
        area.bottom() <= self.rows()
            && area.right() <= self.col_count()
            && self.cells[area.origin.row..area.bottom()]
                .iter()
                .all(|cells| cells[area.origin.col..area.right()].iter().all(|free| *free))
    }

    /// True when `col` is free in every row.
    pub fn is_column_free(&self, col: usize) -> bool {
        col < self.col_count() && self.cells.iter().all(|cells| cells[col])
    }

    /// Append `extra` free columns to every row.
    pub fn grow(&mut self, extra: usize) {
        if extra == 0 {
            return;
        }
        let width = self.col_count() + extra;
        for cells in &mut self.cells {
            cells.resize(width, true);
        }
    }

    /// Mark every cell of `area` occupied. The area must already be in bounds.
    pub fn occupy(&mut self, area: &CellArea) {
        debug_assert!(area.bottom() <= self.rows() && area.right() <= self.col_count());
        for cells in &mut self.cells[area.origin.row..area.bottom()] {
            cells[area.origin.col..area.right()].fill(false);
        }
    }

    pub fn free_cells(&self) -> usize {
        self.cells
            .iter()
            .map(|cells| cells.iter().filter(|free| **free).count())
            .sum()
    }

    pub fn occupied_cells(&self) -> usize {
        self.rows() * self.col_count() - self.free_cells()
    }
}

impl fmt::Display for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, cells) in self.cells.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for free in cells {
                f.write_str(if *free { "." } else { "#" })?;
            }
        }
        Ok(())
    }
}
