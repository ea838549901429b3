//! Gap-filling cell allocator for ribbon panels.
//!
//! A panel has a fixed number of rows and as many columns as its controls
//! need. Each control asks for a `row_span x col_span` block; the allocator
//! hands back the top-left cell of a free block, preferring gaps left by
//! earlier requests over widening the grid.
//!
//! ```
//! use ribbon_grid::layout::{CellRequest, GridSpaceAllocator, SearchMode};
//!
//! let mut grid = GridSpaceAllocator::new(3)?;
//! let large = grid.request_cells(CellRequest::new(3, 1))?;
//! let small = grid.request_cells(CellRequest::new(1, 1))?;
//! let wide = grid.request_cells(CellRequest::new(3, 2).mode(SearchMode::RowWise))?;
//!
//! assert_eq!((large.row, large.col), (0, 0));
//! assert_eq!((small.row, small.col), (0, 1));
//! assert_eq!((wide.row, wide.col), (0, 2));
//! assert_eq!(grid.col_count(), 4);
//! # Ok::<(), ribbon_grid::layout::GridError>(())
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::grid::{GridError, OccupancyGrid};
use crate::geometry::{CellArea, CellOrigin};

/// Order in which candidate origins are scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Row-major scan for any free `row_span x col_span` block.
    #[default]
    ColumnWise,
    /// Left-to-right scan for free full-height columns.
    RowWise,
}

/// A request for a rectangular block of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRequest {
    pub row_span: usize,
    pub col_span: usize,
    pub mode: SearchMode,
}

impl CellRequest {
    pub const fn new(row_span: usize, col_span: usize) -> Self {
        Self {
            row_span,
            col_span,
            mode: SearchMode::ColumnWise,
        }
    }

    pub const fn mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }
}

impl Default for CellRequest {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// How a request was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationKind {
    /// Placed inside the existing grid.
    Found,
    /// RowWise found a free column near the right edge and widened the grid to fit the span.
    Extended,
    /// Nothing fit; placed in freshly appended columns.
    Grown,
}

/// Outcome of a successful request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    /// Block that is now occupied. RowWise placements cover every row.
    pub area: CellArea,
    pub kind: AllocationKind,
    pub columns_added: usize,
}

impl Allocation {
    pub fn origin(&self) -> CellOrigin {
        self.area.origin
    }
}

/// Owns the occupancy grid of a single panel.
///
/// Cells are never released: removing a control from the panel leaves its
/// block occupied for the lifetime of the allocator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSpaceAllocator {
    grid: OccupancyGrid,
}

impl GridSpaceAllocator {
    pub fn new(rows: usize) -> Result<Self, GridError> {
        if rows == 0 {
            return Err(GridError::InvalidConfiguration);
        }
        Ok(Self {
            grid: OccupancyGrid::new(rows),
        })
    }

    /// Create an allocator whose grid starts `columns` wide, all free.
    ///
    /// Panels start with a single placeholder column so that the first
    /// RowWise request finds a free column and the first wide ColumnWise
    /// request reuses it instead of leaving it empty.
    pub fn with_columns(rows: usize, columns: usize) -> Result<Self, GridError> {
        let mut allocator = Self::new(rows)?;
        allocator.grid.grow(columns);
        Ok(allocator)
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn col_count(&self) -> usize {
        self.grid.col_count()
    }

    pub fn is_free(&self, row: usize, col: usize) -> bool {
        self.grid.is_free(row, col)
    }

    pub fn free_cells(&self) -> usize {
        self.grid.free_cells()
    }

    pub fn occupied_cells(&self) -> usize {
        self.grid.occupied_cells()
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Reserve a block and return its top-left cell.
    pub fn request_cells(&mut self, request: CellRequest) -> Result<CellOrigin, GridError> {
        self.allocate(request).map(|allocation| allocation.origin())
    }

    /// Reserve a block and report how it was obtained.
    ///
    /// Fails without touching the grid when a span is zero or the row span
    /// exceeds the row count.
    pub fn allocate(&mut self, request: CellRequest) -> Result<Allocation, GridError> {
        let CellRequest {
            row_span,
            col_span,
            mode,
        } = request;

        if row_span == 0 || col_span == 0 {
            return Err(GridError::EmptySpan { row_span, col_span });
        }
        if row_span > self.rows() {
            return Err(GridError::OversizedRequest {
                row_span,
                rows: self.rows(),
            });
        }

        let found = match mode {
            SearchMode::ColumnWise => self.find_block(row_span, col_span),
            SearchMode::RowWise => self.find_columns(col_span),
        };

        Ok(found.unwrap_or_else(|| self.grow_for(row_span, col_span)))
    }

    fn find_block(&mut self, row_span: usize, col_span: usize) -> Option<Allocation> {
        let width = self.col_count();
        if col_span > width {
            return None;
        }

        for row in 0..=self.rows() - row_span {
            for col in 0..=width - col_span {
                let area = CellArea::new(CellOrigin::new(row, col), row_span, col_span);
                if self.grid.is_block_free(&area) {
                    self.grid.occupy(&area);
                    return Some(Allocation {
                        area,
                        kind: AllocationKind::Found,
                        columns_added: 0,
                    });
                }
            }
        }
        None
    }

    fn find_columns(&mut self, col_span: usize) -> Option<Allocation> {
        let rows = self.rows();
        let width = self.col_count();

        // The block may run past the right edge; only the part inside the grid
        // has to be free.
        let col = (0..width).find(|&col| {
            let inside = col_span.min(width - col);
            self.grid
                .is_block_free(&CellArea::new(CellOrigin::new(0, col), rows, inside))
        })?;

        let shortfall = col_span.saturating_sub(width - col);
        self.grid.grow(shortfall);

        let area = CellArea::new(CellOrigin::new(0, col), rows, col_span);
        self.grid.occupy(&area);
        Some(Allocation {
            area,
            kind: if shortfall > 0 {
                AllocationKind::Extended
            } else {
                AllocationKind::Found
            },
            columns_added: shortfall,
        })
    }

    fn grow_for(&mut self, row_span: usize, col_span: usize) -> Allocation {
        let mut start = self.col_count();
        let mut extra = col_span;

        // A fully free trailing column becomes the first column of the block.
        if start > 0 && self.grid.is_column_free(start - 1) {
            start -= 1;
            extra -= 1;
        }

        self.grid.grow(extra);
        let area = CellArea::new(CellOrigin::new(0, start), row_span, col_span);
        self.grid.occupy(&area);
        Allocation {
            area,
            kind: AllocationKind::Grown,
            columns_added: extra,
        }
    }
}

impl fmt::Display for GridSpaceAllocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_wise(row_span: usize, col_span: usize) -> CellRequest {
        CellRequest::new(row_span, col_span)
    }

    fn row_wise(row_span: usize, col_span: usize) -> CellRequest {
        CellRequest::new(row_span, col_span).mode(SearchMode::RowWise)
    }

    #[test]
    fn zero_rows_is_invalid() {
        assert_eq!(
            GridSpaceAllocator::new(0).unwrap_err(),
            GridError::InvalidConfiguration
        );
        assert_eq!(
            GridSpaceAllocator::with_columns(0, 1).unwrap_err(),
            GridError::InvalidConfiguration
        );
    }

    #[test]
    fn single_row_fill_grows_one_column_per_request() {
        let mut grid = GridSpaceAllocator::new(1).unwrap();
        assert_eq!(grid.col_count(), 0);

        let mut origins = Vec::new();
        let mut widths = Vec::new();
        for _ in 0..3 {
            origins.push(grid.request_cells(CellRequest::default()).unwrap());
            widths.push(grid.col_count());
        }

        assert_eq!(
            origins,
            vec![
                CellOrigin::new(0, 0),
                CellOrigin::new(0, 1),
                CellOrigin::new(0, 2)
            ]
        );
        assert_eq!(widths, vec![1, 2, 3]);
    }

    #[test]
    fn row_wise_reserves_full_columns() {
        let mut grid = GridSpaceAllocator::new(3).unwrap();

        let first = grid.allocate(row_wise(3, 2)).unwrap();
        assert_eq!(first.origin(), CellOrigin::new(0, 0));
        assert_eq!(grid.col_count(), 2);
        assert_eq!(grid.free_cells(), 0);

        let second = grid.allocate(row_wise(3, 2)).unwrap();
        assert_eq!(second.origin(), CellOrigin::new(0, 2));
        assert_eq!(second.kind, AllocationKind::Grown);
        assert_eq!(grid.col_count(), 4);
        assert_eq!(grid.to_string(), "####\n####\n####");
    }

    #[test]
    fn row_wise_extends_a_free_column_past_the_edge() {
        let mut grid = GridSpaceAllocator::with_columns(3, 1).unwrap();

        let first = grid.allocate(row_wise(3, 2)).unwrap();
        assert_eq!(first.origin(), CellOrigin::new(0, 0));
        assert_eq!(first.kind, AllocationKind::Extended);
        assert_eq!(first.columns_added, 1);
        assert_eq!(grid.col_count(), 2);

        let second = grid.allocate(row_wise(3, 2)).unwrap();
        assert_eq!(second.origin(), CellOrigin::new(0, 2));
        assert_eq!(second.kind, AllocationKind::Grown);
        assert_eq!(grid.col_count(), 4);
    }

    #[test]
    fn row_wise_takes_every_row_of_a_free_column() {
        let mut grid = GridSpaceAllocator::with_columns(2, 3).unwrap();
        grid.request_cells(column_wise(1, 1)).unwrap();

        let found = grid.allocate(row_wise(1, 1)).unwrap();
        assert_eq!(found.origin(), CellOrigin::new(0, 1));
        assert_eq!(found.kind, AllocationKind::Found);
        assert_eq!(found.area.row_span, 2);
        assert_eq!(grid.to_string(), "##.\n.#.");

        let extended = grid.allocate(row_wise(1, 2)).unwrap();
        assert_eq!(extended.origin(), CellOrigin::new(0, 2));
        assert_eq!(extended.kind, AllocationKind::Extended);
        assert_eq!(grid.to_string(), "####\n.###");
    }

    #[test]
    fn row_wise_requires_whole_block_inside_grid_free() {
        let mut grid = GridSpaceAllocator::with_columns(2, 3).unwrap();
        grid.grid.occupy(&CellArea::new(CellOrigin::new(0, 0), 1, 1));
        grid.grid.occupy(&CellArea::new(CellOrigin::new(1, 2), 1, 1));
        assert_eq!(grid.to_string(), "#..\n..#");

        // Column 1 alone is free, but the two-wide block would cover (1, 2).
        let allocation = grid.allocate(row_wise(2, 2)).unwrap();
        assert_eq!(allocation.origin(), CellOrigin::new(0, 3));
        assert_eq!(allocation.kind, AllocationKind::Grown);
        assert_eq!(grid.to_string(), "#..##\n..###");
    }

    #[test]
    fn row_wise_fallback_marks_only_requested_rows() {
        let mut grid = GridSpaceAllocator::new(3).unwrap();
        grid.request_cells(column_wise(3, 1)).unwrap();
        grid.request_cells(column_wise(1, 2)).unwrap();
        assert_eq!(grid.to_string(), "###\n#..\n#..");

        let allocation = grid.allocate(row_wise(1, 1)).unwrap();
        assert_eq!(allocation.origin(), CellOrigin::new(0, 3));
        assert_eq!(allocation.kind, AllocationKind::Grown);
        assert_eq!(allocation.area.row_span, 1);
        assert_eq!(grid.to_string(), "####\n#...\n#...");
    }

    #[test]
    fn oversized_request_leaves_grid_untouched() {
        let mut grid = GridSpaceAllocator::new(2).unwrap();
        grid.request_cells(column_wise(1, 2)).unwrap();
        let before = grid.clone();

        for mode in [SearchMode::ColumnWise, SearchMode::RowWise] {
            let err = grid
                .request_cells(CellRequest::new(3, 1).mode(mode))
                .unwrap_err();
            assert_eq!(err, GridError::OversizedRequest { row_span: 3, rows: 2 });
            assert_eq!(grid, before);
        }
    }

    #[test]
    fn empty_spans_are_rejected() {
        let mut grid = GridSpaceAllocator::new(2).unwrap();
        assert_eq!(
            grid.request_cells(column_wise(0, 1)).unwrap_err(),
            GridError::EmptySpan {
                row_span: 0,
                col_span: 1
            }
        );
        assert!(grid.request_cells(row_wise(1, 0)).is_err());
        assert_eq!(grid.col_count(), 0);
    }

    #[test]
    fn column_wise_prefers_interior_gap() {
        let mut grid = GridSpaceAllocator::new(2).unwrap();
        grid.request_cells(column_wise(1, 1)).unwrap();
        grid.request_cells(column_wise(2, 1)).unwrap();
        assert_eq!(grid.to_string(), "##\n.#");

        let gap = grid.allocate(column_wise(1, 1)).unwrap();
        assert_eq!(gap.origin(), CellOrigin::new(1, 0));
        assert_eq!(gap.kind, AllocationKind::Found);
        assert_eq!(grid.col_count(), 2);
    }

    #[test]
    fn column_wise_scans_rows_before_columns() {
        let mut grid = GridSpaceAllocator::with_columns(2, 2).unwrap();
        let origins: Vec<_> = (0..5)
            .map(|_| grid.request_cells(column_wise(1, 1)).unwrap())
            .collect();

        assert_eq!(
            origins,
            vec![
                CellOrigin::new(0, 0),
                CellOrigin::new(0, 1),
                CellOrigin::new(1, 0),
                CellOrigin::new(1, 1),
                CellOrigin::new(0, 2),
            ]
        );
    }

    #[test]
    fn fallback_reuses_trailing_free_column() {
        let mut grid = GridSpaceAllocator::with_columns(2, 2).unwrap();
        grid.request_cells(column_wise(2, 1)).unwrap();
        assert_eq!(grid.to_string(), "#.\n#.");

        let allocation = grid.allocate(column_wise(2, 2)).unwrap();
        assert_eq!(allocation.origin(), CellOrigin::new(0, 1));
        assert_eq!(allocation.kind, AllocationKind::Grown);
        assert_eq!(allocation.columns_added, 1);
        assert_eq!(grid.col_count(), 3);
        assert_eq!(grid.to_string(), "###\n###");
    }

    #[test]
    fn fallback_marks_only_the_requested_rows() {
        let mut grid = GridSpaceAllocator::new(3).unwrap();
        grid.request_cells(column_wise(3, 1)).unwrap();

        let allocation = grid.allocate(column_wise(2, 2)).unwrap();
        assert_eq!(allocation.origin(), CellOrigin::new(0, 1));
        assert_eq!(allocation.columns_added, 2);
        assert_eq!(grid.to_string(), "###\n###\n#..");
    }

    #[test]
    fn blocks_never_overlap_and_width_never_shrinks() {
        let mut grid = GridSpaceAllocator::with_columns(4, 1).unwrap();
        let requests = [
            row_wise(4, 2),
            column_wise(4, 1),
            column_wise(1, 1),
            column_wise(2, 2),
            row_wise(1, 1),
            column_wise(1, 3),
            column_wise(3, 1),
            row_wise(4, 2),
            column_wise(1, 1),
            column_wise(2, 1),
            column_wise(1, 2),
            row_wise(2, 3),
            column_wise(4, 2),
            column_wise(1, 1),
        ];

        let mut placed: Vec<CellArea> = Vec::new();
        let mut width = grid.col_count();
        for request in requests {
            let area = grid.allocate(request).unwrap().area;

            assert!(area.origin.row + request.row_span <= grid.rows());
            assert!(area.origin.col + request.col_span <= grid.col_count());
            assert!(area.bottom() <= grid.rows());
            assert!(grid.col_count() >= width);
            for earlier in &placed {
                assert!(!earlier.intersects(&area), "{earlier:?} overlaps {area:?}");
            }
            for (row, col) in area.cells() {
                assert!(!grid.is_free(row, col));
            }

            width = grid.col_count();
            placed.push(area);
        }

        let used: usize = placed.iter().map(|a| a.row_span * a.col_span).sum();
        assert_eq!(used, grid.occupied_cells());
    }
}
