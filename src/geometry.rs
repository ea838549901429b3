/// Top-left cell of a block in the logical panel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellOrigin {
    pub row: usize,
    pub col: usize,
}

impl CellOrigin {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for CellOrigin {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Rectangular block of grid cells anchored at an origin.
///
/// Rows cover `[origin.row, origin.row + row_span)` and columns cover
/// `[origin.col, origin.col + col_span)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellArea {
    pub origin: CellOrigin,
    pub row_span: usize,
    pub col_span: usize,
}

impl CellArea {
    pub const fn new(origin: CellOrigin, row_span: usize, col_span: usize) -> Self {
        Self {
            origin,
            row_span,
            col_span,
        }
    }

    pub fn bottom(&self) -> usize {
        self.origin.row.saturating_add(self.row_span)
    }

    pub fn right(&self) -> usize {
        self.origin.col.saturating_add(self.col_span)
    }

    pub fn is_empty(&self) -> bool {
        self.row_span == 0 || self.col_span == 0
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.origin.row && row < self.bottom() && col >= self.origin.col && col < self.right()
    }

    pub fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.origin.row < other.bottom()
            && other.origin.row < self.bottom()
            && self.origin.col < other.right()
            && other.origin.col < self.right()
    }

    /// Iterate every `(row, col)` covered by the area in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.origin.row..self.bottom())
            .flat_map(move |row| (self.origin.col..self.right()).map(move |col| (row, col)))
    }
}
