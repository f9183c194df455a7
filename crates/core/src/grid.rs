//! Grid module - occupancy surface the pieces lock into
//!
//! The grid is centred on the logical origin: for a `w x h` board the bounds
//! are `x ∈ [-w/2, -w/2 + w)` and `y ∈ [-h/2, -h/2 + h)`, with `y` growing
//! upward. Cells are stored in a flat row-major `Vec`, bottom row first.

use crate::types::{offset, Cell, Coord, Shape};

/// Largest board side; keeps every coordinate comfortably inside `i8`.
pub const MAX_BOARD_SIDE: u8 = 40;

/// Axis-aligned rectangle of valid cells, half-open on the max side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub x_min: i8,
    pub y_min: i8,
    pub width: u8,
    pub height: u8,
}

impl Bounds {
    /// Bounds of a `width x height` board centred on (0, 0).
    ///
    /// # Panics
    ///
    /// Panics if either side is larger than [`MAX_BOARD_SIDE`].
    pub fn centered(width: u8, height: u8) -> Self {
        assert!(
            width <= MAX_BOARD_SIDE && height <= MAX_BOARD_SIDE,
            "board {width}x{height} exceeds {MAX_BOARD_SIDE} cells per side"
        );
        Self {
            x_min: -((width / 2) as i8),
            y_min: -((height / 2) as i8),
            width,
            height,
        }
    }

    #[inline]
    pub fn x_max(&self) -> i8 {
        self.x_min + self.width as i8
    }

    #[inline]
    pub fn y_max(&self) -> i8 {
        self.y_min + self.height as i8
    }

    #[inline]
    pub fn contains(&self, (x, y): Coord) -> bool {
        x >= self.x_min && x < self.x_max() && y >= self.y_min && y < self.y_max()
    }
}

/// Absolute cells covered by `cells` anchored at `position`.
#[inline]
pub fn absolute_cells(cells: &[Coord; 4], position: Coord) -> [Coord; 4] {
    cells.map(|cell| offset(cell, position))
}

/// Read access to grid occupancy.
///
/// Implemented by [`Grid`] itself and by [`MaskedGrid`], which hides a set of
/// cells so the ghost projector can search downward without lifting the
/// active piece.
pub trait Occupancy {
    fn bounds(&self) -> Bounds;

    fn is_occupied(&self, at: Coord) -> bool;

    /// Whether `cells` anchored at `candidate` all lie inside the bounds on
    /// empty cells.
    fn is_valid_position(&self, cells: &[Coord; 4], candidate: Coord) -> bool {
        let bounds = self.bounds();
        cells.iter().all(|&cell| {
            let at = offset(cell, candidate);
            bounds.contains(at) && !self.is_occupied(at)
        })
    }
}

/// The game grid
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    bounds: Bounds,
    /// Row-major, `y_min` row first.
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid centred on the origin
    ///
    /// # Panics
    ///
    /// Panics if either side is larger than [`MAX_BOARD_SIDE`].
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            bounds: Bounds::centered(width, height),
            cells: vec![None; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, (x, y): Coord) -> Option<usize> {
        if !self.bounds.contains((x, y)) {
            return None;
        }
        let col = (x - self.bounds.x_min) as usize;
        let row = (y - self.bounds.y_min) as usize;
        Some(row * self.bounds.width as usize + col)
    }

    pub fn width(&self) -> u8 {
        self.bounds.width
    }

    pub fn height(&self) -> u8 {
        self.bounds.height
    }

    /// Get cell at `at`, `None` when out of bounds
    pub fn get(&self, at: Coord) -> Option<Cell> {
        self.index(at).map(|idx| self.cells[idx])
    }

    /// Set cell at `at`
    /// Returns false if out of bounds
    pub fn set(&mut self, at: Coord, cell: Cell) -> bool {
        match self.index(at) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Mark the four absolute cells of a piece as occupied with `tag`.
    ///
    /// Cells outside the bounds are skipped; callers only place positions
    /// that passed [`Occupancy::is_valid_position`].
    pub fn place(&mut self, cells: &[Coord; 4], position: Coord, tag: Shape) {
        for at in absolute_cells(cells, position) {
            self.set(at, Some(tag));
        }
    }

    /// Empty the four absolute cells of a piece, whatever they held.
    pub fn remove(&mut self, cells: &[Coord; 4], position: Coord) {
        for at in absolute_cells(cells, position) {
            self.set(at, None);
        }
    }

    /// Check if every column of `row` is occupied
    pub fn is_row_full(&self, row: i8) -> bool {
        self.row(row)
            .map(|cells| cells.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Cells of one row, left to right.
    pub fn row(&self, row: i8) -> Option<&[Cell]> {
        let start = self.index((self.bounds.x_min, row))?;
        Some(&self.cells[start..start + self.bounds.width as usize])
    }

    /// Empty `row` and pull every row above it down by one.
    fn clear_row(&mut self, row: i8) {
        let width = self.bounds.width as usize;
        let height = self.bounds.height as usize;
        let r = (row - self.bounds.y_min) as usize;

        // copy_within handles the overlapping shift
        self.cells.copy_within((r + 1) * width..height * width, r * width);
        self.cells[(height - 1) * width..].fill(None);
    }

    /// Clear all full rows and compact the grid downward.
    ///
    /// Scans from the bottom row up. After a clear the scan stays on the same
    /// row, because the row above has just slid into it. Returns the number
    /// of rows cleared.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut row = self.bounds.y_min;
        let mut cleared = 0;

        while row < self.bounds.y_max() {
            if self.is_row_full(row) {
                self.clear_row(row);
                cleared += 1;
            } else {
                row += 1;
            }
        }

        cleared
    }

    /// Iterate every in-bounds coordinate with its cell, bottom row first.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        let bounds = self.bounds;
        let width = bounds.width as usize;
        self.cells.iter().enumerate().map(move |(idx, &cell)| {
            let x = bounds.x_min + (idx % width) as i8;
            let y = bounds.y_min + (idx / width) as i8;
            ((x, y), cell)
        })
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Read-only view that treats `hidden` (absolute cells) as empty.
    pub fn masked(&self, hidden: [Coord; 4]) -> MaskedGrid<'_> {
        MaskedGrid { grid: self, hidden }
    }

    /// Empty the whole grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Occupancy for Grid {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn is_occupied(&self, at: Coord) -> bool {
        matches!(self.get(at), Some(Some(_)))
    }
}

/// A grid view with some cells hidden.
#[derive(Debug, Clone, Copy)]
pub struct MaskedGrid<'a> {
    grid: &'a Grid,
    hidden: [Coord; 4],
}

impl Occupancy for MaskedGrid<'_> {
    fn bounds(&self) -> Bounds {
        self.grid.bounds
    }

    fn is_occupied(&self, at: Coord) -> bool {
        !self.hidden.contains(&at) && self.grid.is_occupied(at)
    }
}
