//! Ghost module - landing preview for the active piece
//!
//! The ghost only ever reads the grid. It probes against a masked view that
//! hides the active piece's own cells, so the grid does not have to be
//! mutated while probing, and its tiles go to the ghost layer only.

use arrayvec::ArrayVec;

use crate::grid::{absolute_cells, Grid, Occupancy};
use crate::piece::ActivePiece;
use crate::presenter::Presenter;
use crate::types::{Coord, Layer, Shape};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ghost {
    shape: Option<Shape>,
    cells: [Coord; 4],
    position: Coord,
    /// Absolute cells currently shown on the ghost layer.
    drawn: ArrayVec<Coord, 4>,
}

impl Ghost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shape(&self) -> Option<Shape> {
        self.shape
    }

    pub fn cells(&self) -> &[Coord; 4] {
        &self.cells
    }

    /// Landing anchor from the last projection.
    pub fn position(&self) -> Coord {
        self.position
    }

    pub fn drawn(&self) -> &[Coord] {
        &self.drawn
    }

    /// Erase the previous projection, then draw at the landing row of `piece`.
    ///
    /// `grid` may or may not contain the piece's own cells; they are masked
    /// either way.
    pub fn project(&mut self, grid: &Grid, piece: &ActivePiece, presenter: &mut impl Presenter) {
        self.erase(presenter);

        self.shape = Some(piece.shape());
        self.cells = *piece.cells();

        let view = grid.masked(absolute_cells(piece.cells(), piece.position()));
        let (x, current) = piece.position();
        let bottom = view.bounds().y_min - 1;

        let mut landing = piece.position();
        for row in (bottom..=current).rev() {
            if view.is_valid_position(&self.cells, (x, row)) {
                landing = (x, row);
            } else {
                break;
            }
        }
        self.position = landing;

        let shape = piece.shape();
        for at in absolute_cells(&self.cells, landing) {
            self.drawn.push(at);
            presenter.tile_changed(Layer::Ghost, at, Some(shape));
        }
    }

    /// Remove whatever the ghost last drew.
    pub fn erase(&mut self, presenter: &mut impl Presenter) {
        for at in self.drawn.drain(..) {
            presenter.tile_changed(Layer::Ghost, at, None);
        }
    }
}
