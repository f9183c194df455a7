//! Catalog module - tetromino cell offsets and wall kick tables
//!
//! Offsets are relative to the piece pivot with `y` pointing up. Kick tables
//! use the standard SRS data; I has its own table and the other six shapes
//! share one. Candidate order inside a row is part of the contract: the first
//! candidate that fits wins.

use crate::types::{Coord, Shape, Spin};

/// Five kick candidates for each of the eight rotation transitions.
///
/// Row `2r` is `r -> r+1` (clockwise from rotation `r`), row `2r - 1`
/// (wrapped) is `r -> r-1`.
pub type KickTable = [[Coord; 5]; 8];

/// Immutable per-shape data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceDefinition {
    pub shape: Shape,
    /// Spawn-orientation cells, relative to the pivot.
    pub cells: [Coord; 4],
    pub wall_kicks: &'static KickTable,
}

const I_KICKS: KickTable = [
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
];

/// Shared by J, L, O, S, T and Z.
const JLOSTZ_KICKS: KickTable = [
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
];

/// Indexed by `Shape::index()`.
const CATALOG: [PieceDefinition; 7] = [
    PieceDefinition {
        shape: Shape::I,
        cells: [(-1, 1), (0, 1), (1, 1), (2, 1)],
        wall_kicks: &I_KICKS,
    },
    PieceDefinition {
        shape: Shape::O,
        cells: [(0, 1), (1, 1), (0, 0), (1, 0)],
        wall_kicks: &JLOSTZ_KICKS,
    },
    PieceDefinition {
        shape: Shape::T,
        cells: [(0, 1), (-1, 0), (0, 0), (1, 0)],
        wall_kicks: &JLOSTZ_KICKS,
    },
    PieceDefinition {
        shape: Shape::J,
        cells: [(-1, 1), (-1, 0), (0, 0), (1, 0)],
        wall_kicks: &JLOSTZ_KICKS,
    },
    PieceDefinition {
        shape: Shape::L,
        cells: [(1, 1), (-1, 0), (0, 0), (1, 0)],
        wall_kicks: &JLOSTZ_KICKS,
    },
    PieceDefinition {
        shape: Shape::S,
        cells: [(0, 1), (1, 1), (-1, 0), (0, 0)],
        wall_kicks: &JLOSTZ_KICKS,
    },
    PieceDefinition {
        shape: Shape::Z,
        cells: [(-1, 1), (0, 1), (0, 0), (1, 0)],
        wall_kicks: &JLOSTZ_KICKS,
    },
];

const fn cells_distinct(cells: &[Coord; 4]) -> bool {
    let mut i = 0;
    while i < cells.len() {
        let mut j = i + 1;
        while j < cells.len() {
            if cells[i].0 == cells[j].0 && cells[i].1 == cells[j].1 {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

// Catalog data is checked at compile time.
const _: () = {
    let mut i = 0;
    while i < CATALOG.len() {
        assert!(CATALOG[i].shape as usize == i, "catalog out of order");
        assert!(cells_distinct(&CATALOG[i].cells), "duplicate cell in catalog");
        i += 1;
    }
};

static DEFINITIONS: [PieceDefinition; 7] = CATALOG;

/// Look up the definition for a shape
pub fn definition(shape: Shape) -> &'static PieceDefinition {
    &DEFINITIONS[shape.index()]
}

/// Wrap `value` into `[min, max)`.
pub fn wrap(value: i32, min: i32, max: i32) -> i32 {
    min + (value - min).rem_euclid(max - min)
}

/// Kick table row for a rotation starting at `rotation_index`.
pub fn kick_row(rotation_index: u8, spin: Spin) -> usize {
    let mut row = rotation_index as i32 * 2;
    if spin == Spin::Ccw {
        row -= 1;
    }
    wrap(row, 0, 8) as usize
}

/// Kick candidates to try, in order, for a rotation from `rotation_index`.
pub fn kick_candidates(shape: Shape, rotation_index: u8, spin: Spin) -> &'static [Coord; 5] {
    &definition(shape).wall_kicks[kick_row(rotation_index, spin)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap() {
        assert_eq!(wrap(4, 0, 4), 0);
        assert_eq!(wrap(-1, 0, 4), 3);
        assert_eq!(wrap(-8, 0, 8), 0);
        assert_eq!(wrap(9, 0, 8), 1);
    }

    #[test]
    fn test_kick_rows() {
        assert_eq!(kick_row(0, Spin::Cw), 0);
        assert_eq!(kick_row(0, Spin::Ccw), 7);
        assert_eq!(kick_row(1, Spin::Ccw), 1);
        assert_eq!(kick_row(1, Spin::Cw), 2);
        assert_eq!(kick_row(3, Spin::Cw), 6);
        assert_eq!(kick_row(3, Spin::Ccw), 5);
    }

    #[test]
    fn test_only_i_uses_its_own_table() {
        for shape in Shape::ALL {
            let table = definition(shape).wall_kicks;
            if shape == Shape::I {
                assert_eq!(table, &I_KICKS);
            } else {
                assert_eq!(table, &JLOSTZ_KICKS);
            }
        }
    }

    #[test]
    fn test_every_row_starts_with_no_offset() {
        for table in [&I_KICKS, &JLOSTZ_KICKS] {
            for row in table.iter() {
                assert_eq!(row[0], (0, 0));
            }
        }
    }
}
