//! Rotation tests - quarter turns, kicks and lock-grace resets

use block_drop::core::piece::rotate_cell;
use block_drop::core::{definition, ActivePiece, Grid, PiecePhase, PieceTiming, StepOutcome};
use block_drop::types::{Shape, Spin};

fn piece_at(shape: Shape, position: (i8, i8)) -> ActivePiece {
    ActivePiece::new(definition(shape), position, PieceTiming::default())
}

#[test]
fn test_rotate_then_reverse_restores_every_shape() {
    let grid = Grid::new(10, 20);
    for shape in Shape::ALL {
        for spin in [Spin::Cw, Spin::Ccw] {
            let mut p = piece_at(shape, (0, 0));
            let cells = *p.cells();

            assert!(p.rotate(&grid, spin));
            assert!(p.rotate(&grid, spin.reversed()));

            assert_eq!(*p.cells(), cells, "{:?} {:?}", shape, spin);
            assert_eq!(p.rotation_index(), 0);
            assert_eq!(p.position(), (0, 0));
        }
    }
}

#[test]
fn test_four_quarter_turns_are_identity() {
    for shape in Shape::ALL {
        let start = definition(shape).cells;
        let mut cells = start;
        for _ in 0..4 {
            cells = cells.map(|c| rotate_cell(c, shape, Spin::Cw));
        }
        assert_eq!(cells, start, "{:?}", shape);
    }
}

#[test]
fn test_rotation_index_wraps() {
    let grid = Grid::new(10, 20);
    let mut p = piece_at(Shape::T, (0, 0));

    assert!(p.rotate(&grid, Spin::Ccw));
    assert_eq!(p.rotation_index(), 3);
    for expected in [0, 1, 2, 3, 0] {
        assert!(p.rotate(&grid, Spin::Cw));
        assert_eq!(p.rotation_index(), expected);
    }
}

#[test]
fn test_t_rotates_clockwise() {
    let grid = Grid::new(10, 20);
    let mut p = piece_at(Shape::T, (0, 0));
    assert!(p.rotate(&grid, Spin::Cw));
    // Nub points right.
    assert_eq!(*p.cells(), [(1, 0), (0, 1), (0, 0), (0, -1)]);
}

#[test]
fn test_wall_kick_off_left_wall() {
    let grid = Grid::new(10, 20);
    let mut p = piece_at(Shape::T, (0, 0));
    assert!(p.rotate(&grid, Spin::Cw));

    // Flush against the left wall with the nub pointing right.
    while p.try_move(&grid, (-1, 0)) {}
    assert_eq!(p.position(), (-5, 0));

    // Back to spawn orientation needs x = -6; the second candidate (1, 0) fits.
    assert!(p.rotate(&grid, Spin::Ccw));
    assert_eq!(p.rotation_index(), 0);
    assert_eq!(p.position(), (-4, 0));
}

#[test]
fn test_i_kicks_off_right_wall() {
    let grid = Grid::new(10, 20);
    let mut p = piece_at(Shape::I, (0, 0));
    assert!(p.rotate(&grid, Spin::Cw));
    // Vertical I occupies column x + 1.
    while p.try_move(&grid, (1, 0)) {}
    assert_eq!(p.position(), (3, 0));

    // Horizontal from rotation 1 covers x - 1 ..= x + 2, so it must shift left.
    assert!(p.rotate(&grid, Spin::Ccw));
    assert_eq!(p.rotation_index(), 0);
    assert_eq!(p.position(), (2, 0));
}

#[test]
fn test_failed_rotation_changes_nothing() {
    let mut grid = Grid::new(10, 20);
    for x in -5..5 {
        for y in -10..10 {
            grid.set((x, y), Some(Shape::S));
        }
    }
    // Exactly the horizontal I at (0, -1).
    for x in -1..3 {
        grid.set((x, 0), None);
    }

    let mut p = piece_at(Shape::I, (0, -1));
    let cells = *p.cells();
    assert!(!p.rotate(&grid, Spin::Cw));
    assert!(!p.rotate(&grid, Spin::Ccw));
    assert_eq!(*p.cells(), cells);
    assert_eq!(p.rotation_index(), 0);
    assert_eq!(p.position(), (0, -1));
}

#[test]
fn test_move_during_lock_grace_resets_timer() {
    let grid = Grid::new(10, 20);
    let mut p = piece_at(Shape::T, (0, -10));

    assert_eq!(p.advance(&grid, 1000), StepOutcome::Idle);
    assert_eq!(p.phase(), PiecePhase::Locking);
    assert_eq!(p.advance(&grid, 400), StepOutcome::Idle);
    assert_eq!(p.lock_elapsed_ms(), 400);

    assert!(p.try_move(&grid, (1, 0)));
    assert_eq!(p.lock_elapsed_ms(), 0);

    assert_eq!(p.advance(&grid, 400), StepOutcome::Idle);
    assert_eq!(p.advance(&grid, 100), StepOutcome::Lock);
}

#[test]
fn test_hard_drop_reaches_floor() {
    let grid = Grid::new(10, 20);
    let mut p = piece_at(Shape::O, (-1, 8));
    assert_eq!(p.hard_drop(&grid), 18);
    assert_eq!(p.position(), (-1, -10));
}

#[test]
fn test_lock_grace_cancelled_when_ground_disappears() {
    let mut grid = Grid::new(10, 20);
    grid.set((0, -1), Some(Shape::Z));
    let mut p = piece_at(Shape::O, (0, 0));

    assert_eq!(p.advance(&grid, 1000), StepOutcome::Idle);
    assert_eq!(p.phase(), PiecePhase::Locking);

    grid.set((0, -1), None);
    assert_eq!(p.advance(&grid, 16), StepOutcome::Idle);
    assert_eq!(p.phase(), PiecePhase::Falling);
    assert_eq!(p.lock_elapsed_ms(), 0);
}
