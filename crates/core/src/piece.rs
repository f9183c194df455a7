//! Active piece module - movement, rotation and step/lock timing
//!
//! The piece never owns the grid. Every operation that needs occupancy takes
//! an [`Occupancy`] view from the session, which lifts the piece off the grid
//! before calling in so the piece never collides with itself.

use crate::catalog::{kick_candidates, wrap, PieceDefinition};
use crate::grid::Occupancy;
use crate::types::{
    offset, Coord, Shape, Spin, BASE_STEP_DELAY_MS, LOCK_DELAY_MS, MIN_STEP_DELAY_MS,
};

pub const LEFT: Coord = (-1, 0);
pub const RIGHT: Coord = (1, 0);
pub const DOWN: Coord = (0, -1);

const COS_90: f32 = 0.0;
const SIN_90: f32 = 1.0;

/// Row-major `[cos, sin, -sin, cos]` for a quarter turn.
const ROTATION_MATRIX: [f32; 4] = [COS_90, SIN_90, -SIN_90, COS_90];

/// Where the piece is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PiecePhase {
    /// Descending normally.
    Falling,
    /// A step down failed; lock-grace is running.
    Locking,
    /// Committed to the grid, waiting to be re-initialised.
    Locked,
}

/// Result of advancing the piece's timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Idle,
    /// Moved down at least one row.
    Fell,
    /// Lock-grace ran out; the session must lock the piece.
    Lock,
}

/// Timing knobs the piece needs from the session configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceTiming {
    pub base_step_delay_ms: u32,
    pub min_step_delay_ms: u32,
    pub lock_delay_ms: u32,
}

impl Default for PieceTiming {
    fn default() -> Self {
        Self {
            base_step_delay_ms: BASE_STEP_DELAY_MS,
            min_step_delay_ms: MIN_STEP_DELAY_MS,
            lock_delay_ms: LOCK_DELAY_MS,
        }
    }
}

/// Active falling piece
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePiece {
    shape: Shape,
    position: Coord,
    /// Current offsets, rotated in place.
    cells: [Coord; 4],
    rotation_index: u8,
    fall_speed: f32,
    step_delay_ms: u32,
    step_elapsed_ms: u32,
    lock_elapsed_ms: u32,
    phase: PiecePhase,
    timing: PieceTiming,
}

impl ActivePiece {
    /// Create a piece at `position` with fall speed 1.0
    pub fn new(definition: &PieceDefinition, position: Coord, timing: PieceTiming) -> Self {
        let mut piece = Self {
            shape: definition.shape,
            position,
            cells: definition.cells,
            rotation_index: 0,
            fall_speed: 1.0,
            step_delay_ms: timing.base_step_delay_ms,
            step_elapsed_ms: 0,
            lock_elapsed_ms: 0,
            phase: PiecePhase::Falling,
            timing,
        };
        piece.update_step_delay();
        piece
    }

    /// Reset for a fresh spawn.
    ///
    /// Fall speed and step delay carry over from the previous piece.
    pub fn initialize(&mut self, definition: &PieceDefinition, position: Coord) {
        self.shape = definition.shape;
        self.position = position;
        self.cells = definition.cells;
        self.rotation_index = 0;
        self.step_elapsed_ms = 0;
        self.lock_elapsed_ms = 0;
        self.phase = PiecePhase::Falling;
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    pub fn cells(&self) -> &[Coord; 4] {
        &self.cells
    }

    pub fn rotation_index(&self) -> u8 {
        self.rotation_index
    }

    pub fn fall_speed(&self) -> f32 {
        self.fall_speed
    }

    pub fn step_delay_ms(&self) -> u32 {
        self.step_delay_ms
    }

    pub fn lock_elapsed_ms(&self) -> u32 {
        self.lock_elapsed_ms
    }

    pub fn phase(&self) -> PiecePhase {
        self.phase
    }

    /// Set fall speed and recompute the step delay from it.
    pub fn set_fall_speed(&mut self, speed: f32) {
        self.fall_speed = speed;
        self.update_step_delay();
    }

    fn update_step_delay(&mut self) {
        let delay = (self.timing.base_step_delay_ms as f32 / self.fall_speed).round() as u32;
        // Never zero: `advance` steps once per elapsed delay.
        self.step_delay_ms = delay.max(self.timing.min_step_delay_ms).max(1);
    }

    /// Translate by `delta` if the result is valid.
    ///
    /// A successful move resets the lock-grace timer.
    pub fn try_move(&mut self, grid: &impl Occupancy, delta: Coord) -> bool {
        let candidate = offset(self.position, delta);
        if !grid.is_valid_position(&self.cells, candidate) {
            return false;
        }
        self.position = candidate;
        self.lock_elapsed_ms = 0;
        true
    }

    /// Whether one more row down is free.
    pub fn can_descend(&self, grid: &impl Occupancy) -> bool {
        grid.is_valid_position(&self.cells, offset(self.position, DOWN))
    }

    /// Rotate with wall kicks.
    ///
    /// Tries each kick candidate for the transition in order and keeps the
    /// first that fits. When none fit, rotation index and cells are restored.
    pub fn rotate(&mut self, grid: &impl Occupancy, spin: Spin) -> bool {
        let original = self.rotation_index;
        self.rotation_index = wrap(original as i32 + spin.sign() as i32, 0, 4) as u8;
        self.apply_rotation_matrix(spin);

        for &kick in kick_candidates(self.shape, original, spin) {
            if self.try_move(grid, kick) {
                log::debug!(
                    "{} rotated to {} with kick {:?}",
                    self.shape.as_str(),
                    self.rotation_index,
                    kick
                );
                return true;
            }
        }

        self.rotation_index = original;
        self.apply_rotation_matrix(spin.reversed());
        false
    }

    fn apply_rotation_matrix(&mut self, spin: Spin) {
        let shape = self.shape;
        for cell in self.cells.iter_mut() {
            *cell = rotate_cell(*cell, shape, spin);
        }
    }

    /// Drop until blocked. Returns the number of rows travelled.
    pub fn hard_drop(&mut self, grid: &impl Occupancy) -> u32 {
        let mut rows = 0;
        while self.try_move(grid, DOWN) {
            rows += 1;
        }
        rows
    }

    /// Advance the step and lock-grace timers by `elapsed_ms`.
    pub fn advance(&mut self, grid: &impl Occupancy, elapsed_ms: u32) -> StepOutcome {
        if self.phase == PiecePhase::Locked {
            return StepOutcome::Idle;
        }

        // Slid off a ledge since the failed step.
        if self.phase == PiecePhase::Locking && self.can_descend(grid) {
            self.phase = PiecePhase::Falling;
            self.lock_elapsed_ms = 0;
        }

        if self.phase == PiecePhase::Locking {
            self.lock_elapsed_ms = self.lock_elapsed_ms.saturating_add(elapsed_ms);
        }

        let mut outcome = StepOutcome::Idle;
        self.step_elapsed_ms = self.step_elapsed_ms.saturating_add(elapsed_ms);
        while self.step_elapsed_ms >= self.step_delay_ms {
            self.step_elapsed_ms -= self.step_delay_ms;
            if self.step(grid) {
                outcome = StepOutcome::Fell;
            }
        }

        if self.phase == PiecePhase::Locking && self.lock_elapsed_ms >= self.timing.lock_delay_ms {
            return StepOutcome::Lock;
        }
        outcome
    }

    fn step(&mut self, grid: &impl Occupancy) -> bool {
        if self.try_move(grid, DOWN) {
            self.phase = PiecePhase::Falling;
            true
        } else {
            self.phase = PiecePhase::Locking;
            false
        }
    }

    /// Enter the terminal phase. The session has already written the cells.
    pub fn mark_locked(&mut self) {
        self.phase = PiecePhase::Locked;
    }
}

/// Rotate one offset a quarter turn in `spin` direction.
///
/// I and O turn about the corner shared by their four central cells: the
/// offset is shifted by half a cell first and the result rounded up. The
/// other shapes turn about a cell centre and round to nearest.
pub fn rotate_cell(cell: Coord, shape: Shape, spin: Spin) -> Coord {
    let d = spin.sign() as f32;
    let m = ROTATION_MATRIX;
    let (mut x, mut y) = (cell.0 as f32, cell.1 as f32);

    if shape.pivots_on_corner() {
        x -= 0.5;
        y -= 0.5;
        let rx = (x * m[0] * d + y * m[1] * d).ceil();
        let ry = (x * m[2] * d + y * m[3] * d).ceil();
        (rx as i8, ry as i8)
    } else {
        let rx = (x * m[0] * d + y * m[1] * d).round();
        let ry = (x * m[2] * d + y * m[3] * d).round();
        (rx as i8, ry as i8)
    }
}
