//! Core types module - shared data structures and constants
//!
//! This crate defines the plain data used throughout the engine. Nothing here
//! touches the grid or runs simulation logic, so the types can be shared by the
//! core, the simulator binary and any presenter living outside the workspace.
//!
//! # Coordinates
//!
//! The playfield is centred on the logical origin. With the default 10x20 board
//! the bounds are `x ∈ [-5, 5)` and `y ∈ [-10, 10)`; `y` grows upward, so
//! "down" is `(0, -1)`.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `BASE_STEP_DELAY_MS` | 1000 | One row per second at speed 1.0 |
//! | `MIN_STEP_DELAY_MS` | 100 | Step delay never drops below this |
//! | `LOCK_DELAY_MS` | 500 | Lock-grace after a failed step |
//!
//! # Examples
//!
//! ```
//! use block_drop_types::{Intent, Shape, Spin, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let shape = Shape::from_str("t").unwrap();
//! assert_eq!(shape, Shape::T);
//!
//! assert_eq!(Spin::Cw.sign(), 1);
//! assert_eq!(Spin::Cw.reversed(), Spin::Ccw);
//!
//! let intent = Intent::from_str("hardDrop").unwrap();
//! assert_eq!(intent, Intent::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Where new pieces appear, relative to the board centre.
pub const SPAWN_POSITION: Coord = (-1, 8);

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Step delay at fall speed 1.0.
pub const BASE_STEP_DELAY_MS: u32 = 1000;

/// Floor for the step delay at high levels.
pub const MIN_STEP_DELAY_MS: u32 = 100;

/// Lock-grace once the piece has failed to step down.
pub const LOCK_DELAY_MS: u32 = 500;

/// Cleared lines needed for one level-up.
pub const LINES_PER_LEVEL: u32 = 10;

/// Fall speed gained per level above 1.
pub const FALL_SPEED_PER_LEVEL: f32 = 0.5;

/// Integer grid coordinate or offset, `(x, y)` with `y` pointing up.
pub type Coord = (i8, i8);

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Shape)`: Occupied, tagged with the shape that put it there
pub type Cell = Option<Shape>;

/// Add two coordinates component-wise.
#[inline]
pub fn offset(a: Coord, b: Coord) -> Coord {
    (a.0 + b.0, a.1 + b.1)
}

/// The seven tetromino shapes
///
/// Declaration order is the catalog order and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl Shape {
    /// Every shape, in catalog order.
    pub const ALL: [Shape; 7] = [
        Shape::I,
        Shape::O,
        Shape::T,
        Shape::J,
        Shape::L,
        Shape::S,
        Shape::Z,
    ];

    /// Parse shape from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_drop_types::Shape;
    ///
    /// assert_eq!(Shape::from_str("i"), Some(Shape::I));
    /// assert_eq!(Shape::from_str("Z"), Some(Shape::Z));
    /// assert_eq!(Shape::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(Shape::I),
            "o" => Some(Shape::O),
            "t" => Some(Shape::T),
            "j" => Some(Shape::J),
            "l" => Some(Shape::L),
            "s" => Some(Shape::S),
            "z" => Some(Shape::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::I => "i",
            Shape::O => "o",
            Shape::T => "t",
            Shape::J => "j",
            Shape::L => "l",
            Shape::S => "s",
            Shape::Z => "z",
        }
    }

    /// Position of this shape in [`Shape::ALL`].
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Whether the shape turns about a cell corner instead of a cell centre.
    ///
    /// I and O have an even footprint, so their pivot sits between cells.
    pub fn pivots_on_corner(&self) -> bool {
        matches!(self, Shape::I | Shape::O)
    }
}

/// Rotation direction.
///
/// The discriminant is the signed direction used by the rotation matrix and
/// the wall-kick row lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Spin {
    /// Clockwise, +90°.
    Cw = 1,
    /// Counter-clockwise, -90°.
    Ccw = -1,
}

impl Spin {
    pub fn sign(&self) -> i8 {
        *self as i8
    }

    pub fn reversed(&self) -> Self {
        match self {
            Spin::Cw => Spin::Ccw,
            Spin::Ccw => Spin::Cw,
        }
    }
}

/// Discrete player intents fed into a tick
///
/// These are the only inputs the engine understands; mapping keys, buttons or
/// an AI policy onto them is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (does not lock on failure)
    SoftDrop,
    /// Drop piece as far as it goes and lock it immediately
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
}

impl Intent {
    /// Every intent, in declaration order.
    pub const ALL: [Intent; 6] = [
        Intent::MoveLeft,
        Intent::MoveRight,
        Intent::SoftDrop,
        Intent::HardDrop,
        Intent::RotateCw,
        Intent::RotateCcw,
    ];

    /// Parse intent from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_drop_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
    /// assert_eq!(Intent::from_str("ROTATECCW"), Some(Intent::RotateCcw));
    /// assert_eq!(Intent::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "softdrop" => Some(Intent::SoftDrop),
            "harddrop" => Some(Intent::HardDrop),
            "rotatecw" => Some(Intent::RotateCw),
            "rotateccw" => Some(Intent::RotateCcw),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::SoftDrop => "softDrop",
            Intent::HardDrop => "hardDrop",
            Intent::RotateCw => "rotateCw",
            Intent::RotateCcw => "rotateCcw",
        }
    }
}

/// Sound effects the engine asks a presenter to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    LineClear,
    LevelUp,
    Rotate,
    HardDrop,
    GameOver,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::LineClear => "lineClear",
            SoundCue::LevelUp => "levelUp",
            SoundCue::Rotate => "rotate",
            SoundCue::HardDrop => "hardDrop",
            SoundCue::GameOver => "gameOver",
        }
    }
}

/// Visual layer a tile change belongs to.
///
/// The board layer mirrors grid occupancy (locked cells plus the active
/// piece); the ghost layer is a transient overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    Board,
    Ghost,
}

/// Event recorded after a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEvent {
    pub shape: Shape,
    pub lines_cleared: u32,
    /// Score after the clear.
    pub score: u32,
    /// Level after the clear.
    pub level: u32,
}
