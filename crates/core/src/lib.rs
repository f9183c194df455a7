//! Core game logic - deterministic falling-block engine
//!
//! This crate holds every game rule and all mutable game state. It does no
//! rendering, audio or input handling; anything visible is reported through
//! the [`Presenter`] trait, and player input arrives as
//! [`Intent`](types::Intent)s passed to [`Session::tick`].
//!
//! # Module Structure
//!
//! - [`grid`]: centred occupancy grid with bounds checks and row clearing
//! - [`catalog`]: the seven shapes, their spawn cells and wall-kick tables
//! - [`piece`]: the active piece, rotation with kicks, step and lock timers
//! - [`ghost`]: landing-row projection drawn on its own layer
//! - [`rng`]: seeded uniform shape selection
//! - [`config`]: session configuration and validation
//! - [`presenter`]: the output interface plus null and recording presenters
//! - [`session`]: spawn, lock, line clear, level progression, game over
//!
//! # Example
//!
//! ```
//! use block_drop_core::{Session, SessionConfig};
//! use block_drop_types::{Intent, Shape, TICK_MS};
//!
//! let mut session = Session::new(SessionConfig::seeded(12345)).unwrap();
//! session.start_with(Shape::T);
//!
//! session.tick(TICK_MS, &[Intent::MoveRight, Intent::RotateCw]);
//! assert!(session.tick(TICK_MS, &[Intent::HardDrop]));
//!
//! let event = session.take_last_event().unwrap();
//! assert_eq!(event.shape, Shape::T);
//! assert_eq!(session.score(), 0);
//! ```
//!
//! # Timing
//!
//! - **Step delay**: `max(1000 ms / speed, 100 ms)`, speed `1 + (level - 1) * 0.5`
//! - **Lock delay**: 500 ms after the first failed step; any successful move
//!   or rotation restarts it
//! - **Level**: one level per ten cleared lines

pub mod catalog;
pub mod config;
pub mod ghost;
pub mod grid;
pub mod piece;
pub mod presenter;
pub mod rng;
pub mod session;

pub use block_drop_types as types;

pub use catalog::{definition, PieceDefinition};
pub use config::{ConfigError, SessionConfig};
pub use ghost::Ghost;
pub use grid::{Bounds, Grid, MaskedGrid, Occupancy, MAX_BOARD_SIDE};
pub use piece::{ActivePiece, PiecePhase, PieceTiming, StepOutcome};
pub use presenter::{NullPresenter, Presenter, PresenterCall, RecordingPresenter};
pub use rng::ShapeRandomizer;
pub use session::{Session, SessionPhase};
