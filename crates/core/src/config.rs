//! Session configuration
//!
//! Defaults match the constants in the types crate. A config is checked once
//! with [`SessionConfig::validate`] before a session is built from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::definition;
pub use crate::grid::MAX_BOARD_SIDE;
use crate::grid::{absolute_cells, Bounds};
use crate::piece::PieceTiming;
use crate::types::{
    Coord, Shape, BASE_STEP_DELAY_MS, BOARD_HEIGHT, BOARD_WIDTH, FALL_SPEED_PER_LEVEL,
    LINES_PER_LEVEL, LOCK_DELAY_MS, MIN_STEP_DELAY_MS, SPAWN_POSITION,
};

/// Smallest board side that still fits every shape in any orientation.
pub const MIN_BOARD_SIDE: u8 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub board_width: u8,
    pub board_height: u8,
    pub spawn_position: Coord,
    pub base_step_delay_ms: u32,
    pub min_step_delay_ms: u32,
    pub lock_delay_ms: u32,
    pub lines_per_level: u32,
    /// Fall speed gained per level above 1.
    pub speed_per_level: f32,
    /// `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            spawn_position: SPAWN_POSITION,
            base_step_delay_ms: BASE_STEP_DELAY_MS,
            min_step_delay_ms: MIN_STEP_DELAY_MS,
            lock_delay_ms: LOCK_DELAY_MS,
            lines_per_level: LINES_PER_LEVEL,
            speed_per_level: FALL_SPEED_PER_LEVEL,
            seed: None,
        }
    }
}

/// Why a [`SessionConfig`] was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    BoardSize { width: u8, height: u8 },
    /// Some shape would spawn with a cell outside the board.
    SpawnOutOfBounds { spawn: Coord, shape: Shape },
    ZeroDelay(&'static str),
    ZeroLinesPerLevel,
    SpeedIncrement(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoardSize { width, height } => write!(
                f,
                "board size {width}x{height} outside {MIN_BOARD_SIDE}..={MAX_BOARD_SIDE}"
            ),
            ConfigError::SpawnOutOfBounds { spawn, shape } => write!(
                f,
                "spawn position {spawn:?} puts shape {} outside the board",
                shape.as_str()
            ),
            ConfigError::ZeroDelay(name) => write!(f, "{name} must be greater than zero"),
            ConfigError::ZeroLinesPerLevel => write!(f, "lines_per_level must be greater than zero"),
            ConfigError::SpeedIncrement(v) => {
                write!(f, "speed_per_level must be positive and finite, got {v}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl SessionConfig {
    /// Default config with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let side = MIN_BOARD_SIDE..=MAX_BOARD_SIDE;
        if !side.contains(&self.board_width) || !side.contains(&self.board_height) {
            return Err(ConfigError::BoardSize {
                width: self.board_width,
                height: self.board_height,
            });
        }

        let bounds = self.bounds();
        for shape in Shape::ALL {
            let cells = absolute_cells(&definition(shape).cells, self.spawn_position);
            if !cells.iter().all(|&at| bounds.contains(at)) {
                return Err(ConfigError::SpawnOutOfBounds {
                    spawn: self.spawn_position,
                    shape,
                });
            }
        }

        if self.base_step_delay_ms == 0 {
            return Err(ConfigError::ZeroDelay("base_step_delay_ms"));
        }
        if self.min_step_delay_ms == 0 {
            return Err(ConfigError::ZeroDelay("min_step_delay_ms"));
        }
        if self.lock_delay_ms == 0 {
            return Err(ConfigError::ZeroDelay("lock_delay_ms"));
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        if !(self.speed_per_level.is_finite() && self.speed_per_level > 0.0) {
            return Err(ConfigError::SpeedIncrement(self.speed_per_level));
        }
        Ok(())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::centered(self.board_width, self.board_height)
    }

    pub fn piece_timing(&self) -> PieceTiming {
        PieceTiming {
            base_step_delay_ms: self.base_step_delay_ms,
            min_step_delay_ms: self.min_step_delay_ms,
            lock_delay_ms: self.lock_delay_ms,
        }
    }

    /// Fall speed at `level`: `1 + (level - 1) * speed_per_level`.
    pub fn fall_speed(&self, level: u32) -> f32 {
        1.0 + level.saturating_sub(1) as f32 * self.speed_per_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(SessionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_fall_speed_per_level() {
        let config = SessionConfig::default();
        assert_eq!(config.fall_speed(1), 1.0);
        assert_eq!(config.fall_speed(2), 1.5);
        assert_eq!(config.fall_speed(5), 3.0);
    }

    #[test]
    fn test_rejects_tiny_board() {
        let config = SessionConfig {
            board_width: 3,
            ..SessionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BoardSize { width: 3, .. })
        ));
    }

    #[test]
    fn test_rejects_spawn_outside_board() {
        let config = SessionConfig {
            spawn_position: (-1, 9),
            ..SessionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpawnOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_lock_delay() {
        let config = SessionConfig {
            lock_delay_ms: 0,
            ..SessionConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroDelay("lock_delay_ms"))
        );
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "lock_delay_ms must be greater than zero"
        );
    }

    #[test]
    fn test_json_roundtrip_and_partial_input() {
        let config = SessionConfig::seeded(42);
        let json = serde_json::to_string(&config).unwrap();
        let back: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        let partial: SessionConfig = serde_json::from_str(r#"{"board_width": 12}"#).unwrap();
        assert_eq!(partial.board_width, 12);
        assert_eq!(partial.board_height, BOARD_HEIGHT);
        assert_eq!(partial.seed, None);
    }
}
