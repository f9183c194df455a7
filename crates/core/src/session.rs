//! Session module - owns the grid and the active piece and drives play
//!
//! The session is the only owner of mutable game state. The piece and the
//! ghost get borrowed views of the grid for the duration of a call, so there
//! are no back-references between them.
//!
//! Time only moves inside [`Session::tick`]. While the game is over the tick
//! is a no-op until [`Session::restart_game`] is called.

use crate::catalog::definition;
use crate::config::{ConfigError, SessionConfig};
use crate::ghost::Ghost;
use crate::grid::{absolute_cells, Grid, Occupancy};
use crate::piece::{ActivePiece, PiecePhase, StepOutcome, DOWN, LEFT, RIGHT};
use crate::presenter::{NullPresenter, Presenter};
use crate::rng::ShapeRandomizer;
use crate::types::{Coord, Intent, Layer, LockEvent, Shape, SoundCue, Spin};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    Playing,
    GameOver,
}

/// Complete game session
#[derive(Debug)]
pub struct Session<P: Presenter = NullPresenter> {
    config: SessionConfig,
    grid: Grid,
    piece: ActivePiece,
    ghost: Ghost,
    randomizer: ShapeRandomizer,
    presenter: P,
    phase: SessionPhase,
    started: bool,
    score: u32,
    level: u32,
    lines_since_level_up: u32,
    /// Last lock (consumed by observers).
    last_event: Option<LockEvent>,
}

impl Session<NullPresenter> {
    /// Create a session that reports to nobody
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        Self::with_presenter(config, NullPresenter)
    }
}

impl<P: Presenter> Session<P> {
    /// Create a session reporting to `presenter`.
    ///
    /// No piece is spawned until [`Session::start`].
    pub fn with_presenter(config: SessionConfig, presenter: P) -> Result<Self, ConfigError> {
        config.validate()?;

        let randomizer = match config.seed {
            Some(seed) => ShapeRandomizer::new(seed),
            None => ShapeRandomizer::from_entropy(),
        };
        let mut piece = ActivePiece::new(
            definition(Shape::T),
            config.spawn_position,
            config.piece_timing(),
        );
        piece.mark_locked();

        let mut session = Self {
            grid: Grid::new(config.board_width, config.board_height),
            piece,
            ghost: Ghost::new(),
            randomizer,
            presenter,
            phase: SessionPhase::Playing,
            started: false,
            score: 0,
            level: 1,
            lines_since_level_up: 0,
            last_event: None,
            config,
        };
        session.set_level(1);
        session.presenter.score_changed(0);
        Ok(session)
    }

    /// Start the game with a random first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    /// Start the game with a chosen first piece
    pub fn start_with(&mut self, shape: Shape) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_shape(shape);
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    /// Whether simulation time is stopped (game over).
    pub fn is_frozen(&self) -> bool {
        self.is_game_over()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_since_level_up(&self) -> u32 {
        self.lines_since_level_up
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.randomizer.seed()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access for building positions (puzzles, tests).
    ///
    /// The active piece's cells are part of the grid between ticks.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> &ActivePiece {
        &self.piece
    }

    pub fn ghost(&self) -> &Ghost {
        &self.ghost
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Set the level and recompute the active piece's fall speed and step
    /// delay from it. Reports the new level to the presenter.
    pub fn set_level(&mut self, level: u32) {
        self.level = level;
        self.piece.set_fall_speed(self.config.fall_speed(level));
        self.presenter.level_changed(level);
    }

    /// Spawn a random piece at the spawn position
    pub fn spawn_piece(&mut self) -> bool {
        let shape = self.randomizer.next_shape();
        self.spawn_shape(shape)
    }

    /// Spawn `shape` at the spawn position, replacing the live piece if
    /// there is one.
    ///
    /// If the spawn cells are blocked the game ends instead. Does nothing once
    /// the game is over.
    pub fn spawn_shape(&mut self, shape: Shape) -> bool {
        if self.is_game_over() {
            return false;
        }

        if self.piece.phase() != PiecePhase::Locked {
            for at in self.lift_active() {
                self.presenter.tile_changed(Layer::Board, at, None);
            }
            self.piece.mark_locked();
        }

        let spawn = self.config.spawn_position;
        self.piece.initialize(definition(shape), spawn);

        if !self.grid.is_valid_position(self.piece.cells(), spawn) {
            self.enter_game_over();
            return false;
        }

        self.grid.place(self.piece.cells(), spawn, shape);
        for at in absolute_cells(self.piece.cells(), spawn) {
            self.presenter.tile_changed(Layer::Board, at, Some(shape));
        }
        log::debug!("spawned {} at {:?}", shape.as_str(), spawn);
        self.refresh_ghost();
        true
    }

    fn enter_game_over(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.phase = SessionPhase::GameOver;
        self.ghost.erase(&mut self.presenter);
        log::info!("game over: score {}, level {}", self.score, self.level);
        self.presenter.show_game_over(self.score, self.level);
        self.presenter.play_sound(SoundCue::GameOver);
    }

    /// Clear full rows and update score and level. Only runs as part of a
    /// lock, after the piece's cells are committed.
    ///
    /// Every ten cleared lines raise the level by one; a single clear can
    /// cross several thresholds. Returns the number of rows cleared.
    fn clear_lines(&mut self) -> u32 {
        let cleared = self.grid.clear_full_rows() as u32;
        if cleared == 0 {
            return 0;
        }

        for _ in 0..cleared {
            self.presenter.play_sound(SoundCue::LineClear);
        }
        self.redraw_board();

        self.score += cleared;
        self.presenter.score_changed(self.score);

        self.lines_since_level_up += cleared;
        while self.lines_since_level_up >= self.config.lines_per_level {
            self.set_level(self.level + 1);
            self.lines_since_level_up -= self.config.lines_per_level;
            self.presenter.play_sound(SoundCue::LevelUp);
            log::info!("level up: {}", self.level);
        }

        cleared
    }

    /// Wipe the grid, reset score and level, and spawn a new piece.
    pub fn restart_game(&mut self) {
        self.grid.clear();
        self.piece.mark_locked();
        self.redraw_board();
        self.ghost.erase(&mut self.presenter);

        self.phase = SessionPhase::Playing;
        self.started = true;
        self.score = 0;
        self.lines_since_level_up = 0;
        self.last_event = None;
        self.presenter.score_changed(0);
        self.set_level(1);

        log::info!("restart");
        self.spawn_piece();
    }

    /// Advance the simulation by `elapsed_ms`, applying `intents` in order.
    ///
    /// Returns true if a piece locked during this tick. Intents after a hard
    /// drop are dropped.
    pub fn tick(&mut self, elapsed_ms: u32, intents: &[Intent]) -> bool {
        if !self.started || self.is_game_over() {
            return false;
        }

        let before = self.lift_active();

        let mut lock_now = false;
        for &intent in intents {
            if self.apply_intent(intent) {
                lock_now = true;
                break;
            }
        }
        if !lock_now {
            lock_now = self.piece.advance(&self.grid, elapsed_ms) == StepOutcome::Lock;
        }

        self.settle_active(before);
        if lock_now {
            // Spawning the next piece re-projects the ghost.
            self.lock_active();
        } else {
            self.refresh_ghost();
        }
        lock_now
    }

    /// Returns true when the piece has to lock right away.
    fn apply_intent(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::MoveLeft => {
                self.piece.try_move(&self.grid, LEFT);
            }
            Intent::MoveRight => {
                self.piece.try_move(&self.grid, RIGHT);
            }
            Intent::SoftDrop => {
                self.piece.try_move(&self.grid, DOWN);
            }
            Intent::HardDrop => {
                self.presenter.play_sound(SoundCue::HardDrop);
                let rows = self.piece.hard_drop(&self.grid);
                log::debug!("hard drop {} rows", rows);
                return true;
            }
            Intent::RotateCw => {
                self.presenter.play_sound(SoundCue::Rotate);
                self.piece.rotate(&self.grid, Spin::Cw);
            }
            Intent::RotateCcw => {
                self.presenter.play_sound(SoundCue::Rotate);
                self.piece.rotate(&self.grid, Spin::Ccw);
            }
        }
        false
    }

    /// Take the active piece off the grid. Returns the cells it covered.
    fn lift_active(&mut self) -> [Coord; 4] {
        let cells = absolute_cells(self.piece.cells(), self.piece.position());
        self.grid.remove(self.piece.cells(), self.piece.position());
        cells
    }

    /// Put the active piece back and report only the tiles that changed.
    fn settle_active(&mut self, before: [Coord; 4]) {
        let shape = self.piece.shape();
        let after = absolute_cells(self.piece.cells(), self.piece.position());
        self.grid.place(self.piece.cells(), self.piece.position(), shape);

        for at in before {
            if !after.contains(&at) {
                self.presenter.tile_changed(Layer::Board, at, None);
            }
        }
        for at in after {
            if !before.contains(&at) {
                self.presenter.tile_changed(Layer::Board, at, Some(shape));
            }
        }
    }

    /// The piece's cells are already on the grid.
    fn lock_active(&mut self) {
        let shape = self.piece.shape();
        self.piece.mark_locked();
        log::debug!("locked {} at {:?}", shape.as_str(), self.piece.position());

        let lines_cleared = self.clear_lines();
        self.last_event = Some(LockEvent {
            shape,
            lines_cleared,
            score: self.score,
            level: self.level,
        });

        self.spawn_piece();
    }

    fn refresh_ghost(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.ghost.project(&self.grid, &self.piece, &mut self.presenter);
    }

    fn redraw_board(&mut self) {
        for (at, cell) in self.grid.iter() {
            self.presenter.tile_changed(Layer::Board, at, cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::RecordingPresenter;
    use crate::types::TICK_MS;

    fn session() -> Session<RecordingPresenter> {
        Session::with_presenter(SessionConfig::seeded(12345), RecordingPresenter::new()).unwrap()
    }

    #[test]
    fn test_new_session() {
        let s = session();
        assert!(!s.started());
        assert!(!s.is_game_over());
        assert_eq!(s.score(), 0);
        assert_eq!(s.level(), 1);
        assert_eq!(s.lines_since_level_up(), 0);
        assert_eq!(s.grid().occupied_count(), 0);
        assert_eq!(s.presenter().last_level(), Some(1));
        assert_eq!(s.presenter().last_score(), Some(0));
    }

    #[test]
    fn test_start_places_piece() {
        let mut s = session();
        s.start();
        assert!(s.started());
        assert_eq!(s.grid().occupied_count(), 4);
        assert_eq!(s.active().phase(), PiecePhase::Falling);
        assert_eq!(s.active().position(), s.config().spawn_position);
    }

    #[test]
    fn test_tick_before_start_does_nothing() {
        let mut s = session();
        assert!(!s.tick(TICK_MS, &[Intent::HardDrop]));
        assert_eq!(s.grid().occupied_count(), 0);
    }

    #[test]
    fn test_hard_drop_locks_and_spawns() {
        let mut s = session();
        s.start_with(Shape::O);
        assert!(s.tick(TICK_MS, &[Intent::HardDrop]));

        let ev = s.take_last_event().unwrap();
        assert_eq!(ev.shape, Shape::O);
        assert_eq!(ev.lines_cleared, 0);
        assert!(s.take_last_event().is_none());

        // Locked O on the floor plus the freshly spawned piece.
        assert_eq!(s.grid().occupied_count(), 8);
        assert!(s.grid().is_occupied((-1, -10)));
        assert!(s.grid().is_occupied((0, -9)));
        assert_eq!(s.presenter().count_sound(SoundCue::HardDrop), 1);
    }

    #[test]
    fn test_intents_after_hard_drop_are_dropped() {
        let mut s = session();
        s.start_with(Shape::O);
        s.tick(TICK_MS, &[Intent::HardDrop, Intent::MoveLeft, Intent::MoveLeft]);
        assert_eq!(s.active().position(), s.config().spawn_position);
    }

    #[test]
    fn test_settle_reports_only_changed_tiles() {
        let mut s = session();
        s.start_with(Shape::O);
        s.presenter_mut().clear();

        s.tick(TICK_MS, &[Intent::MoveRight]);

        let board_tiles: Vec<_> = s
            .presenter()
            .calls()
            .iter()
            .filter(|c| matches!(c, crate::presenter::PresenterCall::Tile(Layer::Board, ..)))
            .collect();
        // O shifted right by one: one column erased, one drawn.
        assert_eq!(board_tiles.len(), 4);
    }

    #[test]
    fn test_level_up_recomputes_speed() {
        let mut s = session();
        s.set_level(3);
        assert_eq!(s.level(), 3);
        assert_eq!(s.active().fall_speed(), 2.0);
        assert_eq!(s.active().step_delay_ms(), 500);
    }
}
