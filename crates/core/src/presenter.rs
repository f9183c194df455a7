//! Presenter module - the narrow interface the engine reports through
//!
//! Rendering, audio and UI text live outside the engine. The session calls a
//! [`Presenter`] whenever something visible happens; every method has a no-op
//! default so an implementation only overrides what it cares about.

use crate::types::{Cell, Coord, Layer, SoundCue};

/// Receiver for everything the engine wants shown or played.
pub trait Presenter {
    /// A tile on `layer` at `at` now shows `cell` (`None` erases it).
    fn tile_changed(&mut self, _layer: Layer, _at: Coord, _cell: Cell) {}

    fn score_changed(&mut self, _score: u32) {}

    fn level_changed(&mut self, _level: u32) {}

    /// Fire-and-forget sound effect.
    fn play_sound(&mut self, _cue: SoundCue) {}

    /// Called once per game over with the final numbers.
    fn show_game_over(&mut self, _score: u32, _level: u32) {}
}

/// Presenter that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

/// One recorded presenter call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterCall {
    Tile(Layer, Coord, Cell),
    Score(u32),
    Level(u32),
    Sound(SoundCue),
    GameOver { score: u32, level: u32 },
}

/// Presenter that keeps every call, for tests and the simulator.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    calls: Vec<PresenterCall>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[PresenterCall] {
        &self.calls
    }

    /// Drain recorded calls.
    pub fn take(&mut self) -> Vec<PresenterCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn sounds(&self) -> impl Iterator<Item = SoundCue> + '_ {
        self.calls.iter().filter_map(|call| match call {
            PresenterCall::Sound(cue) => Some(*cue),
            _ => None,
        })
    }

    pub fn count_sound(&self, cue: SoundCue) -> usize {
        self.sounds().filter(|&c| c == cue).count()
    }

    pub fn game_over_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, PresenterCall::GameOver { .. }))
            .count()
    }

    /// Most recent score shown, if any.
    pub fn last_score(&self) -> Option<u32> {
        self.calls.iter().rev().find_map(|call| match call {
            PresenterCall::Score(score) => Some(*score),
            _ => None,
        })
    }

    /// Most recent level shown, if any.
    pub fn last_level(&self) -> Option<u32> {
        self.calls.iter().rev().find_map(|call| match call {
            PresenterCall::Level(level) => Some(*level),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn tile_changed(&mut self, layer: Layer, at: Coord, cell: Cell) {
        self.calls.push(PresenterCall::Tile(layer, at, cell));
    }

    fn score_changed(&mut self, score: u32) {
        self.calls.push(PresenterCall::Score(score));
    }

    fn level_changed(&mut self, level: u32) {
        self.calls.push(PresenterCall::Level(level));
    }

    fn play_sound(&mut self, cue: SoundCue) {
        self.calls.push(PresenterCall::Sound(cue));
    }

    fn show_game_over(&mut self, score: u32, level: u32) {
        self.calls.push(PresenterCall::GameOver { score, level });
    }
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn tile_changed(&mut self, layer: Layer, at: Coord, cell: Cell) {
        (**self).tile_changed(layer, at, cell);
    }

    fn score_changed(&mut self, score: u32) {
        (**self).score_changed(score);
    }

    fn level_changed(&mut self, level: u32) {
        (**self).level_changed(level);
    }

    fn play_sound(&mut self, cue: SoundCue) {
        (**self).play_sound(cue);
    }

    fn show_game_over(&mut self, score: u32, level: u32) {
        (**self).show_game_over(score, level);
    }
}
