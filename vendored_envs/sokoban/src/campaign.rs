use log::info;

use crate::game::{Direction, GameState, StepOutcome};
use crate::level::{Level, LevelError};

/// An ordered run of levels and the session for the one being played.
#[derive(Clone, Debug)]
pub struct Campaign {
    levels: Vec<Level>,
    current: usize,
    state: GameState,
}

impl Campaign {
    /// Start at `start`, clamped to the last level.
    pub fn new(levels: Vec<Level>, start: usize) -> Result<Self, LevelError> {
        let last = levels.len().checked_sub(1).ok_or(LevelError::Empty)?;
        let current = start.min(last);
        let state = GameState::from_level(&levels[current]);
        Ok(Self { levels, current, state })
    }

    pub fn state(&self) -> &GameState { &self.state }

    pub fn current_index(&self) -> usize { self.current }

    pub fn len(&self) -> usize { self.levels.len() }

    pub fn is_empty(&self) -> bool { self.levels.is_empty() }

    pub fn is_last(&self) -> bool { self.current + 1 == self.levels.len() }

    pub fn step(&mut self, dir: Direction) -> StepOutcome { self.state.step(dir) }

    pub fn reset(&mut self) { self.state.reset(); }

    /// Move on to the next level. Returns false, leaving the session as is,
    /// when the current level is the last one.
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        self.state = GameState::from_level(&self.levels[self.current]);
        info!("advancing to level {}/{}", self.current + 1, self.levels.len());
        true
    }

    /// Swap in a freshly loaded set of levels, keeping the current index
    /// when it still exists, and restart the current level.
    pub fn replace_levels(&mut self, levels: Vec<Level>) -> Result<(), LevelError> {
        *self = Self::new(levels, self.current)?;
        Ok(())
    }
}
