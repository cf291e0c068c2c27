use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell};
use crate::level::Level;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction { Up, Right, Down, Left }

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];
}

/// What a single move attempt did to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Wall, grid edge, or a crate that cannot advance. Nothing changed.
    Blocked,
    /// The character stepped onto a free cell.
    Walked { to: usize },
    /// The character stepped into `to`, shoving the crate there into `crate_to`.
    Pushed { to: usize, crate_to: usize },
}

impl MoveOutcome {
    /// Character position after the move, given where it started.
    pub fn new_position(self, from: usize) -> usize {
        match self {
            MoveOutcome::Blocked => from,
            MoveOutcome::Walked { to } | MoveOutcome::Pushed { to, .. } => to,
        }
    }
}

/// Apply one move of the character standing on `position`.
///
/// The checks run in a fixed order and the first match wins; reordering
/// them changes the rules.
pub fn attempt_move(board: &mut Board, position: usize, dir: Direction) -> MoveOutcome {
    let Some(target) = board.neighbor(position, dir) else {
        return MoveOutcome::Blocked;
    };
    let next = board.get(target);

    if next.is_exactly(Cell::WALL) {
        return MoveOutcome::Blocked;
    }

    if next.is_exactly(Cell::EMPTY) || next.is_exactly(Cell::OBJECTIVE) {
        board.remove(position, Cell::CHARACTER);
        board.insert(target, Cell::CHARACTER);
        return MoveOutcome::Walked { to: target };
    }

    if !next.contains(Cell::CRATE) {
        return MoveOutcome::Blocked;
    }

    let Some(beyond) = board.neighbor(target, dir) else {
        return MoveOutcome::Blocked;
    };
    let after = board.get(beyond);

    if after.is_exactly(Cell::WALL) || after.contains(Cell::CRATE) {
        return MoveOutcome::Blocked;
    }

    if after.is_exactly(Cell::EMPTY) || after.is_exactly(Cell::OBJECTIVE) {
        board.remove(position, Cell::CHARACTER);
        board.remove(target, Cell::CRATE);
        board.insert(target, Cell::CHARACTER);
        board.insert(beyond, Cell::CRATE);
        return MoveOutcome::Pushed { to: target, crate_to: beyond };
    }

    MoveOutcome::Blocked
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StepOutcome {
    pub moved: bool,
    pub pushed_box: bool,
    pub solved: bool,
}

/// A level being played: the template it came from plus the working copy.
///
/// The board and position are only changed through [`GameState::step`] and
/// [`GameState::reset`], which keep the satisfied-crate count in sync.
#[derive(Clone, Debug, Serialize)]
pub struct GameState {
    level: Level,
    board: Board,
    player_pos: usize,
    /// Direction of the last key pressed, for drawing the character.
    pub facing: Direction,
    pub num_moves: u32,
    pub num_pushes: u32,
    crates_ok: usize,
}

impl GameState {
    pub fn new(level: Level) -> Self {
        let board = level.board().clone();
        let player_pos = level.start();
        let crates_ok = board.crates_on_objective();
        Self { level, board, player_pos, facing: Direction::Up, num_moves: 0, num_pushes: 0, crates_ok }
    }

    pub fn from_level(level: &Level) -> Self { Self::new(level.clone()) }

    pub fn level(&self) -> &Level { &self.level }

    pub fn board(&self) -> &Board { &self.board }

    pub fn player_pos(&self) -> usize { self.player_pos }

    pub fn step(&mut self, dir: Direction) -> StepOutcome {
        self.facing = dir;
        let outcome = attempt_move(&mut self.board, self.player_pos, dir);
        self.player_pos = outcome.new_position(self.player_pos);

        match outcome {
            MoveOutcome::Blocked => {}
            MoveOutcome::Walked { .. } => self.num_moves += 1,
            MoveOutcome::Pushed { to, crate_to } => {
                self.num_moves += 1;
                self.num_pushes += 1;
                // The vacated cell keeps its objective flag if the crate was satisfied.
                if self.board.get(to).contains(Cell::OBJECTIVE) {
                    self.crates_ok -= 1;
                }
                if self.board.get(crate_to).is_exactly(Cell::CRATE_OK) {
                    self.crates_ok += 1;
                }
            }
        }
        debug_assert_eq!(self.crates_ok, self.board.crates_on_objective());

        StepOutcome {
            moved: outcome != MoveOutcome::Blocked,
            pushed_box: matches!(outcome, MoveOutcome::Pushed { .. }),
            solved: self.is_solved(),
        }
    }

    /// Restore the board exactly as the level template describes it.
    pub fn reset(&mut self) {
        self.board.clone_from(self.level.board());
        self.player_pos = self.level.start();
        self.facing = Direction::Up;
        self.num_moves = 0;
        self.num_pushes = 0;
        self.crates_ok = self.board.crates_on_objective();
    }

    pub fn crates_on_objective(&self) -> usize { self.crates_ok }

    pub fn num_objectives(&self) -> usize { self.level.objectives() }

    pub fn is_solved(&self) -> bool { self.crates_ok == self.level.objectives() }
}
