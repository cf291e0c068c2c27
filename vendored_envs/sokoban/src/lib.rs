//! Pure Sokoban logic crate.
//! - Flag-set cells and the row-major board
//! - Move/push rules and the win check
//! - Level validation, text and binary level formats, built-in levels

mod board;
mod campaign;
mod game;
mod level;
mod preset;

pub use board::{Board, Cell};
pub use campaign::Campaign;
pub use game::{attempt_move, Direction, GameState, MoveOutcome, StepOutcome};
pub use level::{encode_pack, load_pack, parse_pack, Level, LevelError, MAP_HEIGHT, MAP_SIZE, MAP_WIDTH};
pub use preset::{classic_level, preset_level, preset_levels, CLASSIC_ROWS};
