use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell};

/// Dimensions of every level stored in a binary level pack.
pub const MAP_WIDTH: usize = 12;
pub const MAP_HEIGHT: usize = 12;
pub const MAP_SIZE: usize = MAP_WIDTH * MAP_HEIGHT;

#[derive(thiserror::Error, Debug)]
pub enum LevelError {
    #[error("no levels")]
    Empty,
    #[error("level data truncated: expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },
    #[error("{extra} unexpected bytes after the last level")]
    TrailingBytes { extra: usize },
    #[error("invalid cell value {value:#04x} at index {index}")]
    InvalidCell { index: usize, value: u8 },
    #[error("invalid glyph {glyph:?} at row {row}, column {col}")]
    InvalidGlyph { row: usize, col: usize, glyph: char },
    #[error("row {row} is {found} cells wide, expected {expected}")]
    RaggedRows { row: usize, expected: usize, found: usize },
    #[error("level has no character")]
    MissingCharacter,
    #[error("level has {0} characters, expected exactly one")]
    MultipleCharacters(usize),
    #[error("level has no objectives")]
    NoObjectives,
    #[error("{crates} crates but {objectives} objectives")]
    CountMismatch { crates: usize, objectives: usize },
    #[error("level {index}: {source}")]
    InPack { index: usize, #[source] source: Box<LevelError> },
    #[error("level pack holds {0} levels, at most 255 fit")]
    PackTooLarge(usize),
    #[error("level is {width}x{height}, packs only hold 12x12 levels")]
    WrongSize { width: usize, height: usize },
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, #[source] source: std::io::Error },
}

/// A validated level template. Sessions copy its board and never write back.
///
/// Serialized as its board; deserializing runs the same checks as
/// [`Level::from_board`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Board", into = "Board")]
pub struct Level {
    board: Board,
    start: usize,
    objectives: usize,
}

impl Level {
    /// Validate a board: exactly one character, and as many crates as
    /// objectives (at least one of each).
    pub fn from_board(board: Board) -> Result<Self, LevelError> {
        let expected = board.width.checked_mul(board.height).unwrap_or(usize::MAX);
        if board.len() < expected {
            return Err(LevelError::Truncated { expected, found: board.len() });
        }
        if board.len() > expected {
            return Err(LevelError::TrailingBytes { extra: board.len() - expected });
        }
        if let Some((index, cell)) = board.cells().iter().enumerate().find(|(_, c)| Cell::from_bits(c.bits()).is_none()) {
            return Err(LevelError::InvalidCell { index, value: cell.bits() });
        }
        let characters = board.cells().iter().filter(|c| c.contains(Cell::CHARACTER)).count();
        let start = match characters {
            0 => return Err(LevelError::MissingCharacter),
            1 => board.find_character().ok_or(LevelError::MissingCharacter)?,
            n => return Err(LevelError::MultipleCharacters(n)),
        };
        let crates = board.num_crates();
        let objectives = board.num_objectives();
        if crates != objectives {
            return Err(LevelError::CountMismatch { crates, objectives });
        }
        if objectives == 0 {
            return Err(LevelError::NoObjectives);
        }
        Ok(Self { board, start, objectives })
    }

    /// Parse a level from rows of text. All rows must have the same width.
    ///
    /// | glyph | cell |
    /// |---|---|
    /// | `#` | wall |
    /// | `@` / `+` | character / character on objective |
    /// | `$` / `*` | crate / crate on objective |
    /// | `.` | objective |
    /// | space, `-`, `_` | empty |
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, LevelError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(LevelError::Empty);
        }
        let mut cells = Vec::with_capacity(width * height);
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(LevelError::RaggedRows { row, expected: width, found });
            }
            for (col, glyph) in line.chars().enumerate() {
                let cell = match glyph {
                    '#' => Cell::WALL,
                    '@' => Cell::CHARACTER,
                    '+' => Cell::CHARACTER | Cell::OBJECTIVE,
                    '$' => Cell::CRATE,
                    '*' => Cell::CRATE_OK,
                    '.' => Cell::OBJECTIVE,
                    ' ' | '-' | '_' => Cell::EMPTY,
                    _ => return Err(LevelError::InvalidGlyph { row, col, glyph }),
                };
                cells.push(cell);
            }
        }
        Self::from_board(Board::from_cells(width, height, cells))
    }

    /// Decode one `width * height` block of raw flag bytes.
    pub fn from_bytes(bytes: &[u8], width: usize, height: usize) -> Result<Self, LevelError> {
        let expected = width * height;
        if bytes.len() < expected {
            return Err(LevelError::Truncated { expected, found: bytes.len() });
        }
        if bytes.len() > expected {
            return Err(LevelError::TrailingBytes { extra: bytes.len() - expected });
        }
        let cells = bytes
            .iter()
            .enumerate()
            .map(|(index, &value)| Cell::from_bits(value).ok_or(LevelError::InvalidCell { index, value }))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_board(Board::from_cells(width, height, cells))
    }

    pub fn board(&self) -> &Board { &self.board }

    /// Index of the character's starting cell.
    pub fn start(&self) -> usize { self.start }

    pub fn objectives(&self) -> usize { self.objectives }

    pub fn width(&self) -> usize { self.board.width }

    pub fn height(&self) -> usize { self.board.height }
}

impl TryFrom<Board> for Level {
    type Error = LevelError;

    fn try_from(board: Board) -> Result<Self, LevelError> { Level::from_board(board) }
}

impl From<Level> for Board {
    fn from(level: Level) -> Board { level.board }
}

/// Parse a binary level pack: one count byte, then `count` blocks of
/// [`MAP_SIZE`] flag bytes.
pub fn parse_pack(bytes: &[u8]) -> Result<Vec<Level>, LevelError> {
    let (&count, body) = bytes.split_first().ok_or(LevelError::Empty)?;
    let count = count as usize;
    if count == 0 {
        return Err(LevelError::Empty);
    }
    let expected = count * MAP_SIZE;
    if body.len() < expected {
        return Err(LevelError::Truncated { expected: expected + 1, found: bytes.len() });
    }
    if body.len() > expected {
        return Err(LevelError::TrailingBytes { extra: body.len() - expected });
    }
    body.chunks_exact(MAP_SIZE)
        .enumerate()
        .map(|(index, block)| {
            Level::from_bytes(block, MAP_WIDTH, MAP_HEIGHT)
                .map_err(|e| LevelError::InPack { index, source: Box::new(e) })
        })
        .collect()
}

/// Read and parse a binary level pack from disk.
pub fn load_pack(path: impl AsRef<Path>) -> Result<Vec<Level>, LevelError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| LevelError::Io { path: path.to_path_buf(), source })?;
    let levels = parse_pack(&bytes)?;
    debug!("loaded {} levels from {}", levels.len(), path.display());
    Ok(levels)
}

/// Inverse of [`parse_pack`]. Every level must be [`MAP_WIDTH`] x [`MAP_HEIGHT`].
pub fn encode_pack(levels: &[Level]) -> Result<Vec<u8>, LevelError> {
    if levels.is_empty() {
        return Err(LevelError::Empty);
    }
    let count = u8::try_from(levels.len()).map_err(|_| LevelError::PackTooLarge(levels.len()))?;
    let mut out = Vec::with_capacity(1 + levels.len() * MAP_SIZE);
    out.push(count);
    for level in levels {
        if level.width() != MAP_WIDTH || level.height() != MAP_HEIGHT {
            return Err(LevelError::WrongSize { width: level.width(), height: level.height() });
        }
        out.extend(level.board().cells().iter().map(|c| c.bits()));
    }
    Ok(out)
}
