use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::game::Direction;

/// One grid position, stored as a set of flags.
///
/// Bit values match the on-disk level format: one byte per cell, with
/// `0` meaning empty. A crate resting on an objective is simply
/// `OBJECTIVE | CRATE` ([`Cell::CRATE_OK`]).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cell(u8);

impl Cell {
    pub const EMPTY: Cell = Cell(0);
    pub const WALL: Cell = Cell(1 << 0);
    pub const OBJECTIVE: Cell = Cell(1 << 1);
    pub const CRATE: Cell = Cell(1 << 2);
    /// Pseudo flag: a crate sitting on an objective.
    pub const CRATE_OK: Cell = Cell(Self::OBJECTIVE.0 | Self::CRATE.0);
    pub const CHARACTER: Cell = Cell(1 << 4);

    const KNOWN_BITS: u8 = Self::WALL.0 | Self::OBJECTIVE.0 | Self::CRATE.0 | Self::CHARACTER.0;

    /// Decode a raw flag byte. Unknown bits and impossible combinations
    /// (a wall sharing its cell, a crate under the character) are rejected.
    pub fn from_bits(bits: u8) -> Option<Cell> {
        if bits & !Self::KNOWN_BITS != 0 {
            return None;
        }
        let cell = Cell(bits);
        if cell.contains(Self::WALL) && !cell.is_exactly(Self::WALL) {
            return None;
        }
        if cell.contains(Self::CRATE) && cell.contains(Self::CHARACTER) {
            return None;
        }
        Some(cell)
    }

    #[inline]
    pub const fn bits(self) -> u8 { self.0 }

    /// True when every bit of `mask` is set.
    #[inline]
    pub const fn contains(self, mask: Cell) -> bool { self.0 & mask.0 == mask.0 }

    #[inline]
    pub const fn is_exactly(self, mask: Cell) -> bool { self.0 == mask.0 }

    #[inline]
    pub fn insert(&mut self, mask: Cell) { self.0 |= mask.0; }

    #[inline]
    pub fn remove(&mut self, mask: Cell) { self.0 &= !mask.0; }
}

impl BitOr for Cell {
    type Output = Cell;
    fn bitor(self, rhs: Cell) -> Cell { Cell(self.0 | rhs.0) }
}

impl BitOrAssign for Cell {
    fn bitor_assign(&mut self, rhs: Cell) { self.insert(rhs); }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    /// Row-major cells, `width * height` long.
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![Cell::EMPTY; width * height] }
    }

    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self { width, height, cells }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize { y * self.width + x }

    #[inline]
    pub fn coords(&self, i: usize) -> (usize, usize) { (i % self.width, i / self.width) }

    #[inline]
    pub fn len(&self) -> usize { self.cells.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    pub fn cells(&self) -> &[Cell] { &self.cells }

    #[inline]
    pub fn get(&self, i: usize) -> Cell { self.cells[i] }

    pub fn set(&mut self, i: usize, cell: Cell) { self.cells[i] = cell; }

    pub fn insert(&mut self, i: usize, mask: Cell) { self.cells[i].insert(mask); }

    pub fn remove(&mut self, i: usize, mask: Cell) { self.cells[i].remove(mask); }

    /// Index of the cell one step from `i` in `dir`, or `None` when that
    /// step would leave the grid.
    pub fn neighbor(&self, i: usize, dir: Direction) -> Option<usize> {
        let (x, y) = self.coords(i);
        match dir {
            Direction::Up => y.checked_sub(1).map(|ny| self.idx(x, ny)),
            Direction::Down => (y + 1 < self.height).then(|| self.idx(x, y + 1)),
            Direction::Left => x.checked_sub(1).map(|nx| self.idx(nx, y)),
            Direction::Right => (x + 1 < self.width).then(|| self.idx(x + 1, y)),
        }
    }

    pub fn find_character(&self) -> Option<usize> {
        self.cells.iter().position(|c| c.contains(Cell::CHARACTER))
    }

    pub fn num_crates(&self) -> usize {
        self.cells.iter().filter(|c| c.contains(Cell::CRATE)).count()
    }

    pub fn num_objectives(&self) -> usize {
        self.cells.iter().filter(|c| c.contains(Cell::OBJECTIVE)).count()
    }

    /// Crates currently resting on an objective.
    pub fn crates_on_objective(&self) -> usize {
        self.cells.iter().filter(|c| c.is_exactly(Cell::CRATE_OK)).count()
    }

    /// Render one glyph per cell in the usual Sokoban notation
    /// (`#` wall, `@`/`+` character, `$` crate, `*` crate on objective,
    /// `.` objective, space for empty).
    pub fn room_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height);
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 && i % self.width == 0 {
                out.push('\n');
            }
            out.push(glyph(*cell));
        }
        out
    }
}

/// Character > wall > satisfied crate > crate > objective.
fn glyph(cell: Cell) -> char {
    if cell.contains(Cell::CHARACTER) {
        if cell.contains(Cell::OBJECTIVE) { '+' } else { '@' }
    } else if cell.is_exactly(Cell::WALL) {
        '#'
    } else if cell.is_exactly(Cell::CRATE_OK) {
        '*'
    } else if cell.is_exactly(Cell::CRATE) {
        '$'
    } else if cell.is_exactly(Cell::OBJECTIVE) {
        '.'
    } else {
        ' '
    }
}
