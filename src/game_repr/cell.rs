/*-------ARCHITECTURE--------*/

// | 3 bits | 3 bits |
// |   x    |   y    |
// index = x * 8 + y, bit = 1 << index
//
// The same index is what the transposition table stores as a move byte.

use crate::error::GameError;
use super::bitboards::SIZE;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    index: u8,
}

impl Cell {
    /// Build a cell from row `x` and column `y`, both in `0..8`
    pub fn new(x: usize, y: usize) -> Option<Cell> {
        (x < SIZE && y < SIZE).then(|| Cell { index: (x * SIZE + y) as u8 })
    }

    pub fn from_index(index: usize) -> Option<Cell> {
        (index < SIZE * SIZE).then(|| Cell { index: index as u8 })
    }

    #[inline(always)]
    pub(crate) const fn from_index_unchecked(index: usize) -> Cell {
        Cell { index: index as u8 }
    }

    #[inline(always)]
    pub const fn x(self) -> usize {
        self.index as usize / SIZE
    }

    #[inline(always)]
    pub const fn y(self) -> usize {
        self.index as usize % SIZE
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    #[inline(always)]
    pub const fn bit(self) -> u64 {
        1u64 << self.index
    }
}

/// Column letter from `y`, row number from `x`: `Cell::new(2, 3)` is `d3`
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.y() as u8) as char, self.x() + 1)
    }
}

impl FromStr for Cell {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(GameError::Parse(format!("bad cell '{s}'")));
        }
        let y = bytes[0].to_ascii_lowercase().wrapping_sub(b'a') as usize;
        let x = bytes[1].wrapping_sub(b'1') as usize;
        Cell::new(x, y).ok_or_else(|| GameError::Parse(format!("cell '{s}' is off the board")))
    }
}
