use super::Cell;

pub mod tables;
pub use tables::*;

/// Board edge length. Cells are indexed `x * SIZE + y`.
pub const SIZE: usize = 8;

/// Number of cells on the board
pub const CELLS: usize = SIZE * SIZE;

/// Pop the least significant bit from a bitboard and return its index
#[inline(always)]
pub fn pop_lsb(bb: &mut u64) -> usize {
    let sq = bb.trailing_zeros() as usize;
    *bb &= *bb - 1; // Clear the LSB
    sq
}

/// Count the number of set bits in a bitboard
#[inline]
pub fn popcount(bb: u64) -> u32 {
    bb.count_ones()
}

// Column (y) masks; rows need none since vertical shifts fall off the board
pub const COLUMN_0: u64 = 0x0101010101010101;
pub const COLUMN_7: u64 = 0x8080808080808080;

// Shift operations with edge handling.
// "north" increases x, "east" increases y.
#[inline]
pub fn north(bb: u64) -> u64 {
    bb << 8
}

#[inline]
pub fn south(bb: u64) -> u64 {
    bb >> 8
}

#[inline]
pub fn east(bb: u64) -> u64 {
    (bb << 1) & !COLUMN_0
}

#[inline]
pub fn west(bb: u64) -> u64 {
    (bb >> 1) & !COLUMN_7
}

#[inline]
pub fn north_east(bb: u64) -> u64 {
    (bb << 9) & !COLUMN_0
}

#[inline]
pub fn north_west(bb: u64) -> u64 {
    (bb << 7) & !COLUMN_7
}

#[inline]
pub fn south_east(bb: u64) -> u64 {
    (bb >> 7) & !COLUMN_0
}

#[inline]
pub fn south_west(bb: u64) -> u64 {
    (bb >> 9) & !COLUMN_7
}

/// All eight scan directions, in a fixed order
pub const DIRECTIONS: [fn(u64) -> u64; 8] = [
    north, south, east, west, north_east, north_west, south_east, south_west,
];

/// Every cell adjacent to at least one set bit (the set itself may overlap)
#[inline]
pub fn dilate(bb: u64) -> u64 {
    DIRECTIONS.iter().fold(0, |acc, shift| acc | shift(bb))
}

/// Discs flipped by a disc dropped on `placed`.
///
/// Walks outward in each direction across a contiguous run of `opponent`
/// discs; the run is kept only when it ends on an `own` disc (an envelop).
/// Returns 0 when the placement envelops nothing.
#[inline]
pub fn flips(own: u64, opponent: u64, placed: u64) -> u64 {
    let mut flipped = 0u64;

    for shift in DIRECTIONS {
        let mut run = 0u64;
        let mut cursor = shift(placed);
        while cursor & opponent != 0 {
            run |= cursor;
            cursor = shift(cursor);
        }
        if cursor & own != 0 {
            flipped |= run;
        }
    }

    flipped
}

/// Iterator over the cells of a bitboard in ascending bit order
#[derive(Debug, Clone, Copy)]
pub struct Cells(pub u64);

impl Iterator for Cells {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Cell> {
        if self.0 == 0 {
            return None;
        }
        Some(Cell::from_index_unchecked(pop_lsb(&mut self.0)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Cells {}
