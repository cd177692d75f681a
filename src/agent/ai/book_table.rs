// Opening-book table: an unrestricted live table backed by a smaller book that
// only keeps positions from the first `ceiling` moves of the game.

use super::transposition_table::{Table, TableEntry, TranspositionTable};
use crate::error::BookError;
use crate::game_repr::{Cell, Position};
use std::io::{BufRead, Write};

/// Default number of moves past the opening still promoted into the book
pub const DEFAULT_BOOK_CEILING: u32 = 12;

pub struct BookTable {
    live: TranspositionTable,
    book: TranspositionTable,
    ceiling: u32,
}

impl BookTable {
    pub fn new(live_slots: usize, book_slots: usize, ceiling: u32) -> Self {
        Self {
            live: TranspositionTable::with_slots(live_slots),
            book: TranspositionTable::with_slots(book_slots),
            ceiling,
        }
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    pub fn live(&self) -> &TranspositionTable {
        &self.live
    }

    /// The persisted part
    pub fn book(&self) -> &TranspositionTable {
        &self.book
    }

    fn in_book(&self, pos: &Position) -> bool {
        pos.moves_played() <= self.ceiling
    }
}

impl Table for BookTable {
    fn register(
        &self,
        pos: &Position,
        heuristic: f32,
        best_move: Option<Cell>,
        depth_below: u8,
        is_exact: bool,
        is_alpha: bool,
    ) {
        self.live
            .register(pos, heuristic, best_move, depth_below, is_exact, is_alpha);
        if self.in_book(pos) {
            self.book
                .register(pos, heuristic, best_move, depth_below, is_exact, is_alpha);
        }
    }

    fn read_entry(&self, pos: &Position) -> Option<TableEntry> {
        let live = self.live.read_entry(pos);
        if live.is_some() || !self.in_book(pos) {
            return live;
        }
        self.book.read_entry(pos)
    }

    fn collisions(&self) -> u64 {
        self.live.collisions() + self.book.collisions()
    }

    fn clear(&self) {
        self.live.clear();
        self.book.clear();
    }

    fn dump<W: Write>(&self, out: W) -> Result<usize, BookError> {
        self.book.dump(out)
    }

    fn fill<R: BufRead>(&self, input: R) -> Result<usize, BookError> {
        self.book.fill(input)
    }
}
