// Lock-free transposition table keyed by the canonical (symmetry-reduced) hash.
//
// Each slot is two atomic words: `check = key ^ entry` and `entry`. Writers store
// both words with no lock, so a concurrent reader can see `check` from one
// writer and `entry` from another. Such a torn slot fails `check ^ entry == key`
// and reads as a miss. A slot that passes the check but belongs to another
// position (a genuine 64-bit collision) can still hand back a move; every move
// read back is therefore re-validated against the caller's position.

use crate::error::BookError;
use crate::game_repr::{Cell, Position};
use rayon::prelude::*;
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicU64, Ordering};

/// Default number of slots (16 bytes each)
pub const DEFAULT_SLOTS: usize = 1 << 20;

/// Unpacked entry.
///
/// Layout of the entry word:
///
/// | bits  | field                                          |
/// |-------|------------------------------------------------|
/// | 0-31  | heuristic, `f32` bit pattern                   |
/// | 32-39 | best move `x*8+y` in canonical frame, or 0xFF  |
/// | 40-47 | depth explored below the node                  |
/// | 48    | exact flag                                     |
/// | 49    | alpha flag (lower bound if set, else upper)    |
/// | 50    | valid flag                                     |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableEntry {
    pub heuristic: f32,
    pub best_move: Option<Cell>,
    pub depth_below: u8,
    pub is_exact: bool,
    pub is_alpha: bool,
}

impl TableEntry {
    const MOVE_SHIFT: u32 = 32;
    const DEPTH_SHIFT: u32 = 40;
    const EXACT_BIT: u64 = 1 << 48;
    const ALPHA_BIT: u64 = 1 << 49;
    pub(crate) const VALID_BIT: u64 = 1 << 50;
    const NO_MOVE: u64 = 0xFF;

    /// Pack into an entry word; `best_move` must already be in the canonical frame
    pub fn pack(&self) -> u64 {
        let mv = self
            .best_move
            .map_or(Self::NO_MOVE, |cell| cell.index() as u64);

        let mut word = self.heuristic.to_bits() as u64
            | (mv << Self::MOVE_SHIFT)
            | ((self.depth_below as u64) << Self::DEPTH_SHIFT)
            | Self::VALID_BIT;
        if self.is_exact {
            word |= Self::EXACT_BIT;
        }
        if self.is_alpha {
            word |= Self::ALPHA_BIT;
        }
        word
    }

    /// Unpack an entry word; `None` when the valid flag is clear
    pub fn unpack(word: u64) -> Option<TableEntry> {
        if word & Self::VALID_BIT == 0 {
            return None;
        }
        Some(TableEntry {
            heuristic: f32::from_bits(word as u32),
            best_move: Cell::from_index(((word >> Self::MOVE_SHIFT) & 0xFF) as usize),
            depth_below: Self::depth_of(word),
            is_exact: word & Self::EXACT_BIT != 0,
            is_alpha: word & Self::ALPHA_BIT != 0,
        })
    }

    #[inline(always)]
    fn depth_of(word: u64) -> u8 {
        (word >> Self::DEPTH_SHIFT) as u8
    }
}

/// What the search needs from a table.
///
/// Implementations are shared by reference across search threads and must
/// never block.
pub trait Table: Sync {
    /// Record a search result for `pos`. `best_move` is in `pos`'s own frame.
    fn register(
        &self,
        pos: &Position,
        heuristic: f32,
        best_move: Option<Cell>,
        depth_below: u8,
        is_exact: bool,
        is_alpha: bool,
    );

    /// Entry for `pos` with its move mapped back into `pos`'s frame, or `None`
    /// on a miss, a torn slot, or a move that is not legal in `pos`
    fn read_entry(&self, pos: &Position) -> Option<TableEntry>;

    /// Writes that evicted a different key
    fn collisions(&self) -> u64;

    /// Drop every entry
    fn clear(&self);

    /// Write the opening book; returns the number of entries written
    fn dump<W: Write>(&self, out: W) -> Result<usize, BookError>;

    /// Load an opening book; returns the number of entries read
    fn fill<R: BufRead>(&self, input: R) -> Result<usize, BookError>;
}

#[derive(Default)]
struct Slot {
    check: AtomicU64,
    entry: AtomicU64,
}

/// Fixed-size, single-slot-per-bucket table.
///
/// Replacement: a write lands when the slot is empty, holds another key, or
/// holds an entry searched no deeper than the new one.
pub struct TranspositionTable {
    slots: Box<[Slot]>,
    collisions: AtomicU64,
    /// Statistics: number of successful probes
    hits: AtomicU64,
    /// Statistics: number of failed probes
    misses: AtomicU64,
}

impl TranspositionTable {
    /// Create a transposition table with default size
    pub fn new() -> Self {
        Self::with_slots(DEFAULT_SLOTS)
    }

    /// Create a table with `slots` buckets (at least one)
    pub fn with_slots(slots: usize) -> Self {
        let slots = slots.max(1);
        Self {
            slots: (0..slots).map(|_| Slot::default()).collect(),
            collisions: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    #[inline(always)]
    fn index(&self, key: u64) -> usize {
        (key % self.slots.len() as u64) as usize
    }

    #[inline(always)]
    fn slot(&self, key: u64) -> &Slot {
        &self.slots[self.index(key)]
    }

    /// Store a packed entry under `key`, applying the replacement rule.
    ///
    /// Only a slot holding another key counts as a collision. A torn slot,
    /// whose recovered key does not map back to it, is overwritten silently.
    fn store(&self, key: u64, entry: u64) {
        let slot = self.slot(key);
        let old_entry = slot.entry.load(Ordering::Relaxed);
        let old_check = slot.check.load(Ordering::Relaxed);
        let old_key = old_check ^ old_entry;

        let replace = if old_entry & TableEntry::VALID_BIT == 0 {
            true
        } else if old_key != key {
            if self.index(old_key) == self.index(key) {
                self.collisions.fetch_add(1, Ordering::Relaxed);
            }
            true
        } else {
            TableEntry::depth_of(old_entry) <= TableEntry::depth_of(entry)
        };

        if replace {
            slot.check.store(key ^ entry, Ordering::Relaxed);
            slot.entry.store(entry, Ordering::Relaxed);
        }
    }

    /// Number of buckets
    pub fn slots(&self) -> usize {
        self.slots.len()
    }

    /// Buckets currently holding a valid entry
    pub fn size(&self) -> usize {
        self.slots
            .par_iter()
            .filter(|slot| slot.entry.load(Ordering::Relaxed) & TableEntry::VALID_BIT != 0)
            .count()
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Get hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    /// Get memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        self.slots.len() * std::mem::size_of::<Slot>()
    }

    fn fill_lines<R: BufRead>(&self, input: R) -> Result<usize, BookError> {
        let mut pending: Option<u64> = None;
        let mut loaded = 0;
        let mut last_line = 0;

        for (number, line) in input.lines().enumerate() {
            let line = line?;
            let text = line.trim();
            let number = number + 1;
            last_line = number;

            if text.is_empty() {
                continue;
            }
            if let Some(header) = text.strip_prefix('#') {
                self.check_header(header, number)?;
                continue;
            }

            let value = parse_word(text).ok_or_else(|| BookError::Malformed {
                line: number,
                content: text.to_string(),
            })?;

            match pending.take() {
                None => pending = Some(value),
                Some(check) => {
                    if value & TableEntry::VALID_BIT == 0 {
                        return Err(BookError::Malformed {
                            line: number,
                            content: text.to_string(),
                        });
                    }
                    self.store(check ^ value, value);
                    loaded += 1;
                }
            }
        }

        if pending.is_some() {
            return Err(BookError::Malformed {
                line: last_line,
                content: "verification word without an entry word".to_string(),
            });
        }

        Ok(loaded)
    }

    fn check_header(&self, header: &str, line: usize) -> Result<(), BookError> {
        let mut parts = header.split_whitespace();
        if parts.next() != Some("slots") {
            return Ok(());
        }
        let found = parts
            .next()
            .and_then(|n| n.parse::<usize>().ok())
            .ok_or_else(|| BookError::Malformed {
                line,
                content: format!("#{header}"),
            })?;
        if found != self.slots.len() {
            return Err(BookError::SizeMismatch {
                expected: self.slots.len(),
                found,
            });
        }
        Ok(())
    }
}

/// Accept unsigned decimals and, for books written by signed-integer tools,
/// negative ones reinterpreted as two's complement
fn parse_word(text: &str) -> Option<u64> {
    text.parse::<u64>()
        .ok()
        .or_else(|| text.parse::<i64>().ok().map(|v| v as u64))
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Table for TranspositionTable {
    fn register(
        &self,
        pos: &Position,
        heuristic: f32,
        best_move: Option<Cell>,
        depth_below: u8,
        is_exact: bool,
        is_alpha: bool,
    ) {
        let hash = pos.hash();
        let orientation = hash.orientation();
        let entry = TableEntry {
            heuristic,
            best_move: best_move.map(|cell| orientation.transform(cell)),
            depth_below,
            is_exact,
            is_alpha,
        };
        self.store(hash.key(), entry.pack());
    }

    fn read_entry(&self, pos: &Position) -> Option<TableEntry> {
        let hash = pos.hash();
        let key = hash.key();
        let slot = self.slot(key);
        let word = slot.entry.load(Ordering::Relaxed);
        let check = slot.check.load(Ordering::Relaxed);

        let entry = match TableEntry::unpack(word) {
            Some(entry) if check ^ word == key => entry,
            _ => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
        };

        let best_move = match entry.best_move {
            None => None,
            Some(canonical) => {
                let cell = hash.orientation().inverse().transform(canonical);
                if !pos.can_place(cell) {
                    log::warn!("discarding table move {cell}: not legal in this position");
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
                Some(cell)
            }
        };

        self.hits.fetch_add(1, Ordering::Relaxed);
        Some(TableEntry { best_move, ..entry })
    }

    fn collisions(&self) -> u64 {
        self.collisions.load(Ordering::Relaxed)
    }

    fn clear(&self) {
        self.slots.par_iter().for_each(|slot| {
            slot.check.store(0, Ordering::Relaxed);
            slot.entry.store(0, Ordering::Relaxed);
        });
        self.collisions.store(0, Ordering::Relaxed);
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Header line `# slots <n>`, then one verification word and one entry
    /// word per line for every valid slot. Torn slots (whose recovered key
    /// does not map back to the slot) are skipped.
    fn dump<W: Write>(&self, mut out: W) -> Result<usize, BookError> {
        let len = self.slots.len() as u64;
        writeln!(out, "# slots {len}")?;

        let mut written = 0;
        for (index, slot) in self.slots.iter().enumerate() {
            let entry = slot.entry.load(Ordering::Relaxed);
            let check = slot.check.load(Ordering::Relaxed);
            if entry & TableEntry::VALID_BIT == 0 || (check ^ entry) % len != index as u64 {
                continue;
            }
            writeln!(out, "{check}")?;
            writeln!(out, "{entry}")?;
            written += 1;
        }

        out.flush()?;
        Ok(written)
    }

    /// Entries are re-slotted from their recovered keys. On any error the
    /// table is left empty rather than half loaded.
    fn fill<R: BufRead>(&self, input: R) -> Result<usize, BookError> {
        match self.fill_lines(input) {
            Ok(loaded) => {
                log::info!("loaded {loaded} book entries into {} slots", self.slots.len());
                Ok(loaded)
            }
            Err(err) => {
                log::error!("book reload failed, resetting table: {err}");
                self.clear();
                Err(err)
            }
        }
    }
}
