use super::bitboards::{self, dilate, popcount, Cells, CELLS, NEIGHBOR_MASK, SIZE};
use super::canonical_hash::CanonicalHash;
use super::*;
use crate::error::GameError;
use smallvec::SmallVec;
use std::fmt;

/*
 * MODULE IS RESPONSIBLE FOR
 * GAME REPRESENTATION AND LOGIC
 */

/// Discs on the board before the first move
pub const STARTING_DISCS: u32 = 4;

/// Legal move list, in ascending neighbour-bit order
pub type MoveList = SmallVec<[Cell; 32]>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    /// One bit per cell holding a disc
    occupied: u64,
    /// Set for Black discs; always a subset of `occupied`
    color: u64,
    /// Empty cells touching at least one disc
    neighbors: u64,
    current: Color,
    /// `None` at the start and after a pass
    last_move: Option<Cell>,
    black_count: u32,
    white_count: u32,
    /// Kept in lock-step with the bitboards by `place` and `skip_turn`
    hash: CanonicalHash,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// Standard starting position, Black to move
    pub fn new() -> Position {
        let mut board: BoardSnapshot = [[Tile::Empty; SIZE]; SIZE];
        board[3][3] = Tile::White;
        board[4][4] = Tile::White;
        board[3][4] = Tile::Black;
        board[4][3] = Tile::Black;
        Self::from_snapshot(&board, Color::Black)
    }

    pub fn from_snapshot(board: &BoardSnapshot, to_move: Color) -> Position {
        let mut black = 0u64;
        let mut white = 0u64;

        for (x, row) in board.iter().enumerate() {
            for (y, tile) in row.iter().enumerate() {
                let bit = 1u64 << (x * SIZE + y);
                match tile {
                    Tile::Black => black |= bit,
                    Tile::White => white |= bit,
                    Tile::Empty => {}
                }
            }
        }

        Self::from_bitboards(black, white, to_move)
    }

    fn from_bitboards(black: u64, white: u64, to_move: Color) -> Position {
        let occupied = black | white;
        Self {
            occupied,
            color: black,
            neighbors: dilate(occupied) & !occupied,
            current: to_move,
            last_move: None,
            black_count: popcount(black),
            white_count: popcount(white),
            hash: CanonicalHash::compute(black, white, to_move),
        }
    }

    /// Parse eight rows of `X` (Black), `O` (White) and `.` (empty).
    /// Blank lines and surrounding whitespace are ignored.
    pub fn from_diagram(diagram: &str, to_move: Color) -> Result<Position, GameError> {
        let rows: Vec<&str> = diagram
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if rows.len() != SIZE {
            return Err(GameError::Parse(format!(
                "expected {SIZE} rows, found {}",
                rows.len()
            )));
        }

        let mut board: BoardSnapshot = [[Tile::Empty; SIZE]; SIZE];
        for (x, row) in rows.iter().enumerate() {
            let tiles: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            if tiles.len() != SIZE {
                return Err(GameError::Parse(format!("row {x} has {} cells", tiles.len())));
            }
            for (y, c) in tiles.into_iter().enumerate() {
                board[x][y] = Tile::from_char(c)
                    .ok_or_else(|| GameError::Parse(format!("unexpected '{c}' in row {x}")))?;
            }
        }

        Ok(Self::from_snapshot(&board, to_move))
    }

    pub fn to_snapshot(&self) -> BoardSnapshot {
        let mut board: BoardSnapshot = [[Tile::Empty; SIZE]; SIZE];
        for cell in Cells(self.occupied) {
            board[cell.x()][cell.y()] = self.tile(cell);
        }
        board
    }

    /// The symmetric image of this position, same side to move
    pub fn oriented(&self, orientation: Orientation) -> Position {
        Self::from_bitboards(
            orientation.transform_bits(self.discs(Color::Black)),
            orientation.transform_bits(self.discs(Color::White)),
            self.current,
        )
    }

    #[inline(always)]
    pub fn current_player(&self) -> Color {
        self.current
    }

    #[inline(always)]
    pub fn last_move(&self) -> Option<Cell> {
        self.last_move
    }

    #[inline(always)]
    pub fn occupied(&self) -> u64 {
        self.occupied
    }

    #[inline(always)]
    pub fn neighbors(&self) -> u64 {
        self.neighbors
    }

    #[inline(always)]
    pub fn hash(&self) -> &CanonicalHash {
        &self.hash
    }

    /// Bitboard of one side's discs
    #[inline(always)]
    pub fn discs(&self, color: Color) -> u64 {
        match color {
            Color::Black => self.occupied & self.color,
            Color::White => self.occupied & !self.color,
        }
    }

    pub fn disc_count(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black_count,
            Color::White => self.white_count,
        }
    }

    pub fn tile(&self, cell: Cell) -> Tile {
        let bit = cell.bit();
        if self.occupied & bit == 0 {
            Tile::Empty
        } else if self.color & bit != 0 {
            Tile::Black
        } else {
            Tile::White
        }
    }

    /// Empty cells left, an upper bound on the plies still to play
    pub fn remaining_moves(&self) -> u32 {
        CELLS as u32 - popcount(self.occupied)
    }

    /// Discs placed since the standard start
    pub fn moves_played(&self) -> u32 {
        popcount(self.occupied).saturating_sub(STARTING_DISCS)
    }

    /// Discs `color` would flip by playing `cell`; 0 when the move is illegal
    #[inline]
    fn flips_for(&self, color: Color, cell: Cell) -> u64 {
        let bit = cell.bit();
        if self.neighbors & bit == 0 {
            return 0;
        }
        bitboards::flips(self.discs(color), self.discs(color.opposite()), bit)
    }

    /// Discs the side to move would flip by playing `cell`
    pub fn flips(&self, cell: Cell) -> u64 {
        self.flips_for(self.current, cell)
    }

    pub fn can_place(&self, cell: Cell) -> bool {
        self.flips(cell) != 0
    }

    /// Legal placements for the side to move, in ascending bit order
    pub fn legal_moves(&self) -> MoveList {
        Cells(self.neighbors).filter(|&cell| self.can_place(cell)).collect()
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        Cells(self.neighbors).any(|cell| self.flips_for(color, cell) != 0)
    }

    /// Neither side can place a disc
    pub fn is_terminal(&self) -> bool {
        !self.has_legal_move(self.current) && !self.has_legal_move(self.current.opposite())
    }

    /// Side with more discs; `None` for a tie
    pub fn winner(&self) -> Option<Color> {
        match self.black_count.cmp(&self.white_count) {
            std::cmp::Ordering::Greater => Some(Color::Black),
            std::cmp::Ordering::Less => Some(Color::White),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Drop a disc for the side to move, flip every enveloped run and pass the turn
    pub fn place(&mut self, cell: Cell) -> Result<(), GameError> {
        let flipped = self.flips(cell);
        if flipped == 0 {
            return Err(GameError::InvalidMove {
                cell,
                player: self.current,
            });
        }

        self.apply(cell, flipped);
        Ok(())
    }

    /// Commit a placement whose flips are already known to be non-empty
    fn apply(&mut self, cell: Cell, flipped: u64) {
        let bit = cell.bit();
        let gained = popcount(flipped);
        self.occupied |= bit;

        match self.current {
            Color::Black => {
                self.color |= bit | flipped;
                self.black_count += gained + 1;
                self.white_count -= gained;
            }
            Color::White => {
                self.color &= !flipped;
                self.white_count += gained + 1;
                self.black_count -= gained;
            }
        }

        self.neighbors = (self.neighbors | NEIGHBOR_MASK[cell.index()]) & !self.occupied;
        self.hash.apply_place(self.current, cell, flipped);
        self.current = self.current.opposite();
        self.last_move = Some(cell);

        debug_assert_eq!(self.color & !self.occupied, 0);
        debug_assert_eq!(self.black_count + self.white_count, popcount(self.occupied));
    }

    /// Pass the turn; only allowed when the side to move has no placement
    pub fn skip_turn(&mut self) -> Result<(), GameError> {
        if self.has_legal_move(self.current) {
            return Err(GameError::SkipWithLegalMoves {
                player: self.current,
            });
        }

        self.pass();
        Ok(())
    }

    fn pass(&mut self) {
        self.hash.swap_player();
        self.current = self.current.opposite();
        self.last_move = None;
    }

    /// Count leaf positions `depth` plies ahead; a forced pass counts as a ply
    /// and a finished game counts as a single leaf.
    pub fn perft(&self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.legal_moves();
        if moves.is_empty() {
            if !self.has_legal_move(self.current.opposite()) {
                return 1;
            }
            let mut passed = self.clone();
            passed.pass();
            return passed.perft(depth - 1);
        }

        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for cell in moves {
            let mut child = self.clone();
            let flipped = child.flips(cell);
            child.apply(cell, flipped);
            nodes += child.perft(depth - 1);
        }
        nodes
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for y in 0..SIZE {
            write!(f, " {}", (b'a' + y as u8) as char)?;
        }
        writeln!(f)?;
        for x in 0..SIZE {
            write!(f, "{:>2}", x + 1)?;
            for y in 0..SIZE {
                let cell = Cell::from_index_unchecked(x * SIZE + y);
                write!(f, " {}", self.tile(cell).to_char())?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "X {} O {}, {} to move",
            self.black_count, self.white_count, self.current
        )
    }
}
