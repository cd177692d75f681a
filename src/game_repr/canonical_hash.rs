//! Symmetry-invariant Zobrist hashing.
//!
//! Eight hashes run side by side, one for each [`Orientation`] view of the
//! board. View `v` hashes a disc on `cell` with the random value drawn for
//! `v.transform(cell)`, so the eight views of a position are exactly the
//! identity hashes of its eight symmetric images. The smallest of them is the
//! canonical key, shared by every symmetric copy of the position.
//!
//! All updates are deltas: a placement XORs in the new disc and toggles each
//! flipped disc, a pass toggles only the side-to-move term.

use super::bitboards::{pop_lsb, CELLS};
use super::{Cell, Color, Orientation};
use std::sync::LazyLock;

/// Zobrist constants, pre-permuted per orientation
pub struct ZobristKeys {
    /// [orientation][cell][color index] - colour index 0 = White, 1 = Black
    pub cells: [[[u64; 2]; CELLS]; 8],
    /// XOR of both colour values, for flipping a disc in place
    pub flip: [[u64; CELLS]; 8],
    /// Present in every view while White is to move
    pub white_to_move: u64,
}

impl ZobristKeys {
    /// Generate Zobrist keys using a seeded random number generator.
    /// The fixed seed keeps keys identical across processes so book files stay usable.
    fn generate() -> Self {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(0x0711_e110_5eed_cafe);

        let mut base = [[0u64; 2]; CELLS];
        for cell in &mut base {
            for value in cell {
                *value = rng.gen();
            }
        }

        let mut cells = [[[0u64; 2]; CELLS]; 8];
        let mut flip = [[0u64; CELLS]; 8];
        for orientation in Orientation::ALL {
            let v = orientation.index();
            let table = orientation.table();
            for sq in 0..CELLS {
                let image = base[table[sq] as usize];
                cells[v][sq] = image;
                flip[v][sq] = image[0] ^ image[1];
            }
        }

        Self {
            cells,
            flip,
            white_to_move: rng.gen(),
        }
    }
}

/// Global Zobrist keys - initialized once using LazyLock
pub static ZOBRIST: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::generate);

/// Running hashes of the eight orientation views plus their minimum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalHash {
    views: [u64; 8],
    key: u64,
    orientation: Orientation,
}

impl CanonicalHash {
    /// Hash a position from scratch
    pub fn compute(black: u64, white: u64, to_move: Color) -> Self {
        let keys = &*ZOBRIST;
        let mut views = [0u64; 8];

        for (v, view) in views.iter_mut().enumerate() {
            let table = &keys.cells[v];
            let mut bb = black;
            while bb != 0 {
                *view ^= table[pop_lsb(&mut bb)][Color::Black.index()];
            }
            let mut bb = white;
            while bb != 0 {
                *view ^= table[pop_lsb(&mut bb)][Color::White.index()];
            }
            if to_move == Color::White {
                *view ^= keys.white_to_move;
            }
        }

        let mut hash = Self {
            views,
            key: 0,
            orientation: Orientation::Identity,
        };
        hash.refresh_canonical();
        hash
    }

    /// Fold a placement into every view: the new disc, the flipped discs and the side to move
    pub(crate) fn apply_place(&mut self, mover: Color, placed: Cell, flipped: u64) {
        let keys = &*ZOBRIST;
        let color = mover.index();

        for (v, view) in self.views.iter_mut().enumerate() {
            let mut h = *view ^ keys.cells[v][placed.index()][color] ^ keys.white_to_move;
            let flip = &keys.flip[v];
            let mut bb = flipped;
            while bb != 0 {
                h ^= flip[pop_lsb(&mut bb)];
            }
            *view = h;
        }

        self.refresh_canonical();
    }

    /// Toggle only the side-to-move term (a pass)
    pub(crate) fn swap_player(&mut self) {
        let side = ZOBRIST.white_to_move;
        for view in &mut self.views {
            *view ^= side;
        }
        self.refresh_canonical();
    }

    fn refresh_canonical(&mut self) {
        let mut best = 0;
        for v in 1..8 {
            if self.views[v] < self.views[best] {
                best = v;
            }
        }
        self.key = self.views[best];
        self.orientation = Orientation::ALL[best];
    }

    /// Minimum over the eight views
    #[inline(always)]
    pub fn key(&self) -> u64 {
        self.key
    }

    /// The view that produced [`key`](Self::key)
    #[inline(always)]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn views(&self) -> &[u64; 8] {
        &self.views
    }
}
