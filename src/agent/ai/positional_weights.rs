// Positional weight table for static evaluation.
//
// The board has 10 cell classes under its 8 symmetries. Each class is named by
// its representative in the top-left quadrant:
//
//   a1 a2 a3 a4 | mirrored
//   a2 b2 b3 b4 |
//   a3 b3 c3 c4 |
//   a4 b4 c4 d4 |

use crate::game_repr::bitboards::{CELLS, SIZE};

/// One weight per symmetry class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionalWeights {
    /// Corner
    pub a1: f32,
    /// Edge cell next to a corner (C-square)
    pub a2: f32,
    pub a3: f32,
    pub a4: f32,
    /// Diagonal neighbour of a corner (X-square)
    pub b2: f32,
    pub b3: f32,
    pub b4: f32,
    pub c3: f32,
    pub c4: f32,
    /// Centre
    pub d4: f32,
}

impl Default for PositionalWeights {
    fn default() -> Self {
        Self {
            a1: 100.0,
            a2: -20.0,
            a3: 10.0,
            a4: 5.0,
            b2: -50.0,
            b3: -2.0,
            b4: -2.0,
            c3: -1.0,
            c4: -1.0,
            d4: -1.0,
        }
    }
}

impl PositionalWeights {
    /// Expand the ten classes into a per-cell table
    pub fn table(&self) -> WeightTable {
        let mut cells = [0.0f32; CELLS];

        for (sq, weight) in cells.iter_mut().enumerate() {
            let x = sq / SIZE;
            let y = sq % SIZE;
            // Fold into the top-left quadrant, then onto the lower triangle
            let fx = x.min(SIZE - 1 - x);
            let fy = y.min(SIZE - 1 - y);
            let (near, far) = (fx.min(fy), fx.max(fy));

            *weight = match (near, far) {
                (0, 0) => self.a1,
                (0, 1) => self.a2,
                (0, 2) => self.a3,
                (0, _) => self.a4,
                (1, 1) => self.b2,
                (1, 2) => self.b3,
                (1, _) => self.b4,
                (2, 2) => self.c3,
                (2, _) => self.c4,
                _ => self.d4,
            };
        }

        WeightTable { cells }
    }
}

/// Weight of every cell, indexed like the bitboards
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    pub cells: [f32; CELLS],
}

impl Default for WeightTable {
    fn default() -> Self {
        PositionalWeights::default().table()
    }
}

impl WeightTable {
    #[inline(always)]
    pub fn weight(&self, sq: usize) -> f32 {
        self.cells[sq]
    }
}
