// The eight symmetries of the square board.
//
// A mirror swaps columns (y -> 7 - y); a quarter turn maps (x, y) to (y, 7 - x).
// Mirrored orientations apply the mirror first, then the turns.

use super::bitboards::{pop_lsb, CELLS, SIZE};
use super::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Orientation {
    Identity = 0,
    Rotate90 = 1,
    Rotate180 = 2,
    Rotate270 = 3,
    Mirror = 4,
    MirrorRotate90 = 5,
    MirrorRotate180 = 6,
    MirrorRotate270 = 7,
}

/// Cell permutation per orientation: TRANSFORMS[orientation][cell] = image index
static TRANSFORMS: [[u8; CELLS]; 8] = generate_transforms();

const fn transform_xy(orientation: usize, x: usize, y: usize) -> (usize, usize) {
    let (mut x, mut y) = (x, y);
    if orientation >= 4 {
        y = SIZE - 1 - y;
    }
    let mut turns = orientation % 4;
    while turns > 0 {
        let turned = (y, SIZE - 1 - x);
        x = turned.0;
        y = turned.1;
        turns -= 1;
    }
    (x, y)
}

const fn generate_transforms() -> [[u8; CELLS]; 8] {
    let mut table = [[0u8; CELLS]; 8];
    let mut o = 0;
    while o < 8 {
        let mut sq = 0;
        while sq < CELLS {
            let (x, y) = transform_xy(o, sq / SIZE, sq % SIZE);
            table[o][sq] = (x * SIZE + y) as u8;
            sq += 1;
        }
        o += 1;
    }
    table
}

impl Orientation {
    pub const ALL: [Orientation; 8] = [
        Orientation::Identity,
        Orientation::Rotate90,
        Orientation::Rotate180,
        Orientation::Rotate270,
        Orientation::Mirror,
        Orientation::MirrorRotate90,
        Orientation::MirrorRotate180,
        Orientation::MirrorRotate270,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Orientation> {
        Self::ALL.get(index).copied()
    }

    #[inline(always)]
    pub fn transform(self, cell: Cell) -> Cell {
        Cell::from_index_unchecked(TRANSFORMS[self.index()][cell.index()] as usize)
    }

    /// Image of every set bit
    pub fn transform_bits(self, mut bb: u64) -> u64 {
        let table = &TRANSFORMS[self.index()];
        let mut out = 0u64;
        while bb != 0 {
            out |= 1u64 << table[pop_lsb(&mut bb)];
        }
        out
    }

    /// Quarter turns invert each other; every mirrored orientation is its own inverse
    pub fn inverse(self) -> Orientation {
        match self {
            Orientation::Rotate90 => Orientation::Rotate270,
            Orientation::Rotate270 => Orientation::Rotate90,
            other => other,
        }
    }

    /// The permutation table used by the hashing tables
    pub(crate) fn table(self) -> &'static [u8; CELLS] {
        &TRANSFORMS[self.index()]
    }
}
