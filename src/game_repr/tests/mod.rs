use super::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ==================== HELPER FUNCTIONS ====================

/// Naive board that rescans every direction cell by cell and recomputes
/// everything from the grid. Used as an oracle for the bitboard position.
#[derive(Clone)]
pub struct ReferenceBoard {
    pub grid: BoardSnapshot,
    pub to_move: Color,
}

const STEPS: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

impl ReferenceBoard {
    pub fn new() -> Self {
        Self {
            grid: Position::new().to_snapshot(),
            to_move: Color::Black,
        }
    }

    fn tile_at(&self, x: i32, y: i32) -> Option<Tile> {
        if (0..8).contains(&x) && (0..8).contains(&y) {
            Some(self.grid[x as usize][y as usize])
        } else {
            None
        }
    }

    /// Cells flipped by `color` playing (x, y)
    pub fn flips(&self, color: Color, x: usize, y: usize) -> Vec<(usize, usize)> {
        if self.grid[x][y] != Tile::Empty {
            return Vec::new();
        }
        let own = Tile::from(color);
        let opp = Tile::from(color.opposite());
        let mut flipped = Vec::new();

        for (dx, dy) in STEPS {
            let mut run = Vec::new();
            let (mut cx, mut cy) = (x as i32 + dx, y as i32 + dy);
            while self.tile_at(cx, cy) == Some(opp) {
                run.push((cx as usize, cy as usize));
                cx += dx;
                cy += dy;
            }
            if !run.is_empty() && self.tile_at(cx, cy) == Some(own) {
                flipped.extend(run);
            }
        }
        flipped
    }

    pub fn legal_moves(&self, color: Color) -> Vec<usize> {
        let mut moves = Vec::new();
        for x in 0..8 {
            for y in 0..8 {
                if !self.flips(color, x, y).is_empty() {
                    moves.push(x * 8 + y);
                }
            }
        }
        moves
    }

    pub fn play(&mut self, x: usize, y: usize) {
        let flipped = self.flips(self.to_move, x, y);
        assert!(!flipped.is_empty(), "reference board got an illegal move");
        let own = Tile::from(self.to_move);
        self.grid[x][y] = own;
        for (fx, fy) in flipped {
            self.grid[fx][fy] = own;
        }
        self.to_move = self.to_move.opposite();
    }

    pub fn pass(&mut self) {
        self.to_move = self.to_move.opposite();
    }

    pub fn count(&self, color: Color) -> u32 {
        let tile = Tile::from(color);
        self.grid.iter().flatten().filter(|&&t| t == tile).count() as u32
    }

    pub fn is_terminal(&self) -> bool {
        self.legal_moves(Color::Black).is_empty() && self.legal_moves(Color::White).is_empty()
    }
}

/// Play a seeded random game, calling `visit` on every position reached
/// (including the start). Passes are taken when forced.
pub fn random_game(seed: u64, mut visit: impl FnMut(&Position)) -> Position {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos = Position::new();
    visit(&pos);

    while !pos.is_terminal() {
        let moves = pos.legal_moves();
        if moves.is_empty() {
            pos.skip_turn().unwrap();
        } else {
            let cell = moves[rng.gen_range(0..moves.len())];
            pos.place(cell).unwrap();
        }
        visit(&pos);
    }
    pos
}

pub fn cell(name: &str) -> Cell {
    name.parse().unwrap()
}

// ==================== TEST MODULES ====================

mod move_generation;
