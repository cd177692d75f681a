use super::*;
use crate::game_repr::{Cell, Color, Orientation, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ==================== HELPER FUNCTIONS ====================

/// Seeded random playout stopped once at most `empties` cells are left.
/// Returns `None` if the game ended first or the side to move must pass.
pub fn random_position(seed: u64, empties: u32) -> Option<Position> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos = Position::new();

    while pos.remaining_moves() > empties {
        if pos.is_terminal() {
            return None;
        }
        let moves = pos.legal_moves();
        if moves.is_empty() {
            pos.skip_turn().unwrap();
        } else {
            pos.place(moves[rng.gen_range(0..moves.len())]).unwrap();
        }
    }
    (!pos.legal_moves().is_empty()).then_some(pos)
}

/// Exhaustive game value for the side to move, no pruning, no table
pub fn solve(pos: &Position, weights: &WeightTable) -> f32 {
    if pos.is_terminal() {
        return heuristic(pos, pos.current_player(), weights);
    }
    let moves = pos.legal_moves();
    if moves.is_empty() {
        let mut child = pos.clone();
        child.skip_turn().unwrap();
        return -solve(&child, weights);
    }
    moves
        .iter()
        .map(|&mv| {
            let mut child = pos.clone();
            child.place(mv).unwrap();
            -solve(&child, weights)
        })
        .fold(f32::NEG_INFINITY, f32::max)
}

pub fn cell(name: &str) -> Cell {
    name.parse().unwrap()
}

// ==================== TEST MODULES ====================

mod transposition_table_tests;
