// Position evaluation function
// Returns a score from the queried player's perspective (positive = good for them)

use crate::game_repr::bitboards::pop_lsb;
use crate::game_repr::{Color, Position};
use super::positional_weights::WeightTable;

/// Static heuristic of `pos` for `for_player`.
///
/// A finished game is worth +/- infinity to the side holding more discs. A
/// finished game with equal counts returns the (zero) disc differential, so a
/// draw ranks above any loss and below any win.
///
/// Otherwise: sum of positional weights, Black discs counted positive and White
/// discs negative, then negated when evaluating for White.
pub fn heuristic(pos: &Position, for_player: Color, weights: &WeightTable) -> f32 {
    if pos.is_terminal() {
        return terminal_score(pos, for_player);
    }
    positional_score(pos, weights) * for_player.sign()
}

/// Score of a finished game from `for_player`'s perspective
pub fn terminal_score(pos: &Position, for_player: Color) -> f32 {
    match pos.winner() {
        Some(winner) if winner == for_player => f32::INFINITY,
        Some(_) => f32::NEG_INFINITY,
        None => disc_differential(pos, for_player),
    }
}

/// Own discs minus opponent discs
pub fn disc_differential(pos: &Position, for_player: Color) -> f32 {
    pos.disc_count(for_player) as f32 - pos.disc_count(for_player.opposite()) as f32
}

/// Weighted disc sum from Black's perspective
pub fn positional_score(pos: &Position, weights: &WeightTable) -> f32 {
    let mut score = 0.0f32;

    let mut black = pos.discs(Color::Black);
    while black != 0 {
        score += weights.weight(pop_lsb(&mut black));
    }

    let mut white = pos.discs(Color::White);
    while white != 0 {
        score -= weights.weight(pop_lsb(&mut white));
    }

    score
}
