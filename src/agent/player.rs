//! Player trait: the seam between a match runner and whatever picks moves.
//!
//! A match runner owns the game. On each turn it hands the player an immutable
//! board snapshot, the side to move and a time budget, and gets back a move
//! plus the counters it logs. A player that returns no move while a placement
//! exists forfeits; deciding that is the runner's job.

use super::ai::SearchResult;
use crate::game_repr::{BoardSnapshot, Color};
use std::time::Duration;

/// Result of a completed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    BlackWins,
    WhiteWins,
    Draw,
}

impl GameResult {
    /// Create a GameResult from the winning color, `None` meaning a draw
    pub fn from_winner(winner: Option<Color>) -> Self {
        match winner {
            Some(Color::Black) => GameResult::BlackWins,
            Some(Color::White) => GameResult::WhiteWins,
            None => GameResult::Draw,
        }
    }
}

/// Trait for entities that can provide moves.
///
/// `get_move` blocks until the player has an answer. It must return within
/// roughly `budget`; runners treat a player that overruns by more than a grace
/// period as faulted.
pub trait Player {
    /// Pick a move for `to_move` on `board`.
    ///
    /// `best_move` is `None` when no placement exists or when nothing was
    /// found in time.
    fn get_move(&mut self, board: &BoardSnapshot, to_move: Color, budget: Duration) -> SearchResult;

    /// Called once the game is over
    fn game_ended(&mut self, _result: GameResult) {}

    fn name(&self) -> &str {
        "Player"
    }
}
