// AI Agent - Negamax with Alpha-Beta Pruning
//
// Classical Othello engine: negamax with alpha-beta pruning over a lock-free
// transposition table keyed by the symmetry-reduced position hash, driven
// either by sequential iterative deepening or by Lazy-SMP.

mod ai_player;
mod book_table;
mod cancel;
mod evaluation;
mod lazy_smp;
mod move_ordering;
mod negamax;
mod positional_weights;
mod search;
mod transposition_table;

#[cfg(test)]
mod tests;

pub use ai_player::AiPlayer;
pub use book_table::{BookTable, DEFAULT_BOOK_CEILING};
pub use cancel::CancelToken;
pub use evaluation::{disc_differential, heuristic, positional_score, terminal_score};
pub use lazy_smp::lazy_smp;
pub use move_ordering::{ordered_moves, MoveOrder};
pub use negamax::{RootOutcome, Searcher};
pub use positional_weights::{PositionalWeights, WeightTable};
pub use search::{
    iterative_deepening, run_driver, search_with_budget, Driver, SearchResult, SearchType,
};
pub use transposition_table::{Table, TableEntry, TranspositionTable, DEFAULT_SLOTS};
