//! Error types shared across the engine.

use crate::game_repr::{Cell, Color};
use thiserror::Error;

/// Rule violations and malformed board input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A placement that envelops nothing, lands on a disc, or is not adjacent to one
    #[error("{player} cannot place a disc on {cell}")]
    InvalidMove { cell: Cell, player: Color },

    #[error("{player} cannot pass while a placement is available")]
    SkipWithLegalMoves { player: Color },

    #[error("parse error: {0}")]
    Parse(String),
}

/// Opening-book dump/reload failures
#[derive(Debug, Error)]
pub enum BookError {
    #[error("book I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed book entry on line {line}: {content:?}")]
    Malformed { line: usize, content: String },

    #[error("book was dumped from a {found}-slot table, this table has {expected} slots")]
    SizeMismatch { expected: usize, found: usize },
}

/// Why a search stopped without a result
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The cancellation token fired; partial results are discarded
    #[error("search interrupted")]
    Interrupted,

    #[error(transparent)]
    Game(#[from] GameError),
}
