// Move ordering: the table's suggested move first, then the legal moves in
// natural (ascending cell) or reversed order.

use crate::game_repr::{Cell, MoveList, Position};

/// Order in which a searcher walks the natural move list.
///
/// Parallel workers use different orders so they explore different subtrees
/// first and feed each other through the shared table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveOrder {
    #[default]
    Natural,
    Reversed,
}

impl MoveOrder {
    /// Natural for even worker indices, reversed for odd ones
    pub fn for_worker(index: usize) -> MoveOrder {
        if index % 2 == 0 {
            MoveOrder::Natural
        } else {
            MoveOrder::Reversed
        }
    }
}

/// Legal moves of `pos` with `table_move` (if legal) moved to the front
pub fn ordered_moves(pos: &Position, table_move: Option<Cell>, order: MoveOrder) -> MoveList {
    let mut moves = pos.legal_moves();
    if order == MoveOrder::Reversed {
        moves.reverse();
    }

    if let Some(first) = table_move {
        if let Some(at) = moves.iter().position(|&mv| mv == first) {
            moves[..=at].rotate_right(1);
        }
    }

    moves
}
