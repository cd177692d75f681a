// Negamax search with alpha-beta pruning over a shared transposition table.
//
// Values are from the perspective of the side to move. Entries are stored in
// the table multiplied by the mover's sign (Black's frame), so a stored value
// reads the same whoever probes it.
//
// Every node returns `(value, exact)`. A node is exact when every child it
// explored was exact and no move was pruned; leaves are exact.

use super::cancel::CancelToken;
use super::evaluation::{positional_score, terminal_score};
use super::move_ordering::{ordered_moves, MoveOrder};
use super::positional_weights::WeightTable;
use super::transposition_table::Table;
use crate::error::SearchError;
use crate::game_repr::{Cell, Position};

/// Result of one fixed-depth root search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootOutcome {
    /// `None` only when the side to move must pass or the game is over
    pub best_move: Option<Cell>,
    pub score: f32,
    pub exact: bool,
}

/// One search instance: a table, a stop flag and its own node counters.
///
/// Parallel workers each own a `Searcher` over the same table.
pub struct Searcher<'a, T: Table> {
    table: &'a T,
    token: &'a CancelToken,
    weights: &'a WeightTable,
    order: MoveOrder,
    nodes_evaluated: u64,
    nodes_visited: u64,
}

impl<'a, T: Table> Searcher<'a, T> {
    pub fn new(table: &'a T, token: &'a CancelToken, weights: &'a WeightTable) -> Self {
        Self {
            table,
            token,
            weights,
            order: MoveOrder::Natural,
            nodes_evaluated: 0,
            nodes_visited: 0,
        }
    }

    pub fn with_order(mut self, order: MoveOrder) -> Self {
        self.order = order;
        self
    }

    /// Leaves scored by the static heuristic
    pub fn nodes_evaluated(&self) -> u64 {
        self.nodes_evaluated
    }

    /// Every node entered, leaves included
    pub fn nodes_visited(&self) -> u64 {
        self.nodes_visited
    }

    /// Search `pos` to `depth` plies (at least one) and pick a move.
    ///
    /// Fails with `SearchError::Interrupted` if the token fires before the
    /// search completes; nothing from an interrupted root is returned.
    pub fn search_root(&mut self, pos: &Position, depth: u8) -> Result<RootOutcome, SearchError> {
        let depth = depth.max(1);
        if self.token.is_cancelled() {
            return Err(SearchError::Interrupted);
        }
        self.nodes_visited += 1;

        let mover = pos.current_player();
        if pos.is_terminal() {
            self.nodes_evaluated += 1;
            return Ok(RootOutcome {
                best_move: None,
                score: terminal_score(pos, mover),
                exact: true,
            });
        }

        let table_move = self.table.read_entry(pos).and_then(|entry| entry.best_move);
        let moves = ordered_moves(pos, table_move, self.order);

        if moves.is_empty() {
            let (value, exact) = self.skip(pos, depth, f32::NEG_INFINITY, f32::INFINITY)?;
            self.store(pos, value, None, depth, exact, f32::INFINITY);
            return Ok(RootOutcome {
                best_move: None,
                score: value,
                exact,
            });
        }

        let beta = f32::INFINITY;
        let mut alpha = f32::NEG_INFINITY;
        let mut best_score = f32::NEG_INFINITY;
        let mut best_move = None;
        let mut exact = true;

        for (i, &mv) in moves.iter().enumerate() {
            let mut child = pos.clone();
            child.place(mv)?;
            let (value, child_exact) = self.negamax(&child, depth - 1, -beta, -alpha)?;
            let value = -value;
            exact &= child_exact;

            if best_move.is_none() || value > best_score {
                best_score = value;
                best_move = Some(mv);
            }
            alpha = alpha.max(value);

            // A proven win cannot be improved on
            if alpha >= beta {
                exact &= i + 1 == moves.len();
                break;
            }
        }

        self.store(pos, best_score, best_move, depth, exact, beta);
        Ok(RootOutcome {
            best_move,
            score: best_score,
            exact,
        })
    }

    fn negamax(
        &mut self,
        pos: &Position,
        depth: u8,
        mut alpha: f32,
        mut beta: f32,
    ) -> Result<(f32, bool), SearchError> {
        if self.token.is_cancelled() {
            return Err(SearchError::Interrupted);
        }
        self.nodes_visited += 1;

        let mover = pos.current_player();
        if pos.is_terminal() {
            self.nodes_evaluated += 1;
            return Ok((terminal_score(pos, mover), true));
        }
        if depth == 0 {
            self.nodes_evaluated += 1;
            return Ok((positional_score(pos, self.weights) * mover.sign(), true));
        }

        let mut table_move = None;
        if let Some(entry) = self.table.read_entry(pos) {
            table_move = entry.best_move;
            if entry.depth_below >= depth {
                let value = entry.heuristic * mover.sign();
                if entry.is_exact {
                    return Ok((value, true));
                }
                if entry.is_alpha {
                    alpha = alpha.max(value);
                } else {
                    beta = beta.min(value);
                }
                if alpha >= beta {
                    return Ok((value, false));
                }
            }
        }

        let moves = ordered_moves(pos, table_move, self.order);
        if moves.is_empty() {
            let (value, exact) = self.skip(pos, depth, alpha, beta)?;
            self.store(pos, value, None, depth, exact, beta);
            return Ok((value, exact));
        }

        let mut best_score = f32::NEG_INFINITY;
        let mut best_move = None;
        let mut exact = true;

        for (i, &mv) in moves.iter().enumerate() {
            let mut child = pos.clone();
            child.place(mv)?;
            let (value, child_exact) = self.negamax(&child, depth - 1, -beta, -alpha)?;
            let value = -value;
            exact &= child_exact;

            if best_move.is_none() || value > best_score {
                best_score = value;
                best_move = Some(mv);
            }
            alpha = alpha.max(value);

            if beta <= alpha {
                exact &= i + 1 == moves.len();
                break;
            }
        }

        self.store(pos, best_score, best_move, depth, exact, beta);
        Ok((best_score, exact))
    }

    /// Forced pass: one ply spent, the opponent moves again
    fn skip(
        &mut self,
        pos: &Position,
        depth: u8,
        alpha: f32,
        beta: f32,
    ) -> Result<(f32, bool), SearchError> {
        let mut child = pos.clone();
        child.skip_turn()?;
        let (value, exact) = self.negamax(&child, depth - 1, -beta, -alpha)?;
        Ok((-value, exact))
    }

    fn store(
        &self,
        pos: &Position,
        value: f32,
        best_move: Option<Cell>,
        depth: u8,
        exact: bool,
        beta: f32,
    ) {
        let is_alpha = !exact && value >= beta;
        self.table.register(
            pos,
            value * pos.current_player().sign(),
            best_move,
            depth,
            exact,
            is_alpha,
        );
    }
}
