// Iterative Deepening Search Orchestrator
//
// Runs fixed-depth root searches at depth 1, 2, 3, ... up to the number of
// empty cells, reusing one table, until the cancellation token fires. The
// result of the deepest completed depth wins; an interrupted depth is dropped.

use super::cancel::CancelToken;
use super::lazy_smp::lazy_smp;
use super::move_ordering::MoveOrder;
use super::negamax::Searcher;
use super::positional_weights::WeightTable;
use super::transposition_table::Table;
use crate::error::SearchError;
use crate::game_repr::{Cell, Position};
use std::fmt;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// Which driver produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchType {
    #[default]
    Sequential,
    LazySmp,
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchType::Sequential => write!(f, "sequential"),
            SearchType::LazySmp => write!(f, "lazy-smp"),
        }
    }
}

/// Result of a search operation
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// `None` when nothing completed in time or no placement exists
    pub best_move: Option<Cell>,
    /// Value of `best_move` for the side to move
    pub score: f32,
    /// Deepest fully completed depth, 0 if none
    pub depth_reached: u8,
    pub nodes_evaluated: u64,
    pub time_ms: u64,
    pub search_type: SearchType,
}

impl SearchResult {
    /// Create a new search result with no move found
    pub fn new(search_type: SearchType) -> Self {
        Self {
            best_move: None,
            score: 0.0,
            depth_reached: 0,
            nodes_evaluated: 0,
            time_ms: 0,
            search_type,
        }
    }
}

/// Deepest useful depth: one ply per empty cell
pub(crate) fn max_depth(pos: &Position) -> u8 {
    pos.remaining_moves().clamp(1, u8::MAX as u32) as u8
}

/// Which driver to run and with how many workers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Sequential { order: MoveOrder },
    /// `None` uses one worker per logical CPU
    LazySmp { threads: Option<usize> },
}

/// Run `driver` on `pos` until it exhausts the depth range or `token` fires
pub fn run_driver<T: Table>(
    driver: Driver,
    pos: &Position,
    table: &T,
    weights: &WeightTable,
    token: &CancelToken,
) -> SearchResult {
    match driver {
        Driver::Sequential { order } => iterative_deepening(pos, table, weights, token, order),
        Driver::LazySmp { threads } => {
            let threads = threads.unwrap_or_else(num_cpus::get);
            lazy_smp(pos, table, weights, token, threads)
        }
    }
}

/// Sequential iterative deepening on the calling thread
pub fn iterative_deepening<T: Table>(
    pos: &Position,
    table: &T,
    weights: &WeightTable,
    token: &CancelToken,
    order: MoveOrder,
) -> SearchResult {
    let start_time = Instant::now();
    let mut result = SearchResult::new(SearchType::Sequential);
    let mut searcher = Searcher::new(table, token, weights).with_order(order);

    for depth in 1..=max_depth(pos) {
        match searcher.search_root(pos, depth) {
            Ok(outcome) => {
                result.best_move = outcome.best_move;
                result.score = outcome.score;
                result.depth_reached = depth;
                log::info!(
                    "depth {depth}: best {} score {:.2} nodes {} ({} ms)",
                    display_move(outcome.best_move),
                    outcome.score,
                    searcher.nodes_evaluated(),
                    start_time.elapsed().as_millis()
                );
            }
            Err(SearchError::Interrupted) => break,
            Err(err) => {
                log::error!("search aborted at depth {depth}: {err}");
                break;
            }
        }
    }

    result.nodes_evaluated = searcher.nodes_evaluated();
    result.time_ms = start_time.elapsed().as_millis() as u64;
    result
}

/// Run `search` and cancel `token` once `budget` has elapsed.
///
/// The timer thread wakes as soon as `search` returns, so a search that
/// finishes early costs no extra wait.
pub fn search_with_budget<R>(
    budget: Duration,
    token: &CancelToken,
    search: impl FnOnce() -> R,
) -> R {
    let (done_tx, done_rx) = mpsc::channel::<()>();
    let timer_token = token.clone();

    thread::scope(|scope| {
        scope.spawn(move || {
            if let Err(RecvTimeoutError::Timeout) = done_rx.recv_timeout(budget) {
                log::debug!("budget of {budget:?} spent, cancelling search");
                timer_token.cancel();
            }
        });

        let result = search();
        drop(done_tx);
        result
    })
}

pub(crate) fn display_move(mv: Option<Cell>) -> String {
    mv.map_or_else(|| "pass".to_string(), |cell| cell.to_string())
}
