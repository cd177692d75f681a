// Lazy-SMP: several iterative-deepening workers share one table and search at
// staggered depths. Worker `i` starts at depth `1 + i/2` and, after each
// completed depth, moves on by `max(1, P/2)`. Odd workers walk moves in reverse
// so the workers fan out over different subtrees.

use super::cancel::CancelToken;
use super::move_ordering::MoveOrder;
use super::negamax::{RootOutcome, Searcher};
use super::positional_weights::WeightTable;
use super::search::{display_move, max_depth, SearchResult, SearchType};
use super::transposition_table::Table;
use crate::game_repr::Position;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Instant;

/// Best completed depth reported by any worker
#[derive(Debug, Clone, Copy)]
struct Completed {
    depth: u8,
    nodes: u64,
    outcome: RootOutcome,
}

impl Completed {
    /// Deeper wins; at equal depth the more thorough run wins
    fn beats(&self, other: &Completed) -> bool {
        self.depth > other.depth || (self.depth == other.depth && self.nodes > other.nodes)
    }
}

/// Depth a worker starts at
fn start_depth(worker: usize) -> u8 {
    (1 + worker / 2).min(u8::MAX as usize) as u8
}

/// Depth step between a worker's consecutive searches
fn stride(threads: usize) -> u8 {
    (threads / 2).clamp(1, u8::MAX as usize) as u8
}

/// Parallel search with `threads` workers; blocks until every worker has
/// stopped, either at the last depth or because `token` fired
pub fn lazy_smp<T: Table>(
    pos: &Position,
    table: &T,
    weights: &WeightTable,
    token: &CancelToken,
    threads: usize,
) -> SearchResult {
    let start_time = Instant::now();
    let threads = threads.max(1);
    let step = stride(threads);
    let last_depth = max_depth(pos);

    let best: Mutex<Option<Completed>> = Mutex::new(None);
    let total_nodes = AtomicU64::new(0);

    thread::scope(|scope| {
        for worker in 0..threads {
            let best = &best;
            let total_nodes = &total_nodes;

            scope.spawn(move || {
                let mut searcher =
                    Searcher::new(table, token, weights).with_order(MoveOrder::for_worker(worker));
                let mut depth = start_depth(worker);

                while depth <= last_depth {
                    let before = searcher.nodes_evaluated();
                    let Ok(outcome) = searcher.search_root(pos, depth) else {
                        log::debug!("worker {worker} interrupted at depth {depth}");
                        break;
                    };

                    let done = Completed {
                        depth,
                        nodes: searcher.nodes_evaluated() - before,
                        outcome,
                    };
                    let mut record = best.lock().unwrap_or_else(PoisonError::into_inner);
                    if record.as_ref().map_or(true, |current| done.beats(current)) {
                        *record = Some(done);
                    }
                    drop(record);

                    let Some(next) = depth.checked_add(step) else {
                        break;
                    };
                    log::debug!(
                        "worker {worker} finished depth {depth} ({}), next depth {next}",
                        display_move(outcome.best_move)
                    );
                    depth = next;
                }

                total_nodes.fetch_add(searcher.nodes_evaluated(), Ordering::Relaxed);
            });
        }
    });

    let mut result = SearchResult::new(SearchType::LazySmp);
    if let Some(done) = best.into_inner().unwrap_or_else(PoisonError::into_inner) {
        result.best_move = done.outcome.best_move;
        result.score = done.outcome.score;
        result.depth_reached = done.depth;
        log::info!(
            "lazy-smp with {threads} workers: depth {} best {} score {:.2}",
            done.depth,
            display_move(done.outcome.best_move),
            done.outcome.score
        );
    }
    result.nodes_evaluated = total_nodes.into_inner();
    result.time_ms = start_time.elapsed().as_millis() as u64;
    result
}
