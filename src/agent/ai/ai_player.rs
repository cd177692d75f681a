//! AiPlayer - the search engine behind the [`Player`] seam.
//!
//! Each call to `get_move` rebuilds a [`Position`] from the runner's snapshot,
//! arms a timer for the budget and runs the configured driver against the
//! player's table. The table outlives individual moves, so later searches reuse
//! what earlier ones stored.
//!
//! ```no_run
//! use othello_engine::agent::ai::{AiPlayer, BookTable};
//! use othello_engine::agent::Player;
//! use othello_engine::config::EngineConfig;
//! use othello_engine::game_repr::{Color, Position};
//! use std::time::Duration;
//!
//! let mut ai = AiPlayer::with_book(EngineConfig::default(), "book".to_string());
//! ai.load_book("opening.book").ok();
//! let result = ai.get_move(&Position::new().to_snapshot(), Color::Black, Duration::from_secs(1));
//! println!("{:?}", result.best_move);
//! ai.save_book("opening.book").unwrap();
//! ```

use super::book_table::BookTable;
use super::cancel::CancelToken;
use super::positional_weights::WeightTable;
use super::search::{run_driver, search_with_budget, SearchResult};
use super::transposition_table::{Table, TranspositionTable};
use crate::agent::player::Player;
use crate::config::EngineConfig;
use crate::error::BookError;
use crate::game_repr::{BoardSnapshot, Color, Position};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub struct AiPlayer<T: Table> {
    config: EngineConfig,
    weights: WeightTable,
    table: Arc<T>,
    name: String,
}

impl AiPlayer<TranspositionTable> {
    /// Player with a plain table sized from `config`
    pub fn new(config: EngineConfig, name: String) -> Self {
        let table = Arc::new(TranspositionTable::with_slots(config.table_slots));
        Self::with_table(config, table, name)
    }
}

impl AiPlayer<BookTable> {
    /// Player whose table keeps an opening book
    pub fn with_book(config: EngineConfig, name: String) -> Self {
        let table = Arc::new(BookTable::new(
            config.table_slots,
            config.book_slots,
            config.book_ceiling,
        ));
        Self::with_table(config, table, name)
    }
}

impl<T: Table> AiPlayer<T> {
    /// Player over an existing, possibly shared, table
    pub fn with_table(config: EngineConfig, table: Arc<T>, name: String) -> Self {
        Self {
            weights: config.weights.table(),
            config,
            table,
            name,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn table(&self) -> &Arc<T> {
        &self.table
    }

    /// Search `pos` until `token` fires or every depth is done
    pub fn search(&self, pos: &Position, token: &CancelToken) -> SearchResult {
        run_driver(self.config.driver(), pos, self.table.as_ref(), &self.weights, token)
    }

    /// Search `pos` for at most `budget`
    pub fn search_for(&self, pos: &Position, budget: Duration) -> SearchResult {
        let token = CancelToken::new();
        search_with_budget(budget, &token, || self.search(pos, &token))
    }

    /// Write the table's book to `path`
    pub fn save_book(&self, path: impl AsRef<Path>) -> Result<usize, BookError> {
        let written = self.table.dump(BufWriter::new(File::create(path.as_ref())?))?;
        log::info!("saved {written} book entries to {}", path.as_ref().display());
        Ok(written)
    }

    /// Seed the table from a book at `path`
    pub fn load_book(&self, path: impl AsRef<Path>) -> Result<usize, BookError> {
        self.table.fill(BufReader::new(File::open(path)?))
    }
}

impl<T: Table> Player for AiPlayer<T> {
    fn get_move(&mut self, board: &BoardSnapshot, to_move: Color, budget: Duration) -> SearchResult {
        let pos = Position::from_snapshot(board, to_move);
        let result = self.search_for(&pos, budget);

        log::info!(
            "{} ({}) plays {} after depth {} with score {:.2}, {} nodes in {} ms ({} table collisions)",
            self.name,
            to_move,
            super::search::display_move(result.best_move),
            result.depth_reached,
            result.score,
            result.nodes_evaluated,
            result.time_ms,
            self.table.collisions()
        );
        result
    }

    fn name(&self) -> &str {
        &self.name
    }
}
