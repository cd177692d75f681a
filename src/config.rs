//! Engine configuration passed to [`AiPlayer`](crate::agent::ai::AiPlayer) at
//! construction.
//!
//! Every field has a default; override what you need with the `with_*` methods:
//!
//! ```
//! use othello_engine::config::EngineConfig;
//! use othello_engine::agent::ai::SearchType;
//!
//! let config = EngineConfig::default()
//!     .with_table_slots(1 << 16)
//!     .with_search_type(SearchType::Sequential);
//! assert_eq!(config.table_slots, 1 << 16);
//! ```

use crate::agent::ai::{
    Driver, MoveOrder, PositionalWeights, SearchType, DEFAULT_BOOK_CEILING, DEFAULT_SLOTS,
};
use log::LevelFilter;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Buckets in the live transposition table
    pub table_slots: usize,
    /// Buckets in the opening book (only used by a book-backed table)
    pub book_slots: usize,
    /// Last move number whose positions are promoted into the book
    pub book_ceiling: u32,
    /// Heuristic weight overrides
    pub weights: PositionalWeights,
    pub search_type: SearchType,
    /// Lazy-SMP worker count; `None` means one per logical CPU
    pub threads: Option<usize>,
    /// Move order of the sequential driver
    pub move_order: MoveOrder,
    /// Level handed to [`init_logging`](crate::init_logging) by the binary
    pub log_level: LevelFilter,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            table_slots: DEFAULT_SLOTS,
            book_slots: DEFAULT_SLOTS / 16,
            book_ceiling: DEFAULT_BOOK_CEILING,
            weights: PositionalWeights::default(),
            search_type: SearchType::LazySmp,
            threads: None,
            move_order: MoveOrder::Natural,
            log_level: LevelFilter::Info,
        }
    }
}

impl EngineConfig {
    pub fn with_table_slots(mut self, slots: usize) -> Self {
        self.table_slots = slots;
        self
    }

    pub fn with_book(mut self, slots: usize, ceiling: u32) -> Self {
        self.book_slots = slots;
        self.book_ceiling = ceiling;
        self
    }

    pub fn with_weights(mut self, weights: PositionalWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }

    /// Switch to Lazy-SMP with a fixed worker count
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.search_type = SearchType::LazySmp;
        self.threads = Some(threads.max(1));
        self
    }

    pub fn with_move_order(mut self, order: MoveOrder) -> Self {
        self.move_order = order;
        self
    }

    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    /// The search driver these settings select
    pub fn driver(&self) -> Driver {
        match self.search_type {
            SearchType::Sequential => Driver::Sequential {
                order: self.move_order,
            },
            SearchType::LazySmp => Driver::LazySmp {
                threads: self.threads,
            },
        }
    }
}
