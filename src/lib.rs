//! College Arena - pairwise college comparison with ELO ratings
//!
//! Users are shown two colleges and pick one; each pick updates both
//! colleges' ratings and is appended to the match history. Win/loss and
//! review statistics are derived from that history on demand.

pub mod arena;
pub mod config;
pub mod error;
pub mod metrics;
pub mod rating;
pub mod roster;
pub mod stats;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{ArenaError, Result};
pub use types::*;

// Re-export key components
pub use arena::{ArenaService, ReviewSubmission, VoteReceipt};
pub use rating::{compute_updated_ratings, EloRatingCalculator, RatingCalculator};
pub use stats::compute_stats;
pub use store::{ArenaStore, InMemoryArenaStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
