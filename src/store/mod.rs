//! Persistence for colleges, match records and reviews
//!
//! The arena only talks to the `ArenaStore` trait; `InMemoryArenaStore` backs
//! the CLI and the tests.

pub mod memory;
pub mod repository;

// Re-export commonly used types
pub use memory::InMemoryArenaStore;
pub use repository::{ArenaStore, CommitStatus, RatingWrite, RoundCommit};

#[cfg(test)]
pub use repository::MockArenaStore;
