//! Storage interface for colleges, match history and reviews
//!
//! The arena treats the store as the single source of truth: a new rating is
//! only visible to readers once `commit_round` has confirmed it.

use crate::error::Result;
use crate::types::{College, CollegeId, MatchRecord, Review};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A rating write guarded by the value the caller based its calculation on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingWrite {
    pub college_id: CollegeId,
    /// Rating read before the calculation
    pub expected: f64,
    /// Rating to store
    pub new: f64,
}

/// Everything a resolved comparison writes, applied all-or-nothing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundCommit {
    pub record: MatchRecord,
    pub winner: RatingWrite,
    pub loser: RatingWrite,
}

/// What a commit did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitStatus {
    /// Both ratings and the match record were written
    Applied,
    /// A match with the same id was already recorded; nothing was written
    AlreadyRecorded,
}

/// Trait for arena persistence operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArenaStore: Send + Sync {
    /// Get a single college
    async fn get_college(&self, college_id: &str) -> Result<Option<College>>;

    /// Get every college, in ingestion order
    async fn list_colleges(&self) -> Result<Vec<College>>;

    /// Insert new colleges. For ids already present the descriptive fields are
    /// refreshed but the stored rating is kept.
    async fn upsert_colleges(&self, colleges: Vec<College>) -> Result<()>;

    /// Write both participants' ratings and append the match record atomically.
    ///
    /// Fails with `ArenaError::StaleRating` without writing anything if either
    /// stored rating no longer equals the `expected` value in the commit.
    async fn commit_round(&self, round: RoundCommit) -> Result<CommitStatus>;

    /// Matches the college won or lost
    async fn matches_for(&self, college_id: &str) -> Result<Vec<MatchRecord>>;

    /// The whole match log, in commit order
    async fn all_matches(&self) -> Result<Vec<MatchRecord>>;

    /// Append a review
    async fn add_review(&self, review: Review) -> Result<()>;

    /// Reviews of one college
    async fn reviews_for(&self, college_id: &str) -> Result<Vec<Review>>;
}
