//! In-memory arena store

use crate::error::{ArenaError, Result};
use crate::store::repository::{ArenaStore, CommitStatus, RatingWrite, RoundCommit};
use crate::types::{College, CollegeId, MatchId, MatchRecord, Review};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

#[derive(Debug, Default)]
struct ArenaState {
    colleges: HashMap<CollegeId, College>,
    /// Ingestion order of college ids
    order: Vec<CollegeId>,
    matches: Vec<MatchRecord>,
    match_ids: HashSet<MatchId>,
    reviews: Vec<Review>,
}

impl ArenaState {
    fn check_expected(&self, write: &RatingWrite) -> Result<()> {
        let college =
            self.colleges
                .get(&write.college_id)
                .ok_or_else(|| ArenaError::CollegeNotFound {
                    college_id: write.college_id.clone(),
                })?;

        if college.elo_rating != write.expected {
            return Err(ArenaError::StaleRating {
                college_id: write.college_id.clone(),
                expected: write.expected,
                found: college.elo_rating,
            }
            .into());
        }

        if !write.new.is_finite() {
            return Err(ArenaError::InvalidRating { value: write.new }.into());
        }

        Ok(())
    }

    fn apply(&mut self, write: &RatingWrite) {
        if let Some(college) = self.colleges.get_mut(&write.college_id) {
            college.elo_rating = write.new;
        }
    }
}

/// Store that keeps everything behind a single lock, so a round commit is
/// atomic with respect to every reader.
#[derive(Debug, Default)]
pub struct InMemoryArenaStore {
    state: RwLock<ArenaState>,
}

impl InMemoryArenaStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with colleges
    pub fn with_colleges(colleges: Vec<College>) -> Result<Self> {
        let store = Self::new();
        store.insert_colleges(colleges)?;
        Ok(store)
    }

    /// Number of recorded matches
    pub fn match_count(&self) -> Result<usize> {
        Ok(self.read()?.matches.len())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, ArenaState>> {
        self.state.read().map_err(|_| {
            ArenaError::InternalError {
                message: "Failed to acquire arena read lock".to_string(),
            }
            .into()
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, ArenaState>> {
        self.state.write().map_err(|_| {
            ArenaError::InternalError {
                message: "Failed to acquire arena write lock".to_string(),
            }
            .into()
        })
    }

    fn insert_colleges(&self, colleges: Vec<College>) -> Result<()> {
        if let Some(bad) = colleges.iter().find(|c| !c.elo_rating.is_finite()) {
            return Err(ArenaError::InvalidRating {
                value: bad.elo_rating,
            }
            .into());
        }

        let mut guard = self.write()?;
        let state = &mut *guard;
        let mut inserted = 0usize;
        for college in colleges {
            match state.colleges.get_mut(&college.id) {
                Some(existing) => {
                    existing.name = college.name;
                    existing.logo_url = college.logo_url;
                    existing.details = college.details;
                }
                None => {
                    state.order.push(college.id.clone());
                    state.colleges.insert(college.id.clone(), college);
                    inserted += 1;
                }
            }
        }

        debug!(inserted, total = state.colleges.len(), "Colleges stored");
        Ok(())
    }
}

#[async_trait]
impl ArenaStore for InMemoryArenaStore {
    async fn get_college(&self, college_id: &str) -> Result<Option<College>> {
        Ok(self.read()?.colleges.get(college_id).cloned())
    }

    async fn list_colleges(&self) -> Result<Vec<College>> {
        let state = self.read()?;
        Ok(state
            .order
            .iter()
            .filter_map(|id| state.colleges.get(id).cloned())
            .collect())
    }

    async fn upsert_colleges(&self, colleges: Vec<College>) -> Result<()> {
        self.insert_colleges(colleges)
    }

    async fn commit_round(&self, round: RoundCommit) -> Result<CommitStatus> {
        if round.record.winner_id != round.winner.college_id
            || round.record.loser_id != round.loser.college_id
        {
            return Err(ArenaError::InternalError {
                message: format!(
                    "Match record {} does not match its rating writes",
                    round.record.id
                ),
            }
            .into());
        }
        if round.winner.college_id == round.loser.college_id {
            return Err(ArenaError::SameCollege {
                college_id: round.winner.college_id,
            }
            .into());
        }

        let mut state = self.write()?;

        if state.match_ids.contains(&round.record.id) {
            debug!(match_id = %round.record.id, "Match already recorded, skipping");
            return Ok(CommitStatus::AlreadyRecorded);
        }

        // Validate everything before touching anything
        state.check_expected(&round.winner)?;
        state.check_expected(&round.loser)?;

        state.apply(&round.winner);
        state.apply(&round.loser);
        state.match_ids.insert(round.record.id);

        info!(
            match_id = %round.record.id,
            winner = %round.record.winner_id,
            loser = %round.record.loser_id,
            "Round committed"
        );
        state.matches.push(round.record);

        Ok(CommitStatus::Applied)
    }

    async fn matches_for(&self, college_id: &str) -> Result<Vec<MatchRecord>> {
        Ok(self
            .read()?
            .matches
            .iter()
            .filter(|record| record.involves(college_id))
            .cloned()
            .collect())
    }

    async fn all_matches(&self) -> Result<Vec<MatchRecord>> {
        Ok(self.read()?.matches.clone())
    }

    async fn add_review(&self, review: Review) -> Result<()> {
        let mut state = self.write()?;
        if !state.colleges.contains_key(&review.college_id) {
            return Err(ArenaError::CollegeNotFound {
                college_id: review.college_id,
            }
            .into());
        }

        state.reviews.push(review);
        Ok(())
    }

    async fn reviews_for(&self, college_id: &str) -> Result<Vec<Review>> {
        Ok(self
            .read()?
            .reviews
            .iter()
            .filter(|review| review.college_id == college_id)
            .cloned()
            .collect())
    }
}
