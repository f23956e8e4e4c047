//! Test fixtures and store wrappers for integration testing

#![allow(dead_code)]

use async_trait::async_trait;
use college_arena::arena::{ArenaService, RandomPairingSelector};
use college_arena::config::ArenaSettings;
use college_arena::error::{ArenaError, Result};
use college_arena::rating::EloRatingCalculator;
use college_arena::store::{ArenaStore, CommitStatus, InMemoryArenaStore, RoundCommit};
use college_arena::types::{College, MatchRecord, Review};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// A small roster with equal starting ratings
pub fn sample_colleges() -> Vec<College> {
    vec![
        College::new("x", "Xavier College"),
        College::new("y", "Yardley Institute"),
        College::new("z", "Zenith University"),
        College::new("w", "Westbrook Polytechnic"),
    ]
}

pub fn test_settings(max_commit_attempts: u32) -> ArenaSettings {
    ArenaSettings {
        max_commit_attempts,
        retry_delay_ms: 0,
        leaderboard_size: 10,
    }
}

/// Build a service over any store with deterministic pairing
pub fn service_over(store: Arc<dyn ArenaStore>, max_commit_attempts: u32) -> ArenaService {
    ArenaService::new(
        store,
        Arc::new(EloRatingCalculator::default()),
        Arc::new(RandomPairingSelector::seeded(11)),
        test_settings(max_commit_attempts),
    )
}

/// Service over a fresh in-memory store holding `colleges`
pub fn create_test_system(colleges: Vec<College>) -> (ArenaService, Arc<InMemoryArenaStore>) {
    let store = Arc::new(
        InMemoryArenaStore::with_colleges(colleges).expect("Failed to create test store"),
    );
    let service = service_over(store.clone(), 3);
    (service, store)
}

/// How the flaky store misbehaves on a failing commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// The commit is rejected before anything is written
    Reject,
    /// The commit is written but the acknowledgement is lost
    LoseAck,
}

/// Store wrapper whose first few commits fail
pub struct FlakyStore {
    inner: InMemoryArenaStore,
    failures_left: AtomicU32,
    mode: FailureMode,
    commit_calls: AtomicU32,
}

impl FlakyStore {
    pub fn new(colleges: Vec<College>, failures: u32, mode: FailureMode) -> Self {
        Self {
            inner: InMemoryArenaStore::with_colleges(colleges)
                .expect("Failed to create test store"),
            failures_left: AtomicU32::new(failures),
            mode,
            commit_calls: AtomicU32::new(0),
        }
    }

    pub fn commit_calls(&self) -> u32 {
        self.commit_calls.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &InMemoryArenaStore {
        &self.inner
    }

    fn take_failure(&self) -> bool {
        self.failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl ArenaStore for FlakyStore {
    async fn get_college(&self, college_id: &str) -> Result<Option<College>> {
        self.inner.get_college(college_id).await
    }

    async fn list_colleges(&self) -> Result<Vec<College>> {
        self.inner.list_colleges().await
    }

    async fn upsert_colleges(&self, colleges: Vec<College>) -> Result<()> {
        self.inner.upsert_colleges(colleges).await
    }

    async fn commit_round(&self, round: RoundCommit) -> Result<CommitStatus> {
        self.commit_calls.fetch_add(1, Ordering::SeqCst);

        if self.take_failure() {
            if self.mode == FailureMode::LoseAck {
                self.inner.commit_round(round).await?;
            }
            return Err(ArenaError::PersistenceFailed {
                message: "simulated network failure".to_string(),
            }
            .into());
        }

        self.inner.commit_round(round).await
    }

    async fn matches_for(&self, college_id: &str) -> Result<Vec<MatchRecord>> {
        self.inner.matches_for(college_id).await
    }

    async fn all_matches(&self) -> Result<Vec<MatchRecord>> {
        self.inner.all_matches().await
    }

    async fn add_review(&self, review: Review) -> Result<()> {
        self.inner.add_review(review).await
    }

    async fn reviews_for(&self, college_id: &str) -> Result<Vec<Review>> {
        self.inner.reviews_for(college_id).await
    }
}
