//! Arena service orchestrating votes, reviews and statistics
//!
//! A vote is recorded as read → compute → commit. The commit carries the
//! ratings that were read, so a concurrent vote on either college makes it
//! fail as stale; the service then re-reads and recomputes. The store is the
//! only place ratings live: nothing here caches a rating, so a new rating is
//! visible exactly when the store has confirmed it.

use crate::arena::pairing::{PairingSelector, RandomPairingSelector};
use crate::arena::reviews::ReviewSubmission;
use crate::config::{AppConfig, ArenaSettings};
use crate::error::{arena_error, ArenaError, Result};
use crate::metrics::MetricsCollector;
use crate::rating::{EloRatingCalculator, RatingCalculator};
use crate::stats::{compute_stats, leaderboard, match_history};
use crate::store::{ArenaStore, CommitStatus, RatingWrite, RoundCommit};
use crate::types::{
    College, CollegeStats, MatchHistoryEntry, MatchRecord, RankedCollege, RatingUpdate, Review,
};
use crate::utils::{current_timestamp, generate_match_id};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Result of recording a vote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub record: MatchRecord,
    /// Calculation from the final attempt. When `status` is `AlreadyRecorded`
    /// an earlier attempt's ratings are the ones stored.
    pub update: RatingUpdate,
    pub status: CommitStatus,
    /// Number of commit attempts made
    pub attempts: u32,
}

/// The arena service
#[derive(Clone)]
pub struct ArenaService {
    store: Arc<dyn ArenaStore>,
    calculator: Arc<dyn RatingCalculator>,
    pairing: Arc<dyn PairingSelector>,
    metrics: Arc<MetricsCollector>,
    settings: ArenaSettings,
}

impl ArenaService {
    /// Create a new arena service
    pub fn new(
        store: Arc<dyn ArenaStore>,
        calculator: Arc<dyn RatingCalculator>,
        pairing: Arc<dyn PairingSelector>,
        settings: ArenaSettings,
    ) -> Self {
        let metrics = Arc::new(MetricsCollector::new().unwrap_or_else(|_| {
            warn!("Failed to create metrics collector, using default");
            MetricsCollector::default()
        }));

        Self::with_metrics(store, calculator, pairing, settings, metrics)
    }

    /// Create a new arena service with metrics collector
    pub fn with_metrics(
        store: Arc<dyn ArenaStore>,
        calculator: Arc<dyn RatingCalculator>,
        pairing: Arc<dyn PairingSelector>,
        settings: ArenaSettings,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        Self {
            store,
            calculator,
            pairing,
            metrics,
            settings,
        }
    }

    /// Build a service with the Elo calculator and random pairing from config
    pub fn from_config(store: Arc<dyn ArenaStore>, config: &AppConfig) -> Result<Self> {
        let calculator = EloRatingCalculator::new(config.rating.clone())?;

        Ok(Self::new(
            store,
            Arc::new(calculator),
            Arc::new(RandomPairingSelector::new()),
            config.arena.clone(),
        ))
    }

    /// Get the metrics collector
    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics.clone()
    }

    /// Choose the next two colleges to compare
    pub async fn next_pair(&self) -> Result<(College, College)> {
        let colleges = self.store.list_colleges().await?;
        self.pairing.select_pair(&colleges)
    }

    /// Record that `winner_id` was preferred over `loser_id`
    pub async fn record_vote(&self, winner_id: &str, loser_id: &str) -> Result<VoteReceipt> {
        if winner_id == loser_id {
            self.metrics.record_vote_failure("same_college");
            return Err(ArenaError::SameCollege {
                college_id: winner_id.to_string(),
            }
            .into());
        }

        // Fixed for every attempt so a retried commit cannot be applied twice
        let match_id = generate_match_id();
        let date = current_timestamp();
        let max_attempts = self.settings.max_commit_attempts.max(1);
        let mut attempts = 0;

        loop {
            attempts += 1;

            let winner = self.require_college(winner_id).await?;
            let loser = self.require_college(loser_id).await?;

            let timer = self.metrics.start_timer();
            let update = match self
                .calculator
                .calculate(winner.elo_rating, loser.elo_rating)
            {
                Ok(update) => update,
                Err(e) => {
                    self.metrics.record_vote_failure("invalid_rating");
                    error!(
                        winner = %winner.id,
                        loser = %loser.id,
                        "Rating calculation failed: {}", e
                    );
                    return Err(e);
                }
            };
            self.metrics.record_rating_calculation(timer.stop());

            let record = MatchRecord {
                id: match_id,
                winner_id: winner.id.clone(),
                loser_id: loser.id.clone(),
                winner_name: winner.name.clone(),
                loser_name: loser.name.clone(),
                date,
            };
            let round = RoundCommit {
                record: record.clone(),
                winner: RatingWrite {
                    college_id: winner.id.clone(),
                    expected: update.winner_old,
                    new: update.winner_new,
                },
                loser: RatingWrite {
                    college_id: loser.id.clone(),
                    expected: update.loser_old,
                    new: update.loser_new,
                },
            };

            match self.store.commit_round(round).await {
                Ok(status) => {
                    if status == CommitStatus::Applied {
                        self.metrics.record_vote(&update);
                        info!(
                            match_id = %match_id,
                            winner = %winner.name,
                            loser = %loser.name,
                            winner_rating = update.winner_new,
                            loser_rating = update.loser_new,
                            attempts,
                            "Vote recorded"
                        );
                    } else {
                        debug!(match_id = %match_id, "Vote was already recorded by an earlier attempt");
                    }

                    return Ok(VoteReceipt {
                        record,
                        update,
                        status,
                        attempts,
                    });
                }
                Err(e) => {
                    let retryable = arena_error(&e).is_some_and(ArenaError::is_retryable);
                    if retryable && attempts < max_attempts {
                        warn!(
                            match_id = %match_id,
                            attempt = attempts,
                            "Round commit failed, retrying: {}", e
                        );
                        self.metrics.record_commit_retry();
                        tokio::time::sleep(self.settings.retry_delay()).await;
                        continue;
                    }

                    self.metrics.record_vote_failure(failure_reason(&e));
                    error!(
                        match_id = %match_id,
                        attempts,
                        "Failed to record vote: {}", e
                    );
                    return Err(e);
                }
            }
        }
    }

    /// Validate and store a review
    pub async fn submit_review(&self, submission: ReviewSubmission) -> Result<Review> {
        let review = match submission.into_review() {
            Ok(review) => review,
            Err(e) => {
                self.metrics.record_review(false);
                return Err(e);
            }
        };

        if let Err(e) = self.require_college(&review.college_id).await {
            self.metrics.record_review(false);
            return Err(e);
        }

        self.store.add_review(review.clone()).await?;
        self.metrics.record_review(true);
        info!(
            review_id = %review.id,
            college = %review.college_id,
            rating = review.rating,
            "Review submitted"
        );

        Ok(review)
    }

    /// Win/loss and review statistics for a college
    pub async fn college_stats(&self, college_id: &str) -> Result<CollegeStats> {
        self.require_college(college_id).await?;

        let matches = self.store.matches_for(college_id).await?;
        let reviews = self.store.reviews_for(college_id).await?;
        Ok(compute_stats(college_id, &matches, &reviews))
    }

    /// Match history of a college, newest first
    pub async fn college_history(&self, college_id: &str) -> Result<Vec<MatchHistoryEntry>> {
        self.require_college(college_id).await?;

        let matches = self.store.matches_for(college_id).await?;
        Ok(match_history(college_id, &matches))
    }

    /// Reviews of a college, newest first
    pub async fn college_reviews(&self, college_id: &str) -> Result<Vec<Review>> {
        self.require_college(college_id).await?;

        let mut reviews = self.store.reviews_for(college_id).await?;
        reviews.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(reviews)
    }

    /// Ranked list; `None` uses the configured size
    pub async fn leaderboard(&self, limit: Option<usize>) -> Result<Vec<RankedCollege>> {
        let colleges = self.store.list_colleges().await?;
        let limit = limit.unwrap_or(self.settings.leaderboard_size);
        Ok(leaderboard(&colleges, Some(limit)))
    }

    async fn require_college(&self, college_id: &str) -> Result<College> {
        self.store
            .get_college(college_id)
            .await?
            .ok_or_else(|| {
                ArenaError::CollegeNotFound {
                    college_id: college_id.to_string(),
                }
                .into()
            })
    }
}

fn failure_reason(err: &anyhow::Error) -> &'static str {
    match arena_error(err) {
        Some(ArenaError::StaleRating { .. }) => "stale_rating",
        Some(ArenaError::PersistenceFailed { .. }) => "persistence",
        Some(ArenaError::CollegeNotFound { .. }) => "college_not_found",
        Some(ArenaError::InvalidRating { .. }) => "invalid_rating",
        _ => "internal",
    }
}
