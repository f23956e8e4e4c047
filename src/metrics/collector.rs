//! Metrics collection using Prometheus
//!
//! This module provides metrics for votes, rating changes and reviews.

use crate::types::RatingUpdate;
use anyhow::Result;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the arena
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Vote-related metrics
    vote_metrics: VoteMetrics,

    /// Review-related metrics
    review_metrics: ReviewMetrics,
}

/// Vote-related metrics
#[derive(Clone)]
pub struct VoteMetrics {
    /// Total votes committed to the store
    pub votes_recorded_total: IntCounter,

    /// Votes that were not recorded, by reason
    pub vote_failures_total: IntCounterVec,

    /// Commit attempts repeated after a stale read or store failure
    pub commit_retries_total: IntCounter,

    /// Votes won by the lower-rated college
    pub upsets_total: IntCounter,

    /// Points gained by the winner per vote
    pub rating_delta: Histogram,

    /// Rating calculation time
    pub rating_calculation_duration: Histogram,
}

/// Review-related metrics
#[derive(Clone)]
pub struct ReviewMetrics {
    /// Reviews accepted or rejected
    pub reviews_total: IntCounterVec,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let vote_metrics = VoteMetrics::new(&registry)?;
        let review_metrics = ReviewMetrics::new(&registry)?;

        Ok(Self {
            registry,
            vote_metrics,
            review_metrics,
        })
    }

    /// Get vote metrics
    pub fn votes(&self) -> &VoteMetrics {
        &self.vote_metrics
    }

    /// Get review metrics
    pub fn reviews(&self) -> &ReviewMetrics {
        &self.review_metrics
    }

    /// Record a committed vote
    pub fn record_vote(&self, update: &RatingUpdate) {
        self.vote_metrics.votes_recorded_total.inc();
        self.vote_metrics
            .rating_delta
            .observe(update.winner_delta());

        if update.is_upset() {
            self.vote_metrics.upsets_total.inc();
        }
    }

    /// Record a vote that was not recorded
    pub fn record_vote_failure(&self, reason: &str) {
        self.vote_metrics
            .vote_failures_total
            .with_label_values(&[reason])
            .inc();
    }

    /// Record a repeated commit attempt
    pub fn record_commit_retry(&self) {
        self.vote_metrics.commit_retries_total.inc();
    }

    /// Record rating calculation duration
    pub fn record_rating_calculation(&self, duration: Duration) {
        self.vote_metrics
            .rating_calculation_duration
            .observe(duration.as_secs_f64());
    }

    /// Record a review submission
    pub fn record_review(&self, accepted: bool) {
        let status = if accepted { "accepted" } else { "rejected" };
        self.review_metrics
            .reviews_total
            .with_label_values(&[status])
            .inc();
    }

    /// Render all metrics in the Prometheus text format
    pub fn encode_text(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl VoteMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let votes_recorded_total = IntCounter::new(
            "college_arena_votes_recorded_total",
            "Total votes committed",
        )?;
        registry.register(Box::new(votes_recorded_total.clone()))?;

        let vote_failures_total = IntCounterVec::new(
            Opts::new(
                "college_arena_vote_failures_total",
                "Votes that were not recorded",
            ),
            &["reason"],
        )?;
        registry.register(Box::new(vote_failures_total.clone()))?;

        let commit_retries_total = IntCounter::new(
            "college_arena_commit_retries_total",
            "Repeated round commit attempts",
        )?;
        registry.register(Box::new(commit_retries_total.clone()))?;

        let upsets_total = IntCounter::new(
            "college_arena_upsets_total",
            "Votes won by the lower-rated college",
        )?;
        registry.register(Box::new(upsets_total.clone()))?;

        let rating_delta = Histogram::with_opts(
            HistogramOpts::new(
                "college_arena_rating_delta",
                "Rating points gained by the winner",
            )
            .buckets(vec![2.0, 4.0, 8.0, 12.0, 16.0, 20.0, 24.0, 28.0, 32.0]),
        )?;
        registry.register(Box::new(rating_delta.clone()))?;

        let rating_calculation_duration = Histogram::with_opts(
            HistogramOpts::new(
                "college_arena_rating_calculation_duration_seconds",
                "Rating calculation time",
            )
            .buckets(vec![0.000001, 0.00001, 0.0001, 0.001, 0.01]),
        )?;
        registry.register(Box::new(rating_calculation_duration.clone()))?;

        Ok(Self {
            votes_recorded_total,
            vote_failures_total,
            commit_retries_total,
            upsets_total,
            rating_delta,
            rating_calculation_duration,
        })
    }
}

impl ReviewMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let reviews_total = IntCounterVec::new(
            Opts::new("college_arena_reviews_total", "Review submissions"),
            &["status"],
        )?;
        registry.register(Box::new(reviews_total.clone()))?;

        Ok(Self { reviews_total })
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new().expect("Failed to create default metrics collector")
    }
}
