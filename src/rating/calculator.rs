//! Rating calculator trait
//!
//! This module defines the interface the arena uses to turn a single
//! head-to-head outcome into a pair of updated ratings.

use crate::types::RatingUpdate;

/// Trait for calculating rating changes after a comparison
pub trait RatingCalculator: Send + Sync {
    /// Calculate updated ratings after `winner_rating` beat `loser_rating`
    ///
    /// # Arguments
    /// * `winner_rating` - Current rating of the college the user picked
    /// * `loser_rating` - Current rating of the other college
    ///
    /// # Returns
    /// Both old and new ratings, or `ArenaError::InvalidRating` when either
    /// input is not finite. Never a partial result.
    fn calculate(&self, winner_rating: f64, loser_rating: f64)
        -> crate::error::Result<RatingUpdate>;

    /// Probability that a college rated `rating` beats one rated `opponent`
    fn expected_score(&self, rating: f64, opponent: f64) -> f64;

    /// Get the rating for colleges that have none
    fn initial_rating(&self) -> f64;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;
}
