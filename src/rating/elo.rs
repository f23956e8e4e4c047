//! ELO rating system implementation
//!
//! This module provides the paired-comparison rating update used for every
//! vote, built on the Elo implementation from the skillratings crate.

use crate::config::rating::{RatingConfig, DEFAULT_K_FACTOR};
use crate::error::{ArenaError, Result};
use crate::rating::calculator::RatingCalculator;
use crate::types::RatingUpdate;
use crate::utils::ensure_finite;
use skillratings::elo::{elo, EloConfig, EloRating};
use skillratings::Outcomes;
use tracing::{debug, warn};

/// Compute updated ratings after `winner_rating` beat `loser_rating`, with K = 32.
///
/// Returns `(new_winner_rating, new_loser_rating)`. Fails with
/// `ArenaError::InvalidRating` if either input is NaN or infinite.
pub fn compute_updated_ratings(winner_rating: f64, loser_rating: f64) -> Result<(f64, f64)> {
    let update = update_with_k(winner_rating, loser_rating, DEFAULT_K_FACTOR)?;
    Ok((update.winner_new, update.loser_new))
}

fn update_with_k(winner_rating: f64, loser_rating: f64, k: f64) -> Result<RatingUpdate> {
    let winner_old = ensure_finite(winner_rating)?;
    let loser_old = ensure_finite(loser_rating)?;

    let winner = EloRating { rating: winner_old };
    let loser = EloRating { rating: loser_old };

    let (winner_expected, _) = skillratings::elo::expected_score(&winner, &loser);
    let (winner_new, loser_new) = elo(&winner, &loser, &Outcomes::WIN, &EloConfig { k });

    // Extreme but finite inputs can still overflow
    if !winner_new.rating.is_finite() || !loser_new.rating.is_finite() {
        warn!(
            winner_old,
            loser_old, "Rating update overflowed, rejecting result"
        );
        let value = if winner_new.rating.is_finite() {
            loser_new.rating
        } else {
            winner_new.rating
        };
        return Err(ArenaError::InvalidRating { value }.into());
    }

    Ok(RatingUpdate {
        winner_old,
        winner_new: winner_new.rating,
        loser_old,
        loser_new: loser_new.rating,
        winner_expected,
    })
}

/// Elo rating calculator with a configurable K-factor
#[derive(Debug, Clone)]
pub struct EloRatingCalculator {
    config: RatingConfig,
}

impl EloRatingCalculator {
    /// Create a new Elo rating calculator
    pub fn new(config: RatingConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }
}

impl Default for EloRatingCalculator {
    fn default() -> Self {
        Self {
            config: RatingConfig::default(),
        }
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn calculate(&self, winner_rating: f64, loser_rating: f64) -> Result<RatingUpdate> {
        let update = update_with_k(winner_rating, loser_rating, self.config.k_factor)?;

        debug!(
            winner_old = update.winner_old,
            winner_new = update.winner_new,
            loser_old = update.loser_old,
            loser_new = update.loser_new,
            expected = update.winner_expected,
            "Calculated rating update"
        );

        Ok(update)
    }

    fn expected_score(&self, rating: f64, opponent: f64) -> f64 {
        let (expected, _) = skillratings::elo::expected_score(
            &EloRating { rating },
            &EloRating { rating: opponent },
        );
        expected
    }

    fn initial_rating(&self) -> f64 {
        self.config.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "elo",
            "k_factor": self.config.k_factor,
            "initial_rating": self.config.initial_rating
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::arena_error;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_equal_ratings_split_k() {
        let (winner, loser) = compute_updated_ratings(1500.0, 1500.0).unwrap();
        assert!((winner - 1516.0).abs() < TOLERANCE);
        assert!((loser - 1484.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_upset_gains_more_than_expected_win() {
        let (underdog_new, _) = compute_updated_ratings(1400.0, 1600.0).unwrap();
        let (favorite_new, _) = compute_updated_ratings(1600.0, 1400.0).unwrap();

        let underdog_gain = underdog_new - 1400.0;
        let favorite_gain = favorite_new - 1600.0;

        assert!(underdog_gain > 16.0);
        assert!(favorite_gain < 16.0);
        // 1 / (1 + 10^0.5) ≈ 0.2403
        assert!((underdog_gain - 32.0 * (1.0 - 0.240_253_073_9)).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_ratings_rejected() {
        for (winner, loser) in [
            (f64::NAN, 1500.0),
            (1500.0, f64::NAN),
            (f64::INFINITY, 1500.0),
            (1500.0, f64::NEG_INFINITY),
        ] {
            let err = compute_updated_ratings(winner, loser).unwrap_err();
            assert!(matches!(
                arena_error(&err),
                Some(ArenaError::InvalidRating { .. })
            ));
        }
    }

    #[test]
    fn test_extreme_finite_ratings_stay_finite() {
        for (winner, loser) in [
            (f64::MAX, -f64::MAX),
            (-f64::MAX, f64::MAX),
            (f64::MAX, f64::MAX),
        ] {
            let (winner_new, loser_new) = compute_updated_ratings(winner, loser).unwrap();
            assert!(winner_new.is_finite());
            assert!(loser_new.is_finite());
            assert!(winner_new >= winner);
            assert!(loser_new <= loser);
        }
    }

    #[test]
    fn test_calculator_uses_configured_k() {
        let calculator = EloRatingCalculator::new(RatingConfig {
            k_factor: 16.0,
            initial_rating: 1200.0,
        })
        .unwrap();

        let update = calculator.calculate(1500.0, 1500.0).unwrap();
        assert!((update.winner_delta() - 8.0).abs() < TOLERANCE);
        assert!((update.loser_delta() + 8.0).abs() < TOLERANCE);
        assert!((update.winner_expected - 0.5).abs() < TOLERANCE);
        assert_eq!(calculator.initial_rating(), 1200.0);
        assert_eq!(calculator.config()["k_factor"], 16.0);
    }

    #[test]
    fn test_calculator_rejects_bad_config() {
        let result = EloRatingCalculator::new(RatingConfig {
            k_factor: 0.0,
            initial_rating: 1500.0,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_expected_score() {
        let calculator = EloRatingCalculator::default();

        assert!((calculator.expected_score(1500.0, 1500.0) - 0.5).abs() < TOLERANCE);
        assert!(calculator.expected_score(1700.0, 1300.0) > 0.9);
        assert!(calculator.expected_score(1300.0, 1700.0) < 0.1);

        let forward = calculator.expected_score(1450.0, 1580.0);
        let backward = calculator.expected_score(1580.0, 1450.0);
        assert!((forward + backward - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_rematch_uses_fresh_ratings() {
        let calculator = EloRatingCalculator::default();

        let first = calculator.calculate(1500.0, 1500.0).unwrap();
        assert!((first.winner_new - 1516.0).abs() < TOLERANCE);
        assert!((first.loser_new - 1484.0).abs() < TOLERANCE);

        // Y (now 1484) beats X (now 1516)
        let rematch = calculator
            .calculate(first.loser_new, first.winner_new)
            .unwrap();
        assert!(rematch.is_upset());
        assert!(rematch.winner_delta() > 16.0);
        assert!((rematch.winner_delta() + rematch.loser_delta()).abs() < TOLERANCE);
    }

    #[test]
    fn test_overflowing_result_rejected() {
        let calculator = EloRatingCalculator::new(RatingConfig {
            k_factor: 1e308,
            initial_rating: 1500.0,
        })
        .unwrap();

        let err = calculator.calculate(f64::MAX, f64::MAX).unwrap_err();
        assert!(matches!(
            arena_error(&err),
            Some(ArenaError::InvalidRating { value }) if value.is_infinite()
        ));
    }
}
