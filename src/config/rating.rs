//! Rating system configuration

use crate::error::{ArenaError, Result};
use crate::types::DEFAULT_RATING;
use serde::{Deserialize, Serialize};

/// K-factor used when none is configured
pub const DEFAULT_K_FACTOR: f64 = 32.0;

/// Parameters of the paired-comparison rating model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Maximum rating change a single comparison can cause
    pub k_factor: f64,
    /// Rating assigned to colleges without one
    pub initial_rating: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            k_factor: DEFAULT_K_FACTOR,
            initial_rating: DEFAULT_RATING,
        }
    }
}

impl RatingConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(ArenaError::ConfigurationError {
                message: format!("K-factor must be a positive number, got {}", self.k_factor),
            }
            .into());
        }

        if !self.initial_rating.is_finite() {
            return Err(ArenaError::ConfigurationError {
                message: format!(
                    "Initial rating must be a finite number, got {}",
                    self.initial_rating
                ),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = RatingConfig::default();
        assert_eq!(config.k_factor, 32.0);
        assert_eq!(config.initial_rating, 1500.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut config = RatingConfig::default();

        config.k_factor = 0.0;
        assert!(config.validate().is_err());

        config.k_factor = f64::NAN;
        assert!(config.validate().is_err());

        config = RatingConfig::default();
        config.initial_rating = f64::INFINITY;
        assert!(config.validate().is_err());
    }
}
