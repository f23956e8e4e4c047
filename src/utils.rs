//! Utility functions for the college arena

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique match ID
pub fn generate_match_id() -> Uuid {
    Uuid::new_v4()
}

/// Generate a new unique review ID
pub fn generate_review_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Check that a rating can be used in a calculation
pub fn ensure_finite(value: f64) -> crate::error::Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(crate::error::ArenaError::InvalidRating { value }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_unique_ids() {
        let id1 = generate_match_id();
        let id2 = generate_match_id();
        assert_ne!(id1, id2);

        let review_id1 = generate_review_id();
        let review_id2 = generate_review_id();
        assert_ne!(review_id1, review_id2);
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite(1500.0).unwrap(), 1500.0);
        assert!(ensure_finite(f64::NAN).is_err());
        assert!(ensure_finite(f64::INFINITY).is_err());
        assert!(ensure_finite(f64::NEG_INFINITY).is_err());
    }
}
