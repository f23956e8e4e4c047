//! Error types for the college arena
//!
//! Domain conditions are modelled with thiserror and carried through
//! anyhow so callers can downcast when they need to branch on them.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific arena scenarios
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArenaError {
    #[error("Invalid rating: {value} is not a finite number")]
    InvalidRating { value: f64 },

    #[error("College not found: {college_id}")]
    CollegeNotFound { college_id: String },

    #[error("A college cannot be compared with itself: {college_id}")]
    SameCollege { college_id: String },

    #[error("Not enough colleges to form a pair: {available} available")]
    NotEnoughColleges { available: usize },

    #[error("Invalid review: {reason}")]
    InvalidReview { reason: String },

    #[error("Stale rating for {college_id}: expected {expected}, found {found}")]
    StaleRating {
        college_id: String,
        expected: f64,
        found: f64,
    },

    #[error("Persistence failed: {message}")]
    PersistenceFailed { message: String },

    #[error("Roster error: {message}")]
    RosterError { message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal service error: {message}")]
    InternalError { message: String },
}

impl ArenaError {
    /// Whether a round commit that failed with this error may be attempted again
    /// against a fresh snapshot.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ArenaError::StaleRating { .. } | ArenaError::PersistenceFailed { .. }
        )
    }
}

/// Look up the arena condition behind an anyhow error, if there is one.
pub fn arena_error(err: &anyhow::Error) -> Option<&ArenaError> {
    err.downcast_ref::<ArenaError>()
}
