//! Arena orchestration: pairing, voting and reviews
//!
//! This module ties the rating engine to the store and exposes the
//! operations a front end calls.

pub mod pairing;
pub mod reviews;
pub mod service;

// Re-export commonly used types
pub use pairing::{PairingSelector, RandomPairingSelector};
pub use reviews::ReviewSubmission;
pub use service::{ArenaService, VoteReceipt};
