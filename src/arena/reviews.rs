//! Review submission

use crate::error::{ArenaError, Result};
use crate::types::{CollegeId, Review};
use crate::utils::{current_timestamp, generate_review_id};
use serde::{Deserialize, Serialize};

pub const MIN_REVIEW_RATING: u8 = 1;
pub const MAX_REVIEW_RATING: u8 = 5;

/// A review as entered by a signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    pub college_id: CollegeId,
    pub author_id: String,
    pub author_name: String,
    pub rating: u8,
    pub content: String,
}

impl ReviewSubmission {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_REVIEW_RATING..=MAX_REVIEW_RATING).contains(&self.rating) {
            return Err(ArenaError::InvalidReview {
                reason: format!(
                    "rating must be between {} and {}, got {}",
                    MIN_REVIEW_RATING, MAX_REVIEW_RATING, self.rating
                ),
            }
            .into());
        }

        if self.content.trim().is_empty() {
            return Err(ArenaError::InvalidReview {
                reason: "content cannot be empty".to_string(),
            }
            .into());
        }

        if self.author_id.trim().is_empty() {
            return Err(ArenaError::InvalidReview {
                reason: "author is required".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Validate and stamp the submission with an id and date
    pub fn into_review(self) -> Result<Review> {
        self.validate()?;

        let author_name = if self.author_name.trim().is_empty() {
            "Anonymous".to_string()
        } else {
            self.author_name.trim().to_string()
        };

        Ok(Review {
            id: generate_review_id(),
            college_id: self.college_id,
            author_id: self.author_id,
            author_name,
            rating: self.rating,
            content: self.content.trim().to_string(),
            date: current_timestamp(),
        })
    }
}
