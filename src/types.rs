//! Common types used throughout the college arena

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a college
pub type CollegeId = String;

/// Unique identifier for a recorded match
pub type MatchId = Uuid;

/// Unique identifier for a review
pub type ReviewId = Uuid;

/// Rating given to colleges that have never been compared
pub const DEFAULT_RATING: f64 = 1500.0;

fn default_rating() -> f64 {
    DEFAULT_RATING
}

/// Descriptive metadata shown on the college detail page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollegeDetails {
    pub location: String,
    pub established: Option<u32>,
    #[serde(rename = "type")]
    pub category: String,
    pub facilities: Vec<String>,
    pub courses: Vec<String>,
    pub average_fees: Option<f64>,
    pub total_enrollments: Option<u64>,
    pub total_faculty: Option<u64>,
    pub campus_size: String,
    pub genders_accepted: String,
    /// Externally supplied quality score, 0 to 5
    pub rating: Option<f64>,
}

/// A rateable college
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    pub id: CollegeId,
    pub name: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default = "default_rating")]
    pub elo_rating: f64,
    #[serde(default)]
    pub details: Option<CollegeDetails>,
}

impl College {
    /// Create a college with the default rating and no metadata
    pub fn new(id: impl Into<CollegeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo_url: String::new(),
            elo_rating: DEFAULT_RATING,
            details: None,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.elo_rating = rating;
        self
    }

    pub fn with_logo(mut self, logo_url: impl Into<String>) -> Self {
        self.logo_url = logo_url.into();
        self
    }

    pub fn with_details(mut self, details: CollegeDetails) -> Self {
        self.details = Some(details);
        self
    }
}

/// One resolved comparison. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: MatchId,
    pub winner_id: CollegeId,
    pub loser_id: CollegeId,
    pub winner_name: String,
    pub loser_name: String,
    pub date: DateTime<Utc>,
}

impl MatchRecord {
    /// Whether the given college took part in this match
    pub fn involves(&self, college_id: &str) -> bool {
        self.winner_id == college_id || self.loser_id == college_id
    }
}

/// A user review of a college
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub college_id: CollegeId,
    pub author_id: String,
    pub author_name: String,
    /// Star rating, 1 to 5
    pub rating: u8,
    pub content: String,
    pub date: DateTime<Utc>,
}

/// Statistics derived on demand from match and review history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeStats {
    pub total_matches: u64,
    pub wins: u64,
    pub losses: u64,
    /// Fraction of matches won, 0.0 when no matches were played
    pub win_rate: f64,
    /// Mean review rating, 0.0 when there are no reviews
    pub average_rating: f64,
    pub review_count: u64,
}

/// Outcome of a single rating calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingUpdate {
    pub winner_old: f64,
    pub winner_new: f64,
    pub loser_old: f64,
    pub loser_new: f64,
    /// Probability the model assigned to the observed winner beforehand
    pub winner_expected: f64,
}

impl RatingUpdate {
    pub fn winner_delta(&self) -> f64 {
        self.winner_new - self.winner_old
    }

    pub fn loser_delta(&self) -> f64 {
        self.loser_new - self.loser_old
    }

    /// The winner was rated below the loser going in
    pub fn is_upset(&self) -> bool {
        self.winner_old < self.loser_old
    }
}

/// A match seen from one college's point of view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchHistoryEntry {
    pub match_id: MatchId,
    pub won: bool,
    pub opponent_id: CollegeId,
    pub opponent_name: String,
    pub date: DateTime<Utc>,
}

/// A college's position in the ranked list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCollege {
    /// 1-based position
    pub rank: usize,
    pub college: College,
}
