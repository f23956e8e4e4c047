//! Derived statistics for the college detail page and ranked list
//!
//! Everything here is a pure fold over history; nothing is persisted.

use crate::types::{College, CollegeStats, MatchHistoryEntry, MatchRecord, RankedCollege, Review};
use std::cmp::Ordering;

/// Aggregate win/loss counts and review score for one college.
///
/// Records that do not involve `college_id` are ignored, so callers may pass
/// either the full history or a pre-filtered slice. `win_rate` is 0 when the
/// college has no matches and `average_rating` is 0 when it has no reviews.
pub fn compute_stats(college_id: &str, matches: &[MatchRecord], reviews: &[Review]) -> CollegeStats {
    let (wins, losses) = matches
        .iter()
        .fold((0u64, 0u64), |(wins, losses), record| {
            if record.winner_id == college_id {
                (wins + 1, losses)
            } else if record.loser_id == college_id {
                (wins, losses + 1)
            } else {
                (wins, losses)
            }
        });
    let total_matches = wins + losses;

    let (review_sum, review_count) = reviews
        .iter()
        .filter(|review| review.college_id == college_id)
        .fold((0u64, 0u64), |(sum, count), review| {
            (sum + u64::from(review.rating), count + 1)
        });

    CollegeStats {
        total_matches,
        wins,
        losses,
        win_rate: ratio(wins, total_matches),
        average_rating: ratio(review_sum, review_count),
        review_count,
    }
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Matches involving `college_id` seen from its side, newest first
pub fn match_history(college_id: &str, matches: &[MatchRecord]) -> Vec<MatchHistoryEntry> {
    let mut history: Vec<MatchHistoryEntry> = matches
        .iter()
        .filter(|record| record.involves(college_id))
        .map(|record| {
            let won = record.winner_id == college_id;
            let (opponent_id, opponent_name) = if won {
                (&record.loser_id, &record.loser_name)
            } else {
                (&record.winner_id, &record.winner_name)
            };

            MatchHistoryEntry {
                match_id: record.id,
                won,
                opponent_id: opponent_id.clone(),
                opponent_name: opponent_name.clone(),
                date: record.date,
            }
        })
        .collect();

    history.sort_by(|a, b| b.date.cmp(&a.date));
    history
}

/// Colleges ordered by rating, highest first; ties broken by name
pub fn leaderboard(colleges: &[College], limit: Option<usize>) -> Vec<RankedCollege> {
    let mut sorted: Vec<&College> = colleges.iter().collect();
    sorted.sort_by(|a, b| {
        b.elo_rating
            .partial_cmp(&a.elo_rating)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    sorted
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(index, college)| RankedCollege {
            rank: index + 1,
            college: college.clone(),
        })
        .collect()
}
