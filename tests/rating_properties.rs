//! Property tests for the rating update and the statistics fold

use chrono::{TimeZone, Utc};
use college_arena::compute_updated_ratings;
use college_arena::error::{arena_error, ArenaError};
use college_arena::stats::compute_stats;
use college_arena::types::{MatchRecord, Review};
use proptest::prelude::*;
use uuid::Uuid;

const K: f64 = 32.0;

fn delta(winner: f64, loser: f64) -> f64 {
    let (winner_new, _) = compute_updated_ratings(winner, loser).unwrap();
    winner_new - winner
}

fn record(winner: &str, loser: &str, minute: u32) -> MatchRecord {
    MatchRecord {
        id: Uuid::new_v4(),
        winner_id: winner.to_string(),
        loser_id: loser.to_string(),
        winner_name: winner.to_uppercase(),
        loser_name: loser.to_uppercase(),
        date: Utc.with_ymd_and_hms(2024, 1, 1, 0, minute % 60, 0).unwrap(),
    }
}

fn review(college_id: &str, rating: u8) -> Review {
    Review {
        id: Uuid::new_v4(),
        college_id: college_id.to_string(),
        author_id: "author".to_string(),
        author_name: "Author".to_string(),
        rating,
        content: "ok".to_string(),
        date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// Matches between a small pool, encoded as (winner index, loser index)
fn history() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..4, 0usize..4), 0..60)
        .prop_map(|pairs| pairs.into_iter().filter(|(w, l)| w != l).collect())
}

const POOL: [&str; 4] = ["a", "b", "c", "d"];

proptest! {
    #[test]
    fn winner_gains_and_loser_drops(w in 0.0f64..4000.0, l in 0.0f64..4000.0) {
        let (winner_new, loser_new) = compute_updated_ratings(w, l).unwrap();
        prop_assert!(winner_new > w);
        prop_assert!(loser_new < l);
    }

    #[test]
    fn extreme_ratings_never_move_backwards(w in -1.0e6f64..1.0e6, l in -1.0e6f64..1.0e6) {
        let (winner_new, loser_new) = compute_updated_ratings(w, l).unwrap();
        prop_assert!(winner_new >= w);
        prop_assert!(loser_new <= l);
        prop_assert!(winner_new.is_finite() && loser_new.is_finite());
    }

    #[test]
    fn total_rating_is_conserved(w in 0.0f64..4000.0, l in 0.0f64..4000.0) {
        let (winner_new, loser_new) = compute_updated_ratings(w, l).unwrap();
        prop_assert!(((winner_new + loser_new) - (w + l)).abs() < 1e-9);
    }

    #[test]
    fn change_is_bounded_by_k(w in -1.0e5f64..1.0e5, l in -1.0e5f64..1.0e5) {
        let (winner_new, loser_new) = compute_updated_ratings(w, l).unwrap();
        prop_assert!(winner_new - w <= K + 1e-9);
        prop_assert!(l - loser_new <= K + 1e-9);
    }

    #[test]
    fn underdog_wins_more_than_half_k(a in 0i32..3000, b in 0i32..3000) {
        prop_assume!(a != b);
        let (low, high) = (a.min(b) as f64, a.max(b) as f64);

        let underdog_gain = delta(low, high);
        let favourite_gain = delta(high, low);

        prop_assert!(underdog_gain > K / 2.0);
        prop_assert!(favourite_gain < K / 2.0);
        prop_assert!(underdog_gain > favourite_gain);
    }

    #[test]
    fn winner_gain_matches_loser_drop(a in 0.0f64..4000.0, b in 0.0f64..4000.0) {
        let (winner_new, loser_new) = compute_updated_ratings(a, b).unwrap();
        prop_assert!(((winner_new - a) - (b - loser_new)).abs() < 1e-9);
    }

    #[test]
    fn swapped_outcomes_sum_to_k(a in 0.0f64..4000.0, b in 0.0f64..4000.0) {
        // Gain when a beats b plus gain when b beats a
        prop_assert!((delta(a, b) + delta(b, a) - K).abs() < 1e-9);
    }

    #[test]
    fn wins_and_losses_add_up(pairs in history(), target in 0usize..4) {
        let matches: Vec<MatchRecord> = pairs
            .iter()
            .enumerate()
            .map(|(i, (w, l))| record(POOL[*w], POOL[*l], i as u32))
            .collect();

        let stats = compute_stats(POOL[target], &matches, &[]);
        let involved = pairs.iter().filter(|(w, l)| *w == target || *l == target).count() as u64;

        prop_assert_eq!(stats.wins + stats.losses, stats.total_matches);
        prop_assert_eq!(stats.total_matches, involved);
        prop_assert!((0.0..=1.0).contains(&stats.win_rate));
        if stats.total_matches == 0 {
            prop_assert_eq!(stats.win_rate, 0.0);
        }
    }

    #[test]
    fn stats_are_repeatable(pairs in history(), scores in prop::collection::vec(1u8..=5, 0..10)) {
        let matches: Vec<MatchRecord> = pairs
            .iter()
            .enumerate()
            .map(|(i, (w, l))| record(POOL[*w], POOL[*l], i as u32))
            .collect();
        let reviews: Vec<Review> = scores.iter().map(|s| review("a", *s)).collect();

        let first = compute_stats("a", &matches, &reviews);
        let second = compute_stats("a", &matches, &reviews);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.review_count, scores.len() as u64);
        if !scores.is_empty() {
            prop_assert!((1.0..=5.0).contains(&first.average_rating));
        }
    }
}

#[test]
fn equal_ratings_split_k_evenly() {
    for rating in [0.0, 850.0, 1500.0, 2750.0] {
        assert!((delta(rating, rating) - K / 2.0).abs() < 1e-12);
        assert!((delta(rating, rating) + delta(rating, rating) - K).abs() < 1e-12);
    }
}

#[test]
fn non_finite_ratings_are_rejected() {
    for (w, l) in [
        (f64::NAN, 1500.0),
        (1500.0, f64::NAN),
        (f64::INFINITY, 1500.0),
        (1500.0, f64::NEG_INFINITY),
    ] {
        let err = compute_updated_ratings(w, l).unwrap_err();
        assert!(matches!(
            arena_error(&err),
            Some(ArenaError::InvalidRating { .. })
        ));
    }
}
