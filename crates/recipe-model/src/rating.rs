//! Weighted-average rating arithmetic.
//!
//! A recipe's rating is the mean of every score it has received, weighted by
//! vote count. The store only keeps the running `(rating, votes)` pair, so
//! each new score is folded in with:
//!
//! ```text
//! new_votes  = votes + 1
//! new_rating = round1((rating * votes + score) / new_votes)
//! ```
//!
//! Past votes are never reweighted.

use rand::Rng;

use crate::error::{RecipeError, Result};

/// Lowest star a user can give
pub const MIN_SCORE: u8 = 1;
/// Highest star a user can give
pub const MAX_SCORE: u8 = 5;

/// Ceiling of any stored rating
pub const MAX_RATING: f64 = 5.0;

/// Seed ratings are drawn uniformly from this closed range
pub const SEED_RATING_RANGE: (f64, f64) = (4.0, 5.0);
/// Seed vote counts are drawn uniformly from this closed range
pub const SEED_VOTES_RANGE: (u32, u32) = (10, 60);

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Check that a star score is one the store will accept.
pub fn validate_score(score: u8) -> Result<u8> {
    if (MIN_SCORE..=MAX_SCORE).contains(&score) {
        Ok(score)
    } else {
        Err(RecipeError::ScoreOutOfRange {
            score,
            min: MIN_SCORE,
            max: MAX_SCORE,
        })
    }
}

/// Fold one score into a running `(rating, votes)` pair.
///
/// # Returns
/// The new `(rating, votes)`; `rating` is rounded to one decimal and clamped
/// to [0.0, 5.0]
pub fn fold_score(rating: f64, votes: u32, score: u8) -> (f64, u32) {
    let new_votes = votes.saturating_add(1);
    let total = rating * f64::from(votes) + f64::from(score);
    let new_rating = round1(total / f64::from(new_votes)).clamp(0.0, MAX_RATING);
    (new_rating, new_votes)
}

/// Synthetic initial rating given to a freshly generated recipe so the
/// catalogue does not start out looking empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seed {
    pub rating: f64,
    pub votes: u32,
}

impl Seed {
    /// Draw a seed uniformly from `SEED_RATING_RANGE` x `SEED_VOTES_RANGE`.
    pub fn draw<R: Rng>(rng: &mut R) -> Self {
        let (lo, hi) = SEED_RATING_RANGE;
        let (min_votes, max_votes) = SEED_VOTES_RANGE;
        Self {
            rating: round1(rng.random_range(lo..=hi)),
            votes: rng.random_range(min_votes..=max_votes),
        }
    }
}
