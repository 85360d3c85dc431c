use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::WordKey;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors raised when building a review item from server data.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ReviewItemError {
    #[error("difficulty must be a finite, non-negative number (got {0})")]
    InvalidDifficulty(f64),
}

//
// ─── RECALL RATING ────────────────────────────────────────────────────────────
//

/// How well the learner recalled a revealed item.
///
/// The server only receives a boolean outcome: `Hard` counts as a miss so the
/// entry comes back sooner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecallRating {
    Forgot,
    Hard,
    Good,
}

impl RecallRating {
    pub const ALL: [RecallRating; 3] = [RecallRating::Forgot, RecallRating::Hard, RecallRating::Good];

    /// The outcome submitted for this rating.
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, RecallRating::Good)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RecallRating::Forgot => "Forgot",
            RecallRating::Hard => "Hard",
            RecallRating::Good => "Good",
        }
    }
}

//
// ─── REVIEW ITEM ──────────────────────────────────────────────────────────────
//

/// A vocabulary entry due for review, as scheduled by the server.
///
/// Items are read-only on the client: answering one never mutates it locally.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewItem {
    key: WordKey,
    exposure_count: u32,
    difficulty: f64,
    interval_days: u32,
    next_review_at: DateTime<Utc>,
}

impl ReviewItem {
    /// Build a review item from fetched fields.
    ///
    /// # Errors
    ///
    /// Returns `ReviewItemError::InvalidDifficulty` for negative or non-finite scores.
    pub fn new(
        key: WordKey,
        exposure_count: u32,
        difficulty: f64,
        interval_days: u32,
        next_review_at: DateTime<Utc>,
    ) -> Result<Self, ReviewItemError> {
        if !difficulty.is_finite() || difficulty < 0.0 {
            return Err(ReviewItemError::InvalidDifficulty(difficulty));
        }

        Ok(Self {
            key,
            exposure_count,
            difficulty,
            interval_days,
            next_review_at,
        })
    }

    #[must_use]
    pub fn key(&self) -> &WordKey {
        &self.key
    }

    /// Number of times the entry has been reviewed so far.
    #[must_use]
    pub fn exposure_count(&self) -> u32 {
        self.exposure_count
    }

    #[must_use]
    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }

    #[must_use]
    pub fn interval_days(&self) -> u32 {
        self.interval_days
    }

    #[must_use]
    pub fn next_review_at(&self) -> DateTime<Utc> {
        self.next_review_at
    }

    /// Difficulty bucket in `0..=5`, rounded up.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn difficulty_tier(&self) -> u8 {
        self.difficulty.ceil().min(5.0) as u8
    }
}
