//! Word-formation and sentence-building practice.

mod sentence;
mod word;

pub use crate::error::ChallengeError;
pub use sentence::{SentenceAttempt, SentenceChallengeService, SentenceFlow, SentenceStage};
pub use word::{WordAttempt, WordChallengeService, WordFlow, WordStage};
