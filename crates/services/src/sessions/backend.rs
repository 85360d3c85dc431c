use std::sync::Arc;

use api::{AnswerSink, ApiError, ContentSource, FlashcardSource};
use async_trait::async_trait;
use lingua_core::model::{Flashcard, FlashcardId, FlashcardStats, ReviewItem, SummaryStats, WordKey};

use super::machine::StudyItem;

/// Freshly fetched summary plus the items due for study.
#[derive(Debug, Clone, PartialEq)]
pub struct StudySnapshot<I, S> {
    pub items: Vec<I>,
    pub summary: S,
}

/// Where a study session loads its items and reports outcomes.
#[async_trait]
pub trait StudyBackend: Send + Sync {
    type Item: StudyItem + Send + Sync + 'static;
    type Summary: Clone + Send + Sync + 'static;

    /// # Errors
    ///
    /// Returns `ApiError` if either the summary or the item list cannot be fetched.
    async fn load(&self) -> Result<StudySnapshot<Self::Item, Self::Summary>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the outcome was not acknowledged.
    async fn submit(
        &self,
        key: &<Self::Item as StudyItem>::Key,
        correct: bool,
    ) -> Result<(), ApiError>;
}

/// Spaced-repetition review against the vocabulary scheduler.
#[derive(Clone)]
pub struct ReviewBackend {
    content: Arc<dyn ContentSource>,
    answers: Arc<dyn AnswerSink>,
}

impl ReviewBackend {
    #[must_use]
    pub fn new(content: Arc<dyn ContentSource>, answers: Arc<dyn AnswerSink>) -> Self {
        Self { content, answers }
    }
}

#[async_trait]
impl StudyBackend for ReviewBackend {
    type Item = ReviewItem;
    type Summary = SummaryStats;

    async fn load(&self) -> Result<StudySnapshot<ReviewItem, SummaryStats>, ApiError> {
        let summary = self.content.fetch_summary().await?;
        let items = self.content.fetch_due_items().await?;
        Ok(StudySnapshot { items, summary })
    }

    async fn submit(&self, key: &WordKey, correct: bool) -> Result<(), ApiError> {
        self.answers.submit_outcome(key, correct).await
    }
}

/// Flashcard drill over the whole deck.
#[derive(Clone)]
pub struct FlashcardBackend {
    cards: Arc<dyn FlashcardSource>,
}

impl FlashcardBackend {
    #[must_use]
    pub fn new(cards: Arc<dyn FlashcardSource>) -> Self {
        Self { cards }
    }
}

#[async_trait]
impl StudyBackend for FlashcardBackend {
    type Item = Flashcard;
    type Summary = FlashcardStats;

    async fn load(&self) -> Result<StudySnapshot<Flashcard, FlashcardStats>, ApiError> {
        let deck = self.cards.fetch_deck().await?;
        Ok(StudySnapshot {
            items: deck.cards,
            summary: deck.stats,
        })
    }

    async fn submit(&self, key: &FlashcardId, correct: bool) -> Result<(), ApiError> {
        self.cards.submit_answer(*key, correct).await
    }
}
