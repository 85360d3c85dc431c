use async_trait::async_trait;
use lingua_core::model::{
    ChallengeDifficulty, Flashcard, FlashcardId, FlashcardStats, LearnerProgress, Lesson, LessonId,
    QuizScore, ReviewItem, SentenceChallenge, SentenceLevel, SentenceVerdict, SummaryStats,
    WordChallenge, WordKey, WordVerdict,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

use crate::http::{HttpApi, HttpConfig};

/// Errors surfaced by learning-content adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("request failed with status {0}")]
    Status(reqwest::StatusCode),

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("response carried no data")]
    MissingData,

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Payloads that decode but violate a domain rule count as malformed.
impl From<lingua_core::Error> for ApiError {
    fn from(err: lingua_core::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// The flashcard deck together with its statistics, fetched in one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlashcardDeck {
    pub cards: Vec<Flashcard>,
    pub stats: FlashcardStats,
}

/// Read side of spaced-repetition review.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch aggregate review statistics.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the payload is malformed.
    async fn fetch_summary(&self) -> Result<SummaryStats, ApiError>;

    /// Fetch the ordered list of items due for review.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the payload is malformed.
    async fn fetch_due_items(&self) -> Result<Vec<ReviewItem>, ApiError>;
}

/// Write side of spaced-repetition review.
#[async_trait]
pub trait AnswerSink: Send + Sync {
    /// Record the outcome of one reviewed item. The server reschedules it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the server did not acknowledge the outcome.
    async fn submit_outcome(&self, key: &WordKey, correct: bool) -> Result<(), ApiError>;
}

#[async_trait]
pub trait FlashcardSource: Send + Sync {
    /// Fetch every flashcard with deck statistics.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the payload is malformed.
    async fn fetch_deck(&self) -> Result<FlashcardDeck, ApiError>;

    /// Record an answer for one card.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` for unknown cards, or transport errors.
    async fn submit_answer(&self, id: FlashcardId, correct: bool) -> Result<(), ApiError>;
}

#[async_trait]
pub trait ChallengeSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` when the word is blank, or transport errors.
    async fn generate_word(&self, word: &str) -> Result<WordChallenge, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` for transport or decode failures.
    async fn verify_word(&self, target: &str, answer: &str) -> Result<WordVerdict, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError::Rejected` when the keyword is blank, or transport errors.
    async fn generate_sentence(
        &self,
        keyword: &str,
        level: SentenceLevel,
    ) -> Result<SentenceChallenge, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` for transport or decode failures.
    async fn validate_sentence(
        &self,
        sentence: &str,
        keyword: &str,
    ) -> Result<SentenceVerdict, ApiError>;
}

#[async_trait]
pub trait LessonSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` for unknown lessons, or transport and decode errors.
    async fn fetch_lesson(&self, id: LessonId) -> Result<Lesson, ApiError>;

    /// Record the score of a finished quiz.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the server did not acknowledge the score.
    async fn submit_quiz(&self, score: QuizScore) -> Result<(), ApiError>;
}

#[async_trait]
pub trait ProgressSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the payload is malformed.
    async fn fetch_progress(&self) -> Result<LearnerProgress, ApiError>;
}

//
// ─── IN-MEMORY ADAPTER ─────────────────────────────────────────────────────────
//

/// Operations of the in-memory adapter that can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailPoint {
    FetchSummary,
    FetchDueItems,
    SubmitOutcome,
    FetchDeck,
    SubmitAnswer,
    Challenges,
    FetchLesson,
    SubmitQuiz,
    FetchProgress,
}

#[derive(Default)]
struct InMemoryState {
    summary: SummaryStats,
    due_items: Vec<ReviewItem>,
    outcomes: Vec<(WordKey, bool)>,
    review_hits: u32,
    summary_fetches: u32,
    deck: FlashcardDeck,
    answers: Vec<(FlashcardId, bool)>,
    word_attempts: HashMap<String, u32>,
    challenge_requests: u32,
    lessons: HashMap<LessonId, Lesson>,
    quiz_scores: Vec<QuizScore>,
    progress: LearnerProgress,
    failing: HashSet<FailPoint>,
}

/// Stand-in for the remote learning API, for tests and offline runs.
///
/// Behaves like the server for the parts the client can observe: answered
/// items leave the due list, counters move, challenges are judged.
#[derive(Clone, Default)]
pub struct InMemoryApi {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_review(self, summary: SummaryStats, due_items: Vec<ReviewItem>) -> Self {
        {
            let mut state = self.lock_unchecked();
            state.summary = summary;
            state.due_items = due_items;
        }
        self
    }

    #[must_use]
    pub fn with_deck(self, deck: FlashcardDeck) -> Self {
        self.lock_unchecked().deck = deck;
        self
    }

    #[must_use]
    pub fn with_lesson(self, lesson: Lesson) -> Self {
        self.lock_unchecked().lessons.insert(lesson.id(), lesson);
        self
    }

    #[must_use]
    pub fn with_progress(self, progress: LearnerProgress) -> Self {
        self.lock_unchecked().progress = progress;
        self
    }

    /// Make every call of `point` fail until `recover` is called.
    pub fn fail(&self, point: FailPoint) {
        self.lock_unchecked().failing.insert(point);
    }

    pub fn recover(&self, point: FailPoint) {
        self.lock_unchecked().failing.remove(&point);
    }

    /// Review outcomes received so far, in arrival order.
    #[must_use]
    pub fn submitted_outcomes(&self) -> Vec<(WordKey, bool)> {
        self.lock_unchecked().outcomes.clone()
    }

    /// Flashcard answers received so far, in arrival order.
    #[must_use]
    pub fn submitted_answers(&self) -> Vec<(FlashcardId, bool)> {
        self.lock_unchecked().answers.clone()
    }

    #[must_use]
    pub fn summary_fetches(&self) -> u32 {
        self.lock_unchecked().summary_fetches
    }

    /// Word and sentence challenges generated so far.
    #[must_use]
    pub fn challenge_requests(&self) -> u32 {
        self.lock_unchecked().challenge_requests
    }

    #[must_use]
    pub fn submitted_quizzes(&self) -> Vec<QuizScore> {
        self.lock_unchecked().quiz_scores.clone()
    }

    fn lock_unchecked(&self) -> MutexGuard<'_, InMemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self, point: FailPoint) -> Result<MutexGuard<'_, InMemoryState>, ApiError> {
        let guard = self
            .state
            .lock()
            .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        if guard.failing.contains(&point) {
            return Err(ApiError::Unavailable(format!("injected failure: {point:?}")));
        }
        Ok(guard)
    }
}

#[async_trait]
impl ContentSource for InMemoryApi {
    async fn fetch_summary(&self) -> Result<SummaryStats, ApiError> {
        let mut state = self.lock(FailPoint::FetchSummary)?;
        state.summary_fetches += 1;
        Ok(state.summary)
    }

    async fn fetch_due_items(&self) -> Result<Vec<ReviewItem>, ApiError> {
        let state = self.lock(FailPoint::FetchDueItems)?;
        Ok(state.due_items.clone())
    }
}

#[async_trait]
impl AnswerSink for InMemoryApi {
    async fn submit_outcome(&self, key: &WordKey, correct: bool) -> Result<(), ApiError> {
        let mut state = self.lock(FailPoint::SubmitOutcome)?;
        state.outcomes.push((key.clone(), correct));

        // Unknown words are acknowledged but leave the statistics untouched.
        let Some(pos) = state.due_items.iter().position(|item| item.key() == key) else {
            return Ok(());
        };
        state.due_items.remove(pos);
        if correct {
            state.review_hits += 1;
        }
        state.summary.completed_reviews += 1;
        state.summary.pending_items = state.summary.pending_items.saturating_sub(1);
        state.summary.success_rate =
            percentage(state.review_hits, state.summary.completed_reviews);
        Ok(())
    }
}

#[async_trait]
impl FlashcardSource for InMemoryApi {
    async fn fetch_deck(&self) -> Result<FlashcardDeck, ApiError> {
        let state = self.lock(FailPoint::FetchDeck)?;
        Ok(state.deck.clone())
    }

    async fn submit_answer(&self, id: FlashcardId, correct: bool) -> Result<(), ApiError> {
        let mut state = self.lock(FailPoint::SubmitAnswer)?;
        let Some(pos) = state.deck.cards.iter().position(|card| card.id() == id) else {
            return Err(ApiError::Rejected(format!("flashcard {id} not found")));
        };
        state.answers.push((id, correct));

        let card = &state.deck.cards[pos];
        let updated = Flashcard::new(
            card.id(),
            card.question(),
            card.answer(),
            card.difficulty(),
            card.attempts() + 1,
            card.correct() + u32::from(correct),
        )
        .map_err(|e| ApiError::Unavailable(e.to_string()))?;
        state.deck.cards[pos] = updated;
        state.deck.stats = deck_stats(&state.deck.cards);
        Ok(())
    }
}

#[async_trait]
impl ChallengeSource for InMemoryApi {
    async fn generate_word(&self, word: &str) -> Result<WordChallenge, ApiError> {
        let mut state = self.lock(FailPoint::Challenges)?;
        state.challenge_requests += 1;
        let target = word.trim();
        if target.is_empty() {
            return Err(ApiError::Rejected("word required".into()));
        }
        let letters = target
            .to_lowercase()
            .chars()
            .rev()
            .map(String::from)
            .collect();
        let difficulty = match target.chars().count() {
            0..=5 => ChallengeDifficulty::Easy,
            6..=8 => ChallengeDifficulty::Medium,
            _ => ChallengeDifficulty::Hard,
        };
        Ok(WordChallenge {
            target: target.to_owned(),
            letters,
            difficulty,
        })
    }

    async fn verify_word(&self, target: &str, answer: &str) -> Result<WordVerdict, ApiError> {
        let mut state = self.lock(FailPoint::Challenges)?;
        let expected = target.trim().to_lowercase();
        let given = answer.trim().to_lowercase();
        let attempts = state.word_attempts.entry(expected.clone()).or_insert(0);
        *attempts += 1;
        Ok(WordVerdict {
            correct: given == expected,
            attempts: *attempts,
            expected,
            given,
        })
    }

    async fn generate_sentence(
        &self,
        keyword: &str,
        level: SentenceLevel,
    ) -> Result<SentenceChallenge, ApiError> {
        let mut state = self.lock(FailPoint::Challenges)?;
        state.challenge_requests += 1;
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(ApiError::Rejected("word required".into()));
        }
        let instruction = match level {
            SentenceLevel::Basic => format!("Write a sentence using: {keyword}"),
            SentenceLevel::Intermediate => format!("Create a question using {keyword}"),
            SentenceLevel::Advanced => {
                format!("Create a sentence with {keyword} in conditional form")
            }
        };
        Ok(SentenceChallenge {
            keyword: keyword.to_owned(),
            instruction,
            level,
            validation_required: true,
        })
    }

    async fn validate_sentence(
        &self,
        sentence: &str,
        keyword: &str,
    ) -> Result<SentenceVerdict, ApiError> {
        let _state = self.lock(FailPoint::Challenges)?;
        let trimmed = sentence.trim();
        let has_keyword = trimmed
            .to_lowercase()
            .contains(&keyword.trim().to_lowercase());
        let well_formed = trimmed.split_whitespace().count() >= 3
            && trimmed.ends_with(['.', '!', '?']);
        let valid = well_formed && has_keyword;
        let message = if valid {
            "Valid sentence".to_owned()
        } else {
            "The sentence needs at least 3 words, the keyword and closing punctuation".to_owned()
        };
        Ok(SentenceVerdict {
            valid,
            has_keyword,
            message,
        })
    }
}

#[async_trait]
impl LessonSource for InMemoryApi {
    async fn fetch_lesson(&self, id: LessonId) -> Result<Lesson, ApiError> {
        let state = self.lock(FailPoint::FetchLesson)?;
        state
            .lessons
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::Rejected(format!("lesson {id} not found")))
    }

    async fn submit_quiz(&self, score: QuizScore) -> Result<(), ApiError> {
        let mut state = self.lock(FailPoint::SubmitQuiz)?;
        if !state.lessons.contains_key(&score.lesson) {
            return Err(ApiError::Rejected(format!("lesson {} not found", score.lesson)));
        }
        state.quiz_scores.push(score);
        state.progress.completed_lessons += 1;
        state.progress.total_lessons = state
            .progress
            .total_lessons
            .max(state.progress.completed_lessons);
        Ok(())
    }
}

#[async_trait]
impl ProgressSource for InMemoryApi {
    async fn fetch_progress(&self) -> Result<LearnerProgress, ApiError> {
        let state = self.lock(FailPoint::FetchProgress)?;
        Ok(LearnerProgress {
            flashcards: state.deck.stats,
            review: state.summary,
            ..state.progress.clone()
        })
    }
}

fn percentage(hits: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (f64::from(hits) / f64::from(total) * 10_000.0).round() / 100.0
}

fn deck_stats(cards: &[Flashcard]) -> FlashcardStats {
    let total_attempts = cards.iter().map(Flashcard::attempts).sum();
    let total_correct = cards.iter().map(Flashcard::correct).sum();
    let studied = cards.iter().filter(|card| card.attempts() > 0).count();
    let total = cards.len();
    FlashcardStats {
        total_cards: u32::try_from(total).unwrap_or(u32::MAX),
        total_attempts,
        total_correct,
        success_rate: percentage(total_correct, total_attempts),
        studied_cards: u32::try_from(studied).unwrap_or(u32::MAX),
        unstudied_cards: u32::try_from(total - studied).unwrap_or(u32::MAX),
    }
}

//
// ─── AGGREGATE ─────────────────────────────────────────────────────────────────
//

/// Every collaborator behind trait objects, so the backend can be swapped.
#[derive(Clone)]
pub struct Api {
    pub content: Arc<dyn ContentSource>,
    pub answers: Arc<dyn AnswerSink>,
    pub flashcards: Arc<dyn FlashcardSource>,
    pub challenges: Arc<dyn ChallengeSource>,
    pub lessons: Arc<dyn LessonSource>,
    pub progress: Arc<dyn ProgressSource>,
}

impl Api {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(&InMemoryApi::new())
    }

    #[must_use]
    pub fn from_in_memory(repo: &InMemoryApi) -> Self {
        Self {
            content: Arc::new(repo.clone()),
            answers: Arc::new(repo.clone()),
            flashcards: Arc::new(repo.clone()),
            challenges: Arc::new(repo.clone()),
            lessons: Arc::new(repo.clone()),
            progress: Arc::new(repo.clone()),
        }
    }

    /// Connect every collaborator to the remote API.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn http(config: HttpConfig) -> Result<Self, ApiError> {
        let client = HttpApi::new(config)?;
        Ok(Self {
            content: Arc::new(client.clone()),
            answers: Arc::new(client.clone()),
            flashcards: Arc::new(client.clone()),
            challenges: Arc::new(client.clone()),
            lessons: Arc::new(client.clone()),
            progress: Arc::new(client),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingua_core::time::fixed_now;

    fn item(word: &str) -> ReviewItem {
        ReviewItem::new(WordKey::new(word).unwrap(), 0, 1.0, 1, fixed_now()).unwrap()
    }

    fn card(id: u64) -> Flashcard {
        Flashcard::new(FlashcardId::new(id), format!("Q{id}"), format!("A{id}"), "easy", 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn answering_a_due_word_moves_counters() {
        let summary = SummaryStats {
            total_items: 2,
            pending_items: 2,
            completed_reviews: 0,
            success_rate: 0.0,
        };
        let repo = InMemoryApi::new().with_review(summary, vec![item("cat"), item("dog")]);

        repo.submit_outcome(&WordKey::new("cat").unwrap(), true)
            .await
            .unwrap();
        repo.submit_outcome(&WordKey::new("dog").unwrap(), false)
            .await
            .unwrap();

        let summary = repo.fetch_summary().await.unwrap();
        assert_eq!(summary.pending_items, 0);
        assert_eq!(summary.completed_reviews, 2);
        assert!((summary.success_rate - 50.0).abs() < f64::EPSILON);
        assert!(repo.fetch_due_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_word_is_acknowledged_without_stats_change() {
        let repo = InMemoryApi::new().with_review(SummaryStats::default(), vec![item("cat")]);
        repo.submit_outcome(&WordKey::new("zebra").unwrap(), true)
            .await
            .unwrap();
        assert_eq!(repo.fetch_summary().await.unwrap().completed_reviews, 0);
        assert_eq!(repo.submitted_outcomes().len(), 1);
    }

    #[tokio::test]
    async fn injected_failure_until_recovered() {
        let repo = InMemoryApi::new();
        repo.fail(FailPoint::FetchSummary);
        assert!(matches!(
            repo.fetch_summary().await,
            Err(ApiError::Unavailable(_))
        ));
        repo.recover(FailPoint::FetchSummary);
        assert!(repo.fetch_summary().await.is_ok());
        assert_eq!(repo.summary_fetches(), 1);
    }

    #[tokio::test]
    async fn flashcard_answers_update_deck_stats() {
        let deck = FlashcardDeck {
            cards: vec![card(1), card(2)],
            stats: FlashcardStats::default(),
        };
        let repo = InMemoryApi::new().with_deck(deck);
        repo.submit_answer(FlashcardId::new(2), true).await.unwrap();

        let deck = repo.fetch_deck().await.unwrap();
        assert_eq!(deck.stats.total_attempts, 1);
        assert_eq!(deck.stats.studied_cards, 1);
        assert_eq!(deck.stats.unstudied_cards, 1);
        assert_eq!(deck.cards[1].correct(), 1);

        let err = repo.submit_answer(FlashcardId::new(9), true).await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(_)));
    }

    #[tokio::test]
    async fn word_challenge_counts_attempts() {
        let repo = InMemoryApi::new();
        let challenge = repo.generate_word("Garden").await.unwrap();
        assert_eq!(challenge.letters.concat(), "nedrag");
        assert_eq!(challenge.difficulty, ChallengeDifficulty::Medium);

        let first = repo.verify_word("Garden", "danger").await.unwrap();
        assert!(!first.correct);
        let second = repo.verify_word("Garden", " GARDEN ").await.unwrap();
        assert!(second.correct);
        assert_eq!(second.attempts, 2);
    }

    #[tokio::test]
    async fn quiz_scores_count_as_completed_lessons() {
        let exercise = lingua_core::model::Exercise::new(
            "Which one is a colour?",
            vec!["rojo".into(), "mesa".into()],
            "rojo",
        )
        .unwrap();
        let lesson = Lesson::new(LessonId::new(4), "Colours", "", "rojo", vec![exercise]).unwrap();
        let repo = InMemoryApi::new().with_lesson(lesson);

        assert_eq!(repo.fetch_lesson(LessonId::new(4)).await.unwrap().title(), "Colours");
        assert!(matches!(
            repo.fetch_lesson(LessonId::new(5)).await,
            Err(ApiError::Rejected(_))
        ));

        let score = QuizScore {
            lesson: LessonId::new(4),
            correct: 1,
            total: 1,
        };
        repo.submit_quiz(score).await.unwrap();
        assert_eq!(repo.submitted_quizzes(), vec![score]);
        assert_eq!(repo.fetch_progress().await.unwrap().completed_lessons, 1);
    }

    #[tokio::test]
    async fn sentence_needs_keyword_and_punctuation() {
        let repo = InMemoryApi::new();
        let ok = repo
            .validate_sentence("The river is wide.", "river")
            .await
            .unwrap();
        assert!(ok.valid);

        let no_punct = repo
            .validate_sentence("The river is wide", "river")
            .await
            .unwrap();
        assert!(!no_punct.valid);
        assert!(no_punct.has_keyword);

        let no_keyword = repo
            .validate_sentence("The sea is wide!", "river")
            .await
            .unwrap();
        assert!(!no_keyword.valid);
        assert!(!no_keyword.has_keyword);
    }
}
