use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use api::{AnswerSink, ApiError, FailPoint, FlashcardDeck, InMemoryApi};
use async_trait::async_trait;
use lingua_core::model::{
    CategoryProgress, Exercise, Flashcard, FlashcardId, FlashcardStats, LearnerProgress, Lesson,
    LessonId, QuizScore, RecallRating, ReviewItem, SummaryStats, WordKey,
};
use lingua_core::time::fixed_now;
use services::{QuizSubmission, SentenceStage, SessionPhase, WordStage};

use super::test_harness::{ViewHarness, setup_view_harness, setup_view_harness_with_answers};
use crate::page::Page;
use crate::vm::{FlashcardIntent, LessonIntent, ReviewIntent, SentenceIntent, WordIntent};

fn item(word: &str) -> ReviewItem {
    ReviewItem::new(WordKey::new(word).unwrap(), 2, 1.5, 3, fixed_now()).unwrap()
}

fn review_repo(words: &[&str]) -> InMemoryApi {
    let pending = u32::try_from(words.len()).unwrap();
    InMemoryApi::new().with_review(
        SummaryStats {
            total_items: 12,
            pending_items: pending,
            completed_reviews: 5,
            success_rate: 80.0,
        },
        words.iter().map(|word| item(word)).collect(),
    )
}

async fn loaded(page: Page, repo: InMemoryApi) -> ViewHarness {
    let mut harness = setup_view_harness(page, repo);
    harness.rebuild();
    harness.settle().await;
    harness
}

async fn send(harness: &mut ViewHarness, intent: ReviewIntent) {
    let review = harness.handles.review.clone();
    harness.dispatch(&review, intent);
    harness.settle().await;
}

fn phase(harness: &ViewHarness) -> SessionPhase {
    harness.read(&harness.handles.review, |session| session.phase())
}

/// Holds the first outcome back so the next batch is queued behind it.
struct SlowFirstSink {
    inner: InMemoryApi,
    calls: AtomicU32,
}

#[async_trait]
impl AnswerSink for SlowFirstSink {
    async fn submit_outcome(&self, key: &WordKey, correct: bool) -> Result<(), ApiError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_millis(30)).await;
        }
        self.inner.submit_outcome(key, correct).await
    }
}

fn lesson_repo() -> InMemoryApi {
    let options = || vec!["gato".to_string(), "perro".to_string(), "pez".to_string()];
    let lesson = Lesson::new(
        LessonId::default(),
        "Pets",
        "Animals that live at home.",
        "gato",
        vec![
            Exercise::new("Which one is the cat?", options(), "gato").unwrap(),
            Exercise::new("Which one is the fish?", options(), "pez").unwrap(),
        ],
    )
    .unwrap();
    InMemoryApi::new().with_lesson(lesson)
}

#[tokio::test(flavor = "current_thread")]
async fn review_view_lists_due_words() {
    let harness = loaded(Page::Review, review_repo(&["casa", "perro"])).await;
    let html = harness.render();
    assert!(html.contains("Words to review today (2)"), "missing due heading in {html}");
    assert!(html.contains("perro"), "missing due word in {html}");
    assert!(html.contains("Start review"), "missing begin button in {html}");
    assert!(html.contains("80.0%"), "missing success rate in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn review_view_with_nothing_due_offers_no_session() {
    let harness = loaded(Page::Review, review_repo(&[])).await;
    let html = harness.render();
    assert!(html.contains("No words to review right now."), "missing empty text in {html}");
    assert!(!html.contains("review-begin"), "begin should be hidden in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn review_view_load_failure_renders_retry() {
    let repo = review_repo(&["casa"]);
    repo.fail(FailPoint::FetchSummary);
    let mut harness = loaded(Page::Review, repo).await;
    let html = harness.render();
    assert!(html.contains("Could not reach the learning server"), "missing error in {html}");
    assert!(html.contains("review-retry"), "missing retry in {html}");

    harness.repo.recover(FailPoint::FetchSummary);
    send(&mut harness, ReviewIntent::Reload).await;
    let html = harness.render();
    assert!(html.contains("Words to review today (1)"), "reload did not land in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn review_view_walks_a_session_to_completion() {
    let mut harness = loaded(Page::Review, review_repo(&["casa", "perro"])).await;

    send(&mut harness, ReviewIntent::Begin).await;
    assert_eq!(phase(&harness), SessionPhase::Active);
    let html = harness.render();
    assert!(html.contains("CASA"), "missing current word in {html}");
    assert!(html.contains("1 of 2"), "missing position in {html}");
    assert!(!html.contains("How well did you remember?"), "ratings before reveal in {html}");

    send(&mut harness, ReviewIntent::Reveal).await;
    assert!(harness.render().contains("How well did you remember?"));

    send(&mut harness, ReviewIntent::Rate(RecallRating::Good)).await;
    let html = harness.render();
    assert!(html.contains("PERRO"), "cursor did not move in {html}");
    assert!(html.contains("2 of 2"), "missing position in {html}");

    send(&mut harness, ReviewIntent::Reveal).await;
    send(&mut harness, ReviewIntent::Rate(RecallRating::Forgot)).await;
    assert_eq!(phase(&harness), SessionPhase::Idle);
    let html = harness.render();
    assert!(html.contains("Session complete."), "missing completion text in {html}");

    assert_eq!(
        harness.repo.submitted_outcomes(),
        vec![
            (WordKey::new("casa").unwrap(), true),
            (WordKey::new("perro").unwrap(), false),
        ]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn review_view_exit_submits_nothing_more() {
    let mut harness = loaded(Page::Review, review_repo(&["casa", "perro"])).await;

    send(&mut harness, ReviewIntent::Begin).await;
    send(&mut harness, ReviewIntent::Reveal).await;
    send(&mut harness, ReviewIntent::Exit).await;

    assert_eq!(phase(&harness), SessionPhase::Idle);
    assert!(harness.repo.submitted_outcomes().is_empty());
    assert!(harness.render().contains("Words to review today (2)"));
}

#[tokio::test(flavor = "current_thread")]
async fn review_view_reports_lost_outcomes() {
    let repo = review_repo(&["casa", "perro"]);
    let mut harness = loaded(Page::Review, repo).await;
    harness.repo.fail(FailPoint::SubmitOutcome);

    send(&mut harness, ReviewIntent::Begin).await;
    send(&mut harness, ReviewIntent::Reveal).await;
    send(&mut harness, ReviewIntent::Rate(RecallRating::Hard)).await;

    let html = harness.render();
    assert!(html.contains("1 answer was not saved."), "missing lost notice in {html}");
    assert!(html.contains("PERRO"), "cursor should still advance in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn review_view_delivers_back_to_back_answers_in_order() {
    let repo = review_repo(&["casa", "perro"]);
    let sink = Arc::new(SlowFirstSink {
        inner: repo.clone(),
        calls: AtomicU32::new(0),
    });
    let mut harness = setup_view_harness_with_answers(Page::Review, repo, sink);
    harness.rebuild();
    harness.settle().await;

    // No task runs between these, so both batches are queued at once.
    let review = harness.handles.review.clone();
    for intent in [
        ReviewIntent::Begin,
        ReviewIntent::Reveal,
        ReviewIntent::Rate(RecallRating::Good),
        ReviewIntent::Reveal,
        ReviewIntent::Rate(RecallRating::Forgot),
    ] {
        harness.dispatch(&review, intent);
    }
    assert_eq!(phase(&harness), SessionPhase::Idle);

    for _ in 0..4 {
        harness.settle().await;
    }

    assert_eq!(
        harness.repo.submitted_outcomes(),
        vec![
            (WordKey::new("casa").unwrap(), true),
            (WordKey::new("perro").unwrap(), false),
        ]
    );
    assert_eq!(harness.read(&review, |session| session.due_items().len()), 0);
    let html = harness.render();
    assert!(html.contains("Session complete."), "refresh saw stale data in {html}");
    assert!(!html.contains("review-begin"), "answered words still due in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn review_view_lost_notice_can_be_dismissed() {
    let mut harness = loaded(Page::Review, review_repo(&["casa", "perro"])).await;
    harness.repo.fail(FailPoint::SubmitOutcome);

    send(&mut harness, ReviewIntent::Begin).await;
    send(&mut harness, ReviewIntent::Reveal).await;
    send(&mut harness, ReviewIntent::Rate(RecallRating::Good)).await;
    assert!(harness.render().contains("lost-answers-dismiss"));

    send(&mut harness, ReviewIntent::DismissLost).await;
    let html = harness.render();
    assert!(!html.contains("not saved"), "notice survived dismissal in {html}");
    assert!(
        harness.read(&harness.handles.review, |session| session.submit_failures().is_empty())
    );
    assert_eq!(phase(&harness), SessionPhase::Active);
}

#[tokio::test(flavor = "current_thread")]
async fn flashcards_view_lists_deck() {
    let cards = vec![
        Flashcard::new(FlashcardId::new(1), "el gato", "the cat", "easy", 2, 1).unwrap(),
        Flashcard::new(FlashcardId::new(2), "la mesa", "the table", "medium", 0, 0).unwrap(),
    ];
    let repo = InMemoryApi::new().with_deck(FlashcardDeck {
        cards,
        stats: FlashcardStats {
            total_cards: 2,
            total_attempts: 2,
            total_correct: 1,
            success_rate: 50.0,
            studied_cards: 1,
            unstudied_cards: 1,
        },
    });
    let harness = loaded(Page::Flashcards, repo).await;
    let html = harness.render();
    assert!(html.contains("Your flashcards"), "missing deck heading in {html}");
    assert!(html.contains("la mesa"), "missing question in {html}");
    assert!(html.contains("Start studying"), "missing begin button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn flashcards_view_load_failure_renders_retry() {
    let repo = InMemoryApi::new();
    repo.fail(FailPoint::FetchDeck);
    let harness = loaded(Page::Flashcards, repo).await;
    let html = harness.render();
    assert!(html.contains("flashcards-retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn word_view_starts_in_setup() {
    let harness = loaded(Page::Words, InMemoryApi::new()).await;
    let html = harness.render();
    assert!(html.contains("Word Builder"), "missing title in {html}");
    assert!(html.contains("Create challenge"), "missing generate button in {html}");
    assert!(html.contains("0 attempts"), "missing score in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn word_view_double_generate_sends_one_request() {
    let mut harness = loaded(Page::Words, InMemoryApi::new()).await;
    let words = harness.handles.words.clone();

    harness.dispatch(&words, WordIntent::EditWord("sol".into()));
    harness.dispatch(&words, WordIntent::Generate);
    harness.dispatch(&words, WordIntent::Generate);
    harness.settle().await;

    assert_eq!(harness.repo.challenge_requests(), 1);
    assert!(harness.read(&words, |flow| matches!(flow.stage(), WordStage::Solving { .. })));
    assert!(harness.render().contains("letter-tile"));
}

#[tokio::test(flavor = "current_thread")]
async fn word_view_reset_drops_challenge_still_in_flight() {
    let mut harness = loaded(Page::Words, InMemoryApi::new()).await;
    let words = harness.handles.words.clone();

    harness.dispatch(&words, WordIntent::EditWord("luna".into()));
    harness.dispatch(&words, WordIntent::Generate);
    harness.dispatch(&words, WordIntent::Reset);
    harness.settle().await;

    assert_eq!(
        harness.read(&words, |flow| flow.stage().clone()),
        WordStage::default()
    );
    assert!(harness.render().contains("Create challenge"));

    harness.dispatch(&words, WordIntent::EditWord("mar".into()));
    harness.dispatch(&words, WordIntent::Generate);
    harness.settle().await;
    assert!(harness.read(&words, |flow| matches!(
        flow.stage(),
        WordStage::Solving { challenge, .. } if challenge.target == "mar"
    )));
}

#[tokio::test(flavor = "current_thread")]
async fn sentence_view_keeps_edits_made_while_checking() {
    let mut harness = loaded(Page::Sentences, InMemoryApi::new()).await;
    let sentences = harness.handles.sentences.clone();

    harness.dispatch(&sentences, SentenceIntent::EditKeyword("river".into()));
    harness.dispatch(&sentences, SentenceIntent::Generate);
    harness.dispatch(&sentences, SentenceIntent::Generate);
    harness.settle().await;
    assert_eq!(harness.repo.challenge_requests(), 1);

    harness.dispatch(&sentences, SentenceIntent::EditSentence("The river is long.".into()));
    harness.dispatch(&sentences, SentenceIntent::Validate);
    harness.dispatch(&sentences, SentenceIntent::EditSentence("The river is short.".into()));
    harness.settle().await;

    assert!(harness.read(&sentences, |flow| matches!(
        flow.stage(),
        SentenceStage::Composing { sentence, .. } if sentence == "The river is short."
    )));
    assert!(harness.render().contains("Check sentence"));
}

#[tokio::test(flavor = "current_thread")]
async fn sentence_view_offers_every_level() {
    let harness = loaded(Page::Sentences, InMemoryApi::new()).await;
    let html = harness.render();
    for label in ["Basic", "Intermediate", "Advanced"] {
        assert!(html.contains(label), "missing level {label} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_renders_breakdown() {
    let repo = InMemoryApi::new().with_progress(LearnerProgress {
        total_lessons: 40,
        completed_lessons: 17,
        percentage: 42.5,
        streak_days: 9,
        vocabulary: CategoryProgress {
            completed: 17,
            total: 40,
            percentage: 42.5,
        },
        flashcards: FlashcardStats::default(),
        review: SummaryStats::default(),
    });
    let harness = loaded(Page::Progress, repo).await;
    let html = harness.render();
    assert!(html.contains("42.5%"), "missing overall percent in {html}");
    assert!(html.contains("17 of 40 lessons completed"), "missing lessons in {html}");
    assert!(html.contains("Vocabulary"), "missing category in {html}");
    assert!(html.contains("9-day streak!"), "missing streak tip in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_failure_renders_retry() {
    let repo = InMemoryApi::new();
    repo.fail(FailPoint::FetchProgress);
    let harness = loaded(Page::Progress, repo).await;
    let html = harness.render();
    assert!(html.contains("progress-retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_runs_quiz_and_submits_score() {
    let mut harness = loaded(Page::Lesson, lesson_repo()).await;
    let html = harness.render();
    assert!(html.contains("Pets"), "missing title in {html}");
    assert!(html.contains("1 of 2"), "missing position in {html}");
    assert!(html.contains("Which one is the cat?"), "missing question in {html}");

    let lesson = harness.handles.lesson.clone();
    harness.dispatch(&lesson, LessonIntent::Select("gato".into()));
    harness.dispatch(&lesson, LessonIntent::Check);
    harness.settle().await;
    assert!(harness.render().contains("Correct!"));

    harness.dispatch(&lesson, LessonIntent::Next);
    harness.dispatch(&lesson, LessonIntent::Select("perro".into()));
    harness.dispatch(&lesson, LessonIntent::Check);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("The correct answer is: pez"), "missing correction in {html}");
    assert!(html.contains("Finish"), "missing finish label in {html}");

    harness.dispatch(&lesson, LessonIntent::Next);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("GATO"), "missing learned word in {html}");
    assert!(html.contains("50%"), "missing percentage in {html}");
    assert!(html.contains("1 of 2 answers correct"), "missing summary in {html}");
    assert_eq!(
        harness.repo.submitted_quizzes(),
        vec![QuizScore {
            lesson: LessonId::default(),
            correct: 1,
            total: 2,
        }]
    );
    assert_eq!(
        harness.read(&lesson, |quiz| quiz.as_ref().map(|q| q.submission())),
        Some(QuizSubmission::Saved)
    );
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_check_needs_a_choice() {
    let mut harness = loaded(Page::Lesson, lesson_repo()).await;
    let lesson = harness.handles.lesson.clone();
    harness.dispatch(&lesson, LessonIntent::Check);
    harness.settle().await;
    assert!(harness.render().contains("Please fill in the field first."));
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_failed_submit_is_reported() {
    let repo = lesson_repo();
    repo.fail(FailPoint::SubmitQuiz);
    let mut harness = loaded(Page::Lesson, repo).await;
    let lesson = harness.handles.lesson.clone();
    for choice in ["gato", "pez"] {
        harness.dispatch(&lesson, LessonIntent::Select(choice.into()));
        harness.dispatch(&lesson, LessonIntent::Check);
        harness.dispatch(&lesson, LessonIntent::Next);
    }
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("100%"), "missing percentage in {html}");
    assert!(html.contains("could not be saved"), "missing failure notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_missing_lesson_renders_retry() {
    let harness = loaded(Page::Lesson, InMemoryApi::new()).await;
    let html = harness.render();
    assert!(html.contains("lesson-retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn flashcards_view_lost_notice_can_be_dismissed() {
    let cards = vec![
        Flashcard::new(FlashcardId::new(1), "el sol", "the sun", "easy", 0, 0).unwrap(),
        Flashcard::new(FlashcardId::new(2), "la luna", "the moon", "easy", 0, 0).unwrap(),
    ];
    let repo = InMemoryApi::new().with_deck(FlashcardDeck {
        cards,
        stats: FlashcardStats::default(),
    });
    repo.fail(FailPoint::SubmitAnswer);
    let mut harness = loaded(Page::Flashcards, repo).await;
    let flashcards = harness.handles.flashcards.clone();

    for intent in [
        FlashcardIntent::Begin,
        FlashcardIntent::Flip,
        FlashcardIntent::Answer { correct: true },
    ] {
        harness.dispatch(&flashcards, intent);
    }
    harness.settle().await;
    assert!(harness.render().contains("1 answer was not saved."));

    harness.dispatch(&flashcards, FlashcardIntent::DismissLost);
    harness.settle().await;
    assert!(!harness.render().contains("not saved"));
}
