use std::sync::Arc;

use lingua_core::model::LessonId;
use services::{
    Clock, FlashcardLoopService, LessonService, ProgressService, ReviewLoopService,
    SentenceChallengeService, WordChallengeService,
};

use crate::page::Page;

pub trait UiApp: Send + Sync {
    fn start_page(&self) -> Page;
    fn clock(&self) -> Clock;

    /// Lesson opened by the lesson page.
    fn lesson_id(&self) -> LessonId {
        LessonId::default()
    }

    fn review_loop(&self) -> Arc<ReviewLoopService>;
    fn flashcard_loop(&self) -> Arc<FlashcardLoopService>;
    fn word_challenges(&self) -> Arc<WordChallengeService>;
    fn sentence_challenges(&self) -> Arc<SentenceChallengeService>;
    fn lessons(&self) -> Arc<LessonService>;
    fn progress(&self) -> Arc<ProgressService>;
}

#[derive(Clone)]
pub struct AppContext {
    start_page: Page,
    clock: Clock,
    lesson_id: LessonId,

    review_loop: Arc<ReviewLoopService>,
    flashcard_loop: Arc<FlashcardLoopService>,
    word_challenges: Arc<WordChallengeService>,
    sentence_challenges: Arc<SentenceChallengeService>,
    lessons: Arc<LessonService>,
    progress: Arc<ProgressService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            start_page: app.start_page(),
            clock: app.clock(),
            lesson_id: app.lesson_id(),
            review_loop: app.review_loop(),
            flashcard_loop: app.flashcard_loop(),
            word_challenges: app.word_challenges(),
            sentence_challenges: app.sentence_challenges(),
            lessons: app.lessons(),
            progress: app.progress(),
        }
    }

    #[must_use]
    pub fn start_page(&self) -> Page {
        self.start_page
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn review_loop(&self) -> Arc<ReviewLoopService> {
        Arc::clone(&self.review_loop)
    }

    #[must_use]
    pub fn flashcard_loop(&self) -> Arc<FlashcardLoopService> {
        Arc::clone(&self.flashcard_loop)
    }

    #[must_use]
    pub fn word_challenges(&self) -> Arc<WordChallengeService> {
        Arc::clone(&self.word_challenges)
    }

    #[must_use]
    pub fn sentence_challenges(&self) -> Arc<SentenceChallengeService> {
        Arc::clone(&self.sentence_challenges)
    }

    #[must_use]
    pub fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<LessonService> {
        Arc::clone(&self.lessons)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
