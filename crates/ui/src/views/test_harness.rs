use std::sync::Arc;

use api::{AnswerSink, InMemoryApi};
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use lingua_core::time::fixed_clock;
use services::{
    Clock, FlashcardLoopService, FlashcardSession, LessonQuiz, LessonService, ProgressService,
    ReviewLoopService, SentenceChallengeService, SentenceFlow, WordChallengeService, WordFlow,
};

use crate::context::{UiApp, build_app_context};
use crate::page::Page;
use crate::views::test_handles::TestHandles;
use crate::views::{
    FlashcardsView, LessonView, ProgressView, ReviewTestHandles, ReviewView,
    SentenceChallengeView, WordChallengeView,
};
use crate::vm::{FlashcardIntent, LessonIntent, SentenceIntent, WordIntent};

pub type FlashcardTestHandles = TestHandles<FlashcardIntent, FlashcardSession>;
pub type WordTestHandles = TestHandles<WordIntent, WordFlow>;
pub type SentenceTestHandles = TestHandles<SentenceIntent, SentenceFlow>;
pub type LessonTestHandles = TestHandles<LessonIntent, Option<LessonQuiz>>;

#[derive(Clone)]
struct TestApp {
    page: Page,
    clock: Clock,
    review_loop: Arc<ReviewLoopService>,
    flashcard_loop: Arc<FlashcardLoopService>,
    word_challenges: Arc<WordChallengeService>,
    sentence_challenges: Arc<SentenceChallengeService>,
    lessons: Arc<LessonService>,
    progress: Arc<ProgressService>,
}

impl TestApp {
    fn new(page: Page, repo: &InMemoryApi, answers: Arc<dyn AnswerSink>) -> Self {
        let repo = Arc::new(repo.clone());
        Self {
            page,
            clock: fixed_clock(),
            review_loop: Arc::new(ReviewLoopService::review(repo.clone(), answers)),
            flashcard_loop: Arc::new(FlashcardLoopService::flashcards(repo.clone())),
            word_challenges: Arc::new(WordChallengeService::new(repo.clone())),
            sentence_challenges: Arc::new(SentenceChallengeService::new(repo.clone())),
            lessons: Arc::new(LessonService::new(repo.clone())),
            progress: Arc::new(ProgressService::new(repo)),
        }
    }
}

impl UiApp for TestApp {
    fn start_page(&self) -> Page {
        self.page
    }

    fn clock(&self) -> Clock {
        self.clock
    }

    fn review_loop(&self) -> Arc<ReviewLoopService> {
        Arc::clone(&self.review_loop)
    }

    fn flashcard_loop(&self) -> Arc<FlashcardLoopService> {
        Arc::clone(&self.flashcard_loop)
    }

    fn word_challenges(&self) -> Arc<WordChallengeService> {
        Arc::clone(&self.word_challenges)
    }

    fn sentence_challenges(&self) -> Arc<SentenceChallengeService> {
        Arc::clone(&self.sentence_challenges)
    }

    fn lessons(&self) -> Arc<LessonService> {
        Arc::clone(&self.lessons)
    }

    fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}

/// Handles for every view; only the mounted page registers its own.
#[derive(Clone, Default)]
pub struct HarnessHandles {
    pub review: ReviewTestHandles,
    pub flashcards: FlashcardTestHandles,
    pub words: WordTestHandles,
    pub sentences: SentenceTestHandles,
    pub lesson: LessonTestHandles,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: HarnessHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn PageHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let page = app.start_page();
    use_context_provider(|| build_app_context(&app));
    let handles = props.handles.clone();
    use_context_provider(|| handles.review.clone());
    use_context_provider(|| handles.flashcards.clone());
    use_context_provider(|| handles.words.clone());
    use_context_provider(|| handles.sentences.clone());
    use_context_provider(|| handles.lesson.clone());
    match page {
        Page::Review => rsx! { ReviewView {} },
        Page::Flashcards => rsx! { FlashcardsView {} },
        Page::Words => rsx! { WordChallengeView {} },
        Page::Sentences => rsx! { SentenceChallengeView {} },
        Page::Lesson => rsx! { LessonView {} },
        Page::Progress => rsx! { ProgressView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub repo: InMemoryApi,
    pub handles: HarnessHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Let spawned requests land and the page re-render.
    pub async fn settle(&mut self) {
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    /// Call `intent` on the mounted view without letting any task run.
    pub fn dispatch<I: 'static, S: 'static>(&self, handles: &TestHandles<I, S>, intent: I) {
        let dispatch = handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
    }

    pub fn read<I: 'static, S: 'static, T>(
        &self,
        handles: &TestHandles<I, S>,
        read: impl FnOnce(&S) -> T,
    ) -> T {
        let state = handles.state();
        self.dom.in_runtime(|| read(&*state.read()))
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(page: Page, repo: InMemoryApi) -> ViewHarness {
    let answers: Arc<dyn AnswerSink> = Arc::new(repo.clone());
    setup_view_harness_with_answers(page, repo, answers)
}

/// Like `setup_view_harness`, with review outcomes sent to `answers`.
pub fn setup_view_harness_with_answers(
    page: Page,
    repo: InMemoryApi,
    answers: Arc<dyn AnswerSink>,
) -> ViewHarness {
    let handles = HarnessHandles::default();
    let app = Arc::new(TestApp::new(page, &repo, answers));
    let dom = VirtualDom::new_with_props(
        PageHarness,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    ViewHarness { dom, repo, handles }
}
