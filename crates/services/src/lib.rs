#![forbid(unsafe_code)]

pub mod challenges;
pub mod error;
pub mod lessons;
pub mod progress_service;
pub mod sessions;

pub use lingua_core::Clock;

pub use error::{ChallengeError, ProgressError, QuizError, SessionError};
pub use lessons::{LessonQuiz, LessonService, QuizStage, QuizSubmission};
pub use progress_service::ProgressService;

pub use challenges::{
    SentenceAttempt, SentenceChallengeService, SentenceFlow, SentenceStage, WordAttempt,
    WordChallengeService, WordFlow, WordStage,
};
pub use sessions::{
    EffectReport, FlashcardLoopService, FlashcardSession, IdleReason, ReviewLoopService,
    ReviewSession, SessionEffect, SessionEnd, SessionEvent, SessionLoopService, SessionMachine,
    SessionPhase, SessionProgress, SessionService, SessionStep, StudyBackend, StudyItem,
    StudySnapshot, SubmitFailure,
};
