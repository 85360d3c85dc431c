mod backend;
mod machine;
mod progress;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use backend::{FlashcardBackend, ReviewBackend, StudyBackend, StudySnapshot};
pub use machine::{SessionEffect, SessionEnd, SessionEvent, SessionMachine, SessionPhase, StudyItem};
pub use progress::SessionProgress;
pub use service::{FlashcardSession, IdleReason, ReviewSession, SessionService, SubmitFailure};
pub use workflow::{
    EffectReport, FlashcardLoopService, ReviewLoopService, SessionFor, SessionLoopService,
    SessionStep,
};
