use lingua_core::model::{Flashcard, FlashcardStats, ReviewItem, SummaryStats};

use super::backend::StudySnapshot;
use super::machine::{SessionEffect, SessionEnd, SessionEvent, SessionMachine, SessionPhase, StudyItem};
use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── RECORDS ───────────────────────────────────────────────────────────────────
//

/// An outcome the server never acknowledged. Kept for display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitFailure<K> {
    pub key: K,
    pub correct: bool,
    pub message: String,
}

/// Why the idle view has nothing to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleReason {
    /// The server reported no due items.
    NothingDue,
    /// A session just finished and nothing else is due.
    Completed,
}

//
// ─── SESSION STATE ─────────────────────────────────────────────────────────────
//

/// Everything a study page shows: the machine, the latest summary, and what went wrong.
///
/// Owned by the UI thread. Network results are folded in through
/// [`SessionService::apply_snapshot`] and friends; they never touch an active session.
pub struct SessionService<I: StudyItem, S> {
    machine: SessionMachine<I>,
    summary: Option<S>,
    load_error: Option<String>,
    submit_failures: Vec<SubmitFailure<I::Key>>,
}

/// Spaced-repetition review state.
pub type ReviewSession = SessionService<ReviewItem, SummaryStats>;

/// Flashcard drill state.
pub type FlashcardSession = SessionService<Flashcard, FlashcardStats>;

impl<I: StudyItem, S> Default for SessionService<I, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: StudyItem, S> SessionService<I, S> {
    /// Empty, not-yet-loaded state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            machine: SessionMachine::default(),
            summary: None,
            load_error: None,
            submit_failures: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_snapshot(snapshot: StudySnapshot<I, S>) -> Self {
        let mut service = Self::new();
        service.apply_snapshot(snapshot);
        service
    }

    /// Replace summary and due list with fresh server data and clear the load error.
    pub fn apply_snapshot(&mut self, snapshot: StudySnapshot<I, S>) {
        self.machine.replace_due(snapshot.items);
        self.summary = Some(snapshot.summary);
        self.load_error = None;
    }

    /// Flag a failed load. Previously loaded data stays in place.
    pub fn record_load_failure(&mut self, message: impl Into<String>) {
        self.load_error = Some(message.into());
    }

    pub fn record_submit_failure(&mut self, failure: SubmitFailure<I::Key>) {
        self.submit_failures.push(failure);
    }

    pub fn clear_submit_failures(&mut self) {
        self.submit_failures.clear();
    }

    // ─── events ───

    /// # Errors
    ///
    /// Returns `SessionError::Empty` with nothing due, or `AlreadyActive`.
    pub fn begin(&mut self) -> Result<(), SessionError> {
        self.machine.apply(SessionEvent::Begin).map(|_| ())
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotActive` while idle.
    pub fn reveal(&mut self) -> Result<(), SessionError> {
        self.machine.apply(SessionEvent::Reveal).map(|_| ())
    }

    /// Record the learner's answer and hand back the effects to execute.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` while idle and `NotRevealed` before reveal.
    pub fn submit(&mut self, correct: bool) -> Result<Vec<SessionEffect<I::Key>>, SessionError> {
        self.machine.apply(SessionEvent::Submit { correct })
    }

    pub fn exit(&mut self) {
        // Exit never fails and never produces effects.
        let _ = self.machine.apply(SessionEvent::Exit);
    }

    // ─── queries ───

    #[must_use]
    pub fn machine(&self) -> &SessionMachine<I> {
        &self.machine
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.machine.phase()
    }

    #[must_use]
    pub fn current(&self) -> Option<&I> {
        self.machine.current()
    }

    #[must_use]
    pub fn progress(&self) -> Option<SessionProgress> {
        self.machine.progress()
    }

    #[must_use]
    pub fn due_items(&self) -> &[I] {
        self.machine.due_items()
    }

    #[must_use]
    pub fn summary(&self) -> Option<&S> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.summary.is_some()
    }

    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    #[must_use]
    pub fn submit_failures(&self) -> &[SubmitFailure<I::Key>] {
        &self.submit_failures
    }

    /// Whether the begin affordance should be offered.
    #[must_use]
    pub fn can_begin(&self) -> bool {
        self.machine.can_begin()
    }

    /// Reason the idle view has nothing to start, if any.
    #[must_use]
    pub fn idle_reason(&self) -> Option<IdleReason> {
        if self.machine.is_active() || !self.machine.due_items().is_empty() || !self.is_loaded() {
            return None;
        }
        match self.machine.last_end() {
            Some(SessionEnd::Completed) => Some(IdleReason::Completed),
            _ => Some(IdleReason::NothingDue),
        }
    }
}
