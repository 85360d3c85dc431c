use std::sync::Arc;

use api::{AnswerSink, ApiError, ContentSource, FlashcardSource};

use super::backend::{FlashcardBackend, ReviewBackend, StudyBackend, StudySnapshot};
use super::machine::{SessionEffect, StudyItem};
use super::service::{SessionService, SubmitFailure};
use crate::error::SessionError;

/// Session state for the items and summary a backend serves.
pub type SessionFor<B> =
    SessionService<<B as StudyBackend>::Item, <B as StudyBackend>::Summary>;

type KeyFor<B> = <<B as StudyBackend>::Item as StudyItem>::Key;

/// What happened while executing a batch of effects.
///
/// Built off the UI thread, then folded into the session with [`EffectReport::apply_to`].
#[derive(Debug)]
pub struct EffectReport<I: StudyItem, S> {
    pub submitted: usize,
    pub failures: Vec<SubmitFailure<I::Key>>,
    pub refresh: Option<Result<StudySnapshot<I, S>, String>>,
}

impl<I: StudyItem, S> EffectReport<I, S> {
    fn empty() -> Self {
        Self {
            submitted: 0,
            failures: Vec::new(),
            refresh: None,
        }
    }

    /// Record failures and any refreshed data. The active session, if any, is untouched.
    pub fn apply_to(self, session: &mut SessionService<I, S>) {
        for failure in self.failures {
            session.record_submit_failure(failure);
        }
        match self.refresh {
            Some(Ok(snapshot)) => session.apply_snapshot(snapshot),
            Some(Err(message)) => session.record_load_failure(message),
            None => {}
        }
    }

    #[must_use]
    pub fn all_delivered(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of answering the current item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStep {
    /// The answer closed the session.
    pub completed: bool,
    /// The server acknowledged the outcome.
    pub delivered: bool,
}

/// Loads study data and executes session effects against a backend.
pub struct SessionLoopService<B> {
    backend: Arc<B>,
}

impl<B> Clone for SessionLoopService<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

pub type ReviewLoopService = SessionLoopService<ReviewBackend>;
pub type FlashcardLoopService = SessionLoopService<FlashcardBackend>;

impl ReviewLoopService {
    #[must_use]
    pub fn review(content: Arc<dyn ContentSource>, answers: Arc<dyn AnswerSink>) -> Self {
        Self::new(ReviewBackend::new(content, answers))
    }
}

impl FlashcardLoopService {
    #[must_use]
    pub fn flashcards(cards: Arc<dyn FlashcardSource>) -> Self {
        Self::new(FlashcardBackend::new(cards))
    }
}

impl<B: StudyBackend> SessionLoopService<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Fetch summary and items without touching any session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if either fetch fails.
    pub async fn fetch(&self) -> Result<StudySnapshot<B::Item, B::Summary>, ApiError> {
        self.backend.load().await.inspect_err(|err| {
            log::error!("failed to load study data: {err}");
        })
    }

    /// Load fresh data into `session`, or flag the failure and keep what it had.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` if loading failed.
    pub async fn load(&self, session: &mut SessionFor<B>) -> Result<(), SessionError> {
        match self.fetch().await {
            Ok(snapshot) => {
                session.apply_snapshot(snapshot);
                Ok(())
            }
            Err(err) => {
                session.record_load_failure(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Run effects in order. Failed submissions are reported, never retried.
    pub async fn execute(
        &self,
        effects: Vec<SessionEffect<KeyFor<B>>>,
    ) -> EffectReport<B::Item, B::Summary> {
        let mut report = EffectReport::empty();
        for effect in effects {
            match effect {
                SessionEffect::SubmitOutcome { key, correct } => {
                    match self.backend.submit(&key, correct).await {
                        Ok(()) => report.submitted += 1,
                        Err(err) => {
                            log::warn!("outcome for {key:?} was not recorded: {err}");
                            report.failures.push(SubmitFailure {
                                key,
                                correct,
                                message: err.to_string(),
                            });
                        }
                    }
                }
                SessionEffect::RefreshSummary => {
                    report.refresh = Some(self.fetch().await.map_err(|err| err.to_string()));
                }
            }
        }
        report
    }

    /// Submit the current answer, execute the resulting effects, and fold them back in.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` or `NotRevealed` if the submit itself is rejected.
    /// Network failures are recorded on the session instead.
    pub async fn answer_current(
        &self,
        session: &mut SessionFor<B>,
        correct: bool,
    ) -> Result<SessionStep, SessionError> {
        let effects = session.submit(correct)?;
        let completed = effects
            .iter()
            .any(|effect| matches!(effect, SessionEffect::RefreshSummary));
        let report = self.execute(effects).await;
        let delivered = report.all_delivered();
        report.apply_to(session);
        Ok(SessionStep {
            completed,
            delivered,
        })
    }
}
