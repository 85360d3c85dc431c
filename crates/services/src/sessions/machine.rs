use std::fmt;

use lingua_core::model::{Flashcard, FlashcardId, ReviewItem, WordKey};

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── STUDY ITEMS ───────────────────────────────────────────────────────────────
//

/// Anything a learner can step through in a session.
///
/// The key is what gets reported back to the server once the learner answers.
pub trait StudyItem: Clone {
    type Key: Clone + fmt::Debug + PartialEq + Send + Sync + 'static;

    fn study_key(&self) -> Self::Key;
}

impl StudyItem for ReviewItem {
    type Key = WordKey;

    fn study_key(&self) -> WordKey {
        self.key().clone()
    }
}

impl StudyItem for Flashcard {
    type Key = FlashcardId;

    fn study_key(&self) -> FlashcardId {
        self.id()
    }
}

//
// ─── EVENTS AND EFFECTS ────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Active,
    Revealed,
}

/// Learner intents accepted by [`SessionMachine::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Begin,
    Reveal,
    Submit { correct: bool },
    Exit,
}

/// Work the caller must perform after a transition.
///
/// Effects never feed back into the session that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect<K> {
    /// Report the outcome for one item.
    SubmitOutcome { key: K, correct: bool },
    /// Refetch the summary and the due list.
    RefreshSummary,
}

/// How the most recent session left the active phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Completed,
    Exited,
}

//
// ─── MACHINE ───────────────────────────────────────────────────────────────────
//

struct ActiveSession<I> {
    items: Vec<I>,
    cursor: usize,
    revealed: bool,
}

/// Synchronous review state machine.
///
/// Holds the latest due list while idle and a private snapshot of it while a
/// session runs. Network work is returned as [`SessionEffect`] values.
pub struct SessionMachine<I: StudyItem> {
    due: Vec<I>,
    session: Option<ActiveSession<I>>,
    last_end: Option<SessionEnd>,
}

impl<I: StudyItem> Default for SessionMachine<I> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<I: StudyItem> SessionMachine<I> {
    #[must_use]
    pub fn new(due: Vec<I>) -> Self {
        Self {
            due,
            session: None,
            last_end: None,
        }
    }

    /// Replace the idle due list. A running session keeps its own snapshot.
    pub fn replace_due(&mut self, due: Vec<I>) {
        self.due = due;
    }

    #[must_use]
    pub fn due_items(&self) -> &[I] {
        &self.due
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match &self.session {
            None => SessionPhase::Idle,
            Some(session) if session.revealed => SessionPhase::Revealed,
            Some(_) => SessionPhase::Active,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// True when idle with at least one due item.
    #[must_use]
    pub fn can_begin(&self) -> bool {
        self.session.is_none() && !self.due.is_empty()
    }

    #[must_use]
    pub fn current(&self) -> Option<&I> {
        self.session
            .as_ref()
            .and_then(|session| session.items.get(session.cursor))
    }

    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.session.as_ref().map(|session| session.cursor)
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.session.as_ref().is_some_and(|session| session.revealed)
    }

    #[must_use]
    pub fn last_end(&self) -> Option<SessionEnd> {
        self.last_end
    }

    #[must_use]
    pub fn progress(&self) -> Option<SessionProgress> {
        self.session.as_ref().map(|session| SessionProgress {
            cursor: session.cursor,
            total: session.items.len(),
            remaining: session.items.len().saturating_sub(session.cursor),
            revealed: session.revealed,
        })
    }

    /// Apply one learner event.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when beginning with nothing due,
    /// `SessionError::AlreadyActive` when beginning twice,
    /// `SessionError::NotActive` for reveal/submit while idle, and
    /// `SessionError::NotRevealed` when submitting before reveal.
    /// A rejected event leaves the machine unchanged.
    pub fn apply(&mut self, event: SessionEvent) -> Result<Vec<SessionEffect<I::Key>>, SessionError> {
        match event {
            SessionEvent::Begin => self.begin().map(|()| Vec::new()),
            SessionEvent::Reveal => self.reveal().map(|()| Vec::new()),
            SessionEvent::Submit { correct } => self.submit(correct),
            SessionEvent::Exit => Ok(self.exit()),
        }
    }

    fn begin(&mut self) -> Result<(), SessionError> {
        if self.session.is_some() {
            return Err(SessionError::AlreadyActive);
        }
        if self.due.is_empty() {
            return Err(SessionError::Empty);
        }

        self.session = Some(ActiveSession {
            items: self.due.clone(),
            cursor: 0,
            revealed: false,
        });
        Ok(())
    }

    fn reveal(&mut self) -> Result<(), SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NotActive)?;
        session.revealed = true;
        Ok(())
    }

    fn submit(&mut self, correct: bool) -> Result<Vec<SessionEffect<I::Key>>, SessionError> {
        let session = self.session.as_mut().ok_or(SessionError::NotActive)?;
        if !session.revealed {
            return Err(SessionError::NotRevealed);
        }
        let key = session
            .items
            .get(session.cursor)
            .map(StudyItem::study_key)
            .ok_or(SessionError::NotActive)?;

        let mut effects = vec![SessionEffect::SubmitOutcome { key, correct }];
        session.revealed = false;
        if session.cursor + 1 < session.items.len() {
            session.cursor += 1;
        } else {
            self.session = None;
            self.last_end = Some(SessionEnd::Completed);
            effects.push(SessionEffect::RefreshSummary);
        }
        Ok(effects)
    }

    fn exit(&mut self) -> Vec<SessionEffect<I::Key>> {
        if self.session.take().is_some() {
            self.last_end = Some(SessionEnd::Exited);
        }
        Vec::new()
    }
}
