use dioxus::prelude::*;
use services::{ChallengeError, ProgressError, QuizError, SessionError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    Unavailable,
    EmptySession,
    MissingInput,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::Unavailable => "Could not reach the learning server. Please try again.",
            ViewError::EmptySession => "Nothing to review right now.",
            ViewError::MissingInput => "Please fill in the field first.",
        }
    }
}

impl From<&SessionError> for ViewError {
    fn from(err: &SessionError) -> Self {
        match err {
            SessionError::Empty => ViewError::EmptySession,
            SessionError::Api(_) => ViewError::Unavailable,
            _ => ViewError::Unknown,
        }
    }
}

impl From<&ChallengeError> for ViewError {
    fn from(err: &ChallengeError) -> Self {
        match err {
            ChallengeError::EmptyWord | ChallengeError::EmptyAnswer | ChallengeError::EmptySentence => {
                ViewError::MissingInput
            }
            ChallengeError::Api(_) => ViewError::Unavailable,
            _ => ViewError::Unknown,
        }
    }
}

impl From<&QuizError> for ViewError {
    fn from(err: &QuizError) -> Self {
        match err {
            QuizError::NoSelection => ViewError::MissingInput,
            QuizError::Api(_) => ViewError::Unavailable,
            _ => ViewError::Unknown,
        }
    }
}

impl From<&ProgressError> for ViewError {
    fn from(err: &ProgressError) -> Self {
        match err {
            ProgressError::Api(_) => ViewError::Unavailable,
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
