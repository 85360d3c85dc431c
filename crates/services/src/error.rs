//! Shared error types for the services crate.

use api::ApiError;
use thiserror::Error;

/// Errors emitted by study sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no items available for session")]
    Empty,
    #[error("a session is already in progress")]
    AlreadyActive,
    #[error("no session in progress")]
    NotActive,
    #[error("answer must be revealed before submitting")]
    NotRevealed,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by challenge flows.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChallengeError {
    #[error("enter a word first")]
    EmptyWord,
    #[error("enter an answer first")]
    EmptyAnswer,
    #[error("write a sentence first")]
    EmptySentence,
    #[error("no challenge in progress")]
    NoChallenge,
    #[error("challenge has not been checked yet")]
    NotChecked,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by lesson quizzes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("choose an answer first")]
    NoSelection,
    #[error("{0:?} is not one of the options")]
    UnknownOption(String),
    #[error("answer already checked")]
    AlreadyChecked,
    #[error("answer has not been checked yet")]
    NotChecked,
    #[error("quiz already finished")]
    Finished,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error(transparent)]
    Api(#[from] ApiError),
}
