use thiserror::Error;

use crate::model::{FlashcardError, IdError, LessonError, ReviewItemError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Id(#[from] IdError),
    #[error(transparent)]
    ReviewItem(#[from] ReviewItemError),
    #[error(transparent)]
    Flashcard(#[from] FlashcardError),
    #[error(transparent)]
    Lesson(#[from] LessonError),
}
