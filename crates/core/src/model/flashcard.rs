use thiserror::Error;

use crate::model::ids::FlashcardId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlashcardError {
    #[error("flashcard question must not be empty")]
    EmptyQuestion,

    #[error("flashcard answer must not be empty")]
    EmptyAnswer,

    #[error("correct answers ({correct}) exceed attempts ({attempts})")]
    CountMismatch { attempts: u32, correct: u32 },
}

/// A question/answer card from the server-side deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    id: FlashcardId,
    question: String,
    answer: String,
    difficulty: String,
    attempts: u32,
    correct: u32,
}

impl Flashcard {
    /// # Errors
    ///
    /// Returns `FlashcardError` if either side is blank or counters are inconsistent.
    pub fn new(
        id: FlashcardId,
        question: impl Into<String>,
        answer: impl Into<String>,
        difficulty: impl Into<String>,
        attempts: u32,
        correct: u32,
    ) -> Result<Self, FlashcardError> {
        let question = question.into();
        let answer = answer.into();
        if question.trim().is_empty() {
            return Err(FlashcardError::EmptyQuestion);
        }
        if answer.trim().is_empty() {
            return Err(FlashcardError::EmptyAnswer);
        }
        if correct > attempts {
            return Err(FlashcardError::CountMismatch { attempts, correct });
        }

        Ok(Self {
            id,
            question,
            answer,
            difficulty: difficulty.into(),
            attempts,
            correct,
        })
    }

    #[must_use]
    pub fn id(&self) -> FlashcardId {
        self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Free-form difficulty label assigned by the server.
    #[must_use]
    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_more_hits_than_attempts() {
        let err = Flashcard::new(FlashcardId::new(1), "dog", "perro", "easy", 1, 2).unwrap_err();
        assert_eq!(err, FlashcardError::CountMismatch { attempts: 1, correct: 2 });
    }

    #[test]
    fn rejects_blank_sides() {
        assert_eq!(
            Flashcard::new(FlashcardId::new(1), " ", "perro", "easy", 0, 0).unwrap_err(),
            FlashcardError::EmptyQuestion
        );
        assert_eq!(
            Flashcard::new(FlashcardId::new(1), "dog", "", "easy", 0, 0).unwrap_err(),
            FlashcardError::EmptyAnswer
        );
    }
}
