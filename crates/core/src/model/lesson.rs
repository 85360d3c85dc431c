use thiserror::Error;

use crate::model::ids::LessonId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonError {
    #[error("exercise question must not be empty")]
    EmptyQuestion,

    #[error("exercise needs at least two options")]
    TooFewOptions,

    #[error("correct answer {0:?} is not among the options")]
    AnswerNotOffered(String),

    #[error("lesson {0} has no exercises")]
    NoExercises(LessonId),
}

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    question: String,
    options: Vec<String>,
    answer: String,
}

impl Exercise {
    /// # Errors
    ///
    /// Returns `LessonError` for a blank question, fewer than two options, or
    /// an answer that is not one of the options.
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
    ) -> Result<Self, LessonError> {
        let question = question.into();
        let answer = answer.into();
        if question.trim().is_empty() {
            return Err(LessonError::EmptyQuestion);
        }
        if options.len() < 2 {
            return Err(LessonError::TooFewOptions);
        }
        if !options.contains(&answer) {
            return Err(LessonError::AnswerNotOffered(answer));
        }
        Ok(Self {
            question,
            options,
            answer,
        })
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Options are matched exactly, as offered.
    #[must_use]
    pub fn is_correct(&self, choice: &str) -> bool {
        self.answer == choice
    }
}

/// A short reading about one word followed by its quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    id: LessonId,
    title: String,
    content: String,
    word: String,
    exercises: Vec<Exercise>,
}

impl Lesson {
    /// # Errors
    ///
    /// Returns `LessonError::NoExercises` when there is nothing to quiz.
    pub fn new(
        id: LessonId,
        title: impl Into<String>,
        content: impl Into<String>,
        word: impl Into<String>,
        exercises: Vec<Exercise>,
    ) -> Result<Self, LessonError> {
        if exercises.is_empty() {
            return Err(LessonError::NoExercises(id));
        }
        Ok(Self {
            id,
            title: title.into(),
            content: content.into(),
            word: word.into(),
            exercises,
        })
    }

    #[must_use]
    pub fn id(&self) -> LessonId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }
}

/// Result of a finished lesson quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    pub lesson: LessonId,
    pub correct: u32,
    pub total: u32,
}

impl QuizScore {
    /// Whole-number percentage, rounded half up. Zero for an empty quiz.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.correct * 100 + self.total / 2) / self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn exercise_answer_must_be_offered() {
        let err = Exercise::new("Pick the cat", options(&["perro", "gato"]), "pez").unwrap_err();
        assert_eq!(err, LessonError::AnswerNotOffered("pez".into()));
        assert_eq!(
            Exercise::new("  ", options(&["a", "b"]), "a").unwrap_err(),
            LessonError::EmptyQuestion
        );
        assert_eq!(
            Exercise::new("Only one", options(&["a"]), "a").unwrap_err(),
            LessonError::TooFewOptions
        );
    }

    #[test]
    fn choice_matches_exactly() {
        let exercise = Exercise::new("Pick the cat", options(&["perro", "gato"]), "gato").unwrap();
        assert!(exercise.is_correct("gato"));
        assert!(!exercise.is_correct("Gato"));
    }

    #[test]
    fn lesson_without_exercises_is_rejected() {
        let err = Lesson::new(LessonId::new(3), "Colours", "", "rojo", Vec::new()).unwrap_err();
        assert_eq!(err, LessonError::NoExercises(LessonId::new(3)));
    }

    #[test]
    fn score_percent_rounds() {
        let score = QuizScore {
            lesson: LessonId::default(),
            correct: 2,
            total: 3,
        };
        assert_eq!(score.percent(), 67);
        assert_eq!(
            QuizScore {
                total: 0,
                ..score
            }
            .percent(),
            0
        );
    }
}
