//! Lesson reading followed by a multiple-choice quiz.

use std::sync::Arc;

use api::LessonSource;
use lingua_core::model::{Exercise, Lesson, LessonId, QuizScore};

use crate::error::QuizError;

/// Where the learner is on the current exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStage {
    Answering,
    Feedback { correct: bool },
    Completed,
}

/// Delivery of the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizSubmission {
    NotSent,
    Pending,
    Saved,
    Failed,
}

/// One pass through a lesson's exercises, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonQuiz {
    lesson: Lesson,
    current: usize,
    selected: Option<String>,
    stage: QuizStage,
    correct: u32,
    submission: QuizSubmission,
}

impl LessonQuiz {
    #[must_use]
    pub fn new(lesson: Lesson) -> Self {
        Self {
            lesson,
            current: 0,
            selected: None,
            stage: QuizStage::Answering,
            correct: 0,
            submission: QuizSubmission::NotSent,
        }
    }

    #[must_use]
    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    #[must_use]
    pub fn stage(&self) -> QuizStage {
        self.stage
    }

    #[must_use]
    pub fn submission(&self) -> QuizSubmission {
        self.submission
    }

    /// Zero-based index of the exercise on screen.
    #[must_use]
    pub fn position(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.lesson.exercises().len()
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.total()
    }

    #[must_use]
    pub fn exercise(&self) -> Option<&Exercise> {
        match self.stage {
            QuizStage::Completed => None,
            _ => self.lesson.exercises().get(self.current),
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn score(&self) -> QuizScore {
        QuizScore {
            lesson: self.lesson.id(),
            correct: self.correct,
            total: u32::try_from(self.total()).unwrap_or(u32::MAX),
        }
    }

    /// Pick an option. Choices are locked once the answer is checked.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::UnknownOption` for a choice not offered,
    /// `QuizError::AlreadyChecked` after checking and `QuizError::Finished`
    /// once the quiz is over.
    pub fn select(&mut self, choice: impl Into<String>) -> Result<(), QuizError> {
        let choice = choice.into();
        match self.stage {
            QuizStage::Answering => {}
            QuizStage::Feedback { .. } => return Err(QuizError::AlreadyChecked),
            QuizStage::Completed => return Err(QuizError::Finished),
        }
        let offered = self
            .exercise()
            .is_some_and(|exercise| exercise.options().contains(&choice));
        if !offered {
            return Err(QuizError::UnknownOption(choice));
        }
        self.selected = Some(choice);
        Ok(())
    }

    /// Judge the selected option and show feedback.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoSelection` before a choice is made,
    /// `QuizError::AlreadyChecked` on a second check and
    /// `QuizError::Finished` once the quiz is over.
    pub fn check(&mut self) -> Result<bool, QuizError> {
        match self.stage {
            QuizStage::Answering => {}
            QuizStage::Feedback { .. } => return Err(QuizError::AlreadyChecked),
            QuizStage::Completed => return Err(QuizError::Finished),
        }
        let (Some(choice), Some(exercise)) = (self.selected.as_deref(), self.exercise()) else {
            return Err(QuizError::NoSelection);
        };
        let correct = exercise.is_correct(choice);
        if correct {
            self.correct += 1;
        }
        self.stage = QuizStage::Feedback { correct };
        Ok(correct)
    }

    /// Move past the feedback. Returns the score to send when the last
    /// exercise was just answered.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotChecked` unless feedback is showing.
    pub fn advance(&mut self) -> Result<Option<QuizScore>, QuizError> {
        if !matches!(self.stage, QuizStage::Feedback { .. }) {
            return Err(QuizError::NotChecked);
        }
        self.selected = None;
        if self.is_last() {
            self.stage = QuizStage::Completed;
            self.submission = QuizSubmission::Pending;
            return Ok(Some(self.score()));
        }
        self.current += 1;
        self.stage = QuizStage::Answering;
        Ok(None)
    }

    pub fn record_submission(&mut self, saved: bool) {
        if self.submission == QuizSubmission::Pending {
            self.submission = if saved {
                QuizSubmission::Saved
            } else {
                QuizSubmission::Failed
            };
        }
    }
}

/// Loads lessons and reports finished quizzes.
#[derive(Clone)]
pub struct LessonService {
    source: Arc<dyn LessonSource>,
}

impl LessonService {
    #[must_use]
    pub fn new(source: Arc<dyn LessonSource>) -> Self {
        Self { source }
    }

    /// # Errors
    ///
    /// Returns `QuizError::Api` if the lesson cannot be fetched.
    pub async fn load(&self, id: LessonId) -> Result<LessonQuiz, QuizError> {
        let lesson = self.source.fetch_lesson(id).await.map_err(|err| {
            log::error!("failed to load lesson {id}: {err}");
            QuizError::from(err)
        })?;
        Ok(LessonQuiz::new(lesson))
    }

    /// Send the final score of a completed quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Api` when the server does not acknowledge the score.
    pub async fn send_score(&self, score: QuizScore) -> Result<(), QuizError> {
        self.source.submit_quiz(score).await.map_err(|err| {
            log::warn!("quiz score for lesson {} not saved: {err}", score.lesson);
            QuizError::from(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{FailPoint, InMemoryApi};

    fn exercise(question: &str, options: &[&str], answer: &str) -> Exercise {
        let options = options.iter().map(ToString::to_string).collect();
        Exercise::new(question, options, answer).unwrap()
    }

    fn lesson() -> Lesson {
        Lesson::new(
            LessonId::new(1),
            "Pets",
            "Common pets in Spanish.",
            "gato",
            vec![
                exercise("Cat?", &["gato", "perro"], "gato"),
                exercise("Dog?", &["gato", "perro"], "perro"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn walks_exercises_and_scores() {
        let mut quiz = LessonQuiz::new(lesson());
        assert!(matches!(quiz.check(), Err(QuizError::NoSelection)));

        quiz.select("gato").unwrap();
        assert!(quiz.check().unwrap());
        assert!(matches!(quiz.select("perro"), Err(QuizError::AlreadyChecked)));
        assert_eq!(quiz.advance().unwrap(), None);
        assert_eq!(quiz.position(), 1);
        assert_eq!(quiz.selected(), None);

        quiz.select("gato").unwrap();
        assert!(!quiz.check().unwrap());
        let score = quiz.advance().unwrap().unwrap();
        assert_eq!(score.correct, 1);
        assert_eq!(score.total, 2);
        assert_eq!(quiz.stage(), QuizStage::Completed);
        assert_eq!(quiz.submission(), QuizSubmission::Pending);
        assert!(quiz.exercise().is_none());
    }

    #[test]
    fn rejects_choices_not_offered_and_early_advance() {
        let mut quiz = LessonQuiz::new(lesson());
        assert!(matches!(quiz.select("pez"), Err(QuizError::UnknownOption(_))));
        assert!(matches!(quiz.advance(), Err(QuizError::NotChecked)));
    }

    #[tokio::test]
    async fn submit_records_outcome() {
        let repo = InMemoryApi::new().with_lesson(lesson());
        let service = LessonService::new(Arc::new(repo.clone()));
        let mut quiz = service.load(LessonId::new(1)).await.unwrap();
        for choice in ["gato", "perro"] {
            quiz.select(choice).unwrap();
            quiz.check().unwrap();
            quiz.advance().unwrap();
        }
        let score = quiz.score();
        let sent = service.send_score(score).await;
        quiz.record_submission(sent.is_ok());
        assert_eq!(quiz.submission(), QuizSubmission::Saved);
        assert_eq!(repo.submitted_quizzes(), vec![score]);
    }

    #[tokio::test]
    async fn failed_submit_is_recorded() {
        let repo = InMemoryApi::new().with_lesson(lesson());
        repo.fail(FailPoint::SubmitQuiz);
        let service = LessonService::new(Arc::new(repo.clone()));
        let mut quiz = LessonQuiz::new(lesson());
        quiz.record_submission(false);
        assert_eq!(quiz.submission(), QuizSubmission::NotSent);

        for choice in ["perro", "perro"] {
            quiz.select(choice).unwrap();
            quiz.check().unwrap();
            quiz.advance().unwrap();
        }
        let sent = service.send_score(quiz.score()).await;
        assert!(matches!(sent, Err(QuizError::Api(_))));
        quiz.record_submission(sent.is_ok());
        assert_eq!(quiz.submission(), QuizSubmission::Failed);
        assert!(repo.submitted_quizzes().is_empty());
    }

    #[tokio::test]
    async fn missing_lesson_is_an_api_error() {
        let service = LessonService::new(Arc::new(InMemoryApi::new()));
        assert!(matches!(
            service.load(LessonId::new(9)).await,
            Err(QuizError::Api(_))
        ));
    }
}
