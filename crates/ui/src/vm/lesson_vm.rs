use services::{LessonQuiz, QuizStage, QuizSubmission};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LessonIntent {
    Select(String),
    Check,
    Next,
    Reload,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    pub expected: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExerciseVm {
    pub question: String,
    pub options: Vec<OptionVm>,
    /// Options are frozen while feedback shows.
    pub locked: bool,
    pub feedback: Option<FeedbackVm>,
    pub action: LessonIntent,
    pub action_label: &'static str,
    pub can_act: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResultVm {
    pub word: String,
    pub percent: String,
    pub summary: String,
    pub submission: QuizSubmission,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonPageVm {
    pub title: String,
    pub content: String,
    pub position: String,
    pub progress_percent: u32,
    pub exercise: Option<ExerciseVm>,
    pub result: Option<QuizResultVm>,
}

fn map_exercise(quiz: &LessonQuiz) -> Option<ExerciseVm> {
    let exercise = quiz.exercise()?;
    let selected = quiz.selected();
    let feedback = match quiz.stage() {
        QuizStage::Feedback { correct } => Some(FeedbackVm {
            correct,
            expected: exercise.answer().to_string(),
        }),
        _ => None,
    };
    let (action, action_label, can_act) = match (&feedback, quiz.is_last()) {
        (None, _) => (LessonIntent::Check, "Check", selected.is_some()),
        (Some(_), false) => (LessonIntent::Next, "Next", true),
        (Some(_), true) => (LessonIntent::Next, "Finish", true),
    };

    Some(ExerciseVm {
        question: exercise.question().to_string(),
        options: exercise
            .options()
            .iter()
            .map(|label| OptionVm {
                label: label.clone(),
                selected: selected == Some(label.as_str()),
            })
            .collect(),
        locked: feedback.is_some(),
        feedback,
        action,
        action_label,
        can_act,
    })
}

#[must_use]
pub fn map_lesson_page(quiz: &LessonQuiz) -> LessonPageVm {
    let lesson = quiz.lesson();
    let total = quiz.total();
    let shown = (quiz.position() + 1).min(total);
    let result = (quiz.stage() == QuizStage::Completed).then(|| {
        let score = quiz.score();
        QuizResultVm {
            word: lesson.word().to_uppercase(),
            percent: format!("{}%", score.percent()),
            summary: format!("{} of {} answers correct", score.correct, score.total),
            submission: quiz.submission(),
        }
    });

    LessonPageVm {
        title: lesson.title().to_string(),
        content: lesson.content().to_string(),
        position: format!("{shown} of {total}"),
        progress_percent: u32::try_from(shown * 100 / total.max(1)).unwrap_or(100),
        exercise: map_exercise(quiz),
        result,
    }
}
