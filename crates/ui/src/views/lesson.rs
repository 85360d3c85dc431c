use dioxus::prelude::*;

use services::{LessonQuiz, QuizSubmission};

use crate::context::AppContext;
use crate::views::components::ProgressBar;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ExerciseVm, LessonIntent, OptionVm, QuizResultVm, map_lesson_page};

#[component]
pub fn LessonView() -> Element {
    let ctx = use_context::<AppContext>();
    let lessons = ctx.lessons();
    let lesson_id = ctx.lesson_id();

    let quiz = use_signal(|| None::<LessonQuiz>);
    let error = use_signal(|| None::<ViewError>);

    let lessons_for_resource = lessons.clone();
    let resource = use_resource(move || {
        let lessons = lessons_for_resource.clone();
        let mut quiz = quiz;
        async move {
            match lessons.load(lesson_id).await {
                Ok(loaded) => {
                    quiz.set(Some(loaded));
                    Ok(())
                }
                Err(err) => Err(ViewError::from(&err)),
            }
        }
    });

    let dispatch_intent = use_callback(move |intent: LessonIntent| {
        let mut quiz = quiz;
        let mut error = error;
        let mut resource = resource;

        let result = match intent {
            LessonIntent::Reload => {
                error.set(None);
                resource.restart();
                return;
            }
            LessonIntent::Select(choice) => quiz.write().as_mut().map(|q| q.select(choice)),
            LessonIntent::Check => quiz.write().as_mut().map(|q| q.check().map(|_| ())),
            LessonIntent::Next => {
                let advanced = quiz.write().as_mut().map(LessonQuiz::advance);
                match advanced {
                    Some(Ok(Some(score))) => {
                        let lessons = lessons.clone();
                        spawn(async move {
                            let sent = lessons.send_score(score).await;
                            if let Some(q) = quiz.write().as_mut() {
                                q.record_submission(sent.is_ok());
                            }
                        });
                        Some(Ok(()))
                    }
                    other => other.map(|step| step.map(|_| ())),
                }
            }
        };
        error.set(match result {
            Some(Err(err)) => Some(ViewError::from(&err)),
            _ => None,
        });
    });

    #[cfg(test)]
    crate::views::test_handles::use_test_handles(dispatch_intent, quiz);

    let state = view_state_from_resource(&resource);
    let page = quiz.read().as_ref().map(map_lesson_page);

    rsx! {
        div { class: "page lesson-page",
            if let Some(err) = *error.read() {
                p { class: "error", "{err.message()}" }
            }

            if let Some(page) = page {
                if let Some(result) = page.result.clone() {
                    QuizResult { result }
                } else {
                    div { class: "lesson-header",
                        h2 { "{page.title}" }
                        p { class: "lesson-definition", "{page.content}" }
                        div { class: "lesson-progress",
                            span { "{page.position}" }
                            ProgressBar { percent: page.progress_percent }
                        }
                    }
                    if let Some(exercise) = page.exercise {
                        ExerciseCard { exercise, on_intent: dispatch_intent }
                    }
                }
            } else {
                match state {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        p { "Loading lesson..." }
                    },
                    ViewState::Ready(()) => rsx! {
                        p { "Lesson not found." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            id: "lesson-retry",
                            r#type: "button",
                            onclick: move |_| dispatch_intent.call(LessonIntent::Reload),
                            "Retry"
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn ExerciseCard(exercise: ExerciseVm, on_intent: EventHandler<LessonIntent>) -> Element {
    let ExerciseVm {
        question,
        options,
        locked,
        feedback,
        action,
        action_label,
        can_act,
    } = exercise;

    rsx! {
        div { class: "exercise-card",
            h3 { "{question}" }
            div { class: "options",
                for option in options {
                    OptionRow { option, locked, on_intent }
                }
            }
            if let Some(feedback) = feedback {
                if feedback.correct {
                    p { class: "feedback correct", "✓ Correct!" }
                } else {
                    div { class: "feedback incorrect",
                        p { "✗ Incorrect" }
                        p { "The correct answer is: {feedback.expected}" }
                    }
                }
            }
        }
        button {
            class: "btn btn-primary",
            id: "lesson-action",
            r#type: "button",
            disabled: !can_act,
            onclick: move |_| on_intent.call(action.clone()),
            "{action_label}"
        }
    }
}

#[component]
fn OptionRow(option: OptionVm, locked: bool, on_intent: EventHandler<LessonIntent>) -> Element {
    let class = if option.selected {
        "option selected"
    } else {
        "option"
    };
    let choice = option.label.clone();
    rsx! {
        label { class,
            input {
                r#type: "radio",
                name: "answer",
                value: "{option.label}",
                checked: option.selected,
                disabled: locked,
                onchange: move |_| on_intent.call(LessonIntent::Select(choice.clone())),
            }
            span { class: "option-text", "{option.label}" }
        }
    }
}

#[component]
fn QuizResult(result: QuizResultVm) -> Element {
    rsx! {
        div { class: "completion-card",
            h2 { "Lesson complete! 🎉" }
            p { class: "word-learned",
                "Word learned: "
                strong { "{result.word}" }
            }
            div { class: "score-circle",
                span { class: "percentage", "{result.percent}" }
            }
            p { "{result.summary}" }
            match result.submission {
                QuizSubmission::Pending => rsx! {
                    p { class: "notice", "Saving your score..." }
                },
                QuizSubmission::Failed => rsx! {
                    p { class: "notice notice--warning", "Your score could not be saved. Check your connection." }
                },
                QuizSubmission::Saved | QuizSubmission::NotSent => rsx! {},
            }
        }
    }
}
