use dioxus::prelude::*;
use futures_util::StreamExt;

use lingua_core::model::{RecallRating, WordKey};
use services::{IdleReason, ReviewSession, SessionEffect};

use crate::context::AppContext;
use crate::views::components::{LostAnswersNotice, ProgressBar, StatTile};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{DueItemVm, ReviewCardVm, ReviewIntent, ReviewPageVm, map_review_page};

#[cfg(test)]
pub(crate) type ReviewTestHandles =
    crate::views::test_handles::TestHandles<ReviewIntent, ReviewSession>;

#[component]
pub fn ReviewView() -> Element {
    let ctx = use_context::<AppContext>();
    let clock = ctx.clock();
    let review_loop = ctx.review_loop();

    let session = use_signal(ReviewSession::new);
    let error = use_signal(|| None::<ViewError>);

    let review_loop_for_resource = review_loop.clone();
    let resource = use_resource(move || {
        let review_loop = review_loop_for_resource.clone();
        let mut session = session;
        async move {
            match review_loop.fetch().await {
                Ok(snapshot) => {
                    session.write().apply_snapshot(snapshot);
                    Ok(())
                }
                Err(err) => {
                    session.write().record_load_failure(err.to_string());
                    Err(ViewError::Unavailable)
                }
            }
        }
    });

    // A single consumer keeps batches in answer order, refresh included.
    let review_loop_for_effects = review_loop.clone();
    let effects = use_coroutine(
        move |mut batches: UnboundedReceiver<Vec<SessionEffect<WordKey>>>| {
            let review_loop = review_loop_for_effects.clone();
            let mut session = session;
            async move {
                while let Some(batch) = batches.next().await {
                    let report = review_loop.execute(batch).await;
                    let mut guard = session.write();
                    report.apply_to(&mut guard);
                }
            }
        },
    );

    let dispatch_intent = use_callback(move |intent: ReviewIntent| {
        let mut session = session;
        let mut error = error;
        let mut resource = resource;

        match intent {
            ReviewIntent::Begin => {
                let result = session.write().begin();
                error.set(result.err().as_ref().map(ViewError::from));
            }
            ReviewIntent::Reveal => {
                let result = session.write().reveal();
                error.set(result.err().as_ref().map(ViewError::from));
            }
            ReviewIntent::Rate(rating) => {
                let result = session.write().submit(rating.is_correct());
                let batch = match result {
                    Ok(batch) => batch,
                    Err(err) => {
                        error.set(Some(ViewError::from(&err)));
                        return;
                    }
                };
                error.set(None);
                // The cursor already moved; outcomes and the refresh run behind it.
                effects.send(batch);
            }
            ReviewIntent::DismissLost => session.write().clear_submit_failures(),
            ReviewIntent::Exit => {
                session.write().exit();
                error.set(None);
            }
            ReviewIntent::Reload => {
                error.set(None);
                resource.restart();
            }
        }
    });

    #[cfg(test)]
    crate::views::test_handles::use_test_handles(dispatch_intent, session);

    let state = view_state_from_resource(&resource);
    let page = map_review_page(&session.read(), clock);
    let loaded = page.summary.is_some();

    rsx! {
        div { class: "page review-page",
            h2 { "Spaced Review" }
            p { class: "page-subtitle", "Review vocabulary on the schedule your answers earn." }

            if let Some(err) = *error.read() {
                p { class: "error", "{err.message()}" }
            }
            LostAnswersNotice {
                count: page.lost_outcomes.len(),
                on_dismiss: move |()| dispatch_intent.call(ReviewIntent::DismissLost),
            }

            if let Some(card) = page.card.clone() {
                ReviewCard { card, on_intent: dispatch_intent }
            } else if loaded {
                ReviewIdle { page: page.clone(), on_intent: dispatch_intent }
            } else {
                match state {
                    ViewState::Idle => rsx! {
                        p { "Idle" }
                    },
                    ViewState::Loading => rsx! {
                        p { "Loading..." }
                    },
                    ViewState::Ready(()) => rsx! {
                        p { "No review data." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            id: "review-retry",
                            r#type: "button",
                            onclick: move |_| dispatch_intent.call(ReviewIntent::Reload),
                            "Retry"
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn ReviewIdle(page: ReviewPageVm, on_intent: EventHandler<ReviewIntent>) -> Element {
    let ReviewPageVm {
        summary,
        due,
        due_total,
        can_begin,
        idle_reason,
        load_error,
        ..
    } = page;

    rsx! {
        if load_error.is_some() {
            div { class: "notice",
                p { "Could not refresh your review data. Showing the last known state." }
                button {
                    class: "btn btn-secondary",
                    id: "review-retry",
                    r#type: "button",
                    onclick: move |_| on_intent.call(ReviewIntent::Reload),
                    "Retry"
                }
            }
        }
        if let Some(summary) = summary {
            div { class: "stat-grid",
                StatTile { label: "Total words", value: "{summary.total}" }
                StatTile { label: "Pending review", value: "{summary.pending}" }
                StatTile { label: "Reviews completed", value: "{summary.completed}" }
                StatTile { label: "Success rate", value: "{summary.success_rate}" }
            }
        }
        match idle_reason {
            Some(IdleReason::Completed) => rsx! {
                div { class: "review-empty",
                    p { "Session complete. Nothing else is due right now." }
                    p { "Come back later to keep learning." }
                }
            },
            Some(IdleReason::NothingDue) => rsx! {
                div { class: "review-empty",
                    p { "No words to review right now." }
                    p { "Come back later to keep learning." }
                }
            },
            None => rsx! {
                h3 { "Words to review today ({due_total})" }
                ul { class: "due-list",
                    for item in due {
                        DueRow { item }
                    }
                }
                button {
                    class: "btn btn-primary",
                    id: "review-begin",
                    r#type: "button",
                    disabled: !can_begin,
                    onclick: move |_| on_intent.call(ReviewIntent::Begin),
                    "Start review"
                }
            },
        }
    }
}

#[component]
fn DueRow(item: DueItemVm) -> Element {
    rsx! {
        li { class: "due-row",
            span { class: "due-row__word", "{item.word}" }
            span { class: "due-row__meta", "Difficulty: {item.difficulty}" }
            span { class: "due-row__meta", "Reviews: {item.exposures}" }
            span { class: "due-row__meta", "{item.due}" }
        }
    }
}

#[component]
fn ReviewCard(card: ReviewCardVm, on_intent: EventHandler<ReviewIntent>) -> Element {
    rsx! {
        div { class: "review-session",
            div { class: "review-session__progress",
                ProgressBar { percent: card.progress_percent }
                span { "{card.position}" }
            }
            div { class: "review-card",
                h2 { class: "review-card__word", "{card.word}" }
                span { class: "review-card__difficulty", "{card.difficulty} {card.stars}" }
                p { "{card.exposures}" }
                p { "{card.next_review}" }
            }
            if card.revealed {
                p { class: "review-remember", "How well did you remember?" }
                div { class: "review-ratings",
                    for rating in RecallRating::ALL {
                        RatingButton { rating, on_intent }
                    }
                }
            } else {
                button {
                    class: "btn btn-primary",
                    id: "review-reveal",
                    r#type: "button",
                    onclick: move |_| on_intent.call(ReviewIntent::Reveal),
                    "Show answer"
                }
            }
            button {
                class: "btn btn-ghost",
                id: "review-exit",
                r#type: "button",
                onclick: move |_| on_intent.call(ReviewIntent::Exit),
                "Exit"
            }
        }
    }
}

#[component]
fn RatingButton(rating: RecallRating, on_intent: EventHandler<ReviewIntent>) -> Element {
    let (class, id) = match rating {
        RecallRating::Forgot => ("review-rating review-rating--forgot", "review-rate-forgot"),
        RecallRating::Hard => ("review-rating review-rating--hard", "review-rate-hard"),
        RecallRating::Good => ("review-rating review-rating--good", "review-rate-good"),
    };
    rsx! {
        button {
            class,
            id,
            r#type: "button",
            onclick: move |_| on_intent.call(ReviewIntent::Rate(rating)),
            "{rating.label()}"
        }
    }
}
