use dioxus::prelude::*;
use futures_util::StreamExt;

use lingua_core::model::FlashcardId;
use services::{FlashcardSession, SessionEffect};

use crate::context::AppContext;
use crate::views::components::{LostAnswersNotice, ProgressBar, StatTile};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    DeckRowVm, DeckStatsVm, FlashcardCardVm, FlashcardIntent, FlashcardPageVm, map_flashcard_page,
};

#[component]
pub fn FlashcardsView() -> Element {
    let ctx = use_context::<AppContext>();
    let flashcard_loop = ctx.flashcard_loop();

    let session = use_signal(FlashcardSession::new);
    let error = use_signal(|| None::<ViewError>);

    let loop_for_resource = flashcard_loop.clone();
    let resource = use_resource(move || {
        let flashcard_loop = loop_for_resource.clone();
        let mut session = session;
        async move {
            match flashcard_loop.fetch().await {
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

    let loop_for_effects = flashcard_loop.clone();
    let effects = use_coroutine(
        move |mut batches: UnboundedReceiver<Vec<SessionEffect<FlashcardId>>>| {
            let flashcard_loop = loop_for_effects.clone();
            let mut session = session;
            async move {
                while let Some(batch) = batches.next().await {
                    let report = flashcard_loop.execute(batch).await;
                    let mut guard = session.write();
                    report.apply_to(&mut guard);
                }
            }
        },
    );

    let dispatch_intent = use_callback(move |intent: FlashcardIntent| {
        let mut session = session;
        let mut error = error;
        let mut resource = resource;

        match intent {
            FlashcardIntent::Begin => {
                let result = session.write().begin();
                error.set(result.err().as_ref().map(ViewError::from));
            }
            FlashcardIntent::Flip => {
                let result = session.write().reveal();
                error.set(result.err().as_ref().map(ViewError::from));
            }
            FlashcardIntent::Answer { correct } => {
                let result = session.write().submit(correct);
                match result {
                    Ok(batch) => {
                        error.set(None);
                        effects.send(batch);
                    }
                    Err(err) => error.set(Some(ViewError::from(&err))),
                }
            }
            FlashcardIntent::DismissLost => session.write().clear_submit_failures(),
            FlashcardIntent::Exit => {
                session.write().exit();
                error.set(None);
            }
            FlashcardIntent::Reload => {
                error.set(None);
                resource.restart();
            }
        }
    });

    #[cfg(test)]
    crate::views::test_handles::use_test_handles(dispatch_intent, session);

    let state = view_state_from_resource(&resource);
    let page = map_flashcard_page(&session.read());

    rsx! {
        div { class: "page flashcards-page",
            h2 { "Flashcards" }
            p { class: "page-subtitle", "Study vocabulary with interactive cards." }

            if let Some(err) = *error.read() {
                p { class: "error", "{err.message()}" }
            }
            LostAnswersNotice {
                count: page.lost_answers,
                on_dismiss: move |()| dispatch_intent.call(FlashcardIntent::DismissLost),
            }

            if let Some(card) = page.card.clone() {
                StudyCard { card, on_intent: dispatch_intent }
            } else if page.stats.is_some() {
                DeckOverview { page: page.clone(), on_intent: dispatch_intent }
            } else {
                match state {
                    ViewState::Idle => rsx! {
                        p { "Idle" }
                    },
                    ViewState::Loading => rsx! {
                        p { "Loading..." }
                    },
                    ViewState::Ready(()) => rsx! {
                        p { "No flashcards yet." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            id: "flashcards-retry",
                            r#type: "button",
                            onclick: move |_| dispatch_intent.call(FlashcardIntent::Reload),
                            "Retry"
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn DeckOverview(page: FlashcardPageVm, on_intent: EventHandler<FlashcardIntent>) -> Element {
    let FlashcardPageVm {
        stats,
        deck,
        can_begin,
        load_error,
        ..
    } = page;

    rsx! {
        if load_error.is_some() {
            p { class: "notice", "Could not refresh the deck. Showing the last known state." }
        }
        if let Some(stats) = stats {
            DeckStats { stats }
        }
        if deck.is_empty() {
            p { "No flashcards available yet." }
        } else {
            h3 { "Your flashcards" }
            ul { class: "deck-list",
                for row in deck {
                    DeckRow { row }
                }
            }
            button {
                class: "btn btn-primary",
                id: "flashcards-begin",
                r#type: "button",
                disabled: !can_begin,
                onclick: move |_| on_intent.call(FlashcardIntent::Begin),
                "Start studying"
            }
        }
    }
}

#[component]
fn DeckStats(stats: DeckStatsVm) -> Element {
    rsx! {
        div { class: "stat-grid",
            StatTile { label: "Total cards", value: "{stats.total}" }
            StatTile { label: "Cards studied", value: "{stats.studied}" }
            StatTile { label: "Success rate", value: "{stats.success_rate}" }
            StatTile { label: "Correct answers", value: "{stats.correct}" }
        }
    }
}

#[component]
fn DeckRow(row: DeckRowVm) -> Element {
    rsx! {
        li { class: "deck-row",
            h4 { "{row.question}" }
            span { class: "deck-row__meta", "Difficulty: {row.difficulty}" }
            span { class: "deck-row__meta", "Correct: {row.record}" }
        }
    }
}

#[component]
fn StudyCard(card: FlashcardCardVm, on_intent: EventHandler<FlashcardIntent>) -> Element {
    rsx! {
        div { class: "flashcard-session",
            div { class: "flashcard-session__progress",
                ProgressBar { percent: card.progress_percent }
                span { "{card.position}" }
            }
            div { class: "flashcard",
                h2 { class: "flashcard__question", "{card.question}" }
                if let Some(answer) = card.answer {
                    h2 { class: "flashcard__answer", "{answer}" }
                    div { class: "flashcard__answers",
                        button {
                            class: "btn btn-danger",
                            id: "flashcards-missed",
                            r#type: "button",
                            onclick: move |_| on_intent.call(FlashcardIntent::Answer { correct: false }),
                            "Incorrect"
                        }
                        button {
                            class: "btn btn-success",
                            id: "flashcards-correct",
                            r#type: "button",
                            onclick: move |_| on_intent.call(FlashcardIntent::Answer { correct: true }),
                            "Correct"
                        }
                    }
                } else {
                    button {
                        class: "btn btn-primary",
                        id: "flashcards-flip",
                        r#type: "button",
                        onclick: move |_| on_intent.call(FlashcardIntent::Flip),
                        "Show answer"
                    }
                }
            }
            button {
                class: "btn btn-ghost",
                id: "flashcards-exit",
                r#type: "button",
                onclick: move |_| on_intent.call(FlashcardIntent::Exit),
                "Exit"
            }
        }
    }
}
