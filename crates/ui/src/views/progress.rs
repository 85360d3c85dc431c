use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::components::{ProgressBar, StatTile};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{CategoryVm, ProgressVm, map_progress};

#[component]
pub fn ProgressView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();

    let mut resource = use_resource(move || {
        let progress = progress.clone();
        async move {
            progress
                .load()
                .await
                .map(|learner| map_progress(&learner))
                .map_err(|err| ViewError::from(&err))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page progress-page",
            h2 { "My Progress" }
            p { class: "page-subtitle", "Track how your learning is going." }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(vm) => rsx! {
                    ProgressBody { vm }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        id: "progress-retry",
                        r#type: "button",
                        onclick: move |_| resource.restart(),
                        "Retry"
                    }
                },
            }
        }
    }
}

#[component]
fn ProgressBody(vm: ProgressVm) -> Element {
    let ProgressVm {
        overall,
        lessons,
        streak,
        categories,
        tips,
    } = vm;

    rsx! {
        div { class: "stat-grid",
            StatTile { label: "Overall progress", value: overall }
            StatTile { label: "Lessons", value: lessons }
            StatTile { label: "Streak", value: streak }
        }
        h3 { "By category" }
        div { class: "category-list",
            for category in categories {
                CategoryRow { category }
            }
        }
        h3 { "Tips" }
        ul { class: "progress-tips",
            for tip in tips {
                li { "{tip}" }
            }
        }
    }
}

#[component]
fn CategoryRow(category: CategoryVm) -> Element {
    rsx! {
        div { class: "category-row",
            div { class: "category-row__header",
                h4 { "{category.title}" }
                span { "{category.percent}" }
            }
            ProgressBar { percent: category.width }
            p { class: "category-row__detail", "{category.detail}" }
        }
    }
}
