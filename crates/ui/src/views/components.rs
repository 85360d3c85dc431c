use dioxus::prelude::*;

#[component]
pub fn StatTile(label: &'static str, value: String) -> Element {
    rsx! {
        div { class: "stat-tile",
            h3 { class: "stat-tile__label", "{label}" }
            p { class: "stat-tile__value", "{value}" }
        }
    }
}

/// Horizontal bar; `percent` is clamped to `0..=100`.
#[component]
pub fn ProgressBar(percent: u32) -> Element {
    let width = percent.min(100);
    rsx! {
        div { class: "progress-bar",
            div { class: "progress-bar__fill", style: "width: {width}%" }
        }
    }
}

/// Shown when answers never reached the server.
#[component]
pub fn LostAnswersNotice(count: usize, on_dismiss: EventHandler<()>) -> Element {
    if count == 0 {
        return rsx! {};
    }
    let noun = if count == 1 { "answer was" } else { "answers were" };
    rsx! {
        div { class: "notice notice--warning",
            p { "{count} {noun} not saved. Check your connection." }
            button {
                class: "btn btn-ghost",
                id: "lost-answers-dismiss",
                r#type: "button",
                onclick: move |_| on_dismiss.call(()),
                "Dismiss"
            }
        }
    }
}
