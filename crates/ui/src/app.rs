use dioxus::prelude::*;

use crate::context::AppContext;
use crate::page::Page;
use crate::views::{
    FlashcardsView, LessonView, ProgressView, ReviewView, SentenceChallengeView,
    WordChallengeView,
};

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let page = ctx.start_page();

    rsx! {
        document::Title { "Lingua · {page.title()}" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                PageView { page }
            }
        }
    }
}

#[component]
fn PageView(page: Page) -> Element {
    match page {
        Page::Review => rsx! { ReviewView {} },
        Page::Flashcards => rsx! { FlashcardsView {} },
        Page::Words => rsx! { WordChallengeView {} },
        Page::Sentences => rsx! { SentenceChallengeView {} },
        Page::Lesson => rsx! { LessonView {} },
        Page::Progress => rsx! { ProgressView {} },
    }
}
