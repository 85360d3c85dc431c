use dioxus::prelude::*;

use lingua_core::model::SentenceLevel;
use services::{SentenceAttempt, SentenceFlow, SentenceStage};

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{SentenceIntent, sentence_score_label};

#[component]
pub fn SentenceChallengeView() -> Element {
    let ctx = use_context::<AppContext>();
    let challenges = ctx.sentence_challenges();

    let flow = use_signal(SentenceFlow::new);
    let error = use_signal(|| None::<ViewError>);
    let busy = use_signal(|| false);

    let dispatch_intent = use_callback(move |intent: SentenceIntent| {
        let mut flow = flow;
        let mut error = error;
        let mut busy = busy;

        match intent {
            SentenceIntent::EditKeyword(value) => flow.write().set_keyword(value),
            SentenceIntent::SelectLevel(level) => flow.write().set_level(level),
            SentenceIntent::EditSentence(value) => flow.write().set_sentence(value),
            SentenceIntent::Save => {
                let result = flow.write().save_attempt();
                error.set(result.err().as_ref().map(ViewError::from));
            }
            SentenceIntent::Reset => {
                flow.write().reset();
                error.set(None);
            }
            SentenceIntent::Generate => {
                if busy() {
                    return;
                }
                let (round, request) = {
                    let current = flow.read();
                    (current.round(), current.request())
                };
                let (keyword, level) = match request {
                    Ok(request) => request,
                    Err(err) => {
                        error.set(Some(ViewError::from(&err)));
                        return;
                    }
                };
                busy.set(true);
                let challenges = challenges.clone();
                spawn(async move {
                    match challenges.fetch_challenge(&keyword, level).await {
                        Ok(challenge) => {
                            flow.write().accept_challenge(round, challenge);
                            error.set(None);
                        }
                        Err(err) => error.set(Some(ViewError::from(&err))),
                    }
                    busy.set(false);
                });
            }
            SentenceIntent::Validate => {
                if busy() {
                    return;
                }
                let (round, request) = {
                    let current = flow.read();
                    (current.round(), current.sentence_to_validate())
                };
                let (sentence, keyword) = match request {
                    Ok(request) => request,
                    Err(err) => {
                        error.set(Some(ViewError::from(&err)));
                        return;
                    }
                };
                busy.set(true);
                let challenges = challenges.clone();
                spawn(async move {
                    match challenges.fetch_verdict(&sentence, &keyword).await {
                        // An edit made while checking keeps the learner composing.
                        Ok(verdict) => {
                            flow.write().accept_verdict(round, verdict);
                            error.set(None);
                        }
                        Err(err) => error.set(Some(ViewError::from(&err))),
                    }
                    busy.set(false);
                });
            }
        }
    });

    #[cfg(test)]
    crate::views::test_handles::use_test_handles(dispatch_intent, flow);

    let flow_read = flow.read();
    let score = sentence_score_label(&flow_read);
    let stage = flow_read.stage().clone();
    let history = flow_read.history().to_vec();
    drop(flow_read);

    rsx! {
        div { class: "page sentence-page",
            h2 { "Sentence Builder" }
            p { class: "page-subtitle", "Write a sentence around a keyword." }
            p { class: "sentence-score", "{score}" }

            if let Some(err) = *error.read() {
                p { class: "error", "{err.message()}" }
            }

            match stage {
                SentenceStage::Setup { keyword, level } => rsx! {
                    div { class: "sentence-setup",
                        label { r#for: "sentence-keyword", "Keyword" }
                        input {
                            id: "sentence-keyword",
                            r#type: "text",
                            value: "{keyword}",
                            oninput: move |evt| dispatch_intent.call(SentenceIntent::EditKeyword(evt.value())),
                        }
                        select {
                            id: "sentence-level",
                            value: "{level.code()}",
                            onchange: move |evt| {
                                let level = SentenceLevel::from_code(&evt.value());
                                dispatch_intent.call(SentenceIntent::SelectLevel(level));
                            },
                            for option_level in SentenceLevel::ALL {
                                option {
                                    value: "{option_level.code()}",
                                    selected: option_level == level,
                                    "{option_level.label()}"
                                }
                            }
                        }
                        button {
                            class: "btn btn-primary",
                            id: "sentence-generate",
                            r#type: "button",
                            disabled: busy(),
                            onclick: move |_| dispatch_intent.call(SentenceIntent::Generate),
                            "Create challenge"
                        }
                    }
                },
                SentenceStage::Composing { challenge, sentence } => rsx! {
                    div { class: "sentence-composing",
                        p { class: "sentence-instruction", "{challenge.instruction}" }
                        p { class: "sentence-level", "Level: {challenge.level}" }
                        textarea {
                            id: "sentence-input",
                            value: "{sentence}",
                            oninput: move |evt| dispatch_intent.call(SentenceIntent::EditSentence(evt.value())),
                        }
                        button {
                            class: "btn btn-primary",
                            id: "sentence-validate",
                            r#type: "button",
                            disabled: busy(),
                            onclick: move |_| dispatch_intent.call(SentenceIntent::Validate),
                            "Check sentence"
                        }
                        button {
                            class: "btn btn-ghost",
                            id: "sentence-reset",
                            r#type: "button",
                            onclick: move |_| dispatch_intent.call(SentenceIntent::Reset),
                            "Start over"
                        }
                    }
                },
                SentenceStage::Validated { challenge, sentence, verdict } => {
                    let verdict_class = if verdict.valid {
                        "verdict verdict--ok"
                    } else {
                        "verdict verdict--miss"
                    };
                    rsx! {
                        div { class: "sentence-validated",
                            p { class: "sentence-instruction", "{challenge.instruction}" }
                            textarea {
                                id: "sentence-input",
                                value: "{sentence}",
                                oninput: move |evt| dispatch_intent.call(SentenceIntent::EditSentence(evt.value())),
                            }
                            p { class: verdict_class, "{verdict.message}" }
                            if !verdict.has_keyword {
                                p { class: "verdict-hint", "Use the keyword \"{challenge.keyword}\" in your sentence." }
                            }
                            button {
                                class: "btn btn-primary",
                                id: "sentence-save",
                                r#type: "button",
                                onclick: move |_| dispatch_intent.call(SentenceIntent::Save),
                                "Save attempt"
                            }
                            button {
                                class: "btn btn-ghost",
                                id: "sentence-reset",
                                r#type: "button",
                                onclick: move |_| dispatch_intent.call(SentenceIntent::Reset),
                                "Start over"
                            }
                        }
                    }
                }
            }

            if !history.is_empty() {
                h3 { "Saved sentences" }
                ul { class: "sentence-history",
                    for attempt in history {
                        SavedSentence { attempt }
                    }
                }
            }
        }
    }
}

#[component]
fn SavedSentence(attempt: SentenceAttempt) -> Element {
    let mark = if attempt.valid { "✓" } else { "✗" };
    rsx! {
        li { class: "sentence-history__row",
            span { "{mark}" }
            span { class: "sentence-history__keyword", "{attempt.keyword}" }
            p { "{attempt.sentence}" }
        }
    }
}
