use dioxus::prelude::*;

use services::{WordAttempt, WordFlow, WordStage};

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{WordIntent, letter_tiles, word_score_label};

#[component]
pub fn WordChallengeView() -> Element {
    let ctx = use_context::<AppContext>();
    let challenges = ctx.word_challenges();

    let flow = use_signal(WordFlow::new);
    let error = use_signal(|| None::<ViewError>);
    let busy = use_signal(|| false);

    let dispatch_intent = use_callback(move |intent: WordIntent| {
        let mut flow = flow;
        let mut error = error;
        let mut busy = busy;

        match intent {
            WordIntent::EditWord(value) => flow.write().set_word(value),
            WordIntent::EditAnswer(value) => flow.write().set_answer(value),
            WordIntent::Reset => {
                flow.write().reset();
                error.set(None);
            }
            WordIntent::Generate => {
                if busy() {
                    return;
                }
                let (round, word) = {
                    let current = flow.read();
                    (current.round(), current.word_to_generate())
                };
                let word = match word {
                    Ok(word) => word,
                    Err(err) => {
                        error.set(Some(ViewError::from(&err)));
                        return;
                    }
                };
                busy.set(true);
                let challenges = challenges.clone();
                spawn(async move {
                    match challenges.fetch_challenge(&word).await {
                        Ok(challenge) => {
                            // Dropped if the learner reset or edited meanwhile.
                            flow.write().accept_challenge(round, challenge);
                            error.set(None);
                        }
                        Err(err) => error.set(Some(ViewError::from(&err))),
                    }
                    busy.set(false);
                });
            }
            WordIntent::Verify => {
                if busy() {
                    return;
                }
                let (round, request) = {
                    let current = flow.read();
                    (current.round(), current.answer_to_verify())
                };
                let (target, answer) = match request {
                    Ok(request) => request,
                    Err(err) => {
                        error.set(Some(ViewError::from(&err)));
                        return;
                    }
                };
                busy.set(true);
                let challenges = challenges.clone();
                spawn(async move {
                    match challenges.fetch_verdict(&target, &answer).await {
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
    let score = word_score_label(&flow_read);
    let stage = flow_read.stage().clone();
    let history = flow_read.history().to_vec();
    drop(flow_read);

    rsx! {
        div { class: "page word-page",
            h2 { "Word Builder" }
            p { class: "page-subtitle", "Unscramble the letters to rebuild the word." }
            p { class: "word-score", "{score}" }

            if let Some(err) = *error.read() {
                p { class: "error", "{err.message()}" }
            }

            match stage {
                WordStage::Setup { word } => rsx! {
                    div { class: "word-setup",
                        label { r#for: "word-input", "Word to practise" }
                        input {
                            id: "word-input",
                            r#type: "text",
                            value: "{word}",
                            oninput: move |evt| dispatch_intent.call(WordIntent::EditWord(evt.value())),
                        }
                        button {
                            class: "btn btn-primary",
                            id: "word-generate",
                            r#type: "button",
                            disabled: busy(),
                            onclick: move |_| dispatch_intent.call(WordIntent::Generate),
                            "Create challenge"
                        }
                    }
                },
                WordStage::Solving { challenge, answer } => rsx! {
                    div { class: "word-solving",
                        p { class: "word-difficulty", "Difficulty: {challenge.difficulty.label()}" }
                        div { class: "letter-tiles",
                            for tile in letter_tiles(&challenge) {
                                span { class: "letter-tile", "{tile}" }
                            }
                        }
                        input {
                            id: "word-answer",
                            r#type: "text",
                            value: "{answer}",
                            oninput: move |evt| dispatch_intent.call(WordIntent::EditAnswer(evt.value())),
                        }
                        button {
                            class: "btn btn-primary",
                            id: "word-verify",
                            r#type: "button",
                            disabled: busy(),
                            onclick: move |_| dispatch_intent.call(WordIntent::Verify),
                            "Check"
                        }
                    }
                },
                WordStage::Verified { verdict, .. } => rsx! {
                    div { class: "word-verdict",
                        if verdict.correct {
                            p { class: "verdict verdict--ok", "Correct! The word was {verdict.expected}." }
                        } else {
                            p { class: "verdict verdict--miss",
                                "Not quite. You wrote {verdict.given}, the word was {verdict.expected}."
                            }
                        }
                        p { "Attempt {verdict.attempts} on this word." }
                        button {
                            class: "btn btn-secondary",
                            id: "word-reset",
                            r#type: "button",
                            onclick: move |_| dispatch_intent.call(WordIntent::Reset),
                            "New challenge"
                        }
                    }
                },
            }

            if !history.is_empty() {
                h3 { "This session" }
                ul { class: "word-history",
                    for attempt in history {
                        AttemptRow { attempt }
                    }
                }
            }
        }
    }
}

#[component]
fn AttemptRow(attempt: WordAttempt) -> Element {
    let mark = if attempt.correct { "✓" } else { "✗" };
    rsx! {
        li { class: "word-history__row",
            span { "{mark}" }
            span { "{attempt.target}" }
            span { class: "word-history__given", "{attempt.given}" }
        }
    }
}
