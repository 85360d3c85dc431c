use lingua_core::model::{SentenceLevel, WordChallenge};
use services::{SentenceFlow, WordFlow};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WordIntent {
    EditWord(String),
    Generate,
    EditAnswer(String),
    Verify,
    Reset,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SentenceIntent {
    EditKeyword(String),
    SelectLevel(SentenceLevel),
    Generate,
    EditSentence(String),
    Validate,
    Save,
    Reset,
}

/// Scrambled letters as rendered tiles.
#[must_use]
pub fn letter_tiles(challenge: &WordChallenge) -> Vec<String> {
    challenge
        .letters
        .iter()
        .map(|letter| letter.to_uppercase())
        .collect()
}

/// "3 attempts · 2 correct" for the word page header.
#[must_use]
pub fn word_score_label(flow: &WordFlow) -> String {
    let attempts = flow.attempt_count();
    let noun = if attempts == 1 { "attempt" } else { "attempts" };
    format!("{attempts} {noun} · {} correct", flow.correct_count())
}

#[must_use]
pub fn sentence_score_label(flow: &SentenceFlow) -> String {
    format!(
        "{} saved · {} valid",
        flow.history().len(),
        flow.valid_count()
    )
}
