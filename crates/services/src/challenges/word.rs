use std::sync::Arc;

use api::ChallengeSource;
use lingua_core::model::{WordChallenge, WordVerdict};

use crate::error::ChallengeError;

//
// ─── FLOW STATE ────────────────────────────────────────────────────────────────
//

/// Where the learner is in one word-formation round.
#[derive(Debug, Clone, PartialEq)]
pub enum WordStage {
    Setup { word: String },
    Solving { challenge: WordChallenge, answer: String },
    Verified { challenge: WordChallenge, verdict: WordVerdict },
}

impl Default for WordStage {
    fn default() -> Self {
        Self::Setup {
            word: String::new(),
        }
    }
}

/// One checked answer, kept for the page history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordAttempt {
    pub target: String,
    pub given: String,
    pub correct: bool,
    pub attempts: u32,
}

/// Word-formation round plus the history of this visit.
///
/// `round` moves on every applied change, so a reply fetched for an older
/// round can be recognised and dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordFlow {
    stage: WordStage,
    history: Vec<WordAttempt>,
    round: u64,
}

impl WordFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stage(&self) -> &WordStage {
        &self.stage
    }

    #[must_use]
    pub fn history(&self) -> &[WordAttempt] {
        &self.history
    }

    #[must_use]
    pub fn attempt_count(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn round(&self) -> u64 {
        self.round
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.history.iter().filter(|attempt| attempt.correct).count()
    }

    /// Edit the source word. Ignored outside setup.
    pub fn set_word(&mut self, value: impl Into<String>) {
        if let WordStage::Setup { word } = &mut self.stage {
            *word = value.into();
            self.round += 1;
        }
    }

    /// Edit the learner's answer. Ignored unless solving.
    pub fn set_answer(&mut self, value: impl Into<String>) {
        if let WordStage::Solving { answer, .. } = &mut self.stage {
            *answer = value.into();
            self.round += 1;
        }
    }

    /// Back to an empty setup. History is kept.
    pub fn reset(&mut self) {
        self.stage = WordStage::default();
        self.round += 1;
    }

    /// The trimmed word to build a challenge from.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError::EmptyWord` for a blank word and
    /// `ChallengeError::NoChallenge` outside setup.
    pub fn word_to_generate(&self) -> Result<String, ChallengeError> {
        match &self.stage {
            WordStage::Setup { word } if word.trim().is_empty() => Err(ChallengeError::EmptyWord),
            WordStage::Setup { word } => Ok(word.trim().to_string()),
            _ => Err(ChallengeError::NoChallenge),
        }
    }

    pub fn start(&mut self, challenge: WordChallenge) {
        self.stage = WordStage::Solving {
            challenge,
            answer: String::new(),
        };
        self.round += 1;
    }

    /// Start `challenge` only if nothing changed since `round` was read.
    pub fn accept_challenge(&mut self, round: u64, challenge: WordChallenge) -> bool {
        if round != self.round || !matches!(self.stage, WordStage::Setup { .. }) {
            return false;
        }
        self.start(challenge);
        true
    }

    /// Target and trimmed answer to check.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError::EmptyAnswer` for a blank answer and
    /// `ChallengeError::NoChallenge` unless solving.
    pub fn answer_to_verify(&self) -> Result<(String, String), ChallengeError> {
        match &self.stage {
            WordStage::Solving { answer, .. } if answer.trim().is_empty() => {
                Err(ChallengeError::EmptyAnswer)
            }
            WordStage::Solving { challenge, answer } => {
                Ok((challenge.target.clone(), answer.trim().to_string()))
            }
            _ => Err(ChallengeError::NoChallenge),
        }
    }

    /// Store the verdict and append it to the history. Ignored unless solving.
    pub fn finish(&mut self, verdict: WordVerdict) {
        let WordStage::Solving { challenge, .. } = &self.stage else {
            return;
        };
        let challenge = challenge.clone();
        self.history.push(WordAttempt {
            target: challenge.target.clone(),
            given: verdict.given.clone(),
            correct: verdict.correct,
            attempts: verdict.attempts,
        });
        self.stage = WordStage::Verified { challenge, verdict };
        self.round += 1;
    }

    /// Finish with `verdict` only if nothing changed since `round` was read.
    pub fn accept_verdict(&mut self, round: u64, verdict: WordVerdict) -> bool {
        if round != self.round || !matches!(self.stage, WordStage::Solving { .. }) {
            return false;
        }
        self.finish(verdict);
        true
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Runs word-formation rounds against the challenge API.
#[derive(Clone)]
pub struct WordChallengeService {
    source: Arc<dyn ChallengeSource>,
}

impl WordChallengeService {
    #[must_use]
    pub fn new(source: Arc<dyn ChallengeSource>) -> Self {
        Self { source }
    }

    /// Ask the server to scramble the setup word.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError` for blank input or API failures; `flow` is unchanged on error.
    pub async fn generate(&self, flow: &mut WordFlow) -> Result<(), ChallengeError> {
        let word = flow.word_to_generate()?;
        let round = flow.round();
        let challenge = self.fetch_challenge(&word).await?;
        flow.accept_challenge(round, challenge);
        Ok(())
    }

    /// Scramble `word` without touching any flow.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError::Api` when the request fails.
    pub async fn fetch_challenge(&self, word: &str) -> Result<WordChallenge, ChallengeError> {
        log::debug!("generating word challenge");
        Ok(self.source.generate_word(word).await?)
    }

    /// # Errors
    ///
    /// Returns `ChallengeError::Api` when the request fails.
    pub async fn fetch_verdict(
        &self,
        target: &str,
        answer: &str,
    ) -> Result<WordVerdict, ChallengeError> {
        Ok(self.source.verify_word(target, answer).await?)
    }

    /// Check the current answer.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError` for blank input or API failures; `flow` is unchanged on error.
    pub async fn verify(&self, flow: &mut WordFlow) -> Result<(), ChallengeError> {
        let (target, answer) = flow.answer_to_verify()?;
        let round = flow.round();
        let verdict = self.fetch_verdict(&target, &answer).await?;
        flow.accept_verdict(round, verdict);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{FailPoint, InMemoryApi};

    fn service(repo: &InMemoryApi) -> WordChallengeService {
        WordChallengeService::new(Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn round_trip_records_history() {
        let repo = InMemoryApi::new();
        let service = service(&repo);
        let mut flow = WordFlow::new();

        flow.set_word(" stone ");
        service.generate(&mut flow).await.unwrap();
        let WordStage::Solving { challenge, .. } = flow.stage() else {
            panic!("expected solving stage");
        };
        assert_eq!(challenge.target, "stone");

        flow.set_answer("notes");
        service.verify(&mut flow).await.unwrap();
        assert!(matches!(
            flow.stage(),
            WordStage::Verified { verdict, .. } if !verdict.correct
        ));
        assert_eq!(flow.attempt_count(), 1);
        assert_eq!(flow.correct_count(), 0);

        flow.reset();
        assert_eq!(flow.stage(), &WordStage::default());
        assert_eq!(flow.history().len(), 1);
    }

    #[tokio::test]
    async fn blank_inputs_are_rejected_locally() {
        let repo = InMemoryApi::new();
        let service = service(&repo);
        let mut flow = WordFlow::new();
        flow.set_word("   ");
        assert!(matches!(
            service.generate(&mut flow).await,
            Err(ChallengeError::EmptyWord)
        ));

        flow.set_word("tree");
        service.generate(&mut flow).await.unwrap();
        assert!(matches!(
            service.verify(&mut flow).await,
            Err(ChallengeError::EmptyAnswer)
        ));
    }

    #[tokio::test]
    async fn api_failure_leaves_flow_unchanged() {
        let repo = InMemoryApi::new();
        repo.fail(FailPoint::Challenges);
        let service = service(&repo);
        let mut flow = WordFlow::new();
        flow.set_word("tree");
        let before = flow.clone();

        assert!(matches!(
            service.generate(&mut flow).await,
            Err(ChallengeError::Api(_))
        ));
        assert_eq!(flow, before);
    }

    #[tokio::test]
    async fn reply_for_an_older_round_is_dropped() {
        let repo = InMemoryApi::new();
        let service = service(&repo);
        let mut flow = WordFlow::new();
        flow.set_word("stone");
        let word = flow.word_to_generate().unwrap();
        let round = flow.round();
        let challenge = service.fetch_challenge(&word).await.unwrap();

        flow.reset();
        assert!(!flow.accept_challenge(round, challenge.clone()));
        assert_eq!(flow.stage(), &WordStage::default());

        flow.set_word("stone");
        let round = flow.round();
        assert!(flow.accept_challenge(round, challenge.clone()));
        assert!(!flow.accept_challenge(round, challenge));

        flow.set_answer("tones");
        let round = flow.round();
        let verdict = service.fetch_verdict("stone", "tones").await.unwrap();
        flow.set_answer("stone");
        assert!(!flow.accept_verdict(round, verdict));
        assert!(flow.history().is_empty());
    }

    #[test]
    fn edits_outside_their_stage_are_ignored() {
        let mut flow = WordFlow::new();
        flow.set_answer("ignored");
        assert_eq!(flow.stage(), &WordStage::default());
        assert!(matches!(
            flow.answer_to_verify(),
            Err(ChallengeError::NoChallenge)
        ));
    }
}
