use std::sync::Arc;

use api::ChallengeSource;
use lingua_core::model::{SentenceChallenge, SentenceLevel, SentenceVerdict};

use crate::error::ChallengeError;

/// Where the learner is in one sentence-building round.
#[derive(Debug, Clone, PartialEq)]
pub enum SentenceStage {
    Setup {
        keyword: String,
        level: SentenceLevel,
    },
    Composing {
        challenge: SentenceChallenge,
        sentence: String,
    },
    Validated {
        challenge: SentenceChallenge,
        sentence: String,
        verdict: SentenceVerdict,
    },
}

impl Default for SentenceStage {
    fn default() -> Self {
        Self::Setup {
            keyword: String::new(),
            level: SentenceLevel::default(),
        }
    }
}

/// A saved sentence from this visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceAttempt {
    pub keyword: String,
    pub sentence: String,
    pub valid: bool,
}

/// Sentence round plus saved attempts. `round` moves on every applied change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentenceFlow {
    stage: SentenceStage,
    history: Vec<SentenceAttempt>,
    round: u64,
}

impl SentenceFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stage(&self) -> &SentenceStage {
        &self.stage
    }

    #[must_use]
    pub fn history(&self) -> &[SentenceAttempt] {
        &self.history
    }

    #[must_use]
    pub fn valid_count(&self) -> usize {
        self.history.iter().filter(|attempt| attempt.valid).count()
    }

    #[must_use]
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn set_keyword(&mut self, value: impl Into<String>) {
        if let SentenceStage::Setup { keyword, .. } = &mut self.stage {
            *keyword = value.into();
            self.round += 1;
        }
    }

    pub fn set_level(&mut self, value: SentenceLevel) {
        if let SentenceStage::Setup { level, .. } = &mut self.stage {
            *level = value;
            self.round += 1;
        }
    }

    /// Edit the sentence. Editing after validation goes back to composing.
    pub fn set_sentence(&mut self, value: impl Into<String>) {
        let challenge = match &mut self.stage {
            SentenceStage::Composing { sentence, .. } => {
                *sentence = value.into();
                self.round += 1;
                return;
            }
            SentenceStage::Validated { challenge, .. } => challenge.clone(),
            SentenceStage::Setup { .. } => return,
        };
        self.stage = SentenceStage::Composing {
            challenge,
            sentence: value.into(),
        };
        self.round += 1;
    }

    /// Discard the round without saving.
    pub fn reset(&mut self) {
        self.stage = SentenceStage::default();
        self.round += 1;
    }

    /// # Errors
    ///
    /// Returns `ChallengeError::EmptyWord` for a blank keyword and
    /// `ChallengeError::NoChallenge` outside setup.
    pub fn request(&self) -> Result<(String, SentenceLevel), ChallengeError> {
        match &self.stage {
            SentenceStage::Setup { keyword, .. } if keyword.trim().is_empty() => {
                Err(ChallengeError::EmptyWord)
            }
            SentenceStage::Setup { keyword, level } => Ok((keyword.trim().to_string(), *level)),
            _ => Err(ChallengeError::NoChallenge),
        }
    }

    pub fn start(&mut self, challenge: SentenceChallenge) {
        self.stage = SentenceStage::Composing {
            challenge,
            sentence: String::new(),
        };
        self.round += 1;
    }

    /// Start `challenge` only if nothing changed since `round` was read.
    pub fn accept_challenge(&mut self, round: u64, challenge: SentenceChallenge) -> bool {
        if round != self.round || !matches!(self.stage, SentenceStage::Setup { .. }) {
            return false;
        }
        self.start(challenge);
        true
    }

    /// Sentence and keyword to send for validation.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError::EmptySentence` for a blank sentence and
    /// `ChallengeError::NoChallenge` unless composing.
    pub fn sentence_to_validate(&self) -> Result<(String, String), ChallengeError> {
        match &self.stage {
            SentenceStage::Composing { sentence, .. } if sentence.trim().is_empty() => {
                Err(ChallengeError::EmptySentence)
            }
            SentenceStage::Composing {
                challenge,
                sentence,
            } => Ok((sentence.trim().to_string(), challenge.keyword.clone())),
            _ => Err(ChallengeError::NoChallenge),
        }
    }

    pub fn finish(&mut self, verdict: SentenceVerdict) {
        let SentenceStage::Composing {
            challenge,
            sentence,
        } = &self.stage
        else {
            return;
        };
        let (challenge, sentence) = (challenge.clone(), sentence.clone());
        self.stage = SentenceStage::Validated {
            challenge,
            sentence,
            verdict,
        };
        self.round += 1;
    }

    /// Record `verdict` only if the sentence is still the one that was sent.
    pub fn accept_verdict(&mut self, round: u64, verdict: SentenceVerdict) -> bool {
        if round != self.round || !matches!(self.stage, SentenceStage::Composing { .. }) {
            return false;
        }
        self.finish(verdict);
        true
    }

    /// Append the validated sentence to the history and start over.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError::NotChecked` unless the sentence was validated.
    pub fn save_attempt(&mut self) -> Result<(), ChallengeError> {
        let SentenceStage::Validated {
            challenge,
            sentence,
            verdict,
        } = &self.stage
        else {
            return Err(ChallengeError::NotChecked);
        };
        let attempt = SentenceAttempt {
            keyword: challenge.keyword.clone(),
            sentence: sentence.clone(),
            valid: verdict.valid,
        };
        self.history.push(attempt);
        self.reset();
        Ok(())
    }
}

/// Runs sentence-building rounds against the challenge API.
#[derive(Clone)]
pub struct SentenceChallengeService {
    source: Arc<dyn ChallengeSource>,
}

impl SentenceChallengeService {
    #[must_use]
    pub fn new(source: Arc<dyn ChallengeSource>) -> Self {
        Self { source }
    }

    /// # Errors
    ///
    /// Returns `ChallengeError` for blank input or API failures; `flow` is unchanged on error.
    pub async fn generate(&self, flow: &mut SentenceFlow) -> Result<(), ChallengeError> {
        let (keyword, level) = flow.request()?;
        let round = flow.round();
        let challenge = self.fetch_challenge(&keyword, level).await?;
        flow.accept_challenge(round, challenge);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ChallengeError::Api` when the request fails.
    pub async fn fetch_challenge(
        &self,
        keyword: &str,
        level: SentenceLevel,
    ) -> Result<SentenceChallenge, ChallengeError> {
        log::debug!("generating {level} sentence challenge");
        Ok(self.source.generate_sentence(keyword, level).await?)
    }

    /// # Errors
    ///
    /// Returns `ChallengeError::Api` when the request fails.
    pub async fn fetch_verdict(
        &self,
        sentence: &str,
        keyword: &str,
    ) -> Result<SentenceVerdict, ChallengeError> {
        Ok(self.source.validate_sentence(sentence, keyword).await?)
    }

    /// # Errors
    ///
    /// Returns `ChallengeError` for blank input or API failures; `flow` is unchanged on error.
    pub async fn validate(&self, flow: &mut SentenceFlow) -> Result<(), ChallengeError> {
        let (sentence, keyword) = flow.sentence_to_validate()?;
        let round = flow.round();
        let verdict = self.fetch_verdict(&sentence, &keyword).await?;
        flow.accept_verdict(round, verdict);
        Ok(())
    }
}
