mod envelope;
mod records;

use std::env;

use async_trait::async_trait;
use lingua_core::model::{
    FlashcardId, LearnerProgress, Lesson, LessonId, QuizScore, ReviewItem, SentenceChallenge,
    SentenceLevel, SentenceVerdict, SummaryStats, WordChallenge, WordKey, WordVerdict,
};
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::repository::{
    AnswerSink, ApiError, ChallengeSource, ContentSource, FlashcardDeck, FlashcardSource,
    LessonSource, ProgressSource,
};
use envelope::Envelope;
use records::{
    AnswerBody, DeckRecord, DueItemsRecord, GenerateSentenceBody, GenerateWordBody, LessonRecord,
    OutcomeBody, ProgressRecord, QuizBody, SentenceChallengeRecord, SentenceVerdictRecord,
    SummaryRecord, ValidateSentenceBody, VerifyWordBody, WordChallengeRecord, WordVerdictRecord,
};

const SRS_SUMMARY: &str = "srs/estadisticas";
const SRS_DUE_ITEMS: &str = "srs/proximas-revisiones";
const SRS_OUTCOME: &str = "srs/actualizar-revision";
const FLASHCARDS: &str = "flashcards";
const WORD_GENERATE: &str = "retos/formar-palabras";
const WORD_VERIFY: &str = "retos/formar-palabras/verificar";
const SENTENCE_GENERATE: &str = "retos/oracion";
const SENTENCE_VALIDATE: &str = "retos/oracion/validar";
const LESSONS: &str = "lessons";
const LESSON_SUBMIT: &str = "lessons/submit";
const PROGRESS: &str = "progress";

/// Where the learning API lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpConfig {
    pub base_url: String,
}

impl HttpConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:5000/api/v1";
    pub const ENV_BASE_URL: &'static str = "LEARN_API_URL";

    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Reads `LEARN_API_URL`, falling back to the local development server.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var(Self::ENV_BASE_URL)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_BASE_URL.into());
        Self::new(base_url)
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

/// JSON-over-HTTP adapter for every learning collaborator.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    config: HttpConfig,
}

impl HttpApi {
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the TLS backend cannot be initialised.
    pub fn new(config: HttpConfig) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.config.endpoint(path);
        log::debug!("GET {url}");
        let response = self.client.get(&url).send().await?;
        read_envelope::<T>(response).await?.into_data()
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        log::debug!("POST {url}");
        let response = self.client.post(&url).json(body).send().await?;
        read_envelope::<T>(response).await?.into_data()
    }

    async fn post_ack<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.config.endpoint(path);
        log::debug!("POST {url}");
        let response = self.client.post(&url).json(body).send().await?;
        read_envelope::<IgnoredAny>(response).await?.into_ack()
    }
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<Envelope<T>, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;
    let envelope: Envelope<T> = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() => return Err(ApiError::Status(status)),
        Err(e) => return Err(ApiError::Decode(e.to_string())),
    };
    if !status.is_success() {
        // Prefer the server's own reason when the error body is an envelope.
        return Err(envelope.into_ack().err().unwrap_or(ApiError::Status(status)));
    }
    Ok(envelope)
}

#[async_trait]
impl ContentSource for HttpApi {
    async fn fetch_summary(&self) -> Result<SummaryStats, ApiError> {
        let record: SummaryRecord = self.get(SRS_SUMMARY).await?;
        Ok(record.into())
    }

    async fn fetch_due_items(&self) -> Result<Vec<ReviewItem>, ApiError> {
        let record: DueItemsRecord = self.get(SRS_DUE_ITEMS).await?;
        record.into_items()
    }
}

#[async_trait]
impl AnswerSink for HttpApi {
    async fn submit_outcome(&self, key: &WordKey, correct: bool) -> Result<(), ApiError> {
        let body = OutcomeBody {
            palabra: key.as_str(),
            correcto: correct,
        };
        self.post_ack(SRS_OUTCOME, &body).await
    }
}

#[async_trait]
impl FlashcardSource for HttpApi {
    async fn fetch_deck(&self) -> Result<FlashcardDeck, ApiError> {
        let record: DeckRecord = self.get(FLASHCARDS).await?;
        record.into_deck()
    }

    async fn submit_answer(&self, id: FlashcardId, correct: bool) -> Result<(), ApiError> {
        let path = format!("{FLASHCARDS}/{}/responder", id.value());
        self.post_ack(&path, &AnswerBody { correcto: correct })
            .await
    }
}

#[async_trait]
impl ChallengeSource for HttpApi {
    async fn generate_word(&self, word: &str) -> Result<WordChallenge, ApiError> {
        let record: WordChallengeRecord = self
            .post(WORD_GENERATE, &GenerateWordBody { palabra: word })
            .await?;
        Ok(record.into())
    }

    async fn verify_word(&self, target: &str, answer: &str) -> Result<WordVerdict, ApiError> {
        let body = VerifyWordBody {
            palabra: target,
            respuesta: answer,
        };
        let record: WordVerdictRecord = self.post(WORD_VERIFY, &body).await?;
        Ok(record.into())
    }

    async fn generate_sentence(
        &self,
        keyword: &str,
        level: SentenceLevel,
    ) -> Result<SentenceChallenge, ApiError> {
        let body = GenerateSentenceBody {
            palabra: keyword,
            nivel: level.code(),
        };
        let record: SentenceChallengeRecord = self.post(SENTENCE_GENERATE, &body).await?;
        Ok(record.into())
    }

    async fn validate_sentence(
        &self,
        sentence: &str,
        keyword: &str,
    ) -> Result<SentenceVerdict, ApiError> {
        let body = ValidateSentenceBody {
            oracion: sentence,
            palabra_clave: keyword,
        };
        let record: SentenceVerdictRecord = self.post(SENTENCE_VALIDATE, &body).await?;
        Ok(record.into())
    }
}

#[async_trait]
impl LessonSource for HttpApi {
    async fn fetch_lesson(&self, id: LessonId) -> Result<Lesson, ApiError> {
        let record: LessonRecord = self.get(&format!("{LESSONS}/{}", id.value())).await?;
        record.into_lesson()
    }

    async fn submit_quiz(&self, score: QuizScore) -> Result<(), ApiError> {
        self.post_ack(LESSON_SUBMIT, &QuizBody::from(score)).await
    }
}

#[async_trait]
impl ProgressSource for HttpApi {
    async fn fetch_progress(&self) -> Result<LearnerProgress, ApiError> {
        let record: ProgressRecord = self.get(PROGRESS).await?;
        Ok(record.into())
    }
}
