//! Wire shapes of the learning API and their mapping into domain types.
//!
//! Field names follow the server's JSON; every counter tolerates absence
//! because the server omits fields for empty collections.

use chrono::{DateTime, NaiveDateTime, Utc};
use lingua_core::model::{
    CategoryProgress, ChallengeDifficulty, Exercise, Flashcard, FlashcardId, FlashcardStats,
    LearnerProgress, Lesson, LessonId, QuizScore, ReviewItem, SentenceChallenge, SentenceLevel,
    SentenceVerdict, SummaryStats, WordChallenge, WordKey, WordVerdict,
};
use serde::{Deserialize, Serialize};

use crate::repository::{ApiError, FlashcardDeck};

//
// ─── REVIEW ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SummaryRecord {
    total_palabras: u32,
    palabras_pendientes: u32,
    revisions_completadas: u32,
    tasa_exito: f64,
}

impl From<SummaryRecord> for SummaryStats {
    fn from(record: SummaryRecord) -> Self {
        Self {
            total_items: record.total_palabras,
            pending_items: record.palabras_pendientes,
            completed_reviews: record.revisions_completadas,
            success_rate: record.tasa_exito,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DueItemsRecord {
    #[serde(default)]
    palabras: Vec<ReviewItemRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewItemRecord {
    palabra: String,
    #[serde(default)]
    intervalo: u32,
    proxima_revision: String,
    #[serde(default)]
    veces_revisada: u32,
    #[serde(default)]
    dificultad: f64,
}

impl ReviewItemRecord {
    fn into_item(self) -> Result<ReviewItem, ApiError> {
        let key = WordKey::new(self.palabra).map_err(lingua_core::Error::from)?;
        let next_review_at = parse_timestamp(&self.proxima_revision)?;
        ReviewItem::new(
            key,
            self.veces_revisada,
            self.dificultad,
            self.intervalo,
            next_review_at,
        )
        .map_err(|e| lingua_core::Error::from(e).into())
    }
}

impl DueItemsRecord {
    pub(crate) fn into_items(self) -> Result<Vec<ReviewItem>, ApiError> {
        self.palabras
            .into_iter()
            .map(ReviewItemRecord::into_item)
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct OutcomeBody<'a> {
    pub palabra: &'a str,
    pub correcto: bool,
}

/// Accepts RFC 3339, or a naive ISO-8601 timestamp taken as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(|e| ApiError::Decode(format!("invalid timestamp {raw:?}: {e}")))
}

//
// ─── FLASHCARDS ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct DeckRecord {
    #[serde(default)]
    tarjetas: Vec<FlashcardRecord>,
    #[serde(default)]
    estadisticas: FlashcardStatsRecord,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FlashcardRecord {
    id: u64,
    pregunta: String,
    respuesta: String,
    #[serde(default)]
    dificultad: serde_json::Value,
    #[serde(default)]
    intentos: u32,
    #[serde(default)]
    aciertos: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct FlashcardStatsRecord {
    total_tarjetas: u32,
    total_intentos: u32,
    total_aciertos: u32,
    tasa_exito: f64,
    tarjetas_estudiadas: u32,
    tarjetas_sin_estudiar: u32,
}

impl From<FlashcardStatsRecord> for FlashcardStats {
    fn from(record: FlashcardStatsRecord) -> Self {
        Self {
            total_cards: record.total_tarjetas,
            total_attempts: record.total_intentos,
            total_correct: record.total_aciertos,
            success_rate: record.tasa_exito,
            studied_cards: record.tarjetas_estudiadas,
            unstudied_cards: record.tarjetas_sin_estudiar,
        }
    }
}

impl FlashcardRecord {
    fn into_card(self) -> Result<Flashcard, ApiError> {
        // Difficulty arrives either as a label or as a number.
        let difficulty = match self.dificultad {
            serde_json::Value::String(label) => label,
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        };
        Flashcard::new(
            FlashcardId::new(self.id),
            self.pregunta,
            self.respuesta,
            difficulty,
            self.intentos,
            self.aciertos,
        )
        .map_err(|e| lingua_core::Error::from(e).into())
    }
}

impl DeckRecord {
    pub(crate) fn into_deck(self) -> Result<FlashcardDeck, ApiError> {
        let cards = self
            .tarjetas
            .into_iter()
            .map(FlashcardRecord::into_card)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FlashcardDeck {
            cards,
            stats: self.estadisticas.into(),
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AnswerBody {
    pub correcto: bool,
}

//
// ─── CHALLENGES ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct WordChallengeRecord {
    palabra_objetivo: String,
    #[serde(default)]
    letras_desordenadas: Vec<String>,
    #[serde(default)]
    dificultad: String,
}

impl From<WordChallengeRecord> for WordChallenge {
    fn from(record: WordChallengeRecord) -> Self {
        Self {
            difficulty: ChallengeDifficulty::from_code(&record.dificultad).unwrap_or_default(),
            target: record.palabra_objetivo,
            letters: record.letras_desordenadas,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WordVerdictRecord {
    correcto: bool,
    #[serde(default)]
    respuesta_correcta: String,
    #[serde(default)]
    respuesta_usuario: String,
    #[serde(default)]
    intentos: u32,
}

impl From<WordVerdictRecord> for WordVerdict {
    fn from(record: WordVerdictRecord) -> Self {
        Self {
            correct: record.correcto,
            expected: record.respuesta_correcta,
            given: record.respuesta_usuario,
            attempts: record.intentos,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SentenceChallengeRecord {
    palabra_clave: String,
    #[serde(default)]
    instruccion: String,
    #[serde(default)]
    nivel: String,
    #[serde(default)]
    validacion_requerida: bool,
}

impl From<SentenceChallengeRecord> for SentenceChallenge {
    fn from(record: SentenceChallengeRecord) -> Self {
        Self {
            level: SentenceLevel::from_code(&record.nivel),
            keyword: record.palabra_clave,
            instruction: record.instruccion,
            validation_required: record.validacion_requerida,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SentenceVerdictRecord {
    valida: bool,
    #[serde(default)]
    tiene_palabra_clave: bool,
    #[serde(default)]
    mensaje: String,
}

impl From<SentenceVerdictRecord> for SentenceVerdict {
    fn from(record: SentenceVerdictRecord) -> Self {
        Self {
            valid: record.valida,
            has_keyword: record.tiene_palabra_clave,
            message: record.mensaje,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateWordBody<'a> {
    pub palabra: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct VerifyWordBody<'a> {
    pub palabra: &'a str,
    pub respuesta: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateSentenceBody<'a> {
    pub palabra: &'a str,
    pub nivel: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ValidateSentenceBody<'a> {
    pub oracion: &'a str,
    pub palabra_clave: &'a str,
}

//
// ─── LESSONS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct LessonRecord {
    id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    word: String,
    #[serde(default)]
    exercises: Vec<ExerciseRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExerciseRecord {
    question: String,
    #[serde(default)]
    options: Vec<String>,
    answer: String,
}

impl LessonRecord {
    pub(crate) fn into_lesson(self) -> Result<Lesson, ApiError> {
        let exercises = self
            .exercises
            .into_iter()
            .map(|record| Exercise::new(record.question, record.options, record.answer))
            .collect::<Result<Vec<_>, _>>()
            .map_err(lingua_core::Error::from)?;
        Lesson::new(
            LessonId::new(self.id),
            self.title,
            self.content,
            self.word,
            exercises,
        )
        .map_err(|e| lingua_core::Error::from(e).into())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuizBody {
    pub lesson_id: u64,
    pub score: u32,
    pub total: u32,
}

impl From<QuizScore> for QuizBody {
    fn from(score: QuizScore) -> Self {
        Self {
            lesson_id: score.lesson.value(),
            score: score.correct,
            total: score.total,
        }
    }
}

//
// ─── PROGRESS ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ProgressRecord {
    total_lessons: u32,
    completed_lessons: u32,
    percentage: f64,
    streak: u32,
    categories: CategoriesRecord,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CategoriesRecord {
    vocabulary: CategoryRecord,
    flashcards: FlashcardStatsRecord,
    srs: SummaryRecord,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CategoryRecord {
    completed: u32,
    total: u32,
    percentage: f64,
}

impl From<ProgressRecord> for LearnerProgress {
    fn from(record: ProgressRecord) -> Self {
        let vocabulary = record.categories.vocabulary;
        Self {
            total_lessons: record.total_lessons,
            completed_lessons: record.completed_lessons,
            percentage: record.percentage,
            streak_days: record.streak,
            vocabulary: CategoryProgress {
                completed: vocabulary.completed,
                total: vocabulary.total,
                percentage: vocabulary.percentage,
            },
            flashcards: record.categories.flashcards.into(),
            review: record.categories.srs.into(),
        }
    }
}
