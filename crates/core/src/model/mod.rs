mod challenge;
mod flashcard;
mod ids;
mod lesson;
mod progress;
mod review;
mod stats;

pub use challenge::{
    ChallengeDifficulty, SentenceChallenge, SentenceLevel, SentenceVerdict, WordChallenge,
    WordVerdict,
};
pub use flashcard::{Flashcard, FlashcardError};
pub use ids::{FlashcardId, IdError, LessonId, WordKey};
pub use lesson::{Exercise, Lesson, LessonError, QuizScore};
pub use progress::{CategoryProgress, LearnerProgress, StreakTier};
pub use review::{RecallRating, ReviewItem, ReviewItemError};
pub use stats::{FlashcardStats, SummaryStats};
