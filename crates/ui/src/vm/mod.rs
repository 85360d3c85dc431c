mod challenge_vm;
mod flashcard_vm;
mod lesson_vm;
mod progress_vm;
mod review_vm;
mod time_fmt;

pub use challenge_vm::{
    SentenceIntent, WordIntent, letter_tiles, sentence_score_label, word_score_label,
};
pub use flashcard_vm::{
    DeckRowVm, DeckStatsVm, FlashcardCardVm, FlashcardIntent, FlashcardPageVm, map_deck_stats,
    map_flashcard_page,
};
pub use lesson_vm::{
    ExerciseVm, FeedbackVm, LessonIntent, LessonPageVm, OptionVm, QuizResultVm, map_lesson_page,
};
pub use progress_vm::{CategoryVm, ProgressVm, map_progress};
pub use review_vm::{
    DUE_PREVIEW_LIMIT, DueItemVm, ReviewCardVm, ReviewIntent, ReviewPageVm, SummaryVm,
    map_due_item, map_review_page, map_summary, percent_width,
};
pub use time_fmt::{format_date, format_due, format_percent};
