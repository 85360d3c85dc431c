mod components;
mod flashcards;
mod lesson;
mod progress;
mod review;
mod sentence_challenge;
mod state;
mod word_challenge;

#[cfg(test)]
mod test_handles;
#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use flashcards::FlashcardsView;
pub use lesson::LessonView;
pub use progress::ProgressView;
pub use review::ReviewView;
pub use sentence_challenge::SentenceChallengeView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use word_challenge::WordChallengeView;

#[cfg(test)]
pub(crate) use review::ReviewTestHandles;
