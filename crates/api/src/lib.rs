#![forbid(unsafe_code)]

pub mod http;
pub mod repository;

pub use http::{HttpApi, HttpConfig};
pub use repository::{
    AnswerSink, Api, ApiError, ChallengeSource, ContentSource, FailPoint, FlashcardDeck,
    FlashcardSource, InMemoryApi, LessonSource, ProgressSource,
};
