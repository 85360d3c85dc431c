/// Aggregate review statistics as reported by the server.
///
/// Refreshed wholesale; the client never derives or adjusts these numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SummaryStats {
    pub total_items: u32,
    pub pending_items: u32,
    pub completed_reviews: u32,
    /// Percentage in `0.0..=100.0`.
    pub success_rate: f64,
}

impl SummaryStats {
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending_items > 0
    }
}

/// Flashcard deck statistics as reported by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlashcardStats {
    pub total_cards: u32,
    pub total_attempts: u32,
    pub total_correct: u32,
    /// Percentage in `0.0..=100.0`.
    pub success_rate: f64,
    pub studied_cards: u32,
    pub unstudied_cards: u32,
}
