/// Aggregated view of where the learner is inside an active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// Zero-based index of the item on screen.
    pub cursor: usize,
    pub total: usize,
    pub remaining: usize,
    pub revealed: bool,
}

impl SessionProgress {
    /// One-based position for "n of m" labels.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor + 1
    }

    /// Share of the session reached, counting the item on screen.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.position() as f64 / self.total as f64
    }
}
