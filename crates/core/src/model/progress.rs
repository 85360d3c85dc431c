use crate::model::stats::{FlashcardStats, SummaryStats};

/// Completion of one content category.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryProgress {
    pub completed: u32,
    pub total: u32,
    pub percentage: f64,
}

/// Overall learner progress as reported by the server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LearnerProgress {
    pub total_lessons: u32,
    pub completed_lessons: u32,
    pub percentage: f64,
    pub streak_days: u32,
    pub vocabulary: CategoryProgress,
    pub flashcards: FlashcardStats,
    pub review: SummaryStats,
}

impl LearnerProgress {
    #[must_use]
    pub fn streak_tier(&self) -> StreakTier {
        StreakTier::from_days(self.streak_days)
    }
}

/// Presentation bucket for a daily study streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreakTier {
    Starting,
    Steady,
    Shining,
    Blazing,
}

impl StreakTier {
    #[must_use]
    pub fn from_days(days: u32) -> Self {
        match days {
            30.. => Self::Blazing,
            14..=29 => Self::Shining,
            7..=13 => Self::Steady,
            _ => Self::Starting,
        }
    }

    #[must_use]
    pub fn badge(self) -> &'static str {
        match self {
            Self::Blazing => "🔥",
            Self::Shining => "🌟",
            Self::Steady => "⭐",
            Self::Starting => "📝",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streak_tier_boundaries() {
        assert_eq!(StreakTier::from_days(0), StreakTier::Starting);
        assert_eq!(StreakTier::from_days(6), StreakTier::Starting);
        assert_eq!(StreakTier::from_days(7), StreakTier::Steady);
        assert_eq!(StreakTier::from_days(14), StreakTier::Shining);
        assert_eq!(StreakTier::from_days(29), StreakTier::Shining);
        assert_eq!(StreakTier::from_days(30), StreakTier::Blazing);
    }
}
