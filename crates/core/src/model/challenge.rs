//! Word-formation and sentence-building challenge payloads.
//!
//! Challenges are generated and judged by the server; these types only carry
//! what it returns.

use std::fmt;

//
// ─── WORD FORMATION ───────────────────────────────────────────────────────────
//

/// Difficulty of a word-formation challenge, derived server-side from word length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChallengeDifficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl ChallengeDifficulty {
    /// Parses the server's difficulty code. Unknown codes are `None`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "facil" | "easy" => Some(Self::Easy),
            "media" | "medium" => Some(Self::Medium),
            "dificil" | "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// A scrambled word to reassemble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordChallenge {
    pub target: String,
    pub letters: Vec<String>,
    pub difficulty: ChallengeDifficulty,
}

/// Server judgement of a word-formation answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordVerdict {
    pub correct: bool,
    pub expected: String,
    pub given: String,
    pub attempts: u32,
}

//
// ─── SENTENCE BUILDING ────────────────────────────────────────────────────────
//

/// Requested complexity of a sentence-building challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SentenceLevel {
    #[default]
    Basic,
    Intermediate,
    Advanced,
}

impl SentenceLevel {
    pub const ALL: [SentenceLevel; 3] = [Self::Basic, Self::Intermediate, Self::Advanced];

    /// Wire code understood by the server.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Basic => "basico",
            Self::Intermediate => "intermedio",
            Self::Advanced => "avanzado",
        }
    }

    /// Parses a wire code; anything unrecognised falls back to `Basic`, as the server does.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "intermedio" | "intermediate" => Self::Intermediate,
            "avanzado" | "advanced" => Self::Advanced,
            _ => Self::Basic,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for SentenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Instructions for writing a sentence around a keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceChallenge {
    pub keyword: String,
    pub instruction: String,
    pub level: SentenceLevel,
    pub validation_required: bool,
}

/// Server judgement of a submitted sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceVerdict {
    pub valid: bool,
    pub has_keyword: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_codes() {
        assert_eq!(ChallengeDifficulty::from_code("facil"), Some(ChallengeDifficulty::Easy));
        assert_eq!(ChallengeDifficulty::from_code(" MEDIA "), Some(ChallengeDifficulty::Medium));
        assert_eq!(ChallengeDifficulty::from_code("dificil"), Some(ChallengeDifficulty::Hard));
        assert_eq!(ChallengeDifficulty::from_code("extreme"), None);
    }

    #[test]
    fn unknown_level_falls_back_to_basic() {
        assert_eq!(SentenceLevel::from_code("avanzado"), SentenceLevel::Advanced);
        assert_eq!(SentenceLevel::from_code("expert"), SentenceLevel::Basic);
        for level in SentenceLevel::ALL {
            assert_eq!(SentenceLevel::from_code(level.code()), level);
        }
    }
}
