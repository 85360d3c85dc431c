use lingua_core::model::{Flashcard, FlashcardStats};
use services::{FlashcardSession, SessionPhase};

use super::review_vm::percent_width;
use super::time_fmt::format_percent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashcardIntent {
    Begin,
    Flip,
    Answer { correct: bool },
    Exit,
    Reload,
    DismissLost,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeckStatsVm {
    pub total: u32,
    pub studied: u32,
    pub success_rate: String,
    pub correct: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeckRowVm {
    pub question: String,
    pub difficulty: String,
    pub record: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlashcardCardVm {
    pub question: String,
    pub answer: Option<String>,
    pub position: String,
    pub progress_percent: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlashcardPageVm {
    pub stats: Option<DeckStatsVm>,
    pub deck: Vec<DeckRowVm>,
    pub card: Option<FlashcardCardVm>,
    pub can_begin: bool,
    pub load_error: Option<String>,
    pub lost_answers: usize,
}

#[must_use]
pub fn map_deck_stats(stats: &FlashcardStats) -> DeckStatsVm {
    DeckStatsVm {
        total: stats.total_cards,
        studied: stats.studied_cards,
        success_rate: format_percent(stats.success_rate),
        correct: stats.total_correct,
    }
}

fn map_row(card: &Flashcard) -> DeckRowVm {
    DeckRowVm {
        question: card.question().to_string(),
        difficulty: card.difficulty().to_string(),
        record: format!("{}/{}", card.correct(), card.attempts()),
    }
}

#[must_use]
pub fn map_flashcard_page(session: &FlashcardSession) -> FlashcardPageVm {
    let card = session
        .current()
        .zip(session.progress())
        .map(|(card, progress)| FlashcardCardVm {
            question: card.question().to_string(),
            answer: (session.phase() == SessionPhase::Revealed)
                .then(|| card.answer().to_string()),
            position: format!("{} of {}", progress.position(), progress.total),
            progress_percent: percent_width(progress.fraction()),
        });

    FlashcardPageVm {
        stats: session.summary().map(map_deck_stats),
        deck: session.due_items().iter().map(map_row).collect(),
        card,
        can_begin: session.can_begin(),
        load_error: session.load_error().map(str::to_string),
        lost_answers: session.submit_failures().len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingua_core::model::FlashcardId;
    use services::StudySnapshot;

    fn session() -> FlashcardSession {
        let cards = vec![
            Flashcard::new(FlashcardId::new(1), "hola", "hello", "1", 4, 3).unwrap(),
            Flashcard::new(FlashcardId::new(2), "adios", "bye", "2", 0, 0).unwrap(),
        ];
        FlashcardSession::from_snapshot(StudySnapshot {
            items: cards,
            summary: FlashcardStats {
                total_cards: 2,
                total_attempts: 4,
                total_correct: 3,
                success_rate: 75.0,
                studied_cards: 1,
                unstudied_cards: 1,
            },
        })
    }

    #[test]
    fn answer_hidden_until_flipped() {
        let mut session = session();
        session.begin().unwrap();
        let vm = map_flashcard_page(&session);
        assert_eq!(vm.card.as_ref().unwrap().answer, None);

        session.reveal().unwrap();
        let vm = map_flashcard_page(&session);
        let card = vm.card.unwrap();
        assert_eq!(card.question, "hola");
        assert_eq!(card.answer.as_deref(), Some("hello"));
        assert_eq!(card.position, "1 of 2");
    }

    #[test]
    fn deck_rows_show_record() {
        let vm = map_flashcard_page(&session());
        assert_eq!(vm.deck[0].record, "3/4");
        assert_eq!(vm.stats.unwrap().success_rate, "75.0%");
        assert!(vm.can_begin);
    }
}
