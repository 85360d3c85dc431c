use lingua_core::model::{RecallRating, ReviewItem, SummaryStats};
use services::{Clock, IdleReason, ReviewSession, SessionPhase};

use super::time_fmt::{format_date, format_due, format_percent};

/// Due-list rows shown on the idle page.
pub const DUE_PREVIEW_LIMIT: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewIntent {
    Begin,
    Reveal,
    Rate(RecallRating),
    Exit,
    Reload,
    /// Hide the notice about outcomes that never reached the server.
    DismissLost,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SummaryVm {
    pub total: u32,
    pub pending: u32,
    pub completed: u32,
    pub success_rate: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DueItemVm {
    pub word: String,
    pub difficulty: String,
    pub exposures: u32,
    pub due: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReviewCardVm {
    pub word: String,
    pub difficulty: String,
    pub stars: String,
    pub exposures: String,
    pub next_review: String,
    pub position: String,
    /// Width of the progress bar, `0..=100`.
    pub progress_percent: u32,
    pub revealed: bool,
}

/// Everything the review page renders, derived from the session state.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewPageVm {
    pub summary: Option<SummaryVm>,
    pub due: Vec<DueItemVm>,
    pub due_total: usize,
    pub card: Option<ReviewCardVm>,
    pub can_begin: bool,
    pub idle_reason: Option<IdleReason>,
    pub load_error: Option<String>,
    pub lost_outcomes: Vec<String>,
}

/// Converts a `0..=1` share into a bar width.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn percent_width(fraction: f64) -> u32 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u32
}

#[must_use]
pub fn map_summary(stats: &SummaryStats) -> SummaryVm {
    SummaryVm {
        total: stats.total_items,
        pending: stats.pending_items,
        completed: stats.completed_reviews,
        success_rate: format_percent(stats.success_rate),
    }
}

#[must_use]
pub fn map_due_item(item: &ReviewItem, clock: Clock) -> DueItemVm {
    DueItemVm {
        word: item.key().to_string(),
        difficulty: format!("{:.1}", item.difficulty()),
        exposures: item.exposure_count(),
        due: format_due(item.next_review_at(), clock),
    }
}

#[must_use]
pub fn map_review_page(session: &ReviewSession, clock: Clock) -> ReviewPageVm {
    let card = session.current().zip(session.progress()).map(|(item, progress)| {
        let tier = usize::from(item.difficulty_tier());
        ReviewCardVm {
            word: item.key().as_str().to_uppercase(),
            difficulty: format!("{:.1}", item.difficulty()),
            stars: format!("{}{}", "★".repeat(tier), "☆".repeat(5 - tier)),
            exposures: match item.exposure_count() {
                1 => "Reviewed 1 time".to_string(),
                n => format!("Reviewed {n} times"),
            },
            next_review: format!("Next review: {}", format_date(item.next_review_at())),
            position: format!("{} of {}", progress.position(), progress.total),
            progress_percent: percent_width(progress.fraction()),
            revealed: session.phase() == SessionPhase::Revealed,
        }
    });

    ReviewPageVm {
        summary: session.summary().map(map_summary),
        due: session
            .due_items()
            .iter()
            .take(DUE_PREVIEW_LIMIT)
            .map(|item| map_due_item(item, clock))
            .collect(),
        due_total: session.due_items().len(),
        card,
        can_begin: session.can_begin(),
        idle_reason: session.idle_reason(),
        load_error: session.load_error().map(str::to_string),
        lost_outcomes: session
            .submit_failures()
            .iter()
            .map(|failure| failure.key.to_string())
            .collect(),
    }
}
