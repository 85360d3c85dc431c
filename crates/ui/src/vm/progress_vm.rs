use lingua_core::model::{CategoryProgress, LearnerProgress};

use super::review_vm::percent_width;
use super::time_fmt::format_percent;

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryVm {
    pub title: &'static str,
    pub detail: String,
    pub percent: String,
    pub width: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProgressVm {
    pub overall: String,
    pub lessons: String,
    pub streak: String,
    pub categories: Vec<CategoryVm>,
    pub tips: Vec<String>,
}

/// Review success below this share earns a reminder to review more often.
const LOW_REVIEW_SUCCESS: f64 = 60.0;

fn category(title: &'static str, detail: String, percentage: f64) -> CategoryVm {
    CategoryVm {
        title,
        detail,
        percent: format_percent(percentage),
        width: percent_width(percentage / 100.0),
    }
}

fn vocabulary(progress: &CategoryProgress) -> CategoryVm {
    category(
        "Vocabulary",
        format!("{} of {} lessons", progress.completed, progress.total),
        progress.percentage,
    )
}

fn tips(progress: &LearnerProgress) -> Vec<String> {
    let mut tips = vec![
        match progress.percentage {
            p if p < 25.0 => "You have just started. Keep studying regularly to reach your goals.",
            p if p < 50.0 => "Good start. Stay consistent and results will keep improving.",
            p if p < 75.0 => "You are doing well. Raise the difficulty to keep advancing.",
            _ => "Excellent progress. You are close to the goal.",
        }
        .to_string(),
    ];
    if progress.streak_days >= 7 {
        tips.push(format!(
            "{}-day streak! Keep it going to reach 30 days.",
            progress.streak_days
        ));
    }
    if progress.review.success_rate < LOW_REVIEW_SUCCESS {
        tips.push("Review your due words more often to reinforce what you learned.".to_string());
    }
    tips
}

#[must_use]
pub fn map_progress(progress: &LearnerProgress) -> ProgressVm {
    let streak_unit = if progress.streak_days == 1 { "day" } else { "days" };
    ProgressVm {
        overall: format_percent(progress.percentage),
        lessons: format!(
            "{} of {} lessons completed",
            progress.completed_lessons, progress.total_lessons
        ),
        streak: format!(
            "{} {} {streak_unit}",
            progress.streak_tier().badge(),
            progress.streak_days
        ),
        categories: vec![
            vocabulary(&progress.vocabulary),
            category(
                "Flashcards",
                format!(
                    "{} of {} cards studied",
                    progress.flashcards.studied_cards, progress.flashcards.total_cards
                ),
                progress.flashcards.success_rate,
            ),
            category(
                "Spaced review",
                format!(
                    "{} reviews, {} pending",
                    progress.review.completed_reviews, progress.review.pending_items
                ),
                progress.review.success_rate,
            ),
        ],
        tips: tips(progress),
    }
}
