use chrono::{DateTime, Utc};
use services::Clock;

/// Relative due label: "due now", "in 1 day", "in N days".
#[must_use]
pub fn format_due(at: DateTime<Utc>, clock: Clock) -> String {
    match clock.days_until(at) {
        ..=0 => "due now".to_string(),
        1 => "in 1 day".to_string(),
        days => format!("in {days} days"),
    }
}

#[must_use]
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

/// Server percentages are already in `0..=100`.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}
