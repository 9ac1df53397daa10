//! Human-readable time formatting for session displays

use chrono::{DateTime, Utc};

/// Format the time remaining until `expiry` as e.g. `"2h 15m"`, or
/// `"Expired"` once the instant has passed.
pub fn format_time_left(expiry: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if expiry <= now {
        return "Expired".to_string();
    }

    let remaining = expiry - now;
    let hours = remaining.num_hours();
    let minutes = remaining.num_minutes() % 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Format an instant for user-facing display.
pub fn format_datetime(instant: DateTime<Utc>) -> String {
    instant.format("%H:%M %d/%m/%Y").to_string()
}
