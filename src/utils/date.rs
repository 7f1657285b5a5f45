//! Display helpers for timestamps and durations.

use chrono::{DateTime, NaiveDate, Utc};

/// "Jan 5, 2025"
pub fn format_date(dt: DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y").to_string()
}

/// "Jan 5, 2025 14:03"
pub fn format_date_time(dt: DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y %H:%M").to_string()
}

/// Human relative time of `then` as seen from `now`.
///
/// Anything a week old or more (or in the future) is shown as a date.
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    if elapsed.num_seconds() < 0 || elapsed.num_days() >= 7 {
        return format_date(then);
    }

    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();
    if minutes < 1 {
        "just now".to_string()
    } else if hours < 1 {
        plural(minutes, "minute")
    } else if days < 1 {
        plural(hours, "hour")
    } else {
        plural(days, "day")
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// "m:ss" below an hour, "h:mm:ss" above.
pub fn format_duration_secs(total: u64) -> String {
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // Try YYYYMMDD
    if s.len() == 8 {
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d") {
            return Ok(d);
        }
    }
    // Try YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    Err(format!(
        "Invalid date \"{}\" (expected YYYYMMDD or YYYY-MM-DD)",
        s
    ))
}
