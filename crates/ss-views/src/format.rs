use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

pub const INVALID_DATE: &str = "Invalid Date";

/// Renders a badge date as `M/D/YYYY`.
///
/// Accepts RFC 3339 timestamps (normalized to UTC), bare `YYYY-MM-DD` dates
/// and zone-less timestamps. Anything else renders as `Invalid Date`.
pub fn format_badge_date(raw: &str) -> String {
    let raw = raw.trim();
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|stamp| stamp.with_timezone(&Utc).date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|stamp| stamp.date()));

    match date {
        Ok(date) => format!("{}/{}/{}", date.month(), date.day(), date.year()),
        Err(_) => INVALID_DATE.to_owned(),
    }
}

/// `<first 8 chars>...`, as shown under "Badge ID".
pub fn truncate_id(id: &str) -> String {
    let head: String = id.chars().take(8).collect();
    format!("{head}...")
}
