//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// Words per minute used for reading time estimates
pub const DEFAULT_READING_WPM: usize = 200;

/// Parse a front-matter date in the formats authors actually write
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    None
}

/// Format a date as `YYYY-MM-DD`, or return the input when it does not parse
pub fn format_date(s: &str) -> String {
    match parse_date(s) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => s.to_string(),
    }
}

/// Get relative time (like "2 hours ago") measured from `now`
pub fn relative_date_from(s: &str, now: NaiveDateTime) -> String {
    let Some(date) = parse_date(s) else {
        return s.to_string();
    };

    let duration = now.signed_duration_since(date);

    if duration.num_seconds() < 0 {
        // Small clock or timezone skew still reads as "just now"
        if (-duration).num_minutes() <= 5 {
            return "just now".to_string();
        }
        return format_date(s);
    }

    let seconds = duration.num_seconds();
    let minutes = duration.num_minutes();
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;
    let months = days / 30;
    let years = days / 365;

    if seconds < 60 {
        "just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 7 {
        plural(days, "day")
    } else if weeks < 4 {
        plural(weeks, "week")
    } else if months < 12 {
        plural(months, "month")
    } else {
        plural(years, "year")
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Estimated minutes to read `content`, never less than one
pub fn reading_minutes(content: &str, words_per_minute: usize) -> usize {
    let words = content.split_whitespace().count();
    words.div_ceil(words_per_minute.max(1)).max(1)
}

/// Days elapsed since `start`, counting a started day as a whole one
pub fn days_since<Tz: TimeZone>(start: &str, now: &DateTime<Tz>) -> Option<i64> {
    let start = parse_date(start)?;
    let elapsed = now.naive_local().signed_duration_since(start);
    let days = elapsed.num_days().abs();
    if elapsed.num_seconds().abs() % 86_400 == 0 {
        Some(days)
    } else {
        Some(days + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn at(s: &str) -> NaiveDateTime {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(at("2024-01-15").format("%F %T").to_string(), "2024-01-15 00:00:00");
        assert_eq!(at("2024/01/15 10:30").format("%F %T").to_string(), "2024-01-15 10:30:00");
        assert_eq!(at("2024-01-15T10:30:00").format("%F %T").to_string(), "2024-01-15 10:30:00");
        assert_eq!(
            at("2024-01-15T10:30:00+09:00").format("%F %T").to_string(),
            "2024-01-15 10:30:00"
        );
        assert!(parse_date("someday").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024/3/1"), "2024-03-01");
        assert_eq!(format_date("not a date"), "not a date");
    }

    #[test]
    fn test_relative_date_buckets() {
        let now = at("2024-06-01 12:00:00");
        let ago = |d: Duration| (now - d).format("%Y-%m-%d %H:%M:%S").to_string();

        assert_eq!(relative_date_from(&ago(Duration::seconds(10)), now), "just now");
        assert_eq!(relative_date_from(&ago(Duration::minutes(1)), now), "1 minute ago");
        assert_eq!(relative_date_from(&ago(Duration::minutes(42)), now), "42 minutes ago");
        assert_eq!(relative_date_from(&ago(Duration::hours(3)), now), "3 hours ago");
        assert_eq!(relative_date_from(&ago(Duration::days(2)), now), "2 days ago");
        assert_eq!(relative_date_from(&ago(Duration::days(15)), now), "2 weeks ago");
        assert_eq!(relative_date_from(&ago(Duration::days(95)), now), "3 months ago");
        assert_eq!(relative_date_from(&ago(Duration::days(800)), now), "2 years ago");
    }

    #[test]
    fn test_relative_date_future() {
        let now = at("2024-06-01 12:00:00");
        assert_eq!(relative_date_from("2024-06-01 12:03:00", now), "just now");
        assert_eq!(relative_date_from("2024-07-01", now), "2024-07-01");
    }

    #[test]
    fn test_relative_date_invalid_passthrough() {
        let now = at("2024-06-01");
        assert_eq!(relative_date_from("yesterday-ish", now), "yesterday-ish");
    }

    #[test]
    fn test_reading_minutes() {
        assert_eq!(reading_minutes("", 200), 1);
        assert_eq!(reading_minutes(&"word ".repeat(200), 200), 1);
        assert_eq!(reading_minutes(&"word ".repeat(201), 200), 2);
        assert_eq!(reading_minutes("a b c", 0), 3);
    }

    #[test]
    fn test_days_since() {
        let now = Utc.with_ymd_and_hms(2024, 1, 11, 0, 0, 0).unwrap();
        assert_eq!(days_since("2024-01-01", &now), Some(10));
        let later = Utc.with_ymd_and_hms(2024, 1, 11, 6, 0, 0).unwrap();
        assert_eq!(days_since("2024-01-01", &later), Some(11));
        assert_eq!(days_since("whenever", &now), None);
    }
}
