//! Best-effort parsing of the free-form `date` field.
//!
//! Post dates are written for humans ("Feb 2026", "March 3, 2024"), so parsing
//! walks a list of formats and gives up quietly. Anything unparsable resolves
//! to the caller's `now`.

use crate::models::Post;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(d) = DateTime::parse_from_rfc3339(s) {
        return Some(d.with_timezone(&Utc));
    }
    if let Ok(d) = DateTime::parse_from_rfc2822(s) {
        return Some(d.with_timezone(&Utc));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }

    let words: Vec<&str> = s.split_whitespace().collect();
    match words.as_slice() {
        // Bare year
        [year] if is_year(year) => {
            return NaiveDate::from_ymd_opt(year.parse().ok()?, 1, 1).and_then(midnight);
        }
        // "Feb 2026" / "February 2026": first of the month
        [month, year] if is_year(year) => {
            let d = NaiveDate::parse_from_str(&format!("{month} 1 {year}"), "%B %d %Y").ok()?;
            return midnight(d);
        }
        _ => {}
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return midnight(d);
        }
    }
    None
}

fn is_year(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit())
}

fn midnight(d: NaiveDate) -> Option<DateTime<Utc>> {
    d.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt))
}

/// Parses `input`, falling back to `now` when it cannot.
pub fn resolve_date(input: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    parse_date(input).unwrap_or(now)
}

/// RFC 822 in the `GMT` form feed readers expect: `Tue, 02 Jan 2024 00:00:00 GMT`.
pub fn to_rfc822(date: DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Stable sort, most recent first. Undated posts tie at `now`.
pub fn sort_by_date_desc(posts: &mut [Post], now: DateTime<Utc>) {
    posts.sort_by_cached_key(|p| std::cmp::Reverse(resolve_date(&p.date, now)));
}
