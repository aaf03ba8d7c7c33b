//! Display formatting for repository details

use chrono::{DateTime, NaiveDateTime};

pub const INVALID_DATE: &str = "Invalid date";

/// Format an API timestamp (`2024-11-04T10:00:00Z`) as `Nov 04, 2024`
///
/// Any RFC 3339 timestamp is accepted. Anything else renders as
/// `Invalid date`.
pub fn format_date(updated_at: &str) -> String {
    let input = updated_at.trim();

    let parsed = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%SZ")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|dt| dt.naive_utc())
        });

    match parsed {
        Some(dt) => dt.format("%b %d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Group digits in thousands: `142000` becomes `142,000`
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
