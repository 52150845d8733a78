//! ISO 8601 timestamp handling for record dates.
//!
//! Records carry either full RFC 3339 date-times (`2024-10-20T14:30:00Z`)
//! or plain calendar dates (`2024-10-01`). Both compare on one timeline;
//! a plain date is taken as midnight UTC.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Parse a record timestamp. Returns `None` for anything unparseable.
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts);
    }
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(|date| date.midnight().assume_utc())
}

/// Render a date the way records store `createdAt` / `updatedAt`.
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Today's date in UTC.
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// The current instant as an RFC 3339 string, for `submittedAt`.
pub fn now_timestamp() -> String {
    let now = OffsetDateTime::now_utc();
    let now = now.replace_nanosecond(0).unwrap_or(now);
    now.format(&Rfc3339).unwrap_or_else(|_| format_date(now.date()))
}
