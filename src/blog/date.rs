use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

const DATE_ONLY: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

const DISPLAY_DATE: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");

/// Formats an ISO-8601 timestamp or date as `January 15, 2024`. Unparseable
/// input is returned unchanged.
pub fn display_date(published_at: &str) -> String {
    let trimmed = published_at.trim();
    let date = match OffsetDateTime::parse(trimmed, &Rfc3339) {
        Ok(dt) => Some(dt.date()),
        Err(_) => Date::parse(trimmed, DATE_ONLY).ok(),
    };

    date.and_then(|d| d.format(DISPLAY_DATE).ok())
        .unwrap_or_else(|| published_at.to_string())
}
