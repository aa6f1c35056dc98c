use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub const UNKNOWN_DATE: &str = "Unknown date";
pub const INVALID_DATE: &str = "Invalid date";

const DISPLAY_FORMAT: &str = "%b %-d, %Y";

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%b %d, %Y", "%B %d, %Y"];
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Render stored date text as `"Mar 5, 2024"`.
///
/// Blank input yields [`UNKNOWN_DATE`], unparseable input [`INVALID_DATE`].
/// Timestamps keep the calendar date they were written with.
#[must_use]
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return UNKNOWN_DATE.to_string();
    };

    match parse_calendar_date(raw) {
        Some(date) => date.format(DISPLAY_FORMAT).to_string(),
        None => {
            tracing::debug!(value = raw, "unparseable date");
            INVALID_DATE.to_string()
        }
    }
}

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format(DISPLAY_FORMAT).to_string()
}

fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        })
}
