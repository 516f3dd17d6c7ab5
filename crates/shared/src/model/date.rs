use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Canonical storage and query form. Sorts lexicographically in calendar order
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Human readable form used in responses, e.g. `Fri Jan 05 2024`
pub const DISPLAY_DATE_FORMAT: &str = "%a %b %d %Y";

pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Years that render as exactly four digits in `DATE_FORMAT`. chrono's `%Y`
/// also takes signed and longer years, which break the text ordering
fn has_four_digit_year(date: &NaiveDate) -> bool {
    (0..=9999).contains(&date.year())
}

/// Strict `YYYY-MM-DD`, as used for log range bounds
pub fn parse_canonical_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .ok()
        .filter(has_four_digit_year)
}

/// Parse a client supplied date. Accepts `YYYY-MM-DD` or an RFC 3339
/// timestamp, in which case the UTC calendar day is used
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    parse_canonical_date(value).or_else(|| {
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|d| d.with_timezone(&Utc).date_naive())
            .filter(has_four_digit_year)
    })
}

/// The current UTC calendar day
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
