//! `DD/MM/YYYY` date handling

use chrono::NaiveDate;

/// Date used in comparisons when a value does not parse (1970-01-01)
pub fn epoch_sentinel() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Parse a `DD/MM/YYYY` date.
///
/// Surrounding whitespace and anything after the first whitespace (a time of
/// day, for example) are ignored. Returns `None` for other formats and for
/// impossible dates such as `31/02/2024`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let day_part = value.split_whitespace().next()?;
    let mut parts = day_part.split('/');
    let day = parts.next()?.parse::<u32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let year = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a date, falling back to [`epoch_sentinel`]
pub fn date_or_epoch(value: &str) -> NaiveDate {
    parse_date(value).unwrap_or_else(epoch_sentinel)
}

/// Format a date as `DD/MM/YYYY`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
