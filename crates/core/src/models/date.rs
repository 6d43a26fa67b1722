use chrono::NaiveDate;

use crate::errors::CoreError;

/// Date format accepted by every string-dated API (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a calendar date in the default `YYYY-MM-DD` format.
pub fn parse_date(input: &str) -> Result<NaiveDate, CoreError> {
    parse_date_with_format(input, DATE_FORMAT)
}

/// Parse a calendar date with an explicit chrono format string.
/// Malformed input surfaces as `CoreError::InvalidDateFormat`.
pub fn parse_date_with_format(input: &str, format: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(input, format).map_err(|e| CoreError::InvalidDateFormat {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Number of whole calendar days from `start` to `end` (negative if `end` is earlier).
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}
