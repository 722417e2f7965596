use chrono::{Local, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::errors::{Result, TimeRecordError};
use crate::types::timestamp::Timestamp;

// Long format, e.g.: 2024-05-15T21:12 (local time, no timezone suffix)
static RE_LONG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}$").unwrap());
// Short format, e.g.: 9:05 or 21:12
static RE_SHORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}:\d{2}$").unwrap());

/// Parses one of the two accepted timestamp shapes.
///
/// Short tokens are interpreted as today at that hour:minute; use
/// [`parse_timestamp_on`] to pin the reference date.
pub fn parse_timestamp(text: &str) -> Result<Timestamp> {
    parse_timestamp_on(Local::now().date_naive(), text)
}

/// Same as [`parse_timestamp`] with an explicit "today" for short tokens.
pub fn parse_timestamp_on(today: NaiveDate, text: &str) -> Result<Timestamp> {
    if RE_LONG.is_match(text) {
        let instant: NaiveDateTime = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M")
            .map_err(|_| malformed(text))?;
        return Ok(Timestamp::Long(instant));
    }
    if RE_SHORT.is_match(text) {
        return parse_time_of_day(today, text);
    }
    Err(malformed(text))
}

fn parse_time_of_day(today: NaiveDate, text: &str) -> Result<Timestamp> {
    let (hours_tok, minutes_tok) = text.split_once(':').ok_or_else(|| malformed(text))?;
    let hours: u32 = hours_tok.parse().map_err(|_| malformed(text))?;
    let minutes: u32 = minutes_tok.parse().map_err(|_| malformed(text))?;
    if hours >= 24 || minutes >= 60 {
        return Err(malformed(text));
    }
    // seconds are always zeroed for parsed timestamps
    let instant: NaiveDateTime = today
        .and_hms_opt(hours, minutes, 0)
        .ok_or_else(|| malformed(text))?;
    Ok(Timestamp::Short(instant))
}

fn malformed(text: &str) -> TimeRecordError {
    TimeRecordError::MalformedTimestamp {
        text: text.to_string(),
    }
}
