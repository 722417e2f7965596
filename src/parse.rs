use chrono::{Local, NaiveDate};

use crate::core::duration::parse_duration_minutes;
use crate::core::timestamp::parse_timestamp_on;
use crate::core::token::{IntervalToken, classify_args, split_interval_token};
use crate::types::errors::{Result, TimeRecordError};
use crate::types::records::{Interval, TimeRecords};
use crate::types::timestamp::Timestamp;

/// Builds a [`TimeRecords`] from a directive argument list.
///
/// Validation is eager and in token order: the first malformed argument
/// aborts the parse. A pending (open) token is only accepted as the last
/// entry in the list.
pub fn parse_time_records(args: &[String]) -> Result<TimeRecords> {
    parse_time_records_on(Local::now().date_naive(), args)
}

/// Same as [`parse_time_records`] with an explicit "today" for short
/// timestamps.
pub fn parse_time_records_on(today: NaiveDate, args: &[String]) -> Result<TimeRecords> {
    let (goal_text, tokens) = classify_args(args);
    let goal_minutes: Option<u32> = match goal_text {
        Some(text) => Some(parse_duration_minutes(text)?),
        None => None,
    };

    let mut intervals: Vec<Interval> = Vec::new();
    let mut pending: Option<Timestamp> = None;
    let last: usize = tokens.len().saturating_sub(1);
    for (idx, token) in tokens.iter().enumerate() {
        match split_interval_token(token)? {
            IntervalToken::Pending(start) => {
                if idx != last {
                    return Err(TimeRecordError::PendingNotLast {
                        token: token.to_string(),
                    });
                }
                pending = Some(parse_timestamp_on(today, start)?);
            }
            IntervalToken::Closed { start, end } => {
                let start: Timestamp = parse_timestamp_on(today, start)?;
                let end: Timestamp = parse_timestamp_on(today, end)?;
                intervals.push(Interval::new(start, end)?);
            }
        }
    }

    Ok(TimeRecords::from_parts(intervals, pending, goal_minutes))
}
