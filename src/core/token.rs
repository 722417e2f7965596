use crate::types::errors::{Result, TimeRecordError};

/// An interval token split into its timestamp substrings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntervalToken<'a> {
    /// Open interval: a start with no end yet (`"13:00"` or `"13:00 -"`).
    Pending(&'a str),
    /// Completed interval: `"09:00 - 12:00"`.
    Closed { start: &'a str, end: &'a str },
}

/// Splits a directive argument list on commas, trimming each piece.
///
/// All-whitespace input yields no arguments (an empty directive is a valid,
/// empty record).
pub fn split_directive_args(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|arg| arg.trim().to_string()).collect()
}

/// Separates the goal directive from the interval tokens.
///
/// Any argument starting with `goal:` is the goal; only the first one is
/// honored, later duplicates are dropped. Every other argument is an
/// interval token, order preserved.
pub fn classify_args(args: &[String]) -> (Option<&str>, Vec<&str>) {
    let mut goal: Option<&str> = None;
    let mut tokens: Vec<&str> = Vec::new();
    for arg in args {
        match arg.strip_prefix("goal:") {
            Some(value) if goal.is_none() => goal = Some(value.trim()),
            Some(_) => {}
            None => tokens.push(arg.as_str()),
        }
    }
    (goal, tokens)
}

/// Splits an interval token into start/end at the range-separator dash.
///
/// A dash counts as the range separator only when it immediately follows
/// (modulo whitespace) the `(H)H:MM` tail of a timestamp. Dashes inside a
/// long-style date (`2024-05-15`) never match, since they are preceded by
/// digits without the colon.
///
/// A token with no separator, or with nothing after it (`"13:00 -"`), is an
/// open (pending) interval. More than one separator is an error.
pub fn split_interval_token(token: &str) -> Result<IntervalToken<'_>> {
    let bytes: &[u8] = token.as_bytes();
    let mut parts: Vec<&str> = Vec::new();
    let mut seg_start: usize = 0;
    for (idx, &b) in bytes.iter().enumerate() {
        if b == b'-' && follows_minute_pattern(bytes, idx) {
            parts.push(token[seg_start..idx].trim());
            seg_start = idx + 1;
        }
    }
    parts.push(token[seg_start..].trim());

    match parts.as_slice() {
        [start] => Ok(IntervalToken::Pending(start)),
        [start, ""] => Ok(IntervalToken::Pending(start)),
        [start, end] => Ok(IntervalToken::Closed { start, end }),
        _ => Err(TimeRecordError::MalformedIntervalToken {
            token: token.to_string(),
        }),
    }
}

/// True when the text before `dash`, ignoring trailing whitespace, ends with
/// the minute pattern `\d:\d\d`.
fn follows_minute_pattern(bytes: &[u8], dash: usize) -> bool {
    let mut i: usize = dash;
    while i > 0 && bytes[i - 1].is_ascii_whitespace() {
        i -= 1;
    }
    i >= 4
        && bytes[i - 4].is_ascii_digit()
        && bytes[i - 3] == b':'
        && bytes[i - 2].is_ascii_digit()
        && bytes[i - 1].is_ascii_digit()
}
