use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::token::split_directive_args;
use crate::parse::{parse_time_records, parse_time_records_on};
use crate::types::errors::{Result, TimeRecordError};
use crate::types::records::TimeRecords;
use crate::types::timestamp::Timestamp;

/// Renderer identifier carried by every embedded directive.
pub const RENDERER_ID: &str = ":time-recorder";

// Matches `{{renderer :time-recorder, <args>}}`; group 1 is the raw
// argument list, absent for a bare `{{renderer :time-recorder}}`.
static RENDERER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{renderer\s+:time-recorder\s*(?:,\s*([^}]*))?\}\}").unwrap());

/// Extracts the argument list of the single directive embedded in `host`.
///
/// Zero matches and multiple matches are both errors: a rewrite must be
/// able to target exactly one embedded state blob.
pub fn locate_directive(host: &str) -> Result<Vec<String>> {
    let capture = single_capture(host)?;
    Ok(capture
        .get(1)
        .map(|args| split_directive_args(args.as_str()))
        .unwrap_or_default())
}

/// Parses the time record embedded in `host`.
pub fn parse_block(host: &str) -> Result<TimeRecords> {
    parse_time_records(&locate_directive(host)?)
}

/// Same as [`parse_block`] with an explicit "today" for short timestamps.
pub fn parse_block_on(today: chrono::NaiveDate, host: &str) -> Result<TimeRecords> {
    parse_time_records_on(today, &locate_directive(host)?)
}

/// Renders a complete directive marker for the given record.
pub fn new_directive(records: &TimeRecords) -> String {
    let text: String = records.to_canonical_text();
    if text.is_empty() {
        format!("{{{{renderer {RENDERER_ID}}}}}")
    } else {
        format!("{{{{renderer {RENDERER_ID}, {text}}}}}")
    }
}

/// Replaces the single directive in `host` with the serialized form of
/// `records`, leaving all surrounding text untouched.
pub fn rewrite(host: &str, records: &TimeRecords) -> Result<String> {
    let capture = single_capture(host)?;
    let whole = capture.get(0).ok_or(TimeRecordError::NoDirectiveFound)?;
    let mut out = String::with_capacity(host.len());
    out.push_str(&host[..whole.start()]);
    out.push_str(&new_directive(records));
    out.push_str(&host[whole.end()..]);
    Ok(out)
}

/// Clock-in command against a host block: parse, transition at `stamp`,
/// rewrite. Short tokens in the block are interpreted on the stamp's date,
/// so a command and the record it edits agree on "today". The host text is
/// never modified on error.
pub fn clock_in_block_at(host: &str, stamp: Timestamp) -> Result<(String, TimeRecords)> {
    let records: TimeRecords = parse_block_on(stamp.instant().date(), host)?;
    let records: TimeRecords = records.clock_in_at(stamp).inspect_err(|err| {
        log::warn!("clock-in rejected: {err}");
    })?;
    let rewritten: String = rewrite(host, &records)?;
    Ok((rewritten, records))
}

/// Clock-out command against a host block. See [`clock_in_block_at`].
pub fn clock_out_block_at(host: &str, stamp: Timestamp) -> Result<(String, TimeRecords)> {
    let records: TimeRecords = parse_block_on(stamp.instant().date(), host)?;
    let records: TimeRecords = records.clock_out_at(stamp).inspect_err(|err| {
        log::warn!("clock-out rejected: {err}");
    })?;
    let rewritten: String = rewrite(host, &records)?;
    Ok((rewritten, records))
}

fn single_capture<'h>(host: &'h str) -> Result<regex::Captures<'h>> {
    let mut captures = RENDERER_PATTERN.captures_iter(host);
    let first = captures.next().ok_or(TimeRecordError::NoDirectiveFound)?;
    if captures.next().is_some() {
        return Err(TimeRecordError::MultipleDirectivesFound);
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn locates_the_argument_list() {
        let host = "Work log {{renderer :time-recorder, goal:480, 09:00 - 12:00}} tail";
        assert_eq!(
            locate_directive(host).unwrap(),
            vec!["goal:480".to_string(), "09:00 - 12:00".to_string()]
        );
    }

    #[test]
    fn bare_directive_has_no_args() {
        assert_eq!(
            locate_directive("{{renderer :time-recorder}}").unwrap(),
            Vec::<String>::new()
        );
    }

    #[test]
    fn missing_directive_is_an_error() {
        assert_eq!(
            locate_directive("no directive here"),
            Err(TimeRecordError::NoDirectiveFound)
        );
    }

    #[test]
    fn multiple_directives_are_an_error() {
        let host = "{{renderer :time-recorder, 09:00 -}} {{renderer :time-recorder}}";
        assert_eq!(
            locate_directive(host),
            Err(TimeRecordError::MultipleDirectivesFound)
        );
    }

    #[test]
    fn rewrite_touches_only_the_directive() {
        let host = "before {{renderer :time-recorder, 09:00 - 12:00}} after";
        let records = parse_block(host).unwrap();
        let records = records.clock_in_at(Timestamp::Short(at(13, 0))).unwrap();
        assert_eq!(
            rewrite(host, &records).unwrap(),
            "before {{renderer :time-recorder, 09:00 - 12:00, 13:00 -}} after"
        );
    }

    #[test]
    fn rewrite_of_empty_record_drops_the_argument_list() {
        let host = "x {{renderer :time-recorder, 09:00 -}} y";
        assert_eq!(
            rewrite(host, &TimeRecords::new()).unwrap(),
            "x {{renderer :time-recorder}} y"
        );
    }

    #[test]
    fn clock_out_command_closes_the_pending_interval() {
        let host = "{{renderer :time-recorder, 09:00 - 12:00, 13:00 -}}";
        let (rewritten, records) =
            clock_out_block_at(host, Timestamp::Short(at(13, 30))).unwrap();
        assert!(!records.is_clocked_in());
        assert_eq!(
            rewritten,
            "{{renderer :time-recorder, 09:00 - 12:00, 13:00 - 13:30}}"
        );
    }

    #[test]
    fn clock_in_command_rejects_an_open_record() {
        let host = "{{renderer :time-recorder, 13:00 -}}";
        assert_eq!(
            clock_in_block_at(host, Timestamp::Short(at(14, 0))),
            Err(TimeRecordError::AlreadyClockedIn)
        );
    }

    #[test]
    fn clock_out_command_rejects_a_closed_record() {
        let host = "{{renderer :time-recorder, 09:00 - 12:00}}";
        assert_eq!(
            clock_out_block_at(host, Timestamp::Short(at(13, 0))),
            Err(TimeRecordError::NotClockedIn)
        );
    }

    #[test]
    fn stale_block_surfaces_as_a_parse_error() {
        // A concurrent edit can leave arbitrary text behind; the command
        // must fail instead of clobbering it.
        let host = "{{renderer :time-recorder, scrambled}}";
        assert!(clock_in_block_at(host, Timestamp::Short(at(9, 0))).is_err());
    }
}
