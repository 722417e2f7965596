use crate::types::errors::{Result, TimeRecordError};

/// Parses a goal value: a plain non-negative integer count of minutes.
pub fn parse_duration_minutes(text: &str) -> Result<u32> {
    text.trim()
        .parse()
        .map_err(|_| TimeRecordError::MalformedGoal {
            text: text.to_string(),
        })
}

/// Renders a minute count as `"Nm"` up to an hour, `"Hh"`/`"Hh Mm"` beyond.
///
/// Exactly 60 still renders as `"60m"`; hours start strictly above one hour.
/// Negative counts (a goal that was exceeded) render the absolute value with
/// a leading sign: `-90` becomes `"-1h 30m"`.
pub fn format_duration_minutes(minutes: i64) -> String {
    if minutes < 0 {
        return format!("-{}", format_duration_minutes(-minutes));
    }
    if minutes <= 60 {
        return format!("{minutes}m");
    }
    let hours: i64 = minutes / 60;
    let rest: i64 = minutes % 60;
    if rest == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {rest}m")
    }
}

/// Rounds like JavaScript `Math.round`: ties go toward positive infinity.
pub fn js_round(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_minutes() {
        assert_eq!(parse_duration_minutes("480").unwrap(), 480);
        assert_eq!(parse_duration_minutes(" 0 ").unwrap(), 0);
    }

    #[test]
    fn rejects_non_integer_goals() {
        for bad in ["", "8h", "4.5", "-30", "480m"] {
            assert_eq!(
                parse_duration_minutes(bad),
                Err(TimeRecordError::MalformedGoal {
                    text: bad.to_string()
                })
            );
        }
    }

    #[test]
    fn formats_minutes_and_hours() {
        assert_eq!(format_duration_minutes(0), "0m");
        assert_eq!(format_duration_minutes(59), "59m");
        assert_eq!(format_duration_minutes(60), "60m");
        assert_eq!(format_duration_minutes(61), "1h 1m");
        assert_eq!(format_duration_minutes(120), "2h");
        assert_eq!(format_duration_minutes(270), "4h 30m");
    }

    #[test]
    fn negative_durations_keep_the_positive_split() {
        assert_eq!(format_duration_minutes(-45), "-45m");
        assert_eq!(format_duration_minutes(-60), "-60m");
        assert_eq!(format_duration_minutes(-61), "-1h 1m");
        assert_eq!(format_duration_minutes(-90), "-1h 30m");
        assert_eq!(format_duration_minutes(-120), "-2h");
    }

    #[test]
    fn rounding_matches_math_round() {
        assert_eq!(js_round(2.4), 2);
        assert_eq!(js_round(2.5), 3);
        assert_eq!(js_round(-2.5), -2);
        assert_eq!(js_round(-2.6), -3);
        assert_eq!(js_round(209.99), 210);
    }
}
