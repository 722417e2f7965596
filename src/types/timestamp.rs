use chrono::{Local, NaiveDateTime};

/// Textual style a timestamp was written in.
///
/// Both styles store a full `NaiveDateTime` internally; the style only
/// controls how the value is rendered back to text (and how it was
/// recognized on input). The ambient settings pick the style for
/// newly-captured timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampStyle {
    /// Time of day only, `HH:MM`.
    Short,
    /// Local ISO date-time without seconds, `YYYY-MM-DDTHH:MM`.
    #[default]
    Long,
}

impl std::fmt::Display for TimestampStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label: &str = match self {
            TimestampStyle::Short => "short",
            TimestampStyle::Long => "long",
        };
        f.write_str(label)
    }
}

/// A point in local wall-clock time, tagged with the style it was written in.
///
/// The instant is **naive** (no timezone or offset information). Values
/// parsed from text always have seconds zeroed; values captured via
/// [`Timestamp::now`] keep their seconds, which only matters for exact
/// (unrounded) elapsed-time sums — formatting always drops them.
///
/// Formatting a `Timestamp` with its own style and re-parsing the result
/// yields an equal instant (for second-truncated instants).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Short(NaiveDateTime),
    Long(NaiveDateTime),
}

impl Timestamp {
    /// Captures the current local time, tagged with the given style.
    pub fn now(style: TimestampStyle) -> Self {
        Self::with_style(Local::now().naive_local(), style)
    }

    pub fn with_style(instant: NaiveDateTime, style: TimestampStyle) -> Self {
        match style {
            TimestampStyle::Short => Timestamp::Short(instant),
            TimestampStyle::Long => Timestamp::Long(instant),
        }
    }

    pub fn instant(&self) -> NaiveDateTime {
        match self {
            Timestamp::Short(instant) | Timestamp::Long(instant) => *instant,
        }
    }

    pub fn style(&self) -> TimestampStyle {
        match self {
            Timestamp::Short(_) => TimestampStyle::Short,
            Timestamp::Long(_) => TimestampStyle::Long,
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Timestamp::Short(instant) => write!(f, "{}", instant.format("%H:%M")),
            Timestamp::Long(instant) => write!(f, "{}", instant.format("%Y-%m-%dT%H:%M")),
        }
    }
}

/// Elapsed minutes from `start` to `end`, unrounded.
///
/// Negative when `end` precedes `start`. Rounding happens only at display
/// time so that repeated total computations never compound rounding error.
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    let millis: i64 = (end - start).num_milliseconds();
    millis as f64 / 60_000.0
}

/// `instant` shifted forward by a fractional minute count (backward when
/// negative).
pub fn add_minutes(instant: NaiveDateTime, minutes: f64) -> NaiveDateTime {
    let millis: i64 = (minutes * 60_000.0).round() as i64;
    instant + chrono::Duration::milliseconds(millis)
}
