use chrono::{Local, NaiveDateTime};

use crate::core::duration::{format_duration_minutes, js_round};
use crate::types::errors::{Result, TimeRecordError};
use crate::types::timestamp::{Timestamp, TimestampStyle, add_minutes, minutes_between};

/// A completed (start, end) pair of tracked time.
///
/// Construction rejects `end < start`; a zero-length interval is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    start: Timestamp,
    end: Timestamp,
}

impl Interval {
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self> {
        if end.instant() < start.instant() {
            return Err(TimeRecordError::IntervalInversion {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Elapsed minutes, unrounded.
    pub fn minutes(&self) -> f64 {
        minutes_between(self.start.instant(), self.end.instant())
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// The time-record aggregate: completed intervals in entry order, an
/// optional open (pending) clock-in, and an optional goal budget.
///
/// The aggregate is a log, not a sorted timeline: intervals keep their
/// insertion order and the model never reorders or deduplicates them.
/// Every transition returns a fresh value; a previously held aggregate
/// stays valid as a historical snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeRecords {
    intervals: Vec<Interval>,
    pending: Option<Timestamp>,
    goal_minutes: Option<u32>,
}

impl TimeRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        intervals: Vec<Interval>,
        pending: Option<Timestamp>,
        goal_minutes: Option<u32>,
    ) -> Self {
        Self {
            intervals,
            pending,
            goal_minutes,
        }
    }

    /// A fresh record that is already clocked in: no intervals, pending at
    /// "now". This is what the insert-block command produces.
    pub fn started(style: TimestampStyle) -> Self {
        Self::started_at(Timestamp::now(style))
    }

    pub fn started_at(stamp: Timestamp) -> Self {
        Self {
            intervals: Vec::new(),
            pending: Some(stamp),
            goal_minutes: None,
        }
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn pending(&self) -> Option<Timestamp> {
        self.pending
    }

    pub fn goal_minutes(&self) -> Option<u32> {
        self.goal_minutes
    }

    pub fn is_clocked_in(&self) -> bool {
        self.pending.is_some()
    }

    /// End timestamp of the most recently completed interval.
    pub fn last_clocked_out(&self) -> Option<Timestamp> {
        self.intervals.last().map(|interval| interval.end())
    }

    pub fn with_goal(&self, minutes: u32) -> Self {
        Self {
            intervals: self.intervals.clone(),
            pending: self.pending,
            goal_minutes: Some(minutes),
        }
    }

    /// Appends a completed interval, keeping everything else unchanged.
    pub fn add_interval(&self, start: Timestamp, end: Timestamp) -> Result<Self> {
        let interval: Interval = Interval::new(start, end)?;
        let mut intervals: Vec<Interval> = self.intervals.clone();
        intervals.push(interval);
        Ok(Self {
            intervals,
            pending: self.pending,
            goal_minutes: self.goal_minutes,
        })
    }

    /// Opens a pending interval at "now" in the given style.
    pub fn clock_in(&self, style: TimestampStyle) -> Result<Self> {
        self.clock_in_at(Timestamp::now(style))
    }

    pub fn clock_in_at(&self, stamp: Timestamp) -> Result<Self> {
        if self.pending.is_some() {
            return Err(TimeRecordError::AlreadyClockedIn);
        }
        Ok(Self {
            intervals: self.intervals.clone(),
            pending: Some(stamp),
            goal_minutes: self.goal_minutes,
        })
    }

    /// Closes the pending interval at "now" in the given style.
    ///
    /// A captured "now" earlier than the stored clock-in (clock skew, or a
    /// stale re-read of an edited block) is an error, never silently
    /// swapped.
    pub fn clock_out(&self, style: TimestampStyle) -> Result<Self> {
        self.clock_out_at(Timestamp::now(style))
    }

    pub fn clock_out_at(&self, stamp: Timestamp) -> Result<Self> {
        let pending: Timestamp = self.pending.ok_or(TimeRecordError::NotClockedIn)?;
        let interval: Interval = Interval::new(pending, stamp)?;
        let mut intervals: Vec<Interval> = self.intervals.clone();
        intervals.push(interval);
        Ok(Self {
            intervals,
            pending: None,
            goal_minutes: self.goal_minutes,
        })
    }

    /// Sum of all interval durations plus, when clocked in, the time from
    /// the pending stamp to "now". Unrounded, and not stable while clocked
    /// in: each call re-captures "now".
    pub fn total_minutes_exact(&self) -> f64 {
        self.total_minutes_exact_at(Local::now().naive_local())
    }

    pub fn total_minutes_exact_at(&self, now: NaiveDateTime) -> f64 {
        let mut total: f64 = self.intervals.iter().map(Interval::minutes).sum();
        if let Some(pending) = self.pending {
            total += minutes_between(pending.instant(), now);
        }
        total
    }

    pub fn total_minutes(&self) -> i64 {
        self.total_minutes_at(Local::now().naive_local())
    }

    pub fn total_minutes_at(&self, now: NaiveDateTime) -> i64 {
        js_round(self.total_minutes_exact_at(now))
    }

    pub fn total_time(&self) -> String {
        self.total_time_at(Local::now().naive_local())
    }

    pub fn total_time_at(&self, now: NaiveDateTime) -> String {
        format_duration_minutes(self.total_minutes_at(now))
    }

    /// Formatted time left toward the goal; negative once the goal is
    /// exceeded. A missing goal counts as zero.
    pub fn goal_remaining(&self) -> String {
        self.goal_remaining_at(Local::now().naive_local())
    }

    pub fn goal_remaining_at(&self, now: NaiveDateTime) -> String {
        let goal: i64 = i64::from(self.goal_minutes.unwrap_or(0));
        format_duration_minutes(goal - self.total_minutes_at(now))
    }

    /// Projected instant at which the goal will be reached, assuming
    /// tracking continues from "now".
    ///
    /// Short style when the ETA falls on the same calendar day as "now",
    /// long otherwise. An exceeded goal yields a valid timestamp in the
    /// past; presentation decides what to do with it.
    pub fn goal_eta(&self) -> Timestamp {
        self.goal_eta_at(Local::now().naive_local())
    }

    pub fn goal_eta_at(&self, now: NaiveDateTime) -> Timestamp {
        let goal: f64 = f64::from(self.goal_minutes.unwrap_or(0));
        let remaining: f64 = goal - self.total_minutes_exact_at(now);
        let eta: NaiveDateTime = add_minutes(now, remaining);
        if eta.date() == now.date() {
            Timestamp::Short(eta)
        } else {
            Timestamp::Long(eta)
        }
    }

    /// The canonical textual form: goal first, intervals in entry order,
    /// pending last, comma-joined. Parsing this string yields an equal
    /// aggregate.
    pub fn to_canonical_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(goal) = self.goal_minutes {
            parts.push(format!("goal:{goal}"));
        }
        for interval in &self.intervals {
            parts.push(interval.to_string());
        }
        if let Some(pending) = self.pending {
            parts.push(format!("{pending} -"));
        }
        parts.join(", ")
    }
}

impl std::fmt::Display for TimeRecords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_canonical_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn short(h: u32, m: u32) -> Timestamp {
        Timestamp::Short(dt(h, m))
    }

    #[test]
    fn interval_rejects_inversion() {
        let err = Interval::new(short(10, 0), short(9, 0)).unwrap_err();
        assert_eq!(
            err,
            TimeRecordError::IntervalInversion {
                start: "10:00".to_string(),
                end: "09:00".to_string(),
            }
        );
    }

    #[test]
    fn zero_length_interval_is_valid() {
        let interval = Interval::new(short(9, 0), short(9, 0)).unwrap();
        assert_eq!(interval.minutes(), 0.0);
    }

    #[test]
    fn clock_in_twice_fails() {
        let records = TimeRecords::new().clock_in_at(short(9, 0)).unwrap();
        assert_eq!(
            records.clock_in_at(short(9, 5)),
            Err(TimeRecordError::AlreadyClockedIn)
        );
    }

    #[test]
    fn clock_out_without_clock_in_fails() {
        assert_eq!(
            TimeRecords::new().clock_out_at(short(9, 0)),
            Err(TimeRecordError::NotClockedIn)
        );
    }

    #[test]
    fn clock_in_then_out_appends_one_interval() {
        let open = TimeRecords::new().clock_in_at(short(9, 0)).unwrap();
        assert!(open.is_clocked_in());
        let closed = open.clock_out_at(short(10, 30)).unwrap();
        assert!(!closed.is_clocked_in());
        assert_eq!(closed.intervals().len(), 1);
        assert_eq!(closed.intervals()[0].minutes(), 90.0);
        assert_eq!(closed.last_clocked_out(), Some(short(10, 30)));
    }

    #[test]
    fn clock_out_before_clock_in_is_inversion() {
        let open = TimeRecords::new().clock_in_at(short(10, 0)).unwrap();
        assert!(matches!(
            open.clock_out_at(short(9, 59)),
            Err(TimeRecordError::IntervalInversion { .. })
        ));
    }

    #[test]
    fn transitions_leave_the_prior_value_untouched() {
        let closed = TimeRecords::new()
            .add_interval(short(9, 0), short(10, 0))
            .unwrap();
        let open = closed.clock_in_at(short(11, 0)).unwrap();
        assert_eq!(closed.pending(), None);
        assert_eq!(closed.intervals().len(), 1);
        assert_eq!(open.intervals().len(), 1);
        assert_eq!(open.pending(), Some(short(11, 0)));
    }

    #[test]
    fn totals_include_the_pending_interval() {
        let records = TimeRecords::new()
            .add_interval(short(9, 0), short(12, 0))
            .unwrap()
            .clock_in_at(short(13, 0))
            .unwrap();
        assert_eq!(records.total_minutes_exact_at(dt(13, 30)), 210.0);
        assert_eq!(records.total_minutes_at(dt(13, 30)), 210);
        assert_eq!(records.total_time_at(dt(13, 30)), "3h 30m");
    }

    #[test]
    fn goal_remaining_goes_negative_when_exceeded() {
        let records = TimeRecords::new()
            .add_interval(short(9, 0), short(12, 0))
            .unwrap()
            .with_goal(120);
        assert_eq!(records.goal_remaining_at(dt(12, 0)), "-60m");
    }

    #[test]
    fn goal_remaining_without_goal_counts_from_zero() {
        let records = TimeRecords::new()
            .add_interval(short(9, 0), short(9, 30))
            .unwrap();
        assert_eq!(records.goal_remaining_at(dt(10, 0)), "-30m");
    }

    #[test]
    fn goal_eta_same_day_is_short() {
        let records = TimeRecords::new()
            .clock_in_at(short(13, 0))
            .unwrap()
            .with_goal(480);
        let eta = records.goal_eta_at(dt(13, 30));
        // 7.5 hours left from 13:30 -> 21:00 today.
        assert_eq!(eta, Timestamp::Short(dt(21, 0)));
    }

    #[test]
    fn goal_eta_crossing_midnight_is_long() {
        let records = TimeRecords::new()
            .clock_in_at(short(20, 0))
            .unwrap()
            .with_goal(480);
        let eta = records.goal_eta_at(dt(20, 30));
        assert_eq!(eta.style(), TimestampStyle::Long);
        assert_eq!(eta.to_string(), "2024-05-16T04:00");
    }

    #[test]
    fn canonical_text_orders_goal_intervals_pending() {
        let records = TimeRecords::new()
            .add_interval(short(9, 0), short(12, 0))
            .unwrap()
            .clock_in_at(short(13, 0))
            .unwrap()
            .with_goal(480);
        assert_eq!(
            records.to_canonical_text(),
            "goal:480, 09:00 - 12:00, 13:00 -"
        );
    }

    #[test]
    fn empty_record_renders_empty_text() {
        assert_eq!(TimeRecords::new().to_canonical_text(), "");
    }
}
