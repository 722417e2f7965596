use chrono::{Local, NaiveDateTime};

use crate::core::duration::{format_duration_minutes, js_round};
use crate::types::records::TimeRecords;
use crate::types::timestamp::{Timestamp, minutes_between};

/// The transition the render surface should offer next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockAction {
    In,
    Out,
}

impl std::fmt::Display for ClockAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label: &str = match self {
            ClockAction::In => "Clock in",
            ClockAction::Out => "Clock out",
        };
        f.write_str(label)
    }
}

/// One table row: a completed interval, or the running one when `end` is
/// `None` (presentation renders that as "now").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRow {
    pub start: String,
    pub end: Option<String>,
    pub elapsed: String,
}

/// Everything the host-side renderer needs, fully formatted.
///
/// The goal fields are only present when a goal is set. No HTML here;
/// markup is the host's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPayload {
    pub rows: Vec<RenderRow>,
    pub total: String,
    pub goal_remaining: Option<String>,
    pub goal_eta: Option<String>,
    pub action: ClockAction,
}

impl RenderPayload {
    pub fn build(records: &TimeRecords) -> Self {
        Self::build_at(records, Local::now().naive_local())
    }

    pub fn build_at(records: &TimeRecords, now: NaiveDateTime) -> Self {
        let mut rows: Vec<RenderRow> = records
            .intervals()
            .iter()
            .map(|interval| RenderRow {
                start: interval.start().to_string(),
                end: Some(interval.end().to_string()),
                elapsed: format_time_between_at(interval.start(), Some(interval.end()), now),
            })
            .collect();
        if let Some(pending) = records.pending() {
            rows.push(RenderRow {
                start: pending.to_string(),
                end: None,
                elapsed: format_time_between_at(pending, None, now),
            });
        }

        let (goal_remaining, goal_eta) = match records.goal_minutes() {
            Some(_) => (
                Some(records.goal_remaining_at(now)),
                Some(records.goal_eta_at(now).to_string()),
            ),
            None => (None, None),
        };

        Self {
            rows,
            total: records.total_time_at(now),
            goal_remaining,
            goal_eta,
            action: if records.is_clocked_in() {
                ClockAction::Out
            } else {
                ClockAction::In
            },
        }
    }
}

/// Elapsed time between two timestamps as `"Xh Ym"`; `now` stands in for a
/// missing end.
pub fn format_time_between_at(
    start: Timestamp,
    end: Option<Timestamp>,
    now: NaiveDateTime,
) -> String {
    let end_instant: NaiveDateTime = end.map(|ts| ts.instant()).unwrap_or(now);
    let minutes: f64 = minutes_between(start.instant(), end_instant);
    format_duration_minutes(js_round(minutes))
}
