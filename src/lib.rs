//! Punch-clock time tracking stored as plain text.
//!
//! The canonical state is a directive string embedded in a host document,
//! e.g. `{{renderer :time-recorder, goal:480, 09:00 - 12:00, 13:00 -}}`:
//! an optional goal budget, completed intervals in entry order, and at most
//! one open (pending) clock-in as the last entry. Parsing and formatting
//! are exact inverses, so a parse/format round trip never corrupts the
//! embedded text.
//!
//! - [`types`] holds the data model: [`Timestamp`], [`Interval`],
//!   the immutable [`TimeRecords`] aggregate, and the error taxonomy.
//! - [`core`] holds the grammar: timestamp shapes, the directive
//!   tokenizer, and goal-duration parsing/formatting.
//! - [`parse`] builds an aggregate from a directive argument list.
//! - [`block`] locates and rewrites the single directive inside a larger
//!   text blob.
//! - [`render`] derives a presentation-agnostic payload for the host UI.
//! - [`settings`] models the host-supplied configuration and the
//!   insert-block template.

pub mod block;
pub mod core;
pub mod parse;
pub mod render;
pub mod settings;
pub mod types;

pub use crate::block::{
    RENDERER_ID, clock_in_block_at, clock_out_block_at, locate_directive, new_directive,
    parse_block, parse_block_on, rewrite,
};
pub use crate::core::duration::{format_duration_minutes, parse_duration_minutes};
pub use crate::core::timestamp::{parse_timestamp, parse_timestamp_on};
pub use crate::core::token::split_directive_args;
pub use crate::parse::{parse_time_records, parse_time_records_on};
pub use crate::render::{ClockAction, RenderPayload, RenderRow};
pub use crate::settings::Settings;
pub use crate::types::errors::{Result, TimeRecordError};
pub use crate::types::records::{Interval, TimeRecords};
pub use crate::types::timestamp::{Timestamp, TimestampStyle, minutes_between};
