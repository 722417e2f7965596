use crate::block::new_directive;
use crate::types::records::TimeRecords;
use crate::types::timestamp::{Timestamp, TimestampStyle};

/// Template slot replaced by a fresh directive on insertion.
pub const PUNCH_CLOCK_SLOT: &str = "{{{punch-clock}}}";
/// Template slot replaced by a journal-page reference, when the host
/// supplies one.
pub const TODAY_SLOT: &str = "{{{today}}}";

/// User-configurable settings, supplied read-only by the host.
///
/// `default_style` picks the style for newly-captured timestamps; long
/// style is the default so tracking keeps working across midnight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub default_style: TimestampStyle,
    pub block_template: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_style: TimestampStyle::Long,
            block_template: PUNCH_CLOCK_SLOT.to_string(),
        }
    }
}

impl Settings {
    /// Text for the "insert a new time-record block" command: the template
    /// with a freshly-started (clocked-in at now) directive in the
    /// punch-clock slot.
    pub fn insertion_text(&self, today_ref: Option<&str>) -> String {
        self.insertion_text_at(Timestamp::now(self.default_style), today_ref)
    }

    pub fn insertion_text_at(&self, stamp: Timestamp, today_ref: Option<&str>) -> String {
        let mut template: String = self.block_template.clone();
        // The punch-clock slot must always survive template editing.
        if !template.contains(PUNCH_CLOCK_SLOT) {
            template.push(' ');
            template.push_str(PUNCH_CLOCK_SLOT);
        }
        if let Some(today) = today_ref {
            template = template.replace(TODAY_SLOT, today);
        }
        let directive: String = format!("{} ", new_directive(&TimeRecords::started_at(stamp)));
        template.replace(PUNCH_CLOCK_SLOT, &directive)
    }
}
