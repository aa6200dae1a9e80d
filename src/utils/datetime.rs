use anyhow::{anyhow, Result};
use chrono::{FixedOffset, NaiveDate, NaiveDateTime, Utc};

/// Storage format for slot timestamps: local wall-clock time in the venue
/// timezone, no offset suffix. Sortable as a plain string.
pub const SLOT_FORMAT: &str = "%Y-%m-%dT%H:%M";

pub fn format_slot(slot: NaiveDateTime) -> String {
    slot.format(SLOT_FORMAT).to_string()
}

pub fn parse_slot(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, SLOT_FORMAT)
        .map_err(|e| anyhow!("Invalid slot timestamp '{s}': {e}"))
}

/// Human-readable slot rendering for messages, e.g. "03.09.2026 19:00".
pub fn format_slot_human(slot: NaiveDateTime) -> String {
    slot.format("%d.%m.%Y %H:%M").to_string()
}

/// Today's calendar date in the venue timezone, not the host's local time.
pub fn today_in(offset: FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(&offset).date_naive()
}
