//! The availability rules engine. Decides whether a (quest, slot) pair may
//! accept one more booking, given the quest keys already occupying that
//! exact slot.
//!
//! Three rules, checked in order:
//! 1. time window — a slot later than the quest's `last_start` is out;
//! 2. night exclusivity — at or after `night_from` only the flexible quest
//!    may book, and only into an empty slot;
//! 3. daytime co-scheduling — at most two parallel bookings, and a pair is
//!    legal only when exactly one of the two is the flexible quest.
//!
//! Callers consult this twice: when rendering the time keyboard and again
//! right before `Booking::create`, closing the race between presentation
//! and commit.

use chrono::{NaiveDate, NaiveDateTime};
use sqlx::SqlitePool;
use std::collections::HashSet;

use crate::booking::catalog::{Catalog, Quest};
use crate::booking::settings::Settings;
use crate::booking::slots::slots_for_date;
use crate::database::models::Booking;
use crate::utils::datetime::format_slot;

/// Per-quest time-window rule, independent of occupancy.
pub fn allowed_by_time(quest: &Quest, settings: &Settings, slot: NaiveDateTime) -> bool {
    if slot.time() > quest.last_start {
        return false;
    }
    if slot.time() >= settings.night_from {
        return quest.key == settings.flexible_quest;
    }
    true
}

/// Whether a new booking for `quest_key` may be placed at `slot`, given the
/// set of quest keys with non-rejected bookings at that slot.
pub fn may_book(
    catalog: &Catalog,
    settings: &Settings,
    quest_key: &str,
    slot: NaiveDateTime,
    occupants: &HashSet<String>,
) -> bool {
    let Some(quest) = catalog.get(quest_key) else {
        return false;
    };

    if !allowed_by_time(quest, settings, slot) {
        return false;
    }

    // Night slots hold at most one booking, even for the flexible quest.
    if slot.time() >= settings.night_from {
        return occupants.is_empty();
    }

    match occupants.len() {
        0 => true,
        1 => {
            let candidate_flexible = quest_key == settings.flexible_quest;
            let existing_flexible = occupants.contains(&settings.flexible_quest);
            // Exactly one of the pair must be the flexible quest: two
            // ordinary quests never share a slot, and neither do two
            // instances of the flexible one.
            candidate_flexible != existing_flexible
        }
        _ => false,
    }
}

/// Authoritative availability check against current occupancy in the store.
pub async fn slot_available(
    pool: &SqlitePool,
    catalog: &Catalog,
    settings: &Settings,
    quest_key: &str,
    slot: NaiveDateTime,
) -> Result<bool, sqlx::Error> {
    let occupants = Booking::occupied_quests(pool, &format_slot(slot)).await?;
    Ok(may_book(catalog, settings, quest_key, slot, &occupants))
}

/// Filters the full slot sequence of `date` down to the slots currently
/// bookable for `quest_key`. Used to build the time keyboard.
pub async fn available_slots(
    pool: &SqlitePool,
    catalog: &Catalog,
    settings: &Settings,
    quest_key: &str,
    date: NaiveDate,
) -> Result<Vec<NaiveDateTime>, sqlx::Error> {
    let mut out = Vec::new();
    for slot in slots_for_date(date, settings) {
        if slot_available(pool, catalog, settings, quest_key, slot).await? {
            out.push(slot);
        }
    }
    Ok(out)
}
