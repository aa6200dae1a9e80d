//! The pricing engine. A pure function of (quest, team size, slot time), so
//! the quote can be re-derived from a stored booking when the operator
//! confirms it later.

use chrono::NaiveDateTime;

use crate::booking::catalog::{Category, Quest};
use crate::booking::settings::Settings;

/// Price in rubles for one booking. Team sizes above the quest's maximum
/// are rejected upstream and never reach this function.
pub fn price(quest: &Quest, settings: &Settings, team_size: u8, slot: NaiveDateTime) -> i64 {
    let mut total = match quest.category {
        Category::Kids => {
            let extra = i64::from(team_size.saturating_sub(4));
            settings.kids_base_2_4 + extra * settings.kids_per_extra_person
        }
        Category::Adult => match team_size {
            2..=4 => settings.adult_base_2_4,
            5 => settings.adult_5,
            _ => settings.adult_6,
        },
    };

    // The surcharge applies once, only to the flexible quest at night.
    if is_night_slot(quest, settings, slot) {
        total += settings.night_extra;
    }

    total
}

/// Whether this booking lands in the surcharged night window.
pub fn is_night_slot(quest: &Quest, settings: &Settings, slot: NaiveDateTime) -> bool {
    quest.key == settings.flexible_quest && slot.time() >= settings.night_from
}
