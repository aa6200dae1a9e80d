//! Inline and reply keyboard layouts for every dialog step.

use chrono::{Duration, NaiveDateTime};
use teloxide::types::{
    ButtonRequest, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup,
};

use crate::booking::{Catalog, Category, Settings};
use crate::utils::datetime::{format_slot, today_in};

pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("📅 Забронировать", "action:book")],
        vec![InlineKeyboardButton::callback("ℹ️ Что умеет бот", "action:help")],
    ])
}

pub fn categories() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("🔞 Взрослые квесты (14+)", "cat:adult")],
        vec![InlineKeyboardButton::callback("🧒 Детские квесты (10–13)", "cat:kids")],
    ])
}

pub fn quests(catalog: &Catalog, category: Category) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = catalog
        .in_category(category)
        .map(|q| {
            vec![InlineKeyboardButton::callback(
                q.title.clone(),
                format!("quest:{}", q.key),
            )]
        })
        .collect();
    rows.push(vec![InlineKeyboardButton::callback("⬅️ Назад", "back:cats")]);
    InlineKeyboardMarkup::new(rows)
}

pub fn team_sizes(max_team: u8) -> InlineKeyboardMarkup {
    let buttons: Vec<InlineKeyboardButton> = (2..=max_team)
        .map(|n| InlineKeyboardButton::callback(n.to_string(), format!("team:{n}")))
        .collect();
    let mut rows: Vec<Vec<InlineKeyboardButton>> =
        buttons.chunks(5).map(<[InlineKeyboardButton]>::to_vec).collect();
    rows.push(vec![InlineKeyboardButton::callback("⬅️ Назад", "back:quests")]);
    InlineKeyboardMarkup::new(rows)
}

pub fn dates(settings: &Settings) -> InlineKeyboardMarkup {
    date_rows(settings, "date", 3, Some(("⬅️ Назад", "back:team")))
}

pub fn admin_dates(settings: &Settings) -> InlineKeyboardMarkup {
    date_rows(settings, "admin_date", 4, None)
}

fn date_rows(
    settings: &Settings,
    prefix: &str,
    per_row: usize,
    back: Option<(&str, &str)>,
) -> InlineKeyboardMarkup {
    let today = today_in(settings.tz());
    let buttons: Vec<InlineKeyboardButton> = (0..=settings.days_ahead)
        .map(|i| {
            let d = today + Duration::days(i64::from(i));
            InlineKeyboardButton::callback(
                d.format("%d.%m").to_string(),
                format!("{prefix}:{}", d.format("%Y-%m-%d")),
            )
        })
        .collect();
    let mut rows: Vec<Vec<InlineKeyboardButton>> =
        buttons.chunks(per_row).map(<[InlineKeyboardButton]>::to_vec).collect();
    if let Some((label, data)) = back {
        rows.push(vec![InlineKeyboardButton::callback(label, data)]);
    }
    InlineKeyboardMarkup::new(rows)
}

/// One button per currently-available slot; the availability filter has
/// already run by the time this is built.
pub fn times(slots: &[NaiveDateTime]) -> InlineKeyboardMarkup {
    let buttons: Vec<InlineKeyboardButton> = slots
        .iter()
        .map(|s| {
            InlineKeyboardButton::callback(
                s.format("%H:%M").to_string(),
                format!("slot:{}", format_slot(*s)),
            )
        })
        .collect();
    let mut rows: Vec<Vec<InlineKeyboardButton>> =
        buttons.chunks(4).map(<[InlineKeyboardButton]>::to_vec).collect();
    rows.push(vec![InlineKeyboardButton::callback("⬅️ Назад к датам", "back:dates")]);
    InlineKeyboardMarkup::new(rows)
}

pub fn phone_request() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new("📱 Поделиться контактом").request(ButtonRequest::Contact),
    ]])
    .resize_keyboard(true)
    .one_time_keyboard(true)
}

pub fn admin_decision(booking_id: i64) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("✅ Подтвердить", format!("admin:confirm:{booking_id}")),
        InlineKeyboardButton::callback("❌ Отклонить", format!("admin:reject:{booking_id}")),
    ]])
}

pub fn rules_ack(booking_id: i64) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "Я ознакомлен(а) с правилами ✅",
        format!("rules_ok:{booking_id}"),
    )]])
}
