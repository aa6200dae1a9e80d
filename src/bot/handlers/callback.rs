use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use teloxide::prelude::*;
use teloxide::types::InlineKeyboardMarkup;

use crate::booking::availability::{available_slots, slot_available};
use crate::booking::pricing::is_night_slot;
use crate::booking::Category;
use crate::bot::state::{BookingDialogue, Draft, HandlerResult, State};
use crate::bot::{keyboards, texts, BotContext};
use crate::utils::datetime::{parse_slot, today_in};
use crate::utils::logging::log_validation_error;
use crate::utils::validation::validate_team_size;

/// Edits the message the keyboard lives on, falling back to a new message
/// when the callback carries no message (e.g. it was too old).
async fn edit_or_send(
    bot: &Bot,
    q: &CallbackQuery,
    text: &str,
    keyboard: InlineKeyboardMarkup,
) -> HandlerResult {
    match q.message.as_ref() {
        Some(m) => {
            bot.edit_message_text(m.chat.id, m.id, text)
                .reply_markup(keyboard)
                .await?;
        }
        None => {
            bot.send_message(ChatId(q.from.id.0 as i64), text)
                .reply_markup(keyboard)
                .await?;
        }
    }
    Ok(())
}

/// Main-menu buttons, active only while no booking dialog is running.
pub async fn main_menu(
    bot: Bot,
    dialogue: BookingDialogue,
    q: CallbackQuery,
) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;

    match q.data.as_deref() {
        Some("action:book") => {
            dialogue.update(State::ReceiveName).await?;
            if let Some(m) = q.message.as_ref() {
                bot.edit_message_text(m.chat.id, m.id, texts::ASK_NAME).await?;
            }
        }
        Some("action:help") => {
            edit_or_send(&bot, &q, texts::HELP, keyboards::main_menu()).await?;
        }
        _ => {}
    }
    Ok(())
}

pub async fn choose_category(
    bot: Bot,
    dialogue: BookingDialogue,
    q: CallbackQuery,
    mut draft: Draft,
    ctx: Arc<BotContext>,
) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(category) = q
        .data
        .as_deref()
        .and_then(|d| d.strip_prefix("cat:"))
        .and_then(Category::parse)
    else {
        return Ok(());
    };

    draft.category = Some(category);
    let keyboard = keyboards::quests(&ctx.catalog, category);
    dialogue.update(State::ReceiveQuest { draft }).await?;
    edit_or_send(&bot, &q, texts::ASK_QUEST, keyboard).await?;
    Ok(())
}

pub async fn choose_quest(
    bot: Bot,
    dialogue: BookingDialogue,
    q: CallbackQuery,
    mut draft: Draft,
    ctx: Arc<BotContext>,
) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;

    if q.data.as_deref() == Some("back:cats") {
        dialogue.update(State::ReceiveCategory { draft }).await?;
        edit_or_send(&bot, &q, texts::ASK_CATEGORY, keyboards::categories()).await?;
        return Ok(());
    }

    let Some(quest) = q
        .data
        .as_deref()
        .and_then(|d| d.strip_prefix("quest:"))
        .and_then(|key| ctx.catalog.get(key))
    else {
        return Ok(());
    };

    draft.quest_key = Some(quest.key.clone());
    draft.quest_title = Some(quest.title.clone());
    draft.max_team = Some(quest.max_team);
    let keyboard = keyboards::team_sizes(quest.max_team);
    dialogue.update(State::ReceiveTeamSize { draft }).await?;
    edit_or_send(&bot, &q, texts::ASK_TEAM, keyboard).await?;
    Ok(())
}

pub async fn choose_team(
    bot: Bot,
    dialogue: BookingDialogue,
    q: CallbackQuery,
    mut draft: Draft,
    ctx: Arc<BotContext>,
) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;

    if q.data.as_deref() == Some("back:quests") {
        let category = draft.category.unwrap_or(Category::Adult);
        let keyboard = keyboards::quests(&ctx.catalog, category);
        dialogue.update(State::ReceiveQuest { draft }).await?;
        edit_or_send(&bot, &q, texts::ASK_QUEST, keyboard).await?;
        return Ok(());
    }

    let Some(team_size) = q
        .data
        .as_deref()
        .and_then(|d| d.strip_prefix("team:"))
        .and_then(|n| n.parse::<u8>().ok())
    else {
        return Ok(());
    };

    let max_team = draft.max_team.unwrap_or(6);
    if let Err(e) = validate_team_size(team_size, max_team) {
        log_validation_error("team_size", &team_size.to_string(), &e.to_string(), q.from.id.0 as i64);
        return Ok(());
    }

    draft.team_size = Some(team_size);
    dialogue.update(State::ReceiveDate { draft }).await?;
    edit_or_send(&bot, &q, texts::ASK_DATE, keyboards::dates(&ctx.settings)).await?;
    Ok(())
}

pub async fn choose_date(
    bot: Bot,
    dialogue: BookingDialogue,
    q: CallbackQuery,
    mut draft: Draft,
    ctx: Arc<BotContext>,
) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;

    if q.data.as_deref() == Some("back:team") {
        let max_team = draft.max_team.unwrap_or(6);
        dialogue.update(State::ReceiveTeamSize { draft }).await?;
        edit_or_send(&bot, &q, texts::ASK_TEAM, keyboards::team_sizes(max_team)).await?;
        return Ok(());
    }

    let Some(date) = q
        .data
        .as_deref()
        .and_then(|d| d.strip_prefix("date:"))
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    else {
        return Ok(());
    };

    // Only dates within the booking horizon are offered; a stale keyboard
    // can still deliver one outside it.
    let today = today_in(ctx.settings.tz());
    let horizon = today + Duration::days(i64::from(ctx.settings.days_ahead));
    if date < today || date > horizon {
        log_validation_error("date", &date.to_string(), "outside booking horizon", q.from.id.0 as i64);
        return Ok(());
    }

    let Some(quest_key) = draft.quest_key.clone() else {
        return Ok(());
    };

    let slots = available_slots(&ctx.db.pool, &ctx.catalog, &ctx.settings, &quest_key, date).await?;
    draft.date = Some(date);
    dialogue.update(State::ReceiveSlot { draft }).await?;
    edit_or_send(
        &bot,
        &q,
        &texts::ask_time(&date.format("%d.%m.%Y").to_string()),
        keyboards::times(&slots),
    )
    .await?;
    Ok(())
}

pub async fn choose_slot(
    bot: Bot,
    dialogue: BookingDialogue,
    q: CallbackQuery,
    mut draft: Draft,
    ctx: Arc<BotContext>,
) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;

    if q.data.as_deref() == Some("back:dates") {
        dialogue.update(State::ReceiveDate { draft }).await?;
        edit_or_send(&bot, &q, texts::ASK_DATE, keyboards::dates(&ctx.settings)).await?;
        return Ok(());
    }

    let Some(slot) = q
        .data
        .as_deref()
        .and_then(|d| d.strip_prefix("slot:"))
        .and_then(|s| parse_slot(s).ok())
    else {
        return Ok(());
    };

    let (Some(quest_key), Some(date)) = (draft.quest_key.clone(), draft.date) else {
        return Ok(());
    };

    // The keyboard was a snapshot; the slot may have filled since.
    let available =
        slot_available(&ctx.db.pool, &ctx.catalog, &ctx.settings, &quest_key, slot).await?;
    if !available {
        let slots =
            available_slots(&ctx.db.pool, &ctx.catalog, &ctx.settings, &quest_key, date).await?;
        if let Some(m) = q.message.as_ref() {
            bot.send_message(m.chat.id, texts::SLOT_TAKEN)
                .reply_markup(keyboards::times(&slots))
                .await?;
        }
        return Ok(());
    }

    draft.slot = Some(slot);

    let chat_id = q
        .message
        .as_ref()
        .map_or(ChatId(q.from.id.0 as i64), |m| m.chat.id);

    if let Some(quest) = ctx.catalog.get(&quest_key) {
        if is_night_slot(quest, &ctx.settings, slot) {
            bot.send_message(chat_id, texts::NIGHT_SURCHARGE_WARNING).await?;
        }
    }

    dialogue.update(State::ReceivePhone { draft }).await?;
    bot.send_message(chat_id, texts::ASK_PHONE)
        .reply_markup(keyboards::phone_request())
        .await?;
    Ok(())
}

/// Clears the loading spinner on buttons from stale or foreign keyboards.
pub async fn stale_callback(bot: Bot, q: CallbackQuery) -> HandlerResult {
    bot.answer_callback_query(q.id).await?;
    Ok(())
}
