use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::KeyboardRemove;

use crate::booking::availability::{available_slots, slot_available};
use crate::bot::commands::Command;
use crate::bot::state::{BookingDialogue, Draft, HandlerResult, State};
use crate::bot::{keyboards, notify, texts, BotContext};
use crate::database::models::{Booking, NewBooking};
use crate::utils::datetime::format_slot;
use crate::utils::logging::{
    log_command_start, log_command_success, log_database_error, log_validation_error,
};
use crate::utils::validation::{normalize_phone, validate_client_name, validate_phone};

pub async fn command_handler(
    bot: Bot,
    dialogue: BookingDialogue,
    msg: Message,
    cmd: Command,
    ctx: Arc<BotContext>,
) -> HandlerResult {
    let user_id = msg.from().map_or(0, |u| u.id.0 as i64);
    let username = msg
        .from()
        .and_then(|u| u.username.as_deref())
        .unwrap_or("unknown");

    match cmd {
        Command::Start => {
            log_command_start("/start", username, user_id, None);
            bot.send_message(msg.chat.id, texts::GREETING)
                .reply_markup(keyboards::main_menu())
                .await?;
        }
        Command::Help => {
            bot.send_message(msg.chat.id, texts::HELP)
                .reply_markup(keyboards::main_menu())
                .await?;
        }
        Command::Book => {
            log_command_start("/book", username, user_id, None);
            dialogue.update(State::ReceiveName).await?;
            bot.send_message(msg.chat.id, texts::ASK_NAME).await?;
        }
        Command::Cancel => {
            dialogue.update(State::Idle).await?;
            bot.send_message(msg.chat.id, texts::CANCELLED)
                .reply_markup(keyboards::main_menu())
                .await?;
        }
        Command::Admin => {
            if !ctx.is_admin(user_id) {
                return Ok(());
            }
            log_command_start("/admin", username, user_id, None);
            bot.send_message(msg.chat.id, texts::ADMIN_PICK_DATE)
                .reply_markup(keyboards::admin_dates(&ctx.settings))
                .await?;
        }
    }
    Ok(())
}

pub async fn receive_name(
    bot: Bot,
    dialogue: BookingDialogue,
    msg: Message,
) -> HandlerResult {
    let raw = msg.text().unwrap_or_default();

    let name = match validate_client_name(raw) {
        Ok(name) => name,
        Err(e) => {
            let user_id = msg.from().map_or(0, |u| u.id.0 as i64);
            log_validation_error("name", raw, &e.to_string(), user_id);
            bot.send_message(msg.chat.id, texts::BAD_NAME).await?;
            return Ok(());
        }
    };

    let draft = Draft {
        name: Some(name),
        ..Draft::default()
    };
    dialogue.update(State::ReceiveCategory { draft }).await?;
    bot.send_message(msg.chat.id, texts::ASK_CATEGORY)
        .reply_markup(keyboards::categories())
        .await?;
    Ok(())
}

pub async fn receive_phone(
    bot: Bot,
    dialogue: BookingDialogue,
    msg: Message,
    draft: Draft,
    ctx: Arc<BotContext>,
) -> HandlerResult {
    let phone = if let Some(contact) = msg.contact() {
        Some(normalize_phone(&contact.phone_number))
    } else {
        match msg.text() {
            Some(text) => match validate_phone(text) {
                Ok(phone) => Some(phone),
                Err(e) => {
                    let user_id = msg.from().map_or(0, |u| u.id.0 as i64);
                    log_validation_error("phone", text, &e.to_string(), user_id);
                    None
                }
            },
            None => None,
        }
    };

    let Some(phone) = phone else {
        bot.send_message(msg.chat.id, texts::BAD_PHONE).await?;
        return Ok(());
    };

    let (Some(name), Some(quest_key), Some(quest_title), Some(team_size), Some(date), Some(slot)) = (
        draft.name.clone(),
        draft.quest_key.clone(),
        draft.quest_title.clone(),
        draft.team_size,
        draft.date,
        draft.slot,
    ) else {
        // A hole in the draft means the dialogue state was corrupted.
        tracing::error!("Incomplete draft at phone step, resetting dialogue");
        dialogue.update(State::Idle).await?;
        bot.send_message(msg.chat.id, texts::MAIN_MENU)
            .reply_markup(keyboards::main_menu())
            .await?;
        return Ok(());
    };

    // Authoritative recheck: the slot may have filled since it was offered.
    let still_available =
        slot_available(&ctx.db.pool, &ctx.catalog, &ctx.settings, &quest_key, slot).await?;
    if !still_available {
        let slots =
            available_slots(&ctx.db.pool, &ctx.catalog, &ctx.settings, &quest_key, date).await?;
        dialogue.update(State::ReceiveSlot { draft }).await?;
        bot.send_message(msg.chat.id, texts::SLOT_GONE)
            .reply_markup(keyboards::times(&slots))
            .await?;
        return Ok(());
    }

    let user = msg.from();
    let tg_user_id = user.map_or(0, |u| u.id.0 as i64);
    let tg_username = user.and_then(|u| u.username.as_deref());

    let new_booking = NewBooking {
        tg_user_id,
        tg_username,
        name: &name,
        phone: &phone,
        quest_key: &quest_key,
        quest_title: &quest_title,
        team_size: i64::from(team_size),
        slot: &format_slot(slot),
    };

    let booking_id = match Booking::create(&ctx.db.pool, &new_booking).await {
        Ok(id) => id,
        Err(e) => {
            log_database_error("create booking", &e.to_string());
            bot.send_message(msg.chat.id, texts::SLOT_GONE).await?;
            return Ok(());
        }
    };

    dialogue.update(State::Idle).await?;
    log_command_success(
        "booking",
        tg_username.unwrap_or("unknown"),
        tg_user_id,
        Some(&format!("#{booking_id} {quest_key} {}", format_slot(slot))),
    );

    bot.send_message(msg.chat.id, texts::booking_created(booking_id))
        .reply_markup(KeyboardRemove::new())
        .await?;
    bot.send_message(msg.chat.id, texts::MAIN_MENU)
        .reply_markup(keyboards::main_menu())
        .await?;

    if let Some(booking) = Booking::find_by_id(&ctx.db.pool, booking_id).await? {
        notify::broadcast_to_admins(
            &bot,
            &ctx.admin_ids,
            &texts::new_booking_for_admins(&booking),
            Some(keyboards::admin_decision(booking_id)),
        )
        .await;
    }

    Ok(())
}
