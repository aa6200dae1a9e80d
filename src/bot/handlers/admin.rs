//! The operator decision flow: per-date listings, confirm/reject callbacks
//! with first-decision-wins semantics, and the rules acknowledgement.

use std::sync::Arc;

use teloxide::prelude::*;

use crate::booking::pricing::price;
use crate::bot::state::HandlerResult;
use crate::bot::{keyboards, notify, texts, BotContext};
use crate::database::models::Booking;
use crate::utils::datetime::parse_slot;
use crate::utils::logging::{log_command_success, log_delivery_failure};

/// Telegram message size ceiling, with headroom for formatting.
const CHUNK_CHARS: usize = 3500;

pub async fn admin_callback(
    bot: Bot,
    q: CallbackQuery,
    ctx: Arc<BotContext>,
) -> HandlerResult {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(data) = q.data.clone() else {
        return Ok(());
    };

    // The rules acknowledgement comes from the client, not an operator.
    if let Some(raw_id) = data.strip_prefix("rules_ok:") {
        if raw_id.parse::<i64>().is_ok() {
            bot.send_message(ChatId(q.from.id.0 as i64), texts::FINAL_WISH).await?;
        }
        return Ok(());
    }

    let operator_id = q.from.id.0 as i64;
    if !ctx.is_admin(operator_id) {
        return Ok(());
    }

    if let Some(date) = data.strip_prefix("admin_date:") {
        return list_for_date(&bot, &q, &ctx, date).await;
    }

    if let Some(raw_id) = data.strip_prefix("admin:confirm:") {
        if let Ok(id) = raw_id.parse::<i64>() {
            return confirm(&bot, &q, &ctx, id).await;
        }
    }

    if let Some(raw_id) = data.strip_prefix("admin:reject:") {
        if let Ok(id) = raw_id.parse::<i64>() {
            return reject(&bot, &q, &ctx, id).await;
        }
    }

    Ok(())
}

fn operator_chat(q: &CallbackQuery) -> ChatId {
    q.message
        .as_ref()
        .map_or(ChatId(q.from.id.0 as i64), |m| m.chat.id)
}

fn operator_name(q: &CallbackQuery) -> String {
    q.from
        .username
        .as_deref()
        .map_or_else(|| q.from.full_name(), |u| format!("@{u}"))
}

async fn confirm(bot: &Bot, q: &CallbackQuery, ctx: &BotContext, id: i64) -> HandlerResult {
    let operator_id = q.from.id.0 as i64;
    let operator = operator_name(q);

    // Conditional update: zero rows means another operator got here first.
    let changed = Booking::confirm(&ctx.db.pool, id, operator_id, &operator).await?;
    if changed == 0 {
        bot.send_message(operator_chat(q), texts::ALREADY_HANDLED).await?;
        return Ok(());
    }

    let Some(booking) = Booking::find_by_id(&ctx.db.pool, id).await? else {
        bot.send_message(operator_chat(q), texts::BOOKING_NOT_FOUND).await?;
        return Ok(());
    };

    let client = ChatId(booking.tg_user_id);

    if let (Some(quest), Ok(slot)) = (ctx.catalog.get(&booking.quest_key), parse_slot(&booking.slot))
    {
        let team_size = u8::try_from(booking.team_size).unwrap_or(u8::MAX);
        let quote = price(quest, &ctx.settings, team_size, slot);

        if let Err(e) = bot
            .send_message(client, texts::confirmation_for_client(&booking, quote, &ctx.settings))
            .await
        {
            log_delivery_failure(booking.tg_user_id, &e.to_string());
        }

        // Adult quests carry a pre-briefing and an explicit rules
        // acknowledgement; kids quests get their rules in one message.
        if quest.has_info {
            if let Some(info) = texts::quest_info(&quest.key) {
                if let Err(e) = bot.send_message(client, info).await {
                    log_delivery_failure(booking.tg_user_id, &e.to_string());
                }
            }
            if let Err(e) = bot
                .send_message(client, texts::ADULT_RULES)
                .reply_markup(keyboards::rules_ack(id))
                .await
            {
                log_delivery_failure(booking.tg_user_id, &e.to_string());
            }
        } else if let Err(e) = bot.send_message(client, texts::KIDS_RULES).await {
            log_delivery_failure(booking.tg_user_id, &e.to_string());
        }
    } else {
        tracing::error!("Booking #{id} references unknown quest '{}'", booking.quest_key);
    }

    notify::broadcast_to_admins(bot, &ctx.admin_ids, &texts::confirmed_broadcast(id, &operator), None)
        .await;
    log_command_success("confirm", &operator, operator_id, Some(&format!("#{id}")));
    bot.send_message(operator_chat(q), format!("Подтверждено: #{id}")).await?;
    Ok(())
}

async fn reject(bot: &Bot, q: &CallbackQuery, ctx: &BotContext, id: i64) -> HandlerResult {
    let operator_id = q.from.id.0 as i64;
    let operator = operator_name(q);

    let changed = Booking::reject(&ctx.db.pool, id).await?;
    if changed == 0 {
        bot.send_message(operator_chat(q), texts::ALREADY_HANDLED).await?;
        return Ok(());
    }

    if let Some(booking) = Booking::find_by_id(&ctx.db.pool, id).await? {
        if let Err(e) = bot
            .send_message(ChatId(booking.tg_user_id), texts::REJECTED_FOR_CLIENT)
            .await
        {
            log_delivery_failure(booking.tg_user_id, &e.to_string());
        }
    }

    notify::broadcast_to_admins(bot, &ctx.admin_ids, &texts::rejected_broadcast(id, &operator), None)
        .await;
    log_command_success("reject", &operator, operator_id, Some(&format!("#{id}")));
    bot.send_message(operator_chat(q), format!("Отклонено: #{id}")).await?;
    Ok(())
}

async fn list_for_date(bot: &Bot, q: &CallbackQuery, ctx: &BotContext, date: &str) -> HandlerResult {
    let bookings = Booking::list_for_date(&ctx.db.pool, date).await?;
    let chat = operator_chat(q);

    if bookings.is_empty() {
        bot.send_message(chat, texts::admin_no_bookings(date)).await?;
        return Ok(());
    }

    let mut lines = vec![format!("Брони на {date}:\n")];
    lines.extend(bookings.iter().map(texts::admin_booking_line));
    let text = lines.join("\n");

    // Long listings are split under the transport's message size limit.
    let chars: Vec<char> = text.chars().collect();
    for chunk in chars.chunks(CHUNK_CHARS) {
        bot.send_message(chat, chunk.iter().collect::<String>()).await?;
    }
    Ok(())
}
