//! Best-effort fan-out of operator notifications. Delivery to each admin is
//! independent: one blocked chat or transport error is logged and skipped,
//! never aborting the rest of the batch or rolling back committed state.

use teloxide::prelude::*;
use teloxide::types::InlineKeyboardMarkup;

use crate::utils::logging::log_delivery_failure;

pub async fn broadcast_to_admins(
    bot: &Bot,
    admin_ids: &[i64],
    text: &str,
    keyboard: Option<InlineKeyboardMarkup>,
) {
    for &admin_id in admin_ids {
        let request = bot.send_message(ChatId(admin_id), text);
        let request = match keyboard.clone() {
            Some(kb) => request.reply_markup(kb),
            None => request,
        };
        if let Err(e) = request.await {
            log_delivery_failure(admin_id, &e.to_string());
        }
    }
}
