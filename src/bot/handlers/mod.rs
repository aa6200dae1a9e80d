pub mod admin;
pub mod callback;
pub mod message;

use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::dispatching::{dialogue, UpdateHandler};
use teloxide::prelude::*;

use crate::bot::commands::Command;
use crate::bot::state::State;

/// The dptree dispatch schema: commands work from any state, text input is
/// accepted only in the name and phone states, and callbacks route by the
/// current dialogue state. Operator callbacks bypass the dialogue entirely
/// since decisions can arrive while the operator is mid-booking themselves.
pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    let command_handler =
        teloxide::filter_command::<Command, _>().endpoint(message::command_handler);

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(dptree::case![State::ReceiveName].endpoint(message::receive_name))
        .branch(dptree::case![State::ReceivePhone { draft }].endpoint(message::receive_phone));

    let callback_handler = Update::filter_callback_query()
        .branch(
            dptree::filter(|q: CallbackQuery| {
                q.data
                    .as_deref()
                    .is_some_and(|d| d.starts_with("admin") || d.starts_with("rules_ok:"))
            })
            .endpoint(admin::admin_callback),
        )
        .branch(dptree::case![State::Idle].endpoint(callback::main_menu))
        .branch(dptree::case![State::ReceiveCategory { draft }].endpoint(callback::choose_category))
        .branch(dptree::case![State::ReceiveQuest { draft }].endpoint(callback::choose_quest))
        .branch(dptree::case![State::ReceiveTeamSize { draft }].endpoint(callback::choose_team))
        .branch(dptree::case![State::ReceiveDate { draft }].endpoint(callback::choose_date))
        .branch(dptree::case![State::ReceiveSlot { draft }].endpoint(callback::choose_slot))
        .branch(dptree::endpoint(callback::stale_callback));

    dialogue::enter::<Update, InMemStorage<State>, State, _>()
        .branch(message_handler)
        .branch(callback_handler)
}
