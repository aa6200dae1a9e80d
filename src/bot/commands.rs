use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Команды бота:")]
pub enum Command {
    #[command(description = "главное меню")]
    Start,
    #[command(description = "справка")]
    Help,
    #[command(description = "забронировать квест")]
    Book,
    #[command(description = "отменить бронирование")]
    Cancel,
    #[command(description = "брони по датам (только для операторов)")]
    Admin,
}
