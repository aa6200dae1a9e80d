//! All user-facing message texts, in one place.

use crate::booking::Settings;
use crate::database::models::Booking;
use crate::utils::datetime::{format_slot_human, parse_slot};

pub const GREETING: &str = "Привет! Я бот для бронирования квестов.";

pub const HELP: &str = "• /start — меню\n• /book — бронь\n• /cancel — отмена\n• /admin — брони по датам (только для операторов)\n\nКвесты доступны 10:00–20:30, «Каннибал» — до 23:30.";

pub const ASK_NAME: &str = "Как вас зовут? (только буквы, пробел или дефис)";
pub const BAD_NAME: &str = "Имя выглядит странно 😅 Напишите буквами (можно пробел и дефис).";

pub const ASK_CATEGORY: &str = "Выберите категорию:";
pub const ASK_QUEST: &str = "Выберите квест:";
pub const ASK_TEAM: &str = "Сколько человек в команде?";
pub const ASK_DATE: &str = "Выберите дату:";

pub fn ask_time(date_human: &str) -> String {
    format!("Выберите время на {date_human}:")
}

pub const SLOT_TAKEN: &str = "Это время недоступно. Выберите другое.";
pub const SLOT_GONE: &str = "Это время стало недоступно. Выберите другое:";
pub const NIGHT_SURCHARGE_WARNING: &str =
    "⚠️ Доплата +1000 рублей за бронирование в ночное время.";

pub const ASK_PHONE: &str = "Отправьте номер телефона:\n• кнопкой «Поделиться контактом»\n• или напишите вручную (+79991234567)";
pub const BAD_PHONE: &str =
    "Не вижу корректный номер. Отправьте контакт кнопкой или введите номер вручную.";

pub const CANCELLED: &str = "Ок, отменил.";
pub const MAIN_MENU: &str = "Главное меню:";

pub fn booking_created(id: i64) -> String {
    format!("✅ Заявка отправлена!\nНомер: #{id}\nОжидайте подтверждения оператора.")
}

pub fn new_booking_for_admins(booking: &Booking) -> String {
    let user_link = booking
        .tg_username
        .as_deref()
        .map_or_else(|| "(без username)".to_string(), |u| format!("@{u}"));
    let slot_human = parse_slot(&booking.slot)
        .map(format_slot_human)
        .unwrap_or_else(|_| booking.slot.clone());

    format!(
        "📌 Новая бронь #{}\n\nКвест: {}\nДата/время: {}\nКоманда: {}\nТелефон: {}\n\nПользователь: {} | user_id={}",
        booking.id, booking.quest_title, slot_human, booking.team_size, booking.phone, user_link, booking.tg_user_id
    )
}

pub fn confirmation_for_client(booking: &Booking, price: i64, settings: &Settings) -> String {
    let slot_human = parse_slot(&booking.slot)
        .map(format_slot_human)
        .unwrap_or_else(|_| booking.slot.clone());

    format!(
        "Ждем вас {} на квесте «{}».\nЦена за {} человек будет {} рублей.\n{}\nНаходимся мы по адресу {}",
        slot_human, booking.quest_title, booking.team_size, price, settings.payment_terms, settings.address
    )
}

pub const ALREADY_HANDLED: &str = "Эта бронь уже обработана.";
pub const BOOKING_NOT_FOUND: &str = "Не нашёл бронь в базе.";
pub const REJECTED_FOR_CLIENT: &str =
    "К сожалению, время недоступно. Создайте бронь заново: /start";

pub fn confirmed_broadcast(id: i64, operator: &str) -> String {
    format!("✅ Бронь #{id} подтверждена.\nПодтвердил: {operator}")
}

pub fn rejected_broadcast(id: i64, operator: &str) -> String {
    format!("❌ Бронь #{id} отклонена.\nОтклонил: {operator}")
}

pub const ADMIN_PICK_DATE: &str = "Выберите дату для просмотра броней:";

pub fn admin_no_bookings(date: &str) -> String {
    format!("На {date} броней нет.")
}

pub fn admin_booking_line(booking: &Booking) -> String {
    let time = booking
        .slot
        .split_once('T')
        .map_or(booking.slot.as_str(), |(_, t)| t);
    let decided_by = booking.confirmed_by_name.as_deref().unwrap_or("-");

    format!(
        "#{} | {} | {} | {} чел | {} | подтвердил: {} | {} | {}",
        booking.id,
        time,
        booking.quest_title,
        booking.team_size,
        booking.status,
        decided_by,
        booking.name,
        booking.phone
    )
}

/// Extended pre-briefing shown after confirmation for quests that carry it.
pub fn quest_info(quest_key: &str) -> Option<&'static str> {
    match quest_key {
        "inferno" => Some(
            "«Инферно» — хоррор-квест с актёром. Минимальный возраст 14+, \
             участники младше 16 лет — только в сопровождении взрослого. \
             Приходите за 10 минут до начала.",
        ),
        "patient0" => Some(
            "«Нулевой пациент» — хоррор-квест с актёром. Минимальный возраст 14+, \
             участники младше 16 лет — только в сопровождении взрослого. \
             Приходите за 10 минут до начала.",
        ),
        "cannibal" => Some(
            "«Каннибал» — хоррор-квест с актёром, самый жёсткий в городе. \
             Строго 18+ в ночное время, днём 16+. Приходите за 10 минут до начала.",
        ),
        _ => None,
    }
}

pub const ADULT_RULES: &str = "Правила посещения:\n\
    1. Не трогать актёров — актёры не тронут вас первыми.\n\
    2. Запрещено приходить в состоянии алкогольного или иного опьянения.\n\
    3. Порча реквизита возмещается по прейскуранту.\n\
    4. Опоздание более чем на 15 минут сокращает время игры.\n\
    Нажмите кнопку ниже, чтобы подтвердить ознакомление.";

pub const KIDS_RULES: &str = "Правила посещения детских квестов:\n\
    1. Дети 10–13 лет играют без родителей, родители могут подождать в холле.\n\
    2. Запрещено приносить еду и напитки в игровые комнаты.\n\
    3. Порча реквизита возмещается по прейскуранту.\n\
    4. Опоздание более чем на 15 минут сокращает время игры.\n\
    Хорошей игры! 🎉";

pub const FINAL_WISH: &str = "Спасибо! Ждём вас — хорошей игры! 🔑";
