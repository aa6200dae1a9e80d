use chrono::{NaiveDate, NaiveDateTime};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

use crate::booking::Category;

pub type BookingDialogue = Dialogue<State, InMemStorage<State>>;
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// The linear booking dialog. Each forward edge validates its input and
/// advances only on success; back buttons step to the predecessor state;
/// `/cancel` drops the draft and returns to `Idle` from anywhere.
#[derive(Clone, Debug, Default)]
pub enum State {
    #[default]
    Idle,
    ReceiveName,
    ReceiveCategory {
        draft: Draft,
    },
    ReceiveQuest {
        draft: Draft,
    },
    ReceiveTeamSize {
        draft: Draft,
    },
    ReceiveDate {
        draft: Draft,
    },
    ReceiveSlot {
        draft: Draft,
    },
    ReceivePhone {
        draft: Draft,
    },
}

/// Answers accumulated across the dialog. Owned by one session; every field
/// becomes definite when its step is passed and the whole draft is discarded
/// on completion or cancellation.
#[derive(Clone, Debug, Default)]
pub struct Draft {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub quest_key: Option<String>,
    pub quest_title: Option<String>,
    pub max_team: Option<u8>,
    pub team_size: Option<u8>,
    pub date: Option<NaiveDate>,
    pub slot: Option<NaiveDateTime>,
}
