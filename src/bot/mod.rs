pub mod commands;
pub mod handlers;
pub mod keyboards;
pub mod notify;
pub mod state;
pub mod texts;

use crate::booking::{Catalog, Settings};
use crate::database::connection::DatabaseManager;

/// Shared, read-only dependencies injected into every handler.
#[derive(Clone)]
pub struct BotContext {
    pub db: DatabaseManager,
    pub catalog: Catalog,
    pub settings: Settings,
    pub admin_ids: Vec<i64>,
}

impl BotContext {
    pub fn new(db: DatabaseManager, catalog: Catalog, settings: Settings, admin_ids: Vec<i64>) -> Self {
        Self {
            db,
            catalog,
            settings,
            admin_ids,
        }
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }
}
