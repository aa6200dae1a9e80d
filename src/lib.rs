//! # Quest Booking Bot
//!
//! A Telegram bot for booking escape-room quests with a linear dialog,
//! slot availability rules, and operator confirmation.
//!
//! ## Features
//! - Step-by-step booking dialog (name, quest, team size, date, time, phone)
//! - Slot availability engine with night exclusivity and co-scheduling rules
//! - Team-size based pricing with a night surcharge
//! - Operator confirm/reject flow with first-decision-wins semantics
//! - Persistent storage with SQLite

/// Core booking domain: quest catalog, slot generator, availability, pricing
pub mod booking;
/// Bot dialogue states, handlers, and keyboards
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Database models, connections, and migrations
pub mod database;
/// Auxiliary services like the health endpoint
pub mod services;
/// Utility functions for datetime, validation, and logging
pub mod utils;
