use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use std::collections::HashSet;

/// Booking lifecycle states. Stored as plain strings in SQLite.
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_CONFIRMED: &str = "confirmed";
pub const STATUS_REJECTED: &str = "rejected";

/// A persisted booking request. `quest_title` is a snapshot taken at
/// creation time and never updated, even if the catalog title changes.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub created_at: String,
    pub tg_user_id: i64,
    pub tg_username: Option<String>,
    pub name: String,
    pub phone: String,
    pub quest_key: String,
    pub quest_title: String,
    pub team_size: i64,
    /// Local slot timestamp, `%Y-%m-%dT%H:%M`, in the venue timezone.
    pub slot: String,
    pub status: String,
    pub confirmed_by_id: Option<i64>,
    pub confirmed_by_name: Option<String>,
    pub confirmed_at: Option<String>,
}

/// Fields required to create a booking; everything else is assigned by
/// the store.
#[derive(Debug, Clone)]
pub struct NewBooking<'a> {
    pub tg_user_id: i64,
    pub tg_username: Option<&'a str>,
    pub name: &'a str,
    pub phone: &'a str,
    pub quest_key: &'a str,
    pub quest_title: &'a str,
    pub team_size: i64,
    pub slot: &'a str,
}

impl Booking {
    /// Inserts a new pending booking and returns its assigned id.
    pub async fn create(pool: &SqlitePool, new: &NewBooking<'_>) -> Result<i64, sqlx::Error> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO bookings (
                created_at, tg_user_id, tg_username, name, phone,
                quest_key, quest_title, team_size, slot, status
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 'pending')
            "#,
        )
        .bind(now)
        .bind(new.tg_user_id)
        .bind(new.tg_username)
        .bind(new.name)
        .bind(new.phone)
        .bind(new.quest_key)
        .bind(new.quest_title)
        .bind(new.team_size)
        .bind(new.slot)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, created_at, tg_user_id, tg_username, name, phone,
                   quest_key, quest_title, team_size, slot, status,
                   confirmed_by_id, confirmed_by_name, confirmed_at
            FROM bookings
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Quest keys with a non-rejected booking at exactly this slot. Input to
    /// the availability engine.
    pub async fn occupied_quests(
        pool: &SqlitePool,
        slot: &str,
    ) -> Result<HashSet<String>, sqlx::Error> {
        let keys: Vec<String> = sqlx::query_scalar(
            "SELECT quest_key FROM bookings WHERE slot = ? AND status IN ('pending', 'confirmed')",
        )
        .bind(slot)
        .fetch_all(pool)
        .await?;

        Ok(keys.into_iter().collect())
    }

    /// Conditionally transitions `pending -> confirmed`, recording who
    /// decided and when. Returns the number of rows changed: zero means the
    /// booking was already decided and this call is a no-op.
    pub async fn confirm(
        pool: &SqlitePool,
        id: i64,
        operator_id: i64,
        operator_name: &str,
    ) -> Result<u64, sqlx::Error> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET status = 'confirmed',
                confirmed_by_id = ?,
                confirmed_by_name = ?,
                confirmed_at = ?
            WHERE id = ? AND status = 'pending'
            "#,
        )
        .bind(operator_id)
        .bind(operator_name)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Conditionally transitions `pending -> rejected`. Same first-decision-
    /// wins semantics as [`Booking::confirm`].
    pub async fn reject(pool: &SqlitePool, id: i64) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("UPDATE bookings SET status = 'rejected' WHERE id = ? AND status = 'pending'")
                .bind(id)
                .execute(pool)
                .await?;

        Ok(result.rows_affected())
    }

    /// All bookings whose slot falls on the given calendar date
    /// (`%Y-%m-%d`), ordered by slot time. Used by the operator listing.
    pub async fn list_for_date(pool: &SqlitePool, date: &str) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, created_at, tg_user_id, tg_username, name, phone,
                   quest_key, quest_title, team_size, slot, status,
                   confirmed_by_id, confirmed_by_name, confirmed_at
            FROM bookings
            WHERE slot LIKE ?
            ORDER BY slot
            "#,
        )
        .bind(format!("{date}T%"))
        .fetch_all(pool)
        .await
    }
}
