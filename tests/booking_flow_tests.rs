//! End-to-end scenarios driving the availability and pricing engines
//! against real store occupancy, the way the dialog and the operator flow
//! use them.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use quest_booking_bot::booking::{available_slots, price, slot_available, Catalog, Settings};
use quest_booking_bot::database::connection::DatabaseManager;
use quest_booking_bot::database::models::{Booking, NewBooking};
use quest_booking_bot::utils::datetime::{format_slot, parse_slot};
use tempfile::{tempdir, TempDir};

async fn setup() -> Result<(DatabaseManager, Catalog, Settings, TempDir)> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("test.db");
    let db = DatabaseManager::new(&format!("sqlite:{}", db_path.display())).await?;
    db.run_migrations().await?;
    Ok((db, Catalog::venue(), Settings::default(), temp_dir))
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 5).unwrap()
}

fn at(hour: u32, min: u32) -> NaiveDateTime {
    date().and_hms_opt(hour, min, 0).unwrap()
}

async fn book(db: &DatabaseManager, quest_key: &str, slot: NaiveDateTime) -> Result<i64> {
    let slot = format_slot(slot);
    let id = Booking::create(
        &db.pool,
        &NewBooking {
            tg_user_id: 1000,
            tg_username: Some("tester"),
            name: "Анна",
            phone: "+79991234567",
            quest_key,
            quest_title: quest_key,
            team_size: 6,
            slot: &slot,
        },
    )
    .await?;
    Ok(id)
}

#[tokio::test]
async fn test_night_booking_fills_the_slot() -> Result<()> {
    let (db, catalog, settings, _tmp) = setup().await?;
    let night = at(22, 0);

    assert!(slot_available(&db.pool, &catalog, &settings, "cannibal", night).await?);
    book(&db, "cannibal", night).await?;
    assert!(!slot_available(&db.pool, &catalog, &settings, "cannibal", night).await?);

    Ok(())
}

#[tokio::test]
async fn test_available_slots_respect_time_windows() -> Result<()> {
    let (db, catalog, settings, _tmp) = setup().await?;

    let inferno_slots = available_slots(&db.pool, &catalog, &settings, "inferno", date()).await?;
    assert_eq!(inferno_slots.last().copied(), Some(at(20, 30)));
    assert!(!inferno_slots.contains(&at(22, 0)));
    assert!(!inferno_slots.contains(&at(23, 30)));

    let cannibal_slots = available_slots(&db.pool, &catalog, &settings, "cannibal", date()).await?;
    assert_eq!(cannibal_slots.first().copied(), Some(at(10, 0)));
    assert_eq!(cannibal_slots.last().copied(), Some(at(23, 30)));
    assert_eq!(cannibal_slots.len(), 10);

    Ok(())
}

#[tokio::test]
async fn test_flexible_pairing_then_slot_full() -> Result<()> {
    let (db, catalog, settings, _tmp) = setup().await?;
    let day = at(19, 0);

    // cannibal holds the slot; inferno may pair with it
    book(&db, "cannibal", day).await?;
    assert!(slot_available(&db.pool, &catalog, &settings, "inferno", day).await?);

    // after inferno joins, the slot is full for everyone
    book(&db, "inferno", day).await?;
    assert!(!slot_available(&db.pool, &catalog, &settings, "patient0", day).await?);
    assert!(!slot_available(&db.pool, &catalog, &settings, "cannibal", day).await?);

    // other slots of the same day are unaffected
    assert!(slot_available(&db.pool, &catalog, &settings, "patient0", at(17, 30)).await?);

    Ok(())
}

#[tokio::test]
async fn test_two_ordinary_quests_never_pair() -> Result<()> {
    let (db, catalog, settings, _tmp) = setup().await?;
    let day = at(16, 0);

    book(&db, "inferno", day).await?;
    assert!(!slot_available(&db.pool, &catalog, &settings, "patient0", day).await?);
    assert!(slot_available(&db.pool, &catalog, &settings, "cannibal", day).await?);

    Ok(())
}

#[tokio::test]
async fn test_rejection_frees_the_slot() -> Result<()> {
    let (db, catalog, settings, _tmp) = setup().await?;
    let night = at(22, 0);

    let id = book(&db, "cannibal", night).await?;
    assert!(!slot_available(&db.pool, &catalog, &settings, "cannibal", night).await?);

    Booking::reject(&db.pool, id).await?;
    assert!(slot_available(&db.pool, &catalog, &settings, "cannibal", night).await?);

    Ok(())
}

#[tokio::test]
async fn test_price_requoted_from_stored_booking() -> Result<()> {
    let (db, catalog, settings, _tmp) = setup().await?;

    // the quote at confirmation time is derived purely from the record
    let id = book(&db, "cannibal", at(22, 0)).await?;
    let booking = Booking::find_by_id(&db.pool, id).await?.unwrap();

    let quest = catalog.get(&booking.quest_key).unwrap();
    let slot = parse_slot(&booking.slot)?;
    let quoted = price(quest, &settings, booking.team_size as u8, slot);

    assert_eq!(quoted, settings.adult_6 + settings.night_extra);

    Ok(())
}
