use anyhow::Result;
use quest_booking_bot::database::connection::DatabaseManager;
use quest_booking_bot::database::models::{Booking, NewBooking};
use tempfile::{tempdir, TempDir};

async fn setup_test_db() -> Result<(DatabaseManager, TempDir)> {
    let temp_dir = tempdir()?;
    let db_path = temp_dir.path().join("test.db");
    let database_url = format!("sqlite:{}", db_path.display());

    let db_manager = DatabaseManager::new(&database_url).await?;
    db_manager.run_migrations().await?;

    Ok((db_manager, temp_dir))
}

fn new_booking<'a>(quest_key: &'a str, quest_title: &'a str, slot: &'a str) -> NewBooking<'a> {
    NewBooking {
        tg_user_id: 1000,
        tg_username: Some("tester"),
        name: "Анна",
        phone: "+79991234567",
        quest_key,
        quest_title,
        team_size: 4,
        slot,
    }
}

#[tokio::test]
async fn test_create_and_find_booking() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let id = Booking::create(&db.pool, &new_booking("inferno", "Инферно", "2026-09-05T19:00")).await?;
    let booking = Booking::find_by_id(&db.pool, id).await?.unwrap();

    assert_eq!(booking.id, id);
    assert_eq!(booking.status, "pending");
    assert_eq!(booking.quest_key, "inferno");
    assert_eq!(booking.quest_title, "Инферно");
    assert_eq!(booking.team_size, 4);
    assert_eq!(booking.slot, "2026-09-05T19:00");
    assert_eq!(booking.tg_username.as_deref(), Some("tester"));
    assert!(booking.confirmed_by_id.is_none());
    assert!(!booking.created_at.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_booking_ids_are_monotonic() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let first = Booking::create(&db.pool, &new_booking("inferno", "Инферно", "2026-09-05T19:00")).await?;
    let second =
        Booking::create(&db.pool, &new_booking("cannibal", "Каннибал", "2026-09-05T22:00")).await?;

    assert!(second > first);
    Ok(())
}

#[tokio::test]
async fn test_find_missing_booking() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    assert!(Booking::find_by_id(&db.pool, 12345).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_occupied_quests_ignores_rejected() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;
    let slot = "2026-09-05T19:00";

    let a = Booking::create(&db.pool, &new_booking("cannibal", "Каннибал", slot)).await?;
    let b = Booking::create(&db.pool, &new_booking("inferno", "Инферно", slot)).await?;
    Booking::create(&db.pool, &new_booking("patient0", "Нулевой пациент", "2026-09-05T16:00")).await?;

    let occupants = Booking::occupied_quests(&db.pool, slot).await?;
    assert_eq!(occupants.len(), 2);
    assert!(occupants.contains("cannibal"));
    assert!(occupants.contains("inferno"));

    // a confirmed booking still occupies the slot, a rejected one does not
    Booking::confirm(&db.pool, a, 77, "@operator").await?;
    Booking::reject(&db.pool, b).await?;

    let occupants = Booking::occupied_quests(&db.pool, slot).await?;
    assert_eq!(occupants.len(), 1);
    assert!(occupants.contains("cannibal"));

    Ok(())
}

#[tokio::test]
async fn test_confirm_is_idempotent_and_records_operator() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let id = Booking::create(&db.pool, &new_booking("inferno", "Инферно", "2026-09-05T19:00")).await?;

    assert_eq!(Booking::confirm(&db.pool, id, 77, "@operator").await?, 1);
    assert_eq!(Booking::confirm(&db.pool, id, 88, "@second").await?, 0);

    let booking = Booking::find_by_id(&db.pool, id).await?.unwrap();
    assert_eq!(booking.status, "confirmed");
    // first decision wins: the second operator left no trace
    assert_eq!(booking.confirmed_by_id, Some(77));
    assert_eq!(booking.confirmed_by_name.as_deref(), Some("@operator"));
    assert!(booking.confirmed_at.is_some());

    Ok(())
}

#[tokio::test]
async fn test_reject_is_idempotent() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let id = Booking::create(&db.pool, &new_booking("inferno", "Инферно", "2026-09-05T19:00")).await?;

    assert_eq!(Booking::reject(&db.pool, id).await?, 1);
    assert_eq!(Booking::reject(&db.pool, id).await?, 0);

    let booking = Booking::find_by_id(&db.pool, id).await?.unwrap();
    assert_eq!(booking.status, "rejected");

    Ok(())
}

#[tokio::test]
async fn test_cross_decisions_are_no_ops() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    let confirmed =
        Booking::create(&db.pool, &new_booking("inferno", "Инферно", "2026-09-05T19:00")).await?;
    let rejected =
        Booking::create(&db.pool, &new_booking("cannibal", "Каннибал", "2026-09-05T22:00")).await?;

    Booking::confirm(&db.pool, confirmed, 77, "@operator").await?;
    Booking::reject(&db.pool, rejected).await?;

    // rejecting a confirmed booking or confirming a rejected one changes nothing
    assert_eq!(Booking::reject(&db.pool, confirmed).await?, 0);
    assert_eq!(Booking::confirm(&db.pool, rejected, 77, "@operator").await?, 0);

    assert_eq!(
        Booking::find_by_id(&db.pool, confirmed).await?.unwrap().status,
        "confirmed"
    );
    assert_eq!(
        Booking::find_by_id(&db.pool, rejected).await?.unwrap().status,
        "rejected"
    );

    Ok(())
}

#[tokio::test]
async fn test_list_for_date_orders_by_slot() -> Result<()> {
    let (db, _temp_dir) = setup_test_db().await?;

    Booking::create(&db.pool, &new_booking("cannibal", "Каннибал", "2026-09-05T22:00")).await?;
    Booking::create(&db.pool, &new_booking("inferno", "Инферно", "2026-09-05T10:00")).await?;
    Booking::create(&db.pool, &new_booking("patient0", "Нулевой пациент", "2026-09-06T10:00")).await?;

    let day = Booking::list_for_date(&db.pool, "2026-09-05").await?;
    assert_eq!(day.len(), 2);
    assert_eq!(day[0].slot, "2026-09-05T10:00");
    assert_eq!(day[1].slot, "2026-09-05T22:00");

    let empty = Booking::list_for_date(&db.pool, "2026-09-07").await?;
    assert!(empty.is_empty());

    Ok(())
}
