use quest_booking_bot::booking::{Catalog, Settings};
use quest_booking_bot::config::parse_admin_ids;

#[test]
fn test_admin_ids_parsing() {
    assert_eq!(parse_admin_ids("111").unwrap(), vec![111]);
    assert_eq!(parse_admin_ids("111, 222,333").unwrap(), vec![111, 222, 333]);
}

#[test]
fn test_admin_ids_reject_malformed_entries() {
    // a malformed operator list must abort startup, not half-work
    assert!(parse_admin_ids("111,not-a-number").is_err());
    assert!(parse_admin_ids("111;222").is_err());
    assert!(parse_admin_ids("").is_err());
}

#[test]
fn test_flexible_quest_exists_in_catalog() {
    let catalog = Catalog::venue();
    let settings = Settings::default();

    let flexible = catalog.get(&settings.flexible_quest).unwrap();
    // the flexible quest is the one allowed to run up to close
    assert_eq!(flexible.last_start, settings.close_at);
}

#[test]
fn test_all_last_starts_within_business_hours() {
    let catalog = Catalog::venue();
    let settings = Settings::default();

    for quest in catalog.all() {
        assert!(quest.last_start >= settings.open_at);
        assert!(quest.last_start <= settings.close_at);
        assert!(quest.max_team >= 2);
    }
}
