use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::booking::settings::Settings;

/// Produces the ordered, fixed-cadence sequence of slot start times for one
/// calendar date, from opening to closing inclusive. Pure and recomputed per
/// call; nothing is cached.
pub fn slots_for_date(date: NaiveDate, settings: &Settings) -> Vec<NaiveDateTime> {
    let step = Duration::minutes(settings.slot_minutes);
    let end = date.and_time(settings.close_at);

    let mut out = Vec::new();
    let mut t = date.and_time(settings.open_at);
    while t <= end {
        out.push(t);
        t += step;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Timelike};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
    }

    #[test]
    fn test_slots_span_business_hours() {
        let settings = Settings::default();
        let slots = slots_for_date(date(), &settings);

        assert_eq!(slots.first().map(|s| s.time()), settings.open_at.into());
        assert_eq!(slots.last().map(|s| s.time()), settings.close_at.into());
        assert_eq!(slots.len(), 10);
    }

    #[test]
    fn test_slots_strictly_increasing_by_step() {
        let settings = Settings::default();
        let slots = slots_for_date(date(), &settings);
        for pair in slots.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::minutes(settings.slot_minutes));
        }
    }

    #[test]
    fn test_closing_time_is_a_valid_start() {
        let settings = Settings::default();
        let slots = slots_for_date(date(), &settings);
        let close = date().and_time(settings.close_at);
        assert!(slots.contains(&close));
    }

    #[test]
    fn test_cadence_does_not_overshoot_close() {
        // With a step that does not land exactly on close, the last slot
        // stays strictly before it.
        let settings = Settings {
            slot_minutes: 100,
            ..Settings::default()
        };
        let slots = slots_for_date(date(), &settings);
        let close = date().and_time(settings.close_at);
        assert!(slots.iter().all(|s| *s <= close));
        assert!(slots.last().unwrap().time() < NaiveTime::from_hms_opt(23, 30, 0).unwrap());
        assert_eq!(slots[0].time().hour(), 10);
    }
}
