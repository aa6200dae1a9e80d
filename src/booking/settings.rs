use chrono::{FixedOffset, NaiveTime, Offset, Utc};

/// Static venue configuration: business hours, slot cadence, prices, and
/// displayable address/payment texts. Read-only after startup.
#[derive(Debug, Clone)]
pub struct Settings {
    /// How many days ahead the date keyboard offers (today + N).
    pub days_ahead: u32,
    /// Slot cadence in minutes.
    pub slot_minutes: i64,
    /// First slot of the day.
    pub open_at: NaiveTime,
    /// Last slot of the day; itself a valid start.
    pub close_at: NaiveTime,
    /// Slots at or after this time admit only the flexible quest.
    pub night_from: NaiveTime,
    /// The venue's fixed UTC offset, in hours. Slot timestamps are local
    /// to this offset, never to the caller's timezone.
    pub utc_offset_hours: i32,
    /// The one quest bookable past the night boundary and the only quest
    /// that may share a daytime slot with another.
    pub flexible_quest: String,

    pub adult_base_2_4: i64,
    pub adult_5: i64,
    pub adult_6: i64,
    pub kids_base_2_4: i64,
    pub kids_per_extra_person: i64,
    pub night_extra: i64,

    pub address: String,
    pub payment_terms: String,
}

fn hm(hour: u32, min: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, 0).unwrap_or(NaiveTime::MIN)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            days_ahead: 12,
            slot_minutes: 90,
            open_at: hm(10, 0),
            close_at: hm(23, 30),
            night_from: hm(22, 0),
            utc_offset_hours: 3,
            flexible_quest: "cannibal".to_string(),

            adult_base_2_4: 4500,
            adult_5: 5500,
            adult_6: 6500,
            kids_base_2_4: 3500,
            kids_per_extra_person: 500,
            night_extra: 1000,

            address: "Улица Дружининская 29, вход под Вайлдберис.".to_string(),
            payment_terms: "ОПЛАТА ТОЛЬКО НАЛИЧНЫМИ!".to_string(),
        }
    }
}

impl Settings {
    /// The venue's operating timezone as a chrono offset.
    pub fn tz(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_hours * 3600).unwrap_or_else(|| Utc.fix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert_eq!(s.slot_minutes, 90);
        assert_eq!(s.open_at, hm(10, 0));
        assert_eq!(s.close_at, hm(23, 30));
        assert_eq!(s.night_from, hm(22, 0));
        assert_eq!(s.flexible_quest, "cannibal");
    }

    #[test]
    fn test_tz_offset() {
        let s = Settings::default();
        assert_eq!(s.tz().local_minus_utc(), 3 * 3600);
    }
}
