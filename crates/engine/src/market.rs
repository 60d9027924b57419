use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};

/// Whether the market is tradeable at `now`.
///
/// The trading week runs from Sunday 22:00 UTC to Friday 22:00 UTC.
/// Holiday closures are not modelled; a closed holiday market simply
/// yields no fresh bars.
pub fn is_open(now: DateTime<Utc>) -> bool {
    match now.weekday() {
        Weekday::Fri => now.hour() < 22,
        Weekday::Sat => false,
        Weekday::Sun => now.hour() >= 22,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn open_midweek() {
        // Wednesday afternoon
        assert!(is_open(at(2024, 1, 10, 14, 30)));
        // Monday just after midnight
        assert!(is_open(at(2024, 1, 8, 0, 1)));
    }

    #[test]
    fn closes_friday_at_2200() {
        assert!(is_open(at(2024, 1, 12, 21, 59)));
        assert!(!is_open(at(2024, 1, 12, 22, 0)));
        assert!(!is_open(at(2024, 1, 12, 23, 30)));
    }

    #[test]
    fn closed_all_saturday() {
        assert!(!is_open(at(2024, 1, 13, 0, 0)));
        assert!(!is_open(at(2024, 1, 13, 12, 0)));
        assert!(!is_open(at(2024, 1, 13, 23, 59)));
    }

    #[test]
    fn reopens_sunday_at_2200() {
        assert!(!is_open(at(2024, 1, 14, 21, 59)));
        assert!(is_open(at(2024, 1, 14, 22, 0)));
        assert!(is_open(at(2024, 1, 14, 23, 59)));
    }
}
