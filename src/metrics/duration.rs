//! Wall-clock duration arithmetic for shift windows and stoppages

use chrono::NaiveTime;

pub const MINUTES_PER_DAY: i64 = 1440;

/// Parse an "HH:mm" clock reading
pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

/// Whole minutes elapsed from `start` to `end` on a shared day.
///
/// An `end` earlier than `start` crosses midnight. Blank or unparseable input
/// yields 0; the result is never negative.
pub fn minutes_between(start: &str, end: &str) -> i64 {
    if start.trim().is_empty() || end.trim().is_empty() {
        return 0;
    }
    let (Some(start), Some(end)) = (parse_clock(start), parse_clock(end)) else {
        return 0;
    };
    let diff = (end - start).num_minutes();
    if diff < 0 {
        diff + MINUTES_PER_DAY
    } else {
        diff
    }
}

/// [`minutes_between`] over optional bounds; a missing side yields 0
pub fn window_minutes(start: Option<&str>, end: Option<&str>) -> i64 {
    match (start, end) {
        (Some(start), Some(end)) => minutes_between(start, end),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn clock_minutes(value: &str) -> i64 {
        let t = parse_clock(value).unwrap();
        (t.hour() * 60 + t.minute()) as i64
    }

    #[test]
    fn test_same_day() {
        assert_eq!(minutes_between("07:00", "15:00"), 480);
        assert_eq!(minutes_between("08:00", "08:30"), 30);
        assert_eq!(minutes_between("10:00", "10:00"), 0);
    }

    #[test]
    fn test_midnight_crossing() {
        assert_eq!(minutes_between("23:30", "00:15"), 45);
        assert_eq!(minutes_between("19:00", "07:00"), 720);
    }

    #[test]
    fn test_rollover_formula_holds_for_all_pairs() {
        let samples = ["00:00", "00:01", "06:45", "12:00", "17:30", "23:59"];
        for start in samples {
            for end in samples {
                let (s, e) = (clock_minutes(start), clock_minutes(end));
                let got = minutes_between(start, end);
                assert!(got >= 0);
                if e < s {
                    assert_eq!(got, MINUTES_PER_DAY - s + e);
                } else {
                    assert_eq!(got, e - s);
                }
            }
        }
    }

    #[test]
    fn test_blank_and_malformed_yield_zero() {
        assert_eq!(minutes_between("", "08:00"), 0);
        assert_eq!(minutes_between("08:00", "  "), 0);
        assert_eq!(minutes_between("8h", "09:00"), 0);
        assert_eq!(minutes_between("07:00", "25:00"), 0);
        assert_eq!(window_minutes(Some("07:00"), None), 0);
        assert_eq!(window_minutes(Some("07:00"), Some("07:45")), 45);
    }
}
