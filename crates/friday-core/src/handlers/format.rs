//! Human-readable date and time rendering.

use chrono::{Duration, NaiveDateTime};

/// Render a due or creation date relative to `now`.
///
/// `Today at 05:00 PM`, `Tomorrow at 09:00 AM`, otherwise
/// `12/25/2024 at 09:00 AM`.
pub fn format_date(date: NaiveDateTime, now: NaiveDateTime) -> String {
    let time = date.format("%I:%M %p");
    if date.date() == now.date() {
        format!("Today at {}", time)
    } else if date.date() == (now + Duration::days(1)).date() {
        format!("Tomorrow at {}", time)
    } else {
        format!("{} at {}", date.format("%-m/%-d/%Y"), time)
    }
}

/// Clock time such as `3:07:45 PM`.
pub fn format_clock(now: NaiveDateTime) -> String {
    now.format("%-I:%M:%S %p").to_string()
}

/// Calendar date such as `3/1/2024`.
pub fn format_day(now: NaiveDateTime) -> String {
    now.format("%-m/%-d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 12, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_relative_dates() {
        let now = at(24, 10, 0);
        assert_eq!(format_date(at(24, 17, 0), now), "Today at 05:00 PM");
        assert_eq!(format_date(at(25, 9, 0), now), "Tomorrow at 09:00 AM");
        assert_eq!(format_date(at(28, 9, 30), now), "12/28/2024 at 09:30 AM");
    }

    #[test]
    fn test_clock_and_day() {
        let now = at(1, 15, 7);
        assert_eq!(format_clock(now), "3:07:00 PM");
        assert_eq!(format_day(now), "12/1/2024");
    }
}
