//! Due-date phrases in task text.
//!
//! Five rules are tried in order against the raw input; the first
//! whose pattern matches decides the due date, and its matched span is
//! what gets stripped from the task description.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const WEEKDAYS: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

#[derive(Debug, Clone, Copy)]
enum DateRule {
    ByTomorrow,
    ByToday,
    AtTime,
    OnWeekday,
    OnMonthDay,
}

static RULES: Lazy<Vec<(DateRule, Regex)>> = Lazy::new(|| {
    vec![
        (DateRule::ByTomorrow, Regex::new(r"(?i)by\s(tomorrow)").unwrap()),
        (DateRule::ByToday, Regex::new(r"(?i)by\s(today)").unwrap()),
        (
            DateRule::AtTime,
            Regex::new(r"(?i)at\s(\d{1,2}(?::\d{2})?\s*(?:am|pm)?)").unwrap(),
        ),
        (
            DateRule::OnWeekday,
            Regex::new(r"(?i)on\s(monday|tuesday|wednesday|thursday|friday|saturday|sunday)")
                .unwrap(),
        ),
        (
            DateRule::OnMonthDay,
            Regex::new(
                r"(?i)on\s(\d{1,2}(?:st|nd|rd|th)?\s+(?:of\s+)?(?:january|february|march|april|may|june|july|august|september|october|november|december))",
            )
            .unwrap(),
        ),
    ]
});

static TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{1,2})(?::(\d{2}))?(?:\s*(am|pm))?").unwrap());

static DAY_OF_MONTH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,2})(?:st|nd|rd|th)?").unwrap());

static MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(january|february|march|april|may|june|july|august|september|october|november|december)",
    )
    .unwrap()
});

/// A recognised due-date phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueDatePhrase {
    /// The full matched span, as it appears in the input.
    pub span: String,
    /// Resolved due date. `None` when the phrase names an impossible time
    /// or calendar date.
    pub due: Option<NaiveDateTime>,
}

/// Find the first due-date phrase in `text`.
pub fn extract_due_date(text: &str, now: NaiveDateTime) -> Option<DueDatePhrase> {
    RULES.iter().find_map(|(rule, pattern)| {
        let caps = pattern.captures(text)?;
        let span = caps.get(0)?.as_str().to_string();
        let arg = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let due = match rule {
            DateRule::ByTomorrow => at_hour(now.date() + Duration::days(1), 9),
            DateRule::ByToday => at_hour(now.date(), 18),
            DateRule::AtTime => parse_time(arg, now),
            DateRule::OnWeekday => next_weekday(arg, now),
            DateRule::OnMonthDay => parse_month_day(arg, now),
        };
        Some(DueDatePhrase { span, due })
    })
}

/// Resolve `3pm`, `10:30 am` or `15:45` to the next occurrence of that time.
pub fn parse_time(value: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let caps = TIME.captures(value)?;
    let mut hours: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minutes: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    match caps.get(3).map(|m| m.as_str().to_lowercase()).as_deref() {
        Some("pm") if hours < 12 => hours += 12,
        Some("am") if hours == 12 => hours = 0,
        _ => {}
    }

    let time = NaiveTime::from_hms_opt(hours, minutes, 0)?;
    let candidate = now.date().and_time(time);
    if candidate < now {
        Some(candidate + Duration::days(1))
    } else {
        Some(candidate)
    }
}

/// Next occurrence of the named weekday at 09:00. Today never counts.
pub fn next_weekday(name: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let target = WEEKDAYS.iter().position(|d| d.eq_ignore_ascii_case(name))? as i64;
    let today = now.weekday().num_days_from_sunday() as i64;
    let days_until = match (target + 7 - today) % 7 {
        0 => 7,
        n => n,
    };
    at_hour(now.date() + Duration::days(days_until), 9)
}

/// Resolve `25th of December` to this year's date at 09:00, or next year's
/// when it has already passed.
pub fn parse_month_day(value: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let day: u32 = DAY_OF_MONTH.captures(value)?.get(1)?.as_str().parse().ok()?;
    let month_name = MONTH.captures(value)?.get(1)?.as_str().to_lowercase();
    let month = MONTHS.iter().position(|m| *m == month_name)? as u32 + 1;
    if !(1..=31).contains(&day) {
        return None;
    }

    let this_year = at_hour(NaiveDate::from_ymd_opt(now.year(), month, day)?, 9)?;
    if this_year < now {
        at_hour(NaiveDate::from_ymd_opt(now.year() + 1, month, day)?, 9)
    } else {
        Some(this_year)
    }
}

fn at_hour(date: NaiveDate, hour: u32) -> Option<NaiveDateTime> {
    date.and_hms_opt(hour, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-05-06 is a Monday.
    fn monday(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn date(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_by_tomorrow_and_today() {
        let now = monday(10, 0);
        let phrase = extract_due_date("pay rent by tomorrow", now).unwrap();
        assert_eq!(phrase.span, "by tomorrow");
        assert_eq!(phrase.due, Some(date(2024, 5, 7, 9, 0)));

        let phrase = extract_due_date("finish report By Today", now).unwrap();
        assert_eq!(phrase.due, Some(date(2024, 5, 6, 18, 0)));
    }

    #[test]
    fn test_time_rolls_forward_when_past() {
        let now = monday(16, 0);
        assert_eq!(parse_time("5pm", now), Some(date(2024, 5, 6, 17, 0)));
        assert_eq!(parse_time("3:30 pm", now), Some(date(2024, 5, 7, 15, 30)));
        assert_eq!(parse_time("12am", now), Some(date(2024, 5, 7, 0, 0)));
        assert_eq!(parse_time("12 pm", now), Some(date(2024, 5, 7, 12, 0)));
        assert_eq!(parse_time("17:45", now), Some(date(2024, 5, 6, 17, 45)));
        assert_eq!(parse_time("25", now), None);
    }

    #[test]
    fn test_same_weekday_rolls_a_full_week() {
        let now = monday(8, 0);
        assert_eq!(next_weekday("monday", now), Some(date(2024, 5, 13, 9, 0)));
        assert_eq!(next_weekday("Wednesday", now), Some(date(2024, 5, 8, 9, 0)));
        assert_eq!(next_weekday("sunday", now), Some(date(2024, 5, 12, 9, 0)));
        assert_eq!(next_weekday("someday", now), None);
    }

    #[test]
    fn test_month_day() {
        let now = monday(8, 0);
        assert_eq!(
            parse_month_day("25th of December", now),
            Some(date(2024, 12, 25, 9, 0))
        );
        assert_eq!(parse_month_day("1st january", now), Some(date(2025, 1, 1, 9, 0)));
        assert_eq!(parse_month_day("31 february", now), None);
    }

    #[test]
    fn test_rule_order_first_match_wins() {
        let now = monday(8, 0);
        let phrase = extract_due_date("call bob at 5pm on friday", now).unwrap();
        assert_eq!(phrase.span, "at 5pm");

        let phrase = extract_due_date("dentist on 3rd of june", now).unwrap();
        assert_eq!(phrase.span, "on 3rd of june");
        assert_eq!(phrase.due, Some(date(2024, 6, 3, 9, 0)));

        assert!(extract_due_date("water the plants", now).is_none());
    }
}
