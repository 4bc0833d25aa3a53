//! Relative date/time resolution
//!
//! Turns what a trainer types when scheduling ("завтра 10:30", "в пятницу
//! 18:00", "28.05.2024 15:00") into an absolute local timestamp. The caller
//! supplies "now", so resolution is a pure function of its inputs.

use std::sync::LazyLock;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use regex::Regex;
use thiserror::Error;
use tracing::debug;

/// Why a text could not be resolved to a timestamp
///
/// Trainers only ever see one "could not recognise" message; the variants
/// exist for logs and tests.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DateResolveError {
    #[error("no HH:MM time found")]
    MissingTime,
    #[error("time {hour}:{minute:02} is out of range")]
    TimeOutOfRange { hour: u32, minute: u32 },
    #[error("no recognizable date")]
    NoDate,
    #[error("{day:02}.{month:02}.{year} is not a calendar date")]
    InvalidDate { day: u32, month: u32, year: i32 },
}

/// Relative day named by a keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayKeyword {
    Today,
    Tomorrow,
    Weekday(Weekday),
}

/// Surface forms; Russian weekdays are listed in every grammatical case
/// ("до пятницы", "к пятнице", "в пятницу")
const DAY_KEYWORDS: &[(&str, DayKeyword)] = &[
    ("сегодня", DayKeyword::Today),
    ("today", DayKeyword::Today),
    ("завтра", DayKeyword::Tomorrow),
    ("tomorrow", DayKeyword::Tomorrow),
    ("понедельник", DayKeyword::Weekday(Weekday::Mon)),
    ("понедельника", DayKeyword::Weekday(Weekday::Mon)),
    ("понедельнику", DayKeyword::Weekday(Weekday::Mon)),
    ("понедельником", DayKeyword::Weekday(Weekday::Mon)),
    ("понедельнике", DayKeyword::Weekday(Weekday::Mon)),
    ("monday", DayKeyword::Weekday(Weekday::Mon)),
    ("вторник", DayKeyword::Weekday(Weekday::Tue)),
    ("вторника", DayKeyword::Weekday(Weekday::Tue)),
    ("вторнику", DayKeyword::Weekday(Weekday::Tue)),
    ("вторником", DayKeyword::Weekday(Weekday::Tue)),
    ("вторнике", DayKeyword::Weekday(Weekday::Tue)),
    ("tuesday", DayKeyword::Weekday(Weekday::Tue)),
    ("среда", DayKeyword::Weekday(Weekday::Wed)),
    ("среды", DayKeyword::Weekday(Weekday::Wed)),
    ("среде", DayKeyword::Weekday(Weekday::Wed)),
    ("среду", DayKeyword::Weekday(Weekday::Wed)),
    ("средой", DayKeyword::Weekday(Weekday::Wed)),
    ("wednesday", DayKeyword::Weekday(Weekday::Wed)),
    ("четверг", DayKeyword::Weekday(Weekday::Thu)),
    ("четверга", DayKeyword::Weekday(Weekday::Thu)),
    ("четвергу", DayKeyword::Weekday(Weekday::Thu)),
    ("четвергом", DayKeyword::Weekday(Weekday::Thu)),
    ("четверге", DayKeyword::Weekday(Weekday::Thu)),
    ("thursday", DayKeyword::Weekday(Weekday::Thu)),
    ("пятница", DayKeyword::Weekday(Weekday::Fri)),
    ("пятницы", DayKeyword::Weekday(Weekday::Fri)),
    ("пятнице", DayKeyword::Weekday(Weekday::Fri)),
    ("пятницу", DayKeyword::Weekday(Weekday::Fri)),
    ("пятницей", DayKeyword::Weekday(Weekday::Fri)),
    ("friday", DayKeyword::Weekday(Weekday::Fri)),
    ("суббота", DayKeyword::Weekday(Weekday::Sat)),
    ("субботы", DayKeyword::Weekday(Weekday::Sat)),
    ("субботе", DayKeyword::Weekday(Weekday::Sat)),
    ("субботу", DayKeyword::Weekday(Weekday::Sat)),
    ("субботой", DayKeyword::Weekday(Weekday::Sat)),
    ("saturday", DayKeyword::Weekday(Weekday::Sat)),
    ("воскресенье", DayKeyword::Weekday(Weekday::Sun)),
    ("воскресенья", DayKeyword::Weekday(Weekday::Sun)),
    ("воскресенью", DayKeyword::Weekday(Weekday::Sun)),
    ("воскресеньем", DayKeyword::Weekday(Weekday::Sun)),
    ("sunday", DayKeyword::Weekday(Weekday::Sun)),
];

static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Infallible with a valid static pattern
    Regex::new(r"(\d{1,2}):(\d{2})").expect("Failed to compile time pattern")
});

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Infallible with a valid static pattern
    Regex::new(r"(\d{1,2})\.(\d{1,2})\.(\d{4})").expect("Failed to compile date pattern")
});

/// Resolve free text into a local timestamp relative to `now`
///
/// 1. The first `H:MM`/`HH:MM` in the text is the time; it is required.
/// 2. The date is taken from, in order: a "today" word, a "tomorrow" word,
///    a weekday name (next occurrence strictly after today), or the first
///    `DD.MM.YYYY`.
///
/// Matching is case-insensitive and on whole words, so "завтрак" does not
/// mean tomorrow. Whether the result lies in the past is the caller's check.
pub fn resolve(text: &str, now: NaiveDateTime) -> Result<NaiveDateTime, DateResolveError> {
    let lowered = text.to_lowercase();
    let time = extract_time(&lowered)?;
    let date = extract_date(&lowered, now.date())?;
    let resolved = date.and_time(time);
    debug!(input = %text, resolved = %resolved, "Resolved date/time");
    Ok(resolved)
}

fn extract_time(text: &str) -> Result<NaiveTime, DateResolveError> {
    let captures = TIME_PATTERN
        .captures(text)
        .ok_or(DateResolveError::MissingTime)?;
    let hour: u32 = captures[1].parse().map_err(|_| DateResolveError::MissingTime)?;
    let minute: u32 = captures[2].parse().map_err(|_| DateResolveError::MissingTime)?;
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or(DateResolveError::TimeOutOfRange { hour, minute })
}

fn extract_date(text: &str, today: NaiveDate) -> Result<NaiveDate, DateResolveError> {
    if let Some(keyword) = find_day_keyword(text) {
        return Ok(match keyword {
            DayKeyword::Today => today,
            DayKeyword::Tomorrow => today + Duration::days(1),
            DayKeyword::Weekday(target) => next_weekday(today, target),
        });
    }

    let captures = DATE_PATTERN.captures(text).ok_or(DateResolveError::NoDate)?;
    let day: u32 = captures[1].parse().map_err(|_| DateResolveError::NoDate)?;
    let month: u32 = captures[2].parse().map_err(|_| DateResolveError::NoDate)?;
    let year: i32 = captures[3].parse().map_err(|_| DateResolveError::NoDate)?;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(DateResolveError::InvalidDate { day, month, year })
}

/// Highest-priority day keyword among the words of `text`
///
/// "today" beats "tomorrow", which beats any weekday. When several weekdays
/// are named, the earliest in the Monday to Sunday order wins, regardless of
/// where it appears in the text.
fn find_day_keyword(text: &str) -> Option<DayKeyword> {
    let keywords: Vec<DayKeyword> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .filter_map(|word| {
            DAY_KEYWORDS
                .iter()
                .find(|(surface, _)| *surface == word)
                .map(|(_, keyword)| *keyword)
        })
        .collect();

    [DayKeyword::Today, DayKeyword::Tomorrow]
        .into_iter()
        .find(|wanted| keywords.contains(wanted))
        .or_else(|| {
            keywords
                .into_iter()
                .filter_map(|keyword| match keyword {
                    DayKeyword::Weekday(day) => Some(day),
                    _ => None,
                })
                .min_by_key(Weekday::num_days_from_monday)
                .map(DayKeyword::Weekday)
        })
}

/// Next occurrence of `target` strictly after `from`
///
/// Naming today's weekday means the same day next week.
pub fn next_weekday(from: NaiveDate, target: Weekday) -> NaiveDate {
    let current = i64::from(from.weekday().num_days_from_monday());
    let wanted = i64::from(target.num_days_from_monday());
    let mut days_ahead = wanted - current;
    if days_ahead <= 0 {
        days_ahead += 7;
    }
    from + Duration::days(days_ahead)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Wednesday 2024-05-22 12:00
    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 22)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn resolve_today() {
        assert_eq!(resolve("сегодня 18:00", now()), Ok(at(2024, 5, 22, 18, 0)));
    }

    #[test]
    fn resolve_tomorrow() {
        assert_eq!(resolve("завтра 10:30", now()), Ok(at(2024, 5, 23, 10, 30)));
        assert_eq!(resolve("Tomorrow 9:05", now()), Ok(at(2024, 5, 23, 9, 5)));
    }

    #[test]
    fn resolve_is_case_insensitive() {
        assert_eq!(resolve("ЗАВТРА 07:00", now()), Ok(at(2024, 5, 23, 7, 0)));
    }

    #[test]
    fn resolve_weekday_inflections() {
        assert_eq!(resolve("в пятницу 18:00", now()), Ok(at(2024, 5, 24, 18, 0)));
        assert_eq!(resolve("пятница 18:00", now()), Ok(at(2024, 5, 24, 18, 0)));
        assert_eq!(resolve("в субботу 11:00", now()), Ok(at(2024, 5, 25, 11, 0)));
        assert_eq!(resolve("monday 08:15", now()), Ok(at(2024, 5, 27, 8, 15)));
    }

    #[test]
    fn resolve_weekday_case_forms() {
        let cases = [
            ("до понедельника 9:00", at(2024, 5, 27, 9, 0)),
            ("к понедельнику 9:00", at(2024, 5, 27, 9, 0)),
            ("перед понедельником 9:00", at(2024, 5, 27, 9, 0)),
            ("о вторнике 9:00", at(2024, 5, 28, 9, 0)),
            ("до вторника 9:00", at(2024, 5, 28, 9, 0)),
            ("к вторнику 9:00", at(2024, 5, 28, 9, 0)),
            ("за вторником 9:00", at(2024, 5, 28, 9, 0)),
            ("до среды 10:00", at(2024, 5, 29, 10, 0)),
            ("к среде 10:00", at(2024, 5, 29, 10, 0)),
            ("перед средой 10:00", at(2024, 5, 29, 10, 0)),
            ("до четверга 7:30", at(2024, 5, 23, 7, 30)),
            ("к четвергу 7:30", at(2024, 5, 23, 7, 30)),
            ("перед четвергом 7:30", at(2024, 5, 23, 7, 30)),
            ("о четверге 7:30", at(2024, 5, 23, 7, 30)),
            ("до пятницы 18:00", at(2024, 5, 24, 18, 0)),
            ("к пятнице 18:00", at(2024, 5, 24, 18, 0)),
            ("перед пятницей 18:00", at(2024, 5, 24, 18, 0)),
            ("до субботы 11:00", at(2024, 5, 25, 11, 0)),
            ("к субботе 11:00", at(2024, 5, 25, 11, 0)),
            ("перед субботой 11:00", at(2024, 5, 25, 11, 0)),
            ("до воскресенья 10:00", at(2024, 5, 26, 10, 0)),
            ("к воскресенью 10:00", at(2024, 5, 26, 10, 0)),
            ("перед воскресеньем 10:00", at(2024, 5, 26, 10, 0)),
            ("в воскресенье 10:00", at(2024, 5, 26, 10, 0)),
        ];
        for (text, expected) in cases {
            assert_eq!(resolve(text, now()), Ok(expected), "{text}");
        }
    }

    #[test]
    fn earliest_weekday_in_the_week_wins() {
        // Monday comes first in the week even though Friday is written first
        assert_eq!(
            resolve("пятница или понедельник 10:00", now()),
            Ok(at(2024, 5, 27, 10, 0))
        );
        assert_eq!(
            resolve("суббота или четверг 10:00", now()),
            Ok(at(2024, 5, 23, 10, 0))
        );
    }

    #[test]
    fn inflected_forms_still_match_whole_words_only() {
        assert_eq!(
            resolve("пятничный 18:00", now()),
            Err(DateResolveError::NoDate)
        );
    }

    #[test]
    fn weekday_equal_to_today_moves_a_week_ahead() {
        assert_eq!(resolve("среда 19:00", now()), Ok(at(2024, 5, 29, 19, 0)));
        assert_eq!(resolve("в среду 19:00", now()), Ok(at(2024, 5, 29, 19, 0)));
    }

    #[test]
    fn explicit_date_is_used_literally() {
        assert_eq!(
            resolve("28.05.2024 15:00", now()),
            Ok(at(2024, 5, 28, 15, 0))
        );
        assert_eq!(resolve("1.6.2025 7:45", now()), Ok(at(2025, 6, 1, 7, 45)));
    }

    #[test]
    fn keyword_takes_precedence_over_explicit_date() {
        assert_eq!(
            resolve("завтра 10:00 (не 01.01.2030)", now()),
            Ok(at(2024, 5, 23, 10, 0))
        );
    }

    #[test]
    fn today_beats_tomorrow_and_weekday() {
        assert_eq!(
            resolve("пятница или завтра или сегодня 20:00", now()),
            Ok(at(2024, 5, 22, 20, 0))
        );
    }

    #[test]
    fn keywords_match_whole_words_only() {
        assert_eq!(resolve("завтрак 10:00", now()), Err(DateResolveError::NoDate));
        assert_eq!(
            resolve("todayish 10:00", now()),
            Err(DateResolveError::NoDate)
        );
    }

    #[test]
    fn keyword_next_to_punctuation_matches() {
        assert_eq!(resolve("завтра, 10:00", now()), Ok(at(2024, 5, 23, 10, 0)));
    }

    #[test]
    fn missing_time_fails() {
        assert_eq!(resolve("завтра", now()), Err(DateResolveError::MissingTime));
        assert_eq!(
            resolve("28.05.2024", now()),
            Err(DateResolveError::MissingTime)
        );
    }

    #[test]
    fn time_out_of_range_fails() {
        assert_eq!(
            resolve("завтра 24:00", now()),
            Err(DateResolveError::TimeOutOfRange { hour: 24, minute: 0 })
        );
        assert_eq!(
            resolve("завтра 10:60", now()),
            Err(DateResolveError::TimeOutOfRange { hour: 10, minute: 60 })
        );
    }

    #[test]
    fn invalid_calendar_date_fails() {
        assert_eq!(
            resolve("31.02.2024 10:00", now()),
            Err(DateResolveError::InvalidDate {
                day: 31,
                month: 2,
                year: 2024
            })
        );
    }

    #[test]
    fn two_digit_year_is_not_a_date() {
        assert_eq!(resolve("28.05.24 10:00", now()), Err(DateResolveError::NoDate));
    }

    #[test]
    fn past_results_are_returned_unchanged() {
        // The not-in-the-past rule belongs to the scheduling step
        assert_eq!(resolve("сегодня 08:00", now()), Ok(at(2024, 5, 22, 8, 0)));
    }

    #[test]
    fn next_weekday_same_day() {
        let monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert_eq!(
            next_weekday(monday, Weekday::Mon),
            NaiveDate::from_ymd_opt(2025, 1, 13).unwrap()
        );
    }

    #[test]
    fn next_weekday_wraps_week() {
        let saturday = NaiveDate::from_ymd_opt(2025, 1, 11).unwrap();
        assert_eq!(
            next_weekday(saturday, Weekday::Tue),
            NaiveDate::from_ymd_opt(2025, 1, 14).unwrap()
        );
    }
}
