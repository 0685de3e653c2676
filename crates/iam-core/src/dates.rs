//! Human-readable date expressions.
//!
//! Everything resolves relative to the team's current date, so callers pass
//! `today` explicitly (see [`crate::TeamCalendar::today`]).

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveTime, Weekday};
use chrono_english::{parse_date_string, Dialect};

use crate::{Error, Result};

/// Separators that turn an option string into an inclusive range,
/// checked in this order.
const THROUGH_WORDS: [&str; 3] = [" through ", " to ", " thru "];

const LIST_SEPARATOR: &str = " and ";

const MAX_RANGE_DAYS: i64 = 366;

/// Upper bound for any number in an expression ("in N days", years).
const MAX_COUNT: i64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateSelection {
    Single(NaiveDate),
    /// `a and b and c`, in the order given
    List(Vec<NaiveDate>),
    /// `a through b`, inclusive
    Range { start: NaiveDate, end: NaiveDate },
}

impl DateSelection {
    pub fn dates(&self) -> Vec<NaiveDate> {
        match self {
            DateSelection::Single(date) => vec![*date],
            DateSelection::List(dates) => dates.clone(),
            DateSelection::Range { start, end } => {
                start.iter_days().take_while(|d| d <= end).collect()
            }
        }
    }
}

/// Parse the options that follow a status subcommand into the dates they name.
///
/// Empty options mean today.
pub fn parse_date_options(options: &str, today: NaiveDate) -> Result<DateSelection> {
    let lowered = options.trim().to_lowercase();

    if lowered.is_empty() {
        return Ok(DateSelection::Single(today));
    }

    if lowered.contains(LIST_SEPARATOR) {
        let dates = lowered
            .split(LIST_SEPARATOR)
            .map(|part| parse_date(part, today))
            .collect::<Result<Vec<_>>>()?;

        return Ok(DateSelection::List(dates));
    }

    if let Some(word) = THROUGH_WORDS.iter().find(|w| lowered.contains(*w)) {
        let ends: Vec<&str> = lowered.split(word).collect();

        let (start, end) = match ends.as_slice() {
            [start, end] => (parse_date(start, today)?, parse_date(end, today)?),
            _ => {
                return Err(Error::InvalidRange(
                    "Must provide a start and end date, e.g. 'monday through friday'".to_string(),
                ))
            }
        };

        if start > end {
            return Err(Error::InvalidRange(
                "First date in range must come before the end date.".to_string(),
            ));
        }

        if (end - start).num_days() + 1 > MAX_RANGE_DAYS {
            return Err(Error::InvalidRange(format!(
                "Date ranges are limited to {} days.",
                MAX_RANGE_DAYS
            )));
        }

        return Ok(DateSelection::Range { start, end });
    }

    Ok(DateSelection::Single(parse_date(&lowered, today)?))
}

/// Resolve a single date expression such as `tomorrow`, `next monday`,
/// `3/14 at 5pm` or `2026-10-25`.
pub fn parse_date(expr: &str, today: NaiveDate) -> Result<NaiveDate> {
    let normalized = normalize(expr);

    resolve(&normalized, today).ok_or_else(|| {
        Error::InvalidDate(format!("Could not parse the given date {}", expr.trim()))
    })
}

fn resolve(expr: &str, today: NaiveDate) -> Option<NaiveDate> {
    if expr.is_empty() || exceeds_max_count(expr) {
        return None;
    }

    parse_weekday(expr, today)
        .or_else(|| parse_day_of_month(expr, today))
        .or_else(|| parse_month_end(expr, today))
        .or_else(|| parse_english(expr, today))
}

/// Everything the team rules above do not cover goes to `chrono-english`.
fn parse_english(expr: &str, today: NaiveDate) -> Option<NaiveDate> {
    let base = today.and_time(NaiveTime::MIN).and_utc();

    // "next" only changes year-less calendar days: one that already passed
    // this year moves to next year, today stays.
    parse_date_string(&format!("next {}", expr), base, Dialect::Us)
        .or_else(|_| parse_date_string(expr, base, Dialect::Us))
        .ok()
        .map(|resolved| resolved.date_naive())
}

/// Lower-case, drop the time of day, and rewrite the relative forms
/// `chrono-english` does not know (`in 3 days`, `a week from now`,
/// `next month`) into ones it does (`3 days`, `1 week`).
fn normalize(expr: &str) -> String {
    let lowered = expr.to_lowercase().replace(',', " ");
    let mut words: Vec<String> = Vec::new();

    for word in lowered.split_whitespace() {
        let word = word.trim_end_matches('.');

        match word {
            "" | "at" | "noon" | "midnight" => {}
            "am" | "pm" => {
                if words.last().is_some_and(|w| is_number(w)) {
                    words.pop();
                }
            }
            _ if is_clock_time(word) => {}
            "tonight" => words.push("today".to_string()),
            "tmrw" | "tmw" => words.push("tomorrow".to_string()),
            _ => words.push(match number_word(word) {
                Some(digits) => digits.to_string(),
                None => strip_ordinal(word).to_string(),
            }),
        }
    }

    let words: Vec<&str> = words.iter().map(String::as_str).collect();
    let rewritten = match words.as_slice() {
        ["in", count, unit] if is_unit(unit) => vec![*count, *unit],
        [count, unit, "from", "now"] if is_unit(unit) => vec![*count, *unit],
        ["next", unit] if is_unit(unit) => vec!["1", *unit],
        ["last", unit] if is_unit(unit) => vec!["1", *unit, "ago"],
        // `march 14 2027` reads as `14 march 2027`
        [month, day, year] if !is_number(month) && is_number(day) && year.len() == 4 && is_number(year) => {
            vec![*day, *month, *year]
        }
        other => other.to_vec(),
    };

    rewritten.join(" ")
}

fn parse_weekday(expr: &str, today: NaiveDate) -> Option<NaiveDate> {
    let words: Vec<&str> = expr.split_whitespace().collect();

    let (modifier, weekday) = match words.as_slice() {
        [day] => (None, weekday_from_name(day)?),
        [modifier @ ("next" | "this" | "last"), day] => (Some(*modifier), weekday_from_name(day)?),
        // `friday next week`
        [day, modifier @ ("next" | "this" | "last"), "week"] => {
            (Some(*modifier), weekday_from_name(day)?)
        }
        _ => return None,
    };

    let current = i64::from(today.weekday().num_days_from_monday());
    let target = i64::from(weekday.num_days_from_monday());

    // Weeks start on Monday. A bare weekday never resolves to the past.
    let week_offset = match modifier {
        None if target > current => 0,
        None => 1,
        Some("next") => 1,
        Some("last") => -1,
        _ => 0,
    };

    today.checked_add_signed(Duration::days(target - current + 7 * week_offset))
}

/// `the 14th`: this month, or next month once the day has passed.
fn parse_day_of_month(expr: &str, today: NaiveDate) -> Option<NaiveDate> {
    let words: Vec<&str> = expr.split_whitespace().collect();
    let ["the", day] = words.as_slice() else {
        return None;
    };
    let day: u32 = day.parse().ok()?;

    match today.with_day(day) {
        Some(date) if date >= today => Some(date),
        _ => today
            .with_day(1)?
            .checked_add_months(Months::new(1))?
            .with_day(day),
    }
}

fn parse_month_end(expr: &str, today: NaiveDate) -> Option<NaiveDate> {
    if !matches!(expr, "end of month" | "end of the month") {
        return None;
    }

    today
        .with_day(1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

fn exceeds_max_count(expr: &str) -> bool {
    expr.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .any(|run| run.parse::<i64>().map_or(true, |n| n > MAX_COUNT))
}

/// `5pm`, `17:30`, `8.30am`
fn is_clock_time(word: &str) -> bool {
    let (digits, meridiem) = match word.strip_suffix("am").or_else(|| word.strip_suffix("pm")) {
        Some(rest) => (rest, true),
        None => (word, false),
    };

    digits.starts_with(|c: char| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == ':' || c == '.')
        && (meridiem || digits.contains([':', '.']))
}

fn number_word(word: &str) -> Option<&'static str> {
    Some(match word {
        "a" | "an" | "one" => "1",
        "two" => "2",
        "three" => "3",
        "four" => "4",
        "five" => "5",
        "six" => "6",
        "seven" => "7",
        "eight" => "8",
        "nine" => "9",
        "ten" => "10",
        _ => return None,
    })
}

fn strip_ordinal(word: &str) -> &str {
    ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix).filter(|digits| is_number(digits)))
        .unwrap_or(word)
}

fn is_unit(word: &str) -> bool {
    matches!(
        word.trim_end_matches('s'),
        "day" | "week" | "month" | "year"
    )
}

fn weekday_from_name(word: &str) -> Option<Weekday> {
    match word {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tues" | "tuesday" => Some(Weekday::Tue),
        "wed" | "weds" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thur" | "thurs" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

fn is_number(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}
