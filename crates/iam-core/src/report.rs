use chrono::NaiveDate;
use std::cmp::Ordering;

use crate::{DateSelection, Status, StatusEntry};

pub const EVERYONE_IN_OFFICE: &str = "Everyone is planning to be in office today.";

/// `alice - WFH` lines for today's away entries
pub fn today_lines(entries: &[StatusEntry]) -> String {
    let lines = sorted_lines(
        entries
            .iter()
            .filter(|e| e.status.is_away())
            .map(|e| format!("{} - {}", e.user_name, e.status)),
    );

    if lines.is_empty() {
        EVERYONE_IN_OFFICE.to_string()
    } else {
        lines
    }
}

/// `2026-10-20 - alice - OOO` lines
pub fn schedule_lines(entries: &[StatusEntry]) -> String {
    sorted_lines(
        entries
            .iter()
            .filter(|e| e.status.is_away())
            .map(|e| format!("{} - {} - {}", e.date, e.user_name, e.status)),
    )
}

/// `2026-10-20 - OOO` lines
pub fn history_lines(entries: &[StatusEntry]) -> String {
    sorted_lines(
        entries
            .iter()
            .filter(|e| e.status.is_away())
            .map(|e| format!("{} - {}", e.date, e.status)),
    )
}

fn sorted_lines(lines: impl Iterator<Item = String>) -> String {
    let mut lines: Vec<String> = lines.collect();
    lines.sort();
    lines.join("\n")
}

/// Channel announcement after a status update.
pub fn confirmation(
    user_name: &str,
    status: Status,
    selection: &DateSelection,
    today: NaiveDate,
) -> String {
    let dates = selection.dates();

    if let [date] = dates.as_slice() {
        return match date.cmp(&today) {
            Ordering::Greater => format!("{} will be {} on {}.", user_name, status, date),
            Ordering::Equal => format!("{} is {} today.", user_name, status),
            Ordering::Less => format!("{} was {} on {}.", user_name, status, date),
        };
    }

    match selection {
        DateSelection::Range { start, end } => {
            format!("{} is {} on {} through {}", user_name, status, start, end)
        }
        _ => format!(
            "{} is {} on {}",
            user_name,
            status,
            dates
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(" and ")
        ),
    }
}
