//! Month-grid construction and date-input parsing for the calendar view.
//! Weeks run Sunday through Saturday; cells outside the month are None.

use crate::model::Task;
use chrono::{Datelike, Local, Months, NaiveDate};

pub const WEEKDAY_HEADER: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Lay the month containing `month` out as rows of seven cells. Leading and
/// trailing cells that belong to neighboring months stay empty.
pub fn month_grid(month: NaiveDate) -> Vec<[Option<NaiveDate>; 7]> {
    let first = first_of_month(month);
    let mut weeks: Vec<[Option<NaiveDate>; 7]> = Vec::with_capacity(6);
    let mut week: [Option<NaiveDate>; 7] = [None; 7];
    let mut col = first.weekday().num_days_from_sunday() as usize;
    let mut day = first;
    loop {
        week[col] = Some(day);
        if col == 6 {
            weeks.push(week);
            week = [None; 7];
            col = 0;
        } else {
            col += 1;
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
        if day.month() != first.month() {
            break;
        }
    }
    if week.iter().any(|cell| cell.is_some()) {
        weeks.push(week);
    }
    weeks
}

pub fn month_title(month: NaiveDate) -> String {
    month.format("%B %Y").to_string()
}

/// Step one month forward, clamping the day to the shorter month's end.
pub fn next_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(date)
}

pub fn prev_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(1)).unwrap_or(date)
}

/// Whether any task is due on the given day, time of day ignored.
pub fn has_due(tasks: &[Task], date: NaiveDate) -> bool {
    tasks.iter().any(|t| t.due_date.date_naive() == date)
}

/// Parse a user-entered due date. Accepts full `YYYY-MM-DD`, or `MM-DD`
/// taken in the current year and bumped to next year when the date has
/// already passed. Anything else is None and the caller picks a default.
pub fn parse_day_input(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    let parts: Vec<&str> = trimmed.split('-').collect();
    if parts.len() == 2 {
        if let (Ok(month), Ok(day)) = (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
            let today = Local::now().date_naive();
            let mut year = today.year();
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                if date < today {
                    year += 1;
                }
                return NaiveDate::from_ymd_opt(year, month, day);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_march_2024_grid_shape() {
        // March 2024 starts on a Friday and ends on a Sunday
        let weeks = month_grid(day(2024, 3, 15));
        assert_eq!(weeks.len(), 6);
        assert_eq!(weeks[0][5], Some(day(2024, 3, 1)));
        assert!(weeks[0][..5].iter().all(|c| c.is_none()));
        assert_eq!(weeks[5][0], Some(day(2024, 3, 31)));
        assert!(weeks[5][1..].iter().all(|c| c.is_none()));
        let cells = weeks.iter().flatten().filter(|c| c.is_some()).count();
        assert_eq!(cells, 31);
    }

    #[test]
    fn test_leap_february_grid_shape() {
        let weeks = month_grid(day(2024, 2, 1));
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][4], Some(day(2024, 2, 1)));
        assert_eq!(weeks[4][4], Some(day(2024, 2, 29)));
        let cells = weeks.iter().flatten().filter(|c| c.is_some()).count();
        assert_eq!(cells, 29);
    }

    #[test]
    fn test_month_stepping_clamps_short_months() {
        assert_eq!(next_month(day(2024, 1, 31)), day(2024, 2, 29));
        assert_eq!(prev_month(day(2024, 3, 31)), day(2024, 2, 29));
        assert_eq!(next_month(day(2024, 12, 15)), day(2025, 1, 15));
        assert_eq!(prev_month(day(2025, 1, 15)), day(2024, 12, 15));
    }

    #[test]
    fn test_month_title() {
        assert_eq!(month_title(day(2024, 3, 15)), "March 2024");
    }

    #[test]
    fn test_parse_day_input_full_date() {
        assert_eq!(parse_day_input("2024-03-05"), Some(day(2024, 3, 5)));
        assert_eq!(parse_day_input("  2024-03-05  "), Some(day(2024, 3, 5)));
    }

    #[test]
    fn test_parse_day_input_rejects_blank_and_garbage() {
        assert_eq!(parse_day_input(""), None);
        assert_eq!(parse_day_input("   "), None);
        assert_eq!(parse_day_input("soon"), None);
        assert_eq!(parse_day_input("13-01"), None);
        assert_eq!(parse_day_input("02-30"), None);
    }

    #[test]
    fn test_parse_day_input_month_day_never_lands_in_the_past() {
        let today = Local::now().date_naive();
        let parsed = parse_day_input("01-01").unwrap();
        assert!(parsed >= today);
        assert_eq!((parsed.month(), parsed.day()), (1, 1));
    }
}
