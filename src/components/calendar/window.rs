use crate::error::{calendar_error, AppResult};
use crate::utils::time::{
    days_in_month, first_of_month, format_query_date, get_weekly_date_range, last_of_month,
};
use chrono::{Datelike, Duration, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Calendar view granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Month,
    Week,
    Day,
}

impl FromStr for ViewMode {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(ViewMode::Month),
            "week" => Ok(ViewMode::Week),
            "day" => Ok(ViewMode::Day),
            other => Err(calendar_error(&format!("Unknown view mode: {}", other))),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ViewMode::Month => "month",
            ViewMode::Week => "week",
            ViewMode::Day => "day",
        };
        f.write_str(name)
    }
}

/// Navigation direction for the previous/next buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Inclusive range of calendar days shown by a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub mode: ViewMode,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Whether a calendar day falls inside the window, bounds included
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every day of the window in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Filter hint sent to the backend
    pub fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("start_date", format_query_date(self.start)),
            ("end_date", format_query_date(self.end)),
        ]
    }
}

/// Compute the window shown for a focus date in the given mode
pub fn compute_window(focus: NaiveDate, mode: ViewMode) -> DateWindow {
    let (start, end) = match mode {
        ViewMode::Month => (first_of_month(focus), last_of_month(focus)),
        ViewMode::Week => get_weekly_date_range(focus),
        ViewMode::Day => (focus, focus),
    };

    DateWindow { mode, start, end }
}

/// Move the focus date one view back or forward
pub fn navigate(focus: NaiveDate, mode: ViewMode, direction: Direction) -> NaiveDate {
    match (mode, direction) {
        (ViewMode::Month, Direction::Previous) => first_of_month(focus)
            .checked_sub_months(Months::new(1))
            .unwrap_or(focus),
        (ViewMode::Month, Direction::Next) => first_of_month(focus)
            .checked_add_months(Months::new(1))
            .unwrap_or(focus),
        (ViewMode::Week, Direction::Previous) => shift_days(focus, -7),
        (ViewMode::Week, Direction::Next) => shift_days(focus, 7),
        (ViewMode::Day, Direction::Previous) => shift_days(focus, -1),
        (ViewMode::Day, Direction::Next) => shift_days(focus, 1),
    }
}

fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

/// Month grid cells: Sunday-first leading blanks, then each day of the month
pub fn month_grid(year: i32, month: u32) -> Vec<Option<u32>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };

    let leading = first.weekday().num_days_from_sunday() as usize;
    let mut cells = vec![None; leading];
    cells.extend((1..=days_in_month(year, month)).map(Some));
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_window() {
        let window = compute_window(date(2024, 2, 14), ViewMode::Month);
        assert_eq!(window.start, date(2024, 2, 1));
        assert_eq!(window.end, date(2024, 2, 29));
        assert_eq!(window.mode, ViewMode::Month);

        let window = compute_window(date(2023, 12, 31), ViewMode::Month);
        assert_eq!(window.start, date(2023, 12, 1));
        assert_eq!(window.end, date(2023, 12, 31));
    }

    #[test]
    fn test_week_window_starts_monday() {
        // Wednesday
        let window = compute_window(date(2024, 1, 10), ViewMode::Week);
        assert_eq!(window.start, date(2024, 1, 8));
        assert_eq!(window.end, date(2024, 1, 14));
        assert_eq!(window.start.weekday(), Weekday::Mon);

        // Monday is its own start
        let window = compute_window(date(2024, 1, 8), ViewMode::Week);
        assert_eq!(window.start, date(2024, 1, 8));
    }

    #[test]
    fn test_week_window_sunday_belongs_to_previous_week() {
        let sunday = date(2024, 1, 14);
        assert_eq!(sunday.weekday(), Weekday::Sun);

        let window = compute_window(sunday, ViewMode::Week);
        assert_eq!(window.start, date(2024, 1, 8));
        assert_eq!(window.end, sunday);
    }

    #[test]
    fn test_day_window() {
        let window = compute_window(date(2024, 1, 10), ViewMode::Day);
        assert_eq!(window.start, window.end);
        assert!(window.contains(date(2024, 1, 10)));
        assert!(!window.contains(date(2024, 1, 11)));
    }

    #[test]
    fn test_window_days_and_query() {
        let window = compute_window(date(2024, 1, 10), ViewMode::Week);
        assert_eq!(window.days().count(), 7);

        let [start, end] = window.query_params();
        assert_eq!(start, ("start_date", "2024-01-08".to_string()));
        assert_eq!(end, ("end_date", "2024-01-14".to_string()));
    }

    #[test]
    fn test_navigate() {
        let focus = date(2024, 1, 31);
        assert_eq!(navigate(focus, ViewMode::Month, Direction::Next), date(2024, 2, 1));
        assert_eq!(navigate(focus, ViewMode::Month, Direction::Previous), date(2023, 12, 1));
        assert_eq!(navigate(focus, ViewMode::Week, Direction::Next), date(2024, 2, 7));
        assert_eq!(navigate(focus, ViewMode::Day, Direction::Previous), date(2024, 1, 30));
    }

    #[test]
    fn test_month_grid() {
        // January 2024 starts on a Monday
        let grid = month_grid(2024, 1);
        assert_eq!(grid[0], None);
        assert_eq!(grid[1], Some(1));
        assert_eq!(grid.len(), 1 + 31);

        // September 2024 starts on a Sunday
        let grid = month_grid(2024, 9);
        assert_eq!(grid[0], Some(1));

        assert!(month_grid(2024, 0).is_empty());
    }

    #[test]
    fn test_view_mode_parsing() {
        assert_eq!("Week".parse::<ViewMode>().unwrap(), ViewMode::Week);
        assert_eq!(" day ".parse::<ViewMode>().unwrap(), ViewMode::Day);
        assert!("year".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::Month.to_string(), "month");
    }
}
