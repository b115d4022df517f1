use chrono::{Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// First calendar day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last calendar day of the month containing `date`
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Number of days in the given month, 0 for an invalid month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| last_of_month(first).day())
        .unwrap_or(0)
}

/// Monday of the week containing `date`; a Sunday belongs to the week that started six days earlier
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.checked_sub_signed(Duration::days(
        date.weekday().num_days_from_monday() as i64,
    ))
    .unwrap_or(date)
}

/// Get date range for weekly view (Monday to Sunday)
pub fn get_weekly_date_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = week_start(date);
    let sunday = monday
        .checked_add_signed(Duration::days(6))
        .unwrap_or(monday);

    (monday, sunday)
}

/// Today's calendar date in the given timezone
pub fn today_in(tz: &Tz) -> NaiveDate {
    Utc::now().with_timezone(tz).date_naive()
}

/// Format a date as YYYY-MM-DD for query strings
pub fn format_query_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
