use chrono::{Datelike, Duration, NaiveDate, Weekday};
use chrono_tz::Tz;
use eventsphere::components::calendar::{
    bucket_by_day, classify, classify_all, compute_window, decode_events, upcoming_window,
    ViewMode,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value};

fn titles(events: &[eventsphere::components::calendar::CalendarEvent]) -> Vec<String> {
    events.iter().map(|e| e.title.clone()).collect()
}

/// January view keeps A and B on the first, drops C
#[test]
fn test_january_month_view() {
    let raws = vec![
        json!({ "id": 1, "event_name": "A", "event_time": "2024-01-01T10:00:00Z" }),
        json!({ "id": 2, "event_name": "B", "event_time": "2024-01-01T15:00:00Z" }),
        json!({ "id": 3, "event_name": "C", "event_time": "2024-02-01T00:00:00Z" }),
    ];
    let tz = Tz::UTC;
    let window = compute_window(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(), ViewMode::Month);

    let events = classify(&raws, &window, &tz);
    assert_eq!(titles(&events), vec!["A", "B"]);

    let buckets = bucket_by_day(&events, 2024, 1);
    assert_eq!(titles(buckets.events_on(1)), vec!["A", "B"]);
    assert_eq!(buckets.total(), 2);
}

/// A record whose only date is garbage is dropped without panicking
#[test]
fn test_unparseable_event_is_excluded() {
    let raws = vec![
        json!({ "id": 9, "event_name": "Broken", "event_date": "not-a-date" }),
        json!({ "id": 1, "event_name": "Fine", "event_date": "2024-01-05" }),
    ];
    let tz = Tz::UTC;

    for mode in [ViewMode::Month, ViewMode::Week, ViewMode::Day] {
        let window = compute_window(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(), mode);
        let classification = classify_all(&raws, &window, &tz);
        assert_eq!(titles(&classification.events), vec!["Fine"]);
        assert_eq!(classification.undated.len(), 1);
        assert_eq!(classification.undated[0].title, "Broken");
    }
}

/// Events late on the last day of the window still count
#[test]
fn test_last_day_is_fully_included() {
    let raws = vec![json!({ "event_name": "Late", "event_time": "2024-01-31T23:30:00Z" })];
    let window = compute_window(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(), ViewMode::Month);
    assert_eq!(classify(&raws, &window, &Tz::UTC).len(), 1);
}

/// Days are local to the configured timezone
#[test]
fn test_timezone_shifts_the_day() {
    let raws = vec![json!({ "event_name": "Night", "event_time": "2024-01-31T20:00:00Z" })];
    let kolkata: Tz = "Asia/Kolkata".parse().unwrap();
    let january = compute_window(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(), ViewMode::Month);
    let february = compute_window(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(), ViewMode::Month);

    assert!(classify(&raws, &january, &kolkata).is_empty());
    assert_eq!(classify(&raws, &february, &kolkata).len(), 1);
}

/// Upcoming compares calendar days, so an event earlier today is still upcoming
#[test]
fn test_upcoming_includes_today() {
    let raws = vec![
        json!({ "event_name": "Yesterday", "event_time": "2024-03-09T10:00:00Z" }),
        json!({ "event_name": "This morning", "event_time": "2024-03-10T06:00:00Z" }),
        json!({ "event_name": "Next week", "event_time": "2024-03-17T06:00:00Z" }),
    ];
    let events = decode_events(&raws, &Tz::UTC).events;
    let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

    assert_eq!(
        titles(&upcoming_window(&events, today, 5)),
        vec!["This morning", "Next week"]
    );
}

fn date_strategy() -> impl Strategy<Value = (NaiveDate, u32)> {
    (2000i32..2100, 1u32..=12, 1u32..=28, 0u32..24).prop_map(|(y, m, d, h)| {
        (NaiveDate::from_ymd_opt(y, m, d).unwrap(), h)
    })
}

fn raw_event(date: NaiveDate, hour: u32, title: &str) -> Value {
    json!({
        "event_name": title,
        "event_time": format!("{}T{:02}:00:00Z", date.format("%Y-%m-%d"), hour),
    })
}

proptest! {
    #[test]
    fn prop_month_window_contains_event_once((date, hour) in date_strategy(), offset in 0i64..28) {
        let raws = vec![raw_event(date, hour, "E")];
        let focus = date.with_day(1).unwrap_or(date) + Duration::days(offset);
        prop_assume!(focus.month() == date.month());

        let window = compute_window(focus, ViewMode::Month);
        let events = classify(&raws, &window, &Tz::UTC);
        prop_assert_eq!(events.len(), 1);
    }

    #[test]
    fn prop_unparseable_dates_never_bucketed(noise in "[a-z]{3,12}", (date, _) in date_strategy()) {
        let raws = vec![json!({ "event_name": "X", "event_date": noise, "date": "??" })];
        for mode in [ViewMode::Month, ViewMode::Week, ViewMode::Day] {
            let window = compute_window(date, mode);
            let classification = classify_all(&raws, &window, &Tz::UTC);
            prop_assert!(classification.events.is_empty());
            prop_assert_eq!(classification.undated.len(), 1);
        }
    }

    #[test]
    fn prop_sunday_week_starts_six_days_before((date, _) in date_strategy()) {
        let sunday = date + Duration::days(
            (7 - date.weekday().num_days_from_sunday() as i64) % 7,
        );
        prop_assert_eq!(sunday.weekday(), Weekday::Sun);

        let window = compute_window(sunday, ViewMode::Week);
        prop_assert_eq!(window.start, sunday - Duration::days(6));
        prop_assert_eq!(window.start.weekday(), Weekday::Mon);
        prop_assert_eq!(window.end, sunday);
    }

    #[test]
    fn prop_upcoming_is_bounded_and_sorted(
        dates in prop::collection::vec(date_strategy(), 0..30),
        limit in 0usize..10,
        (today, _) in date_strategy(),
    ) {
        let raws: Vec<Value> = dates.iter().map(|(d, h)| raw_event(*d, *h, "U")).collect();
        let events = decode_events(&raws, &Tz::UTC).events;

        let upcoming = upcoming_window(&events, today, limit);
        prop_assert!(upcoming.len() <= limit);
        prop_assert!(upcoming.windows(2).all(|w| w[0].occurs_at <= w[1].occurs_at));
        prop_assert!(upcoming.iter().all(|e| e.date() >= today));
    }

    #[test]
    fn prop_bucketing_loses_nothing(
        days in prop::collection::vec((1u32..=31, 0u32..24), 0..40),
        broken in 0usize..5,
    ) {
        let mut raws: Vec<Value> = days
            .iter()
            .map(|(d, h)| raw_event(NaiveDate::from_ymd_opt(2024, 1, *d).unwrap(), *h, "B"))
            .collect();
        raws.extend((0..broken).map(|_| json!({ "event_name": "Broken", "event_date": "not-a-date" })));

        let window = compute_window(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), ViewMode::Month);
        let classification = classify_all(&raws, &window, &Tz::UTC);
        let buckets = bucket_by_day(&classification.events, 2024, 1);

        prop_assert_eq!(buckets.total() + classification.undated.len(), raws.len());
    }
}
