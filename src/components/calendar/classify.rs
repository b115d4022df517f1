use super::decode::decode_events;
use super::models::{CalendarEvent, EventPhase, UndatedEvent};
use super::window::DateWindow;
use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use serde_json::Value;
use std::collections::BTreeMap;

/// Events shown per month cell before the "+N more" marker
pub const MAX_EVENTS_PER_CELL: usize = 3;

/// Description length in list views
pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// Dated events together with the records that could not be placed on a calendar
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub events: Vec<CalendarEvent>,
    pub undated: Vec<UndatedEvent>,
}

/// Decode raw records and keep the ones inside the window
pub fn classify(raws: &[Value], window: &DateWindow, tz: &Tz) -> Vec<CalendarEvent> {
    classify_all(raws, window, tz).events
}

/// Like [`classify`], also returning the undated records
pub fn classify_all(raws: &[Value], window: &DateWindow, tz: &Tz) -> Classification {
    let mut decoded = decode_events(raws, tz);
    decoded.events.retain(|event| window.contains(event.date()));
    decoded
}

/// One month cell as rendered
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a> {
    pub visible: &'a [CalendarEvent],
    pub overflow_count: usize,
}

/// Events of one month grouped by day of month
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayBuckets {
    days: BTreeMap<u32, Vec<CalendarEvent>>,
}

impl DayBuckets {
    /// All events on a day
    pub fn events_on(&self, day: u32) -> &[CalendarEvent] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Capped view of a day for the month grid
    pub fn cell(&self, day: u32) -> DayCell<'_> {
        let events = self.events_on(day);
        let shown = events.len().min(MAX_EVENTS_PER_CELL);
        DayCell {
            visible: &events[..shown],
            overflow_count: events.len().saturating_sub(MAX_EVENTS_PER_CELL),
        }
    }

    /// Days that have at least one event
    pub fn days(&self) -> impl Iterator<Item = (u32, &[CalendarEvent])> {
        self.days.iter().map(|(day, events)| (*day, events.as_slice()))
    }

    /// Number of events across all days
    pub fn total(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}

/// Group the events of a month by day, each day in chronological order
pub fn bucket_by_day(events: &[CalendarEvent], year: i32, month: u32) -> DayBuckets {
    let mut days: BTreeMap<u32, Vec<CalendarEvent>> = BTreeMap::new();

    for event in events {
        let date = event.date();
        if date.year() == year && date.month() == month {
            days.entry(date.day()).or_default().push(event.clone());
        }
    }

    for bucket in days.values_mut() {
        sort_chronological(bucket);
    }

    DayBuckets { days }
}

/// One column per day of the window, each in chronological order
pub fn bucket_by_week(
    events: &[CalendarEvent],
    window: &DateWindow,
) -> Vec<(NaiveDate, Vec<CalendarEvent>)> {
    window
        .days()
        .map(|day| {
            let mut column: Vec<CalendarEvent> = events
                .iter()
                .filter(|event| event.date() == day)
                .cloned()
                .collect();
            sort_chronological(&mut column);
            (day, column)
        })
        .collect()
}

/// Stable ascending sort by event instant
pub fn sort_chronological(events: &mut [CalendarEvent]) {
    events.sort_by_key(|event| event.occurs_at);
}

/// Events on or after `today` (by calendar day), soonest first, at most `limit`
pub fn upcoming_window(events: &[CalendarEvent], today: NaiveDate, limit: usize) -> Vec<CalendarEvent> {
    let mut upcoming: Vec<CalendarEvent> = events
        .iter()
        .filter(|event| event.date() >= today)
        .cloned()
        .collect();

    sort_chronological(&mut upcoming);
    upcoming.truncate(limit);
    upcoming
}

/// Past, current or upcoming relative to `today`
pub fn phase(event: &CalendarEvent, today: NaiveDate) -> EventPhase {
    let date = event.date();
    if date < today {
        EventPhase::Past
    } else if date == today {
        EventPhase::Current
    } else {
        EventPhase::Upcoming
    }
}

/// Shorten a description for list views
pub fn truncate_description(text: &str) -> String {
    let mut chars = text.chars();
    let preview: String = chars.by_ref().take(DESCRIPTION_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::calendar::window::{compute_window, ViewMode};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const UTC: Tz = chrono_tz::UTC;

    fn event(title: &str, y: i32, m: u32, d: u32, h: u32) -> CalendarEvent {
        CalendarEvent {
            id: None,
            title: title.to_string(),
            occurs_at: UTC.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(),
            location: None,
            description: None,
            participants_count: None,
            url: None,
            status: None,
            event_type: None,
            price: None,
        }
    }

    fn titles(events: &[CalendarEvent]) -> Vec<&str> {
        events.iter().map(|e| e.title.as_str()).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_classify_month_is_inclusive() {
        let raws = vec![
            json!({ "event_name": "first", "event_time": "2024-01-01T00:00:00Z" }),
            json!({ "event_name": "last", "event_time": "2024-01-31T23:30:00Z" }),
            json!({ "event_name": "before", "event_time": "2023-12-31T23:59:59Z" }),
            json!({ "event_name": "after", "event_time": "2024-02-01T00:00:00Z" }),
        ];
        let window = compute_window(date(2024, 1, 15), ViewMode::Month);

        let events = classify(&raws, &window, &UTC);
        assert_eq!(titles(&events), vec!["first", "last"]);
    }

    #[test]
    fn test_classify_day_ignores_time_of_day() {
        let raws = vec![
            json!({ "event_name": "morning", "event_time": "2024-01-10T06:00:00Z" }),
            json!({ "event_name": "night", "event_time": "2024-01-10T23:00:00Z" }),
            json!({ "event_name": "next", "event_time": "2024-01-11T00:30:00Z" }),
        ];
        let window = compute_window(date(2024, 1, 10), ViewMode::Day);

        let events = classify(&raws, &window, &UTC);
        assert_eq!(titles(&events), vec!["morning", "night"]);
    }

    #[test]
    fn test_classify_uses_view_timezone() {
        // 20:00 UTC on Jan 31 is Feb 1 in Kolkata
        let raws = vec![json!({ "event_name": "late", "event_time": "2024-01-31T20:00:00Z" })];
        let kolkata = chrono_tz::Asia::Kolkata;

        let january = compute_window(date(2024, 1, 1), ViewMode::Month);
        let february = compute_window(date(2024, 2, 1), ViewMode::Month);

        assert!(classify(&raws, &january, &kolkata).is_empty());
        assert_eq!(classify(&raws, &february, &kolkata).len(), 1);
    }

    #[test]
    fn test_classify_all_reports_undated() {
        let raws = vec![
            json!({ "event_name": "ok", "event_time": "2024-01-05T10:00:00Z" }),
            json!({ "event_name": "broken", "event_date": "not-a-date" }),
        ];
        let window = compute_window(date(2024, 1, 5), ViewMode::Week);

        let result = classify_all(&raws, &window, &UTC);
        assert_eq!(titles(&result.events), vec!["ok"]);
        assert_eq!(result.undated.len(), 1);
        assert_eq!(result.undated[0].title, "broken");
    }

    #[test]
    fn test_bucket_by_day_caps_cells() {
        let events: Vec<CalendarEvent> = (0..5)
            .map(|i| event(&format!("e{}", i), 2024, 1, 3, 10 - i))
            .chain(std::iter::once(event("other", 2024, 1, 4, 9)))
            .chain(std::iter::once(event("february", 2024, 2, 3, 9)))
            .collect();

        let buckets = bucket_by_day(&events, 2024, 1);
        assert_eq!(buckets.total(), 6);

        let cell = buckets.cell(3);
        assert_eq!(titles(cell.visible), vec!["e4", "e3", "e2"]);
        assert_eq!(cell.overflow_count, 2);
        assert_eq!(buckets.events_on(3).len(), 5);

        let cell = buckets.cell(4);
        assert_eq!(cell.visible.len(), 1);
        assert_eq!(cell.overflow_count, 0);

        assert!(buckets.cell(20).visible.is_empty());
    }

    #[test]
    fn test_bucket_ties_keep_input_order() {
        let events = vec![event("b", 2024, 1, 3, 9), event("a", 2024, 1, 3, 9)];
        let buckets = bucket_by_day(&events, 2024, 1);
        assert_eq!(titles(buckets.events_on(3)), vec!["b", "a"]);
    }

    #[test]
    fn test_bucket_by_week() {
        let window = compute_window(date(2024, 1, 10), ViewMode::Week);
        let events = vec![
            event("wed-late", 2024, 1, 10, 18),
            event("wed-early", 2024, 1, 10, 8),
            event("sun", 2024, 1, 14, 12),
            event("next-mon", 2024, 1, 15, 12),
        ];

        let columns = bucket_by_week(&events, &window);
        assert_eq!(columns.len(), 7);
        assert_eq!(columns[0].0, date(2024, 1, 8));
        assert_eq!(titles(&columns[2].1), vec!["wed-early", "wed-late"]);
        assert_eq!(titles(&columns[6].1), vec!["sun"]);
        assert_eq!(columns.iter().map(|(_, c)| c.len()).sum::<usize>(), 3);
    }

    #[test]
    fn test_upcoming_window_zeroes_time() {
        let today = date(2024, 1, 10);
        let events = vec![
            event("later", 2024, 1, 20, 9),
            event("this-morning", 2024, 1, 10, 0),
            event("yesterday", 2024, 1, 9, 23),
            event("tomorrow", 2024, 1, 11, 9),
        ];

        let upcoming = upcoming_window(&events, today, 5);
        assert_eq!(titles(&upcoming), vec!["this-morning", "tomorrow", "later"]);

        let upcoming = upcoming_window(&events, today, 2);
        assert_eq!(titles(&upcoming), vec!["this-morning", "tomorrow"]);
    }

    #[test]
    fn test_phase() {
        let today = date(2024, 1, 10);
        assert_eq!(phase(&event("a", 2024, 1, 9, 23), today), EventPhase::Past);
        assert_eq!(phase(&event("b", 2024, 1, 10, 0), today), EventPhase::Current);
        assert_eq!(phase(&event("c", 2024, 1, 11, 0), today), EventPhase::Upcoming);
    }

    #[test]
    fn test_truncate_description() {
        assert_eq!(truncate_description("short"), "short");

        let exact = "x".repeat(100);
        assert_eq!(truncate_description(&exact), exact);

        let long = "é".repeat(120);
        let truncated = truncate_description(&long);
        assert_eq!(truncated.chars().count(), 103);
        assert!(truncated.ends_with("..."));
    }
}
