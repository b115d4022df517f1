//! Schema-tolerant decoding of backend event payloads.
//!
//! Different endpoints populate different subsets of the name and date
//! fields, so each attribute is resolved from an ordered list of candidate
//! keys. The orders below are part of the contract with the backend.

use super::classify::Classification;
use super::models::{CalendarEvent, DecodedEvent, EventId, EventStatus, UndatedEvent, UNTITLED_EVENT};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Candidate keys for the display title, highest precedence first
pub const TITLE_FIELDS: [&str; 3] = ["event_name", "name", "title"];

/// Candidate keys for the display date, highest precedence first
pub const DATE_FIELDS: [&str; 5] = ["event_time", "event_date", "date", "start_date", "created_at"];

/// Candidate keys for the location
pub const LOCATION_FIELDS: [&str; 2] = ["location", "venue"];

const TYPE_FIELDS: [&str; 2] = ["event_type", "type"];

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Decode one backend record into a display event
pub fn decode_event(raw: &Value, tz: &Tz) -> DecodedEvent {
    let Some(obj) = raw.as_object() else {
        return DecodedEvent::Undated(UndatedEvent {
            id: None,
            title: UNTITLED_EVENT.to_string(),
        });
    };

    let id = obj
        .get("id")
        .filter(|id| !id.is_null())
        .cloned()
        .map(EventId);
    let title = first_text(obj, &TITLE_FIELDS).unwrap_or_else(|| UNTITLED_EVENT.to_string());

    let Some(occurs_at) = first_instant(obj, tz) else {
        return DecodedEvent::Undated(UndatedEvent { id, title });
    };

    DecodedEvent::Dated(CalendarEvent {
        id,
        title,
        occurs_at,
        location: first_text(obj, &LOCATION_FIELDS),
        description: first_text(obj, &["description"]),
        participants_count: obj.get("participants").and_then(participants_count),
        url: first_text(obj, &["url"]),
        status: obj
            .get("status")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(EventStatus::parse),
        event_type: first_text(obj, &TYPE_FIELDS),
        price: obj.get("price").and_then(parse_number),
    })
}

/// Decode a list of records, separating the ones without a usable date
pub fn decode_events(raws: &[Value], tz: &Tz) -> Classification {
    let mut decoded = Classification::default();

    for raw in raws {
        match decode_event(raw, tz) {
            DecodedEvent::Dated(event) => decoded.events.push(event),
            DecodedEvent::Undated(event) => decoded.undated.push(event),
        }
    }

    if !decoded.undated.is_empty() {
        warn!(
            "{} of {} events have no parseable date",
            decoded.undated.len(),
            raws.len()
        );
    }

    decoded
}

/// Parse a single date value into an instant in the view timezone
pub fn parse_instant(value: &Value, tz: &Tz) -> Option<DateTime<Tz>> {
    match value {
        Value::String(s) => parse_instant_str(s, tz),
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))?;
            DateTime::from_timestamp_millis(millis).map(|dt| dt.with_timezone(tz))
        }
        _ => None,
    }
}

fn parse_instant_str(s: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(tz));
    }

    // Offsets without a colon, e.g. +0530
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(tz));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return localize(tz, naive);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return localize(tz, date.and_hms_opt(0, 0, 0)?);
    }

    debug!("Unparseable event date: {}", s);
    None
}

/// Map a wall-clock time into the timezone, stepping over a DST gap
fn localize(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
}

fn first_instant(obj: &Map<String, Value>, tz: &Tz) -> Option<DateTime<Tz>> {
    DATE_FIELDS
        .iter()
        .filter_map(|field| obj.get(*field))
        .find_map(|value| parse_instant(value, tz))
}

/// First non-empty string (or number) among the candidate keys
fn first_text(obj: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| match obj.get(*field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn participants_count(value: &Value) -> Option<u64> {
    match value {
        Value::Array(items) => Some(items.len() as u64),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        _ => None,
    }
}

/// Number from a JSON number or a numeric string
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
