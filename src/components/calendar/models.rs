use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde_json::Value;
use std::fmt;

/// Title shown when a record carries no usable name
pub const UNTITLED_EVENT: &str = "Untitled Event";

/// Identifier exactly as the backend sent it
#[derive(Debug, Clone, PartialEq)]
pub struct EventId(pub Value);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

/// Lifecycle status reported by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Postponed,
    Completed,
    Canceled,
    Other(String),
}

impl EventStatus {
    /// Parse a backend status, accepting the British spelling of canceled
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "upcoming" => EventStatus::Upcoming,
            "ongoing" => EventStatus::Ongoing,
            "postponed" => EventStatus::Postponed,
            "completed" => EventStatus::Completed,
            "canceled" | "cancelled" => EventStatus::Canceled,
            _ => EventStatus::Other(value.to_string()),
        }
    }

    /// Value the backend expects on submit
    pub fn as_str(&self) -> &str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Postponed => "postponed",
            EventStatus::Completed => "completed",
            EventStatus::Canceled => "canceled",
            EventStatus::Other(value) => value,
        }
    }
}

/// Event as rendered by the calendar and dashboard views
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: Option<EventId>,
    pub title: String,
    pub occurs_at: DateTime<Tz>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub participants_count: Option<u64>,
    pub url: Option<String>,
    pub status: Option<EventStatus>,
    pub event_type: Option<String>,
    pub price: Option<f64>,
}

impl CalendarEvent {
    /// Calendar day of the event in the view timezone
    pub fn date(&self) -> NaiveDate {
        self.occurs_at.date_naive()
    }
}

/// Record whose date fields could not be parsed
#[derive(Debug, Clone, PartialEq)]
pub struct UndatedEvent {
    pub id: Option<EventId>,
    pub title: String,
}

/// Result of decoding one backend record
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedEvent {
    Dated(CalendarEvent),
    Undated(UndatedEvent),
}

impl DecodedEvent {
    pub fn dated(self) -> Option<CalendarEvent> {
        match self {
            DecodedEvent::Dated(event) => Some(event),
            DecodedEvent::Undated(_) => None,
        }
    }
}

/// Position of an event relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    Past,
    Current,
    Upcoming,
}
