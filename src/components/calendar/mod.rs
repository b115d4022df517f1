//! Calendar view model: decoding loosely-typed event records, computing the
//! month/week/day windows, and bucketing events into calendar cells.
//!
//! Nothing in here returns an error for bad input. Records without a usable
//! date are tagged as undated and kept out of every date-bucketed result.

pub mod classify;
pub mod decode;
pub mod links;
pub mod models;
pub mod window;

pub use classify::{
    bucket_by_day, bucket_by_week, classify, classify_all, phase, sort_chronological,
    truncate_description, upcoming_window, Classification, DayBuckets, DayCell,
    MAX_EVENTS_PER_CELL,
};
pub use decode::{decode_event, decode_events, parse_instant};
pub use models::{CalendarEvent, DecodedEvent, EventId, EventPhase, EventStatus, UndatedEvent};
pub use window::{compute_window, month_grid, navigate, DateWindow, Direction, ViewMode};
