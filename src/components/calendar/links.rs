use super::models::CalendarEvent;
use crate::error::AppResult;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use chrono_tz::Tz;
use url::Url;
use uuid::Uuid;

/// Events without an end time are assumed to last this long
pub const DEFAULT_EVENT_HOURS: i64 = 2;

const GOOGLE_CALENDAR_URL: &str = "https://calendar.google.com/calendar/render";
const OUTLOOK_CALENDAR_URL: &str = "https://outlook.office.com/calendar/0/deeplink/compose";

fn event_end(event: &CalendarEvent) -> DateTime<Tz> {
    event.occurs_at + Duration::hours(DEFAULT_EVENT_HOURS)
}

/// "Add to Google Calendar" link using local wall-clock times
pub fn google_calendar_url(event: &CalendarEvent) -> AppResult<String> {
    let start = event.occurs_at.format("%Y%m%dT%H%M%S");
    let end = event_end(event).format("%Y%m%dT%H%M%S");

    let mut url = Url::parse(GOOGLE_CALENDAR_URL)?;
    url.query_pairs_mut()
        .append_pair("action", "TEMPLATE")
        .append_pair("text", &event.title)
        .append_pair("dates", &format!("{}/{}", start, end))
        .append_pair("details", event.description.as_deref().unwrap_or(""))
        .append_pair("location", event.location.as_deref().unwrap_or(""));

    Ok(url.to_string())
}

/// "Add to Outlook" link using UTC timestamps
pub fn outlook_calendar_url(event: &CalendarEvent) -> AppResult<String> {
    let start = event
        .occurs_at
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true);
    let end = event_end(event)
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut url = Url::parse(OUTLOOK_CALENDAR_URL)?;
    url.query_pairs_mut()
        .append_pair("subject", &event.title)
        .append_pair("startdt", &start)
        .append_pair("enddt", &end)
        .append_pair("body", event.description.as_deref().unwrap_or(""))
        .append_pair("location", event.location.as_deref().unwrap_or(""));

    Ok(url.to_string())
}

fn ics_timestamp(instant: DateTime<Tz>) -> String {
    instant.with_timezone(&Utc).format("%Y%m%dT%H%M%SZ").to_string()
}

/// iCalendar document for one event
pub fn icalendar(event: &CalendarEvent, source_url: &str) -> String {
    [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//EventSphere//Calendar//EN".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}@eventsphere", Uuid::new_v4()),
        format!("DTSTAMP:{}", Utc::now().format("%Y%m%dT%H%M%SZ")),
        format!("SUMMARY:{}", escape_text(&event.title)),
        format!("DTSTART:{}", ics_timestamp(event.occurs_at)),
        format!("DTEND:{}", ics_timestamp(event_end(event))),
        format!(
            "LOCATION:{}",
            escape_text(event.location.as_deref().unwrap_or(""))
        ),
        format!(
            "DESCRIPTION:{}",
            escape_text(event.description.as_deref().unwrap_or(""))
        ),
        format!("URL:{}", event.url.as_deref().unwrap_or(source_url)),
        "STATUS:CONFIRMED".to_string(),
        "SEQUENCE:0".to_string(),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ]
    .join("\r\n")
}

/// Escape a TEXT property value (RFC 5545 section 3.3.11)
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out
}

/// Download name for the iCalendar file
pub fn ics_file_name(event: &CalendarEvent) -> String {
    let stem = event.title.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}.ics", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> CalendarEvent {
        CalendarEvent {
            id: None,
            title: "Diwali Mela".to_string(),
            occurs_at: chrono_tz::Asia::Kolkata
                .with_ymd_and_hms(2024, 11, 1, 18, 30, 0)
                .unwrap(),
            location: Some("Town Square".to_string()),
            description: Some("Lights\nand food".to_string()),
            participants_count: None,
            url: None,
            status: None,
            event_type: None,
            price: None,
        }
    }

    #[test]
    fn test_google_calendar_url() {
        let url = Url::parse(&google_calendar_url(&sample()).unwrap()).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert!(pairs.contains(&("action".to_string(), "TEMPLATE".to_string())));
        assert!(pairs.contains(&("text".to_string(), "Diwali Mela".to_string())));
        assert!(pairs.contains(&(
            "dates".to_string(),
            "20241101T183000/20241101T203000".to_string()
        )));
        assert!(pairs.contains(&("location".to_string(), "Town Square".to_string())));
    }

    #[test]
    fn test_outlook_calendar_url_is_utc() {
        let url = Url::parse(&outlook_calendar_url(&sample()).unwrap()).unwrap();
        let start = url
            .query_pairs()
            .find(|(k, _)| k == "startdt")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert_eq!(start, "2024-11-01T13:00:00.000Z");
    }

    #[test]
    fn test_icalendar() {
        let ics = icalendar(&sample(), "https://eventsphere.example/events/1");
        let lines: Vec<&str> = ics.split("\r\n").collect();

        assert_eq!(lines.first(), Some(&"BEGIN:VCALENDAR"));
        assert_eq!(lines.last(), Some(&"END:VCALENDAR"));
        assert!(lines.contains(&"DTSTART:20241101T130000Z"));
        assert!(lines.contains(&"DTEND:20241101T150000Z"));
        assert!(lines.contains(&"DESCRIPTION:Lights\\nand food"));
        assert!(lines.contains(&"URL:https://eventsphere.example/events/1"));
        assert!(lines.iter().any(|l| l.starts_with("UID:")));
    }

    #[test]
    fn test_icalendar_escapes_text_fields() {
        let mut event = sample();
        event.title = "Food, Music; Fun".to_string();
        event.location = Some("Hall A,\r\nGate 2".to_string());
        event.description = Some("C:\\temp".to_string());

        let ics = icalendar(&event, "https://eventsphere.example/events/1");
        let lines: Vec<&str> = ics.split("\r\n").collect();

        assert!(lines.contains(&"SUMMARY:Food\\, Music\\; Fun"));
        assert!(lines.contains(&"LOCATION:Hall A\\,\\nGate 2"));
        assert!(lines.contains(&"DESCRIPTION:C:\\\\temp"));
    }

    #[test]
    fn test_ics_file_name() {
        assert_eq!(ics_file_name(&sample()), "Diwali_Mela.ics");
    }
}
