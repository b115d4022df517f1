use crate::components::calendar::decode::parse_instant;
use crate::error::{validation_error, AppResult};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Event form, read from a JSON draft file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub event_time: String,
    #[serde(default)]
    pub rsvp_required: bool,
    #[serde(default)]
    pub capacity: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

impl EventDraft {
    /// Check the form; the error lists every offending field
    pub fn validate(&self) -> AppResult<()> {
        let mut problems = Vec::new();

        if self.event_name.trim().is_empty() {
            problems.push("event_name is required");
        }
        if self.event_type.trim().is_empty() {
            problems.push("event_type is required");
        }
        if self.event_time.trim().is_empty() {
            problems.push("event_time is required");
        } else if parse_instant(&Value::String(self.event_time.clone()), &Tz::UTC).is_none() {
            problems.push("event_time is not a valid date");
        }
        if self.is_paid && !self.price.is_some_and(|price| price > 0.0) {
            problems.push("price must be greater than 0 for paid events");
        }
        if self.capacity.is_some_and(|capacity| capacity < 0) {
            problems.push("capacity cannot be negative");
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(validation_error(&problems.join("; ")))
        }
    }

    /// JSON body for create and update calls
    pub fn to_payload(&self) -> Value {
        let mut payload = json!({
            "event_name": self.event_name.trim(),
            "event_type": self.event_type.trim(),
            "description": self.description,
            "audience": self.audience,
            "is_paid": self.is_paid,
            "price": if self.is_paid { self.price } else { None },
            "event_time": self.event_time.trim(),
            "rsvp_required": self.rsvp_required,
        });

        if let Some(obj) = payload.as_object_mut() {
            if let Some(location) = &self.location {
                obj.insert("location".to_string(), json!(location));
            }
            if let Some(capacity) = self.capacity {
                obj.insert("capacity".to_string(), json!(capacity));
            }
            if let Some(status) = &self.status {
                obj.insert("status".to_string(), json!(normalize_status(status)));
            }
        }

        payload
    }
}

/// Backend spelling of an event status
pub fn normalize_status(status: &str) -> String {
    match status.trim().to_ascii_lowercase().as_str() {
        "cancelled" => "canceled".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn draft() -> EventDraft {
        EventDraft {
            event_name: "Diwali Mela".to_string(),
            event_type: "Festival".to_string(),
            event_time: "2024-11-01T18:00:00Z".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_free_event() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_are_listed() {
        let err = EventDraft::default().validate().unwrap_err();
        match err {
            Error::Validation(message) => {
                assert!(message.contains("event_name is required"));
                assert!(message.contains("event_type is required"));
                assert!(message.contains("event_time is required"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_paid_event_needs_price() {
        let mut paid = draft();
        paid.is_paid = true;
        assert!(paid.validate().is_err());

        paid.price = Some(0.0);
        assert!(paid.validate().is_err());

        paid.price = Some(499.0);
        assert!(paid.validate().is_ok());
    }

    #[test]
    fn test_bad_time_and_capacity() {
        let mut bad = draft();
        bad.event_time = "next friday".to_string();
        bad.capacity = Some(-1);

        let Err(Error::Validation(message)) = bad.validate() else {
            panic!("expected validation error");
        };
        assert!(message.contains("event_time is not a valid date"));
        assert!(message.contains("capacity cannot be negative"));
    }

    #[test]
    fn test_payload() {
        let mut paid = draft();
        paid.is_paid = true;
        paid.price = Some(250.0);
        paid.status = Some("Cancelled".to_string());

        let payload = paid.to_payload();
        assert_eq!(payload["event_name"], "Diwali Mela");
        assert_eq!(payload["price"], 250.0);
        assert_eq!(payload["status"], "canceled");
        assert!(payload.get("capacity").is_none());

        let free = draft().to_payload();
        assert!(free["price"].is_null());
    }
}
