use crate::components::calendar::decode::{parse_instant, parse_number};
use crate::components::session::UserRole;
use crate::error::{validation_error, AppResult, Error};
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

pub const UNKNOWN_USER: &str = "Unknown User";
pub const UNKNOWN_EVENT: &str = "Unknown Event";
pub const DEFAULT_PAYMENT_METHOD: &str = "Online";

/// Account as shown in the user management table
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub joined_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(PaymentStatus::Pending),
            "completed" => Some(PaymentStatus::Completed),
            "failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = Error;

    fn from_str(s: &str) -> AppResult<Self> {
        PaymentStatus::parse(s)
            .ok_or_else(|| validation_error(&format!("Unknown payment status: {}", s)))
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    pub id: String,
    pub user_name: String,
    pub event_name: String,
    pub amount: f64,
    pub status: PaymentStatus,
    pub method: String,
    pub transaction_id: Option<String>,
    pub paid_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(RequestStatus::Pending),
            "approved" => Some(RequestStatus::Approved),
            "rejected" => Some(RequestStatus::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application to become an event coordinator
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatorRequestRecord {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: RequestStatus,
    pub requested_on: Option<NaiveDate>,
    pub message: Option<String>,
}

/// Decode a user record. `None` when the payload is not an object with an id.
pub fn normalize_user(raw: &Value) -> Option<UserRecord> {
    let obj = raw.as_object()?;
    let id = record_id(obj)?;

    let username = text(obj, "username").unwrap_or_default();
    let full_name = join_name(obj).unwrap_or_else(|| username.clone());
    let role = text(obj, "user_role")
        .or_else(|| text(obj, "user_type"))
        .and_then(|r| UserRole::parse(&r))
        .unwrap_or(UserRole::User);

    Some(UserRecord {
        id,
        username,
        full_name,
        email: text(obj, "email").unwrap_or_default(),
        phone: text(obj, "phone"),
        role,
        is_active: obj.get("is_active").and_then(Value::as_bool).unwrap_or(true),
        joined_on: date(obj, &["created_at", "date_joined"]),
    })
}

/// Decode a payment record, filling the display fallbacks
pub fn normalize_payment(raw: &Value) -> Option<PaymentRecord> {
    let obj = raw.as_object()?;
    let id = record_id(obj)?;

    let user_name = obj
        .get("coordinator")
        .and_then(Value::as_object)
        .and_then(join_name)
        .unwrap_or_else(|| UNKNOWN_USER.to_string());
    let event_name = obj
        .get("event")
        .and_then(Value::as_object)
        .and_then(|event| text(event, "event_name"))
        .unwrap_or_else(|| UNKNOWN_EVENT.to_string());

    Some(PaymentRecord {
        id,
        user_name,
        event_name,
        amount: obj.get("amount").and_then(parse_number).unwrap_or(0.0),
        status: text(obj, "payment_status")
            .and_then(|s| PaymentStatus::parse(&s))
            .unwrap_or(PaymentStatus::Pending),
        method: text(obj, "payment_method").unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
        transaction_id: text(obj, "transaction_id"),
        paid_on: date(obj, &["created_at"]),
    })
}

/// Decode a coordinator request. The applicant is either flattened onto the
/// request or nested under `user`.
pub fn normalize_coordinator_request(raw: &Value) -> Option<CoordinatorRequestRecord> {
    let obj = raw.as_object()?;
    let id = record_id(obj)?;
    let user = obj.get("user").and_then(Value::as_object);

    let name = join_name(obj)
        .or_else(|| text(obj, "user_name"))
        .or_else(|| user.and_then(join_name))
        .or_else(|| user.and_then(|u| text(u, "username")))
        .or_else(|| text(obj, "username"))
        .unwrap_or_else(|| UNKNOWN_USER.to_string());
    let email = text(obj, "email")
        .or_else(|| text(obj, "user_email"))
        .or_else(|| user.and_then(|u| text(u, "email")));
    let phone = text(obj, "phone").or_else(|| user.and_then(|u| text(u, "phone")));

    Some(CoordinatorRequestRecord {
        id,
        name,
        email,
        phone,
        status: text(obj, "status")
            .and_then(|s| RequestStatus::parse(&s))
            .unwrap_or(RequestStatus::Pending),
        requested_on: date(obj, &["requested_at", "created_at"]),
        message: text(obj, "message"),
    })
}

/// Decode a list, dropping records that cannot be read
pub fn normalize_all<T>(raws: &[Value], decode: fn(&Value) -> Option<T>) -> Vec<T> {
    raws.iter().filter_map(decode).collect()
}

fn record_id(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text(obj: &Map<String, Value>, field: &str) -> Option<String> {
    obj.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn join_name(obj: &Map<String, Value>) -> Option<String> {
    let first = text(obj, "first_name").unwrap_or_default();
    let last = text(obj, "last_name").unwrap_or_default();
    let full = format!("{} {}", first, last).trim().to_string();
    (!full.is_empty()).then_some(full)
}

// Record dates are shown as calendar days, read in UTC
fn date(obj: &Map<String, Value>, fields: &[&str]) -> Option<NaiveDate> {
    fields
        .iter()
        .filter_map(|field| obj.get(*field))
        .find_map(|value| parse_instant(value, &Tz::UTC))
        .map(|instant| instant.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_user() {
        let user = normalize_user(&json!({
            "id": 4,
            "username": "kiran",
            "first_name": "Kiran",
            "last_name": "Rao",
            "email": "kiran@example.com",
            "user_role": "normal",
            "created_at": "2024-03-10T08:00:00Z"
        }))
        .unwrap();

        assert_eq!(user.id, "4");
        assert_eq!(user.full_name, "Kiran Rao");
        assert_eq!(user.role, UserRole::User);
        assert!(user.is_active);
        assert_eq!(user.joined_on, NaiveDate::from_ymd_opt(2024, 3, 10));
    }

    #[test]
    fn test_normalize_user_fallbacks() {
        let user = normalize_user(&json!({
            "id": "u-1",
            "username": "anita",
            "user_type": "coordinator",
            "is_active": false,
            "date_joined": "2023-12-01"
        }))
        .unwrap();

        assert_eq!(user.full_name, "anita");
        assert_eq!(user.role, UserRole::Coordinator);
        assert!(!user.is_active);
        assert_eq!(user.joined_on, NaiveDate::from_ymd_opt(2023, 12, 1));

        assert!(normalize_user(&json!({ "username": "no-id" })).is_none());
        assert!(normalize_user(&json!("text")).is_none());
    }

    #[test]
    fn test_normalize_payment() {
        let payment = normalize_payment(&json!({
            "id": 9,
            "coordinator": { "first_name": "Dev", "last_name": "Shah" },
            "event": { "event_name": "Tech Summit" },
            "amount": "2500.00",
            "payment_status": "completed",
            "payment_method": "UPI"
        }))
        .unwrap();

        assert_eq!(payment.user_name, "Dev Shah");
        assert_eq!(payment.event_name, "Tech Summit");
        assert_eq!(payment.amount, 2500.0);
        assert_eq!(payment.status, PaymentStatus::Completed);
        assert_eq!(payment.method, "UPI");
    }

    #[test]
    fn test_normalize_payment_defaults() {
        let payment = normalize_payment(&json!({ "id": 1, "coordinator": 3, "event": 7 })).unwrap();

        assert_eq!(payment.user_name, UNKNOWN_USER);
        assert_eq!(payment.event_name, UNKNOWN_EVENT);
        assert_eq!(payment.amount, 0.0);
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.method, DEFAULT_PAYMENT_METHOD);
    }

    #[test]
    fn test_payment_status_from_str() {
        assert_eq!("Completed".parse::<PaymentStatus>().unwrap(), PaymentStatus::Completed);
        assert!(matches!(
            "refunded".parse::<PaymentStatus>(),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_normalize_coordinator_request() {
        let flat = normalize_coordinator_request(&json!({
            "id": 2,
            "first_name": "Leela",
            "last_name": "Menon",
            "email": "leela@example.com",
            "created_at": "2024-05-02T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(flat.name, "Leela Menon");
        assert_eq!(flat.status, RequestStatus::Pending);
        assert_eq!(flat.requested_on, NaiveDate::from_ymd_opt(2024, 5, 2));

        let nested = normalize_coordinator_request(&json!({
            "id": 3,
            "status": "approved",
            "user": { "username": "sam", "email": "sam@example.com" },
            "requested_at": "2024-05-03T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(nested.name, "sam");
        assert_eq!(nested.email.as_deref(), Some("sam@example.com"));
        assert_eq!(nested.status, RequestStatus::Approved);
    }

    #[test]
    fn test_normalize_all_drops_unreadable() {
        let raws = vec![json!({ "id": 1 }), json!(null), json!({ "name": "x" })];
        assert_eq!(normalize_all(&raws, normalize_user).len(), 1);
    }
}
