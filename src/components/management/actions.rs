use super::draft::EventDraft;
use super::forms::{CoordinatorApplication, PasswordChange, ProfileUpdate, UserUpdate};
use super::models::{
    normalize_all, normalize_coordinator_request, normalize_payment, normalize_user,
    CoordinatorRequestRecord, PaymentRecord, PaymentStatus, UserRecord,
};
use crate::components::api::{ApiClient, Resource};
use crate::error::AppResult;
use serde_json::{json, Value};
use tracing::info;

/// Detail action that approves or rejects a coordinator request
pub const PROCESS_REQUEST_ACTION: &str = "process_request";

/// Admin decision on a coordinator request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Status value the backend expects
    pub fn status(&self) -> &'static str {
        match self {
            Decision::Approve => "approved",
            Decision::Reject => "rejected",
        }
    }
}

pub async fn process_request(client: &ApiClient, id: &str, decision: Decision) -> AppResult<Value> {
    let body = json!({ "status": decision.status() });
    let response = client
        .action(Resource::CoordinatorRequests, id, PROCESS_REQUEST_ACTION, &body)
        .await?;
    info!("Coordinator request {} {}", id, decision.status());
    Ok(response)
}

pub async fn list_users(client: &ApiClient) -> AppResult<Vec<UserRecord>> {
    let raws = client.list(Resource::Users, &[]).await?;
    Ok(normalize_all(&raws, normalize_user))
}

pub async fn list_payments(client: &ApiClient) -> AppResult<Vec<PaymentRecord>> {
    let raws = client.list(Resource::Payments, &[]).await?;
    Ok(normalize_all(&raws, normalize_payment))
}

pub async fn list_requests(client: &ApiClient) -> AppResult<Vec<CoordinatorRequestRecord>> {
    let raws = client.list(Resource::CoordinatorRequests, &[]).await?;
    Ok(normalize_all(&raws, normalize_coordinator_request))
}

/// Validate then submit a new event
pub async fn create_event(client: &ApiClient, draft: &EventDraft) -> AppResult<Value> {
    draft.validate()?;
    let created = client.create(Resource::Events, &draft.to_payload()).await?;
    info!("Created event {}", draft.event_name);
    Ok(created)
}

/// Validate then replace an existing event
pub async fn update_event(client: &ApiClient, id: &str, draft: &EventDraft) -> AppResult<Value> {
    draft.validate()?;
    let updated = client.update(Resource::Events, id, &draft.to_payload()).await?;
    info!("Updated event {}", id);
    Ok(updated)
}

pub async fn delete_event(client: &ApiClient, id: &str) -> AppResult<()> {
    client.delete(Resource::Events, id).await?;
    info!("Deleted event {}", id);
    Ok(())
}

/// Validate then PATCH the set fields of a user
pub async fn update_user(client: &ApiClient, id: &str, update: &UserUpdate) -> AppResult<Value> {
    update.validate()?;
    let updated = client.patch(Resource::Users, id, &update.to_payload()).await?;
    info!("Updated user {}", id);
    Ok(updated)
}

pub async fn set_user_active(client: &ApiClient, id: &str, active: bool) -> AppResult<Value> {
    let updated = client
        .patch(Resource::Users, id, &json!({ "is_active": active }))
        .await?;
    info!("User {} active={}", id, active);
    Ok(updated)
}

pub async fn delete_user(client: &ApiClient, id: &str) -> AppResult<()> {
    client.delete(Resource::Users, id).await?;
    info!("Deleted user {}", id);
    Ok(())
}

pub async fn update_payment_status(
    client: &ApiClient,
    id: &str,
    status: PaymentStatus,
) -> AppResult<Value> {
    let body = json!({ "payment_status": status.as_str() });
    let updated = client.patch(Resource::Payments, id, &body).await?;
    info!("Payment {} marked {}", id, status);
    Ok(updated)
}

/// Edit the logged-in user's own profile
pub async fn update_profile(client: &ApiClient, update: &ProfileUpdate) -> AppResult<Value> {
    update.validate()?;
    let updated = client
        .patch_resource(Resource::Profile, &update.to_payload())
        .await?;
    info!("Profile updated");
    Ok(updated)
}

pub async fn change_password(client: &ApiClient, change: &PasswordChange) -> AppResult<()> {
    change.validate()?;
    client
        .create(Resource::PasswordChange, &change.to_payload())
        .await?;
    info!("Password changed");
    Ok(())
}

pub async fn submit_coordinator_request(
    client: &ApiClient,
    application: &CoordinatorApplication,
) -> AppResult<Value> {
    application.validate()?;
    let created = client
        .create(Resource::CoordinatorRequests, &application.to_payload())
        .await?;
    info!("Coordinator request submitted");
    Ok(created)
}

/// Sign the logged-in user up as a participant of an event
pub async fn register_for_event(client: &ApiClient, event_id: &str) -> AppResult<Value> {
    let event = event_id
        .trim()
        .parse::<i64>()
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(event_id.trim()));
    let created = client
        .create(Resource::Participants, &json!({ "event": event }))
        .await?;
    info!("Registered for event {}", event_id);
    Ok(created)
}
