use crate::components::api::{ApiClient, Resource};
use crate::components::calendar::decode::parse_number;
use crate::error::{AppResult, Error};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// Headline numbers of the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default, alias = "totalUsers")]
    pub total_users: u64,
    #[serde(default, alias = "totalEvents")]
    pub total_events: u64,
    #[serde(default, alias = "totalRevenue")]
    pub total_revenue: f64,
    #[serde(default, alias = "activeEvents")]
    pub active_events: u64,
    #[serde(default, alias = "pendingRequests")]
    pub pending_requests: u64,
}

impl DashboardStats {
    /// Derive the stats from the raw collections
    pub fn from_records(
        users: &[Value],
        events: &[Value],
        payments: &[Value],
        requests: &[Value],
    ) -> Self {
        Self {
            total_users: users.len() as u64,
            total_events: events.len() as u64,
            total_revenue: completed_revenue(payments),
            active_events: count_with_status(events, "status", "upcoming"),
            pending_requests: count_with_status(requests, "status", "pending"),
        }
    }

    /// Read a stats endpoint payload, accepting snake or camel case keys
    pub fn from_payload(payload: Value) -> AppResult<Self> {
        let stats = match payload {
            Value::Object(mut map) if map.get("stats").is_some_and(Value::is_object) => {
                map.remove("stats").unwrap_or_default()
            }
            other => other,
        };
        Ok(serde_json::from_value(stats)?)
    }

    /// Average revenue per event, with the chart placeholders as fallbacks
    pub fn average_ticket(&self) -> f64 {
        let revenue = if self.total_revenue > 0.0 {
            self.total_revenue
        } else {
            super::charts::REVENUE_PLACEHOLDER
        };
        let events = if self.total_events > 0 {
            self.total_events
        } else {
            super::charts::EVENTS_PLACEHOLDER
        };
        (revenue / events as f64).floor()
    }
}

fn completed_revenue(payments: &[Value]) -> f64 {
    payments
        .iter()
        .filter(|p| p.get("payment_status").and_then(Value::as_str) == Some("completed"))
        .filter_map(|p| p.get("amount").and_then(parse_number))
        .sum()
}

fn count_with_status(records: &[Value], field: &str, status: &str) -> u64 {
    records
        .iter()
        .filter(|r| r.get(field).and_then(Value::as_str) == Some(status))
        .count() as u64
}

/// Headline stats together with the raw events they were drawn from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub events: Vec<Value>,
}

/// Load the dashboard stats, from the stats resource when one is configured
/// and otherwise from the individual collections
pub async fn fetch_stats(client: &ApiClient) -> AppResult<DashboardStats> {
    if client.endpoints().path(Resource::DashboardStats).is_some() {
        let payload = client.fetch(Resource::DashboardStats).await?;
        return DashboardStats::from_payload(payload);
    }
    Ok(fetch_dashboard(client).await?.stats)
}

/// Stats plus the event list, fetching each collection at most once
pub async fn fetch_dashboard(client: &ApiClient) -> AppResult<DashboardData> {
    if client.endpoints().path(Resource::DashboardStats).is_some() {
        let payload = client.fetch(Resource::DashboardStats).await?;
        let stats = DashboardStats::from_payload(payload)?;
        let events = client.list(Resource::Events, &[]).await?;
        return Ok(DashboardData { stats, events });
    }

    info!("No stats endpoint configured, building stats from collections");
    let users = list_or_empty(client, Resource::Users).await?;
    let events = list_or_empty(client, Resource::Events).await?;
    let payments = list_or_empty(client, Resource::Payments).await?;
    let requests = list_or_empty(client, Resource::CoordinatorRequests).await?;

    let stats = DashboardStats::from_records(&users, &events, &payments, &requests);
    Ok(DashboardData { stats, events })
}

// A missing collection only zeroes its figure; an auth failure still aborts
async fn list_or_empty(client: &ApiClient, resource: Resource) -> AppResult<Vec<Value>> {
    match client.list(resource, &[]).await {
        Ok(records) => Ok(records),
        Err(Error::Auth(message)) => Err(Error::Auth(message)),
        Err(e) => {
            warn!("Could not fetch {}: {}", resource, e);
            Ok(Vec::new())
        }
    }
}
