use crate::error::{config_error, AppResult, Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical backend collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Events,
    Users,
    Payments,
    CoordinatorRequests,
    Participants,
    Profile,
    PasswordChange,
    DashboardStats,
}

impl Resource {
    pub const ALL: [Resource; 8] = [
        Resource::Events,
        Resource::Users,
        Resource::Payments,
        Resource::CoordinatorRequests,
        Resource::Participants,
        Resource::Profile,
        Resource::PasswordChange,
        Resource::DashboardStats,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Events => "events",
            Resource::Users => "users",
            Resource::Payments => "payments",
            Resource::CoordinatorRequests => "coordinator-requests",
            Resource::Participants => "participants",
            Resource::Profile => "profile",
            Resource::PasswordChange => "password-change",
            Resource::DashboardStats => "dashboard-stats",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = Error;

    fn from_str(s: &str) -> AppResult<Self> {
        let wanted = s.trim().replace('_', "-");
        Resource::ALL
            .into_iter()
            .find(|resource| resource.name() == wanted)
            .ok_or_else(|| config_error(&format!("Unknown resource: {}", s)))
    }
}

/// Exactly one path per resource, relative to the API base URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResourceLocator {
    pub events: String,
    pub users: String,
    pub payments: String,
    pub coordinator_requests: String,
    pub participants: String,
    pub profile: String,
    pub password_change: String,
    #[serde(default)]
    pub dashboard_stats: Option<String>,
}

impl Default for ResourceLocator {
    fn default() -> Self {
        Self {
            events: "events/events/".to_string(),
            users: "users/users/".to_string(),
            payments: "payments/".to_string(),
            coordinator_requests: "events/coordinator-requests/".to_string(),
            participants: "events/event-participants/".to_string(),
            profile: "users/profile/".to_string(),
            password_change: "users/change-password/".to_string(),
            dashboard_stats: None,
        }
    }
}

impl ResourceLocator {
    /// Configured path, `None` for optional resources that are not served
    pub fn path(&self, resource: Resource) -> Option<&str> {
        match resource {
            Resource::Events => Some(&self.events),
            Resource::Users => Some(&self.users),
            Resource::Payments => Some(&self.payments),
            Resource::CoordinatorRequests => Some(&self.coordinator_requests),
            Resource::Participants => Some(&self.participants),
            Resource::Profile => Some(&self.profile),
            Resource::PasswordChange => Some(&self.password_change),
            Resource::DashboardStats => self.dashboard_stats.as_deref(),
        }
    }

    /// Override a path; paths are stored without a leading and with a trailing slash
    pub fn set(&mut self, resource: Resource, path: String) {
        let path = normalize_path(&path);
        match resource {
            Resource::Events => self.events = path,
            Resource::Users => self.users = path,
            Resource::Payments => self.payments = path,
            Resource::CoordinatorRequests => self.coordinator_requests = path,
            Resource::Participants => self.participants = path,
            Resource::Profile => self.profile = path,
            Resource::PasswordChange => self.password_change = path,
            Resource::DashboardStats => self.dashboard_stats = Some(path),
        }
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_start_matches('/');
    if trimmed.is_empty() || trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}
