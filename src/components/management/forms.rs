use crate::components::session::UserRole;
use crate::error::{validation_error, AppResult};
use serde_json::{json, Map, Value};

/// Shortest password the account forms accept
pub const MIN_PASSWORD_LEN: usize = 8;

/// Admin edit of a user account. Only the fields that are set get sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

impl UserUpdate {
    pub fn validate(&self) -> AppResult<()> {
        let mut problems = Vec::new();

        if self.to_payload().as_object().is_some_and(Map::is_empty) {
            problems.push("nothing to update");
        }
        if self.email.as_deref().is_some_and(|email| !looks_like_email(email)) {
            problems.push("email is not valid");
        }

        finish(problems)
    }

    pub fn to_payload(&self) -> Value {
        let mut payload = Map::new();
        put_text(&mut payload, "first_name", &self.first_name);
        put_text(&mut payload, "last_name", &self.last_name);
        put_text(&mut payload, "email", &self.email);
        put_text(&mut payload, "phone", &self.phone);
        if let Some(role) = self.role {
            payload.insert("user_role".to_string(), json!(role.as_str()));
        }
        if let Some(active) = self.is_active {
            payload.insert("is_active".to_string(), json!(active));
        }
        Value::Object(payload)
    }
}

/// Self-service profile edit; username, email and role are read-only
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if self.to_payload().as_object().is_some_and(Map::is_empty) {
            return Err(validation_error("nothing to update"));
        }
        Ok(())
    }

    pub fn to_payload(&self) -> Value {
        let mut payload = Map::new();
        put_text(&mut payload, "first_name", &self.first_name);
        put_text(&mut payload, "last_name", &self.last_name);
        put_text(&mut payload, "phone", &self.phone);
        Value::Object(payload)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChange {
    pub fn validate(&self) -> AppResult<()> {
        let mut problems = Vec::new();

        if self.current_password.is_empty() {
            problems.push("current password is required".to_string());
        }
        if self.new_password != self.confirm_password {
            problems.push("new passwords do not match".to_string());
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            problems.push(format!(
                "password must be at least {} characters long",
                MIN_PASSWORD_LEN
            ));
        }

        finish(problems)
    }

    pub fn to_payload(&self) -> Value {
        json!({
            "current_password": self.current_password,
            "new_password": self.new_password,
            "re_new_password": self.confirm_password,
        })
    }
}

/// A user's application to become an event coordinator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinatorApplication {
    pub reason: String,
    pub experience: String,
}

impl CoordinatorApplication {
    pub fn validate(&self) -> AppResult<()> {
        let mut problems = Vec::new();
        if self.reason.trim().is_empty() {
            problems.push("reason is required");
        }
        if self.experience.trim().is_empty() {
            problems.push("experience is required");
        }
        finish(problems)
    }

    pub fn to_payload(&self) -> Value {
        json!({
            "reason": self.reason.trim(),
            "experience": self.experience.trim(),
        })
    }
}

fn put_text(payload: &mut Map<String, Value>, field: &str, value: &Option<String>) {
    if let Some(value) = value.as_deref().map(str::trim) {
        payload.insert(field.to_string(), json!(value));
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}

fn finish<S: AsRef<str>>(problems: Vec<S>) -> AppResult<()> {
    if problems.is_empty() {
        Ok(())
    } else {
        let joined: Vec<&str> = problems.iter().map(|p| p.as_ref()).collect();
        Err(validation_error(&joined.join("; ")))
    }
}
