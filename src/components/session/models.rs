use crate::error::{session_error, AppResult};
use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role that decides which dashboard a user lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Coordinator,
    #[serde(alias = "normal")]
    User,
}

impl UserRole {
    /// Parse a backend role name; `normal` is the legacy name for `user`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(UserRole::Admin),
            "coordinator" | "event coordinator" => Some(UserRole::Coordinator),
            "user" | "normal" => Some(UserRole::User),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Coordinator => "coordinator",
            UserRole::User => "user",
        }
    }

    /// Dashboard route for this role
    pub fn dashboard_route(&self) -> &'static str {
        match self {
            UserRole::Admin => "/admin-dashboard",
            UserRole::Coordinator => "/coordinator-dashboard",
            UserRole::User => "/user-dashboard",
        }
    }
}

/// Where a session with the given role should land; unknown roles go home
pub fn landing_route(role: Option<UserRole>) -> &'static str {
    role.map(|r| r.dashboard_route()).unwrap_or("/")
}

/// Claims read from an access token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub user_role: Option<String>,
}

impl Claims {
    /// `role` claim, falling back to `user_role`
    pub fn role(&self) -> Option<UserRole> {
        self.role
            .as_deref()
            .or(self.user_role.as_deref())
            .and_then(UserRole::parse)
    }
}

/// Decode the payload of a JWT. The signature is not checked: claims are only
/// used to route the user, the backend remains the authority.
pub fn decode_claims(token: &str) -> AppResult<Claims> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    jsonwebtoken::decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| session_error(&format!("Malformed access token: {}", e)))
}

/// The persisted "user" object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Option<Value>,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<UserRole>,
}

impl SessionUser {
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            id: claims.user_id.clone(),
            username: claims.username.clone().unwrap_or_else(|| "User".to_string()),
            email: claims.email.clone().unwrap_or_default(),
            first_name: claims.first_name.clone().unwrap_or_default(),
            last_name: claims.last_name.clone().unwrap_or_default(),
            role: claims.role(),
        }
    }

    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Tokens and user of the logged-in account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

impl Session {
    pub fn new(access: String, refresh: Option<String>) -> Self {
        let user = decode_claims(&access)
            .ok()
            .map(|claims| SessionUser::from_claims(&claims));
        Self {
            access,
            refresh,
            user,
        }
    }

    pub fn claims(&self) -> AppResult<Claims> {
        decode_claims(&self.access)
    }

    /// Role from the token, else from the stored user
    pub fn role(&self) -> Option<UserRole> {
        self.claims()
            .ok()
            .and_then(|claims| claims.role())
            .or_else(|| self.user.as_ref().and_then(|user| user.role))
    }

    /// Whether the access token has expired; unreadable tokens count as expired
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.claims() {
            Ok(claims) => claims.exp.is_some_and(|exp| exp < now.timestamp()),
            Err(_) => true,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    /// Sign a token the way the backend would
    pub(crate) fn make_token(claims: Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"backend-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("Event Coordinator"), Some(UserRole::Coordinator));
        assert_eq!(UserRole::parse("normal"), Some(UserRole::User));
        assert_eq!(UserRole::parse("guest"), None);

        let role: UserRole = serde_json::from_value(json!("normal")).unwrap();
        assert_eq!(role, UserRole::User);
    }

    #[test]
    fn test_landing_route() {
        assert_eq!(landing_route(Some(UserRole::Admin)), "/admin-dashboard");
        assert_eq!(landing_route(Some(UserRole::Coordinator)), "/coordinator-dashboard");
        assert_eq!(landing_route(Some(UserRole::User)), "/user-dashboard");
        assert_eq!(landing_route(None), "/");
    }

    #[test]
    fn test_decode_claims_ignores_signature() {
        let token = make_token(json!({
            "exp": 1_700_000_000,
            "user_id": 12,
            "username": "asha",
            "user_role": "coordinator"
        }));

        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, Some(1_700_000_000));
        assert_eq!(claims.username.as_deref(), Some("asha"));
        assert_eq!(claims.role(), Some(UserRole::Coordinator));
    }

    #[test]
    fn test_role_claim_takes_precedence() {
        let token = make_token(json!({ "role": "admin", "user_role": "normal" }));
        assert_eq!(decode_claims(&token).unwrap().role(), Some(UserRole::Admin));
    }

    #[test]
    fn test_malformed_token() {
        assert!(decode_claims("not.a.jwt").is_err());
        assert!(decode_claims("").is_err());
    }

    #[test]
    fn test_session_expiry() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

        let fresh = Session::new(make_token(json!({ "exp": 1_700_000_600 })), None);
        assert!(!fresh.is_expired(now));

        let stale = Session::new(make_token(json!({ "exp": 1_699_999_000 })), None);
        assert!(stale.is_expired(now));

        let garbage = Session::new("garbage".to_string(), None);
        assert!(garbage.is_expired(now));
    }

    #[test]
    fn test_session_role_falls_back_to_stored_user() {
        let mut session = Session::new(make_token(json!({ "username": "ravi" })), None);
        assert_eq!(session.role(), None);

        session.user = Some(SessionUser {
            role: Some(UserRole::Admin),
            ..Default::default()
        });
        assert_eq!(session.role(), Some(UserRole::Admin));
    }

    #[test]
    fn test_session_user_from_claims() {
        let claims = Claims {
            username: Some("meera".to_string()),
            first_name: Some("Meera".to_string()),
            last_name: Some("Iyer".to_string()),
            role: Some("admin".to_string()),
            ..Default::default()
        };
        let user = SessionUser::from_claims(&claims);
        assert_eq!(user.display_name(), "Meera Iyer");
        assert_eq!(user.role, Some(UserRole::Admin));

        let anonymous = SessionUser::from_claims(&Claims::default());
        assert_eq!(anonymous.display_name(), "User");
    }
}
