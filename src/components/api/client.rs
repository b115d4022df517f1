use super::payload::extract_records;
use super::resource::{Resource, ResourceLocator};
use crate::components::session::{Session, SessionHandle, SessionUser};
use crate::config::Config;
use crate::error::{api_error, session_error, validation_error, AppResult, Error};
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};
use url::Url;

/// Login endpoint, relative to the API base URL
pub const LOGIN_PATH: &str = "users/login/";

/// Access token refresh endpoint
pub const REFRESH_PATH: &str = "token/refresh/";

/// REST client bound to one backend and one session
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    endpoints: ResourceLocator,
    session: SessionHandle,
}

impl ApiClient {
    pub fn new(config: &Config, session: SessionHandle) -> AppResult<Self> {
        let base_url = Url::parse(&config.api_url)?;

        Ok(Self {
            client: Client::new(),
            base_url,
            endpoints: config.endpoints.clone(),
            session,
        })
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn endpoints(&self) -> &ResourceLocator {
        &self.endpoints
    }

    fn resource_url(&self, resource: Resource, suffix: &str) -> AppResult<Url> {
        let path = self.endpoints.path(resource).ok_or_else(|| {
            Error::NotFound(format!("No endpoint configured for {}", resource))
        })?;
        Ok(self.base_url.join(&format!("{}{}", path, suffix))?)
    }

    /// Fetch every record of a collection
    pub async fn list(&self, resource: Resource, query: &[(&str, String)]) -> AppResult<Vec<Value>> {
        let mut url = self.resource_url(resource, "")?;
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }

        let payload = self.send(Method::GET, url, None).await?;
        let records = extract_records(payload, resource.name());
        debug!("Fetched {} {} records", records.len(), resource);

        Ok(records)
    }

    /// Fetch the raw payload of a singleton resource such as the stats
    pub async fn fetch(&self, resource: Resource) -> AppResult<Value> {
        let url = self.resource_url(resource, "")?;
        self.send(Method::GET, url, None).await
    }

    pub async fn get(&self, resource: Resource, id: &str) -> AppResult<Value> {
        let url = self.resource_url(resource, &format!("{}/", id))?;
        self.send(Method::GET, url, None).await
    }

    pub async fn create(&self, resource: Resource, body: &Value) -> AppResult<Value> {
        let url = self.resource_url(resource, "")?;
        self.send(Method::POST, url, Some(body)).await
    }

    pub async fn update(&self, resource: Resource, id: &str, body: &Value) -> AppResult<Value> {
        let url = self.resource_url(resource, &format!("{}/", id))?;
        self.send(Method::PUT, url, Some(body)).await
    }

    pub async fn patch(&self, resource: Resource, id: &str, body: &Value) -> AppResult<Value> {
        let url = self.resource_url(resource, &format!("{}/", id))?;
        self.send(Method::PATCH, url, Some(body)).await
    }

    /// PATCH a singleton resource such as the profile
    pub async fn patch_resource(&self, resource: Resource, body: &Value) -> AppResult<Value> {
        let url = self.resource_url(resource, "")?;
        self.send(Method::PATCH, url, Some(body)).await
    }

    pub async fn delete(&self, resource: Resource, id: &str) -> AppResult<()> {
        let url = self.resource_url(resource, &format!("{}/", id))?;
        self.send(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// POST to a detail action, e.g. `coordinator-requests/{id}/process_request/`
    pub async fn action(
        &self,
        resource: Resource,
        id: &str,
        name: &str,
        body: &Value,
    ) -> AppResult<Value> {
        let url = self.resource_url(resource, &format!("{}/{}/", id, name))?;
        self.send(Method::POST, url, Some(body)).await
    }

    /// Exchange credentials for tokens and persist the session
    pub async fn login(&self, login: &str, password: &str) -> AppResult<Session> {
        let url = self.base_url.join(LOGIN_PATH)?;
        let body = json!({ "login": login, "password": password });

        let response = self.client.post(url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if status == StatusCode::UNAUTHORIZED {
            return Err(session_error(&error_message(&text, status)));
        }
        if !status.is_success() {
            return Err(classify_failure(status, &text, LOGIN_PATH));
        }

        let tokens: Value = serde_json::from_str(&text)?;
        let access = tokens
            .get("access")
            .and_then(Value::as_str)
            .ok_or_else(|| api_error("Login response missing 'access' field"))?;
        let refresh = tokens
            .get("refresh")
            .and_then(Value::as_str)
            .map(str::to_string);

        let mut session = Session::new(access.to_string(), refresh);
        if session.user.is_none() {
            session.user = Some(SessionUser {
                username: login.to_string(),
                ..Default::default()
            });
        }

        self.session.set(session.clone()).await?;
        info!("Logged in as {}", login);

        Ok(session)
    }

    /// Trade the refresh token for a new access token. Any failure ends the session.
    pub async fn refresh(&self) -> AppResult<Session> {
        match self.try_refresh().await {
            Ok(session) => Ok(session),
            Err(e) => {
                error!("Unable to refresh token: {}", e);
                self.session.clear().await?;
                Err(session_error(&format!("Session expired: {}", e)))
            }
        }
    }

    async fn try_refresh(&self) -> AppResult<Session> {
        let refresh = self
            .session
            .refresh_token()
            .await
            .ok_or_else(|| session_error("No refresh token available"))?;

        let url = self.base_url.join(REFRESH_PATH)?;
        let response = self
            .client
            .post(url)
            .json(&json!({ "refresh": refresh }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(api_error(&format!(
                "Token refresh failed: HTTP {} - {}",
                status,
                error_message(&text, status)
            )));
        }

        let data: Value = response.json().await?;
        let access = data
            .get("access")
            .and_then(Value::as_str)
            .ok_or_else(|| api_error("Token response missing 'access' field"))?;

        self.session.update_access(access.to_string()).await
    }

    /// Make sure a usable session exists, refreshing an expired access token
    pub async fn ensure_session(&self, now: DateTime<Utc>) -> AppResult<Session> {
        let session = self
            .session
            .current()
            .await
            .ok_or_else(|| session_error("Not logged in"))?;

        if session.is_expired(now) {
            warn!("Access token expired, refreshing");
            return self.refresh().await;
        }

        Ok(session)
    }

    async fn send(&self, method: Method, url: Url, body: Option<&Value>) -> AppResult<Value> {
        debug!("{} {}", method, url);
        let response = self.send_once(method.clone(), url.clone(), body).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            if self.session.refresh_token().await.is_some() {
                warn!("Access token rejected for {}, refreshing", url.path());
                self.refresh().await?;
                let retried = self.send_once(method, url.clone(), body).await?;
                return handle_response(retried, &url).await;
            }

            warn!("Access token rejected for {} and nothing to refresh with", url.path());
            self.session.clear().await?;
        }

        handle_response(response, &url).await
    }

    async fn send_once(&self, method: Method, url: Url, body: Option<&Value>) -> AppResult<Response> {
        let mut request = self.client.request(method, url);
        if let Some(token) = self.session.access_token().await {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }
}

async fn handle_response(response: Response, url: &Url) -> AppResult<Value> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(classify_failure(status, &text, url.path()));
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_str(&text)?)
}

/// Map a failed status to the error taxonomy
fn classify_failure(status: StatusCode, body: &str, path: &str) -> Error {
    match status {
        StatusCode::BAD_REQUEST => validation_error(&error_message(body, status)),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            session_error(&error_message(body, status))
        }
        StatusCode::NOT_FOUND => Error::NotFound(path.to_string()),
        _ => api_error(&format!("HTTP {} - {}", status, error_message(body, status))),
    }
}

/// Best human-readable message from an error body
pub fn error_message(body: &str, status: StatusCode) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    };

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        let trimmed = body.trim();
        return if trimmed.is_empty() {
            fallback()
        } else {
            trimmed.to_string()
        };
    };

    match value {
        Value::Object(map) => {
            for key in ["detail", "error", "message"] {
                if let Some(Value::String(message)) = map.get(key) {
                    return message.clone();
                }
            }

            let fields: Vec<String> = map
                .iter()
                .map(|(field, errors)| format!("{}: {}", field, join_messages(errors)))
                .collect();
            if fields.is_empty() {
                fallback()
            } else {
                fields.join("; ")
            }
        }
        Value::Array(items) => items.iter().map(join_messages).collect::<Vec<_>>().join("; "),
        Value::String(message) => message,
        _ => fallback(),
    }
}

fn join_messages(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(join_messages).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
