use crate::components::api::{Resource, ResourceLocator};
use crate::error::{config_error, env_error, AppResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default backend base URL
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/";

/// Default location of the persisted session
pub const DEFAULT_SESSION_FILE: &str = "config/session.json";

/// Optional file overriding resource paths
pub const ENDPOINTS_FILE: &str = "config/endpoints.toml";

/// Default number of entries in the upcoming events panel
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

/// Main configuration structure for the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL, always ending with `/`
    pub api_url: String,
    /// IANA timezone used for calendar days
    pub timezone: String,
    /// Where the session tokens are persisted
    pub session_file: PathBuf,
    /// Size of the upcoming events panel
    pub upcoming_limit: usize,
    /// HTML-to-PDF service endpoint
    pub pdf_api_url: Option<String>,
    /// HTML-to-PDF service key
    pub pdf_api_key: Option<String>,
    /// Output locale
    pub locale: String,
    /// One path per backend resource
    pub endpoints: ResourceLocator,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timezone: "UTC".to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
            pdf_api_url: None,
            pdf_api_key: None,
            locale: "en".to_string(),
            endpoints: ResourceLocator::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let api_url = normalize_base_url(
            &env::var("API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        );

        let timezone = env::var("TIMEZONE").unwrap_or_else(|_| String::from("UTC"));

        let session_file = env::var("SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE));

        let upcoming_limit = match env::var("UPCOMING_LIMIT") {
            Ok(value) => value
                .parse::<usize>()
                .map_err(|_| env_error("UPCOMING_LIMIT"))?,
            Err(_) => DEFAULT_UPCOMING_LIMIT,
        };

        let pdf_api_url = env::var("PDF_API_URL").ok().filter(|v| !v.is_empty());
        let pdf_api_key = env::var("PDF_API_KEY").ok().filter(|v| !v.is_empty());
        let locale = env::var("LOCALE").unwrap_or_else(|_| String::from("en"));

        let mut endpoints = ResourceLocator::default();
        if let Ok(content) = fs::read_to_string(ENDPOINTS_FILE) {
            let overrides = toml::from_str::<HashMap<String, String>>(&content)?;
            apply_endpoint_overrides(&mut endpoints, overrides);
        }

        let config = Config {
            api_url,
            timezone,
            session_file,
            upcoming_limit,
            pdf_api_url,
            pdf_api_key,
            locale,
            endpoints,
        };

        // Fail early on a bad timezone instead of at first render
        config.timezone()?;

        Ok(config)
    }

    /// Parse the configured timezone
    pub fn timezone(&self) -> AppResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Unknown timezone: {}", self.timezone)))
    }

    /// Load endpoint overrides from an explicit file
    pub fn with_endpoints_file(mut self, path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        let overrides = toml::from_str::<HashMap<String, String>>(&content)?;
        apply_endpoint_overrides(&mut self.endpoints, overrides);
        Ok(self)
    }
}

/// Merge `resource-name = "path/"` pairs over the defaults
fn apply_endpoint_overrides(endpoints: &mut ResourceLocator, overrides: HashMap<String, String>) {
    for (key, path) in overrides {
        match key.parse::<Resource>() {
            Ok(resource) => endpoints.set(resource, path),
            Err(_) => warn!("Ignoring unknown resource in endpoints file: {}", key),
        }
    }
}

/// Make sure relative paths join under the base URL
pub fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}
