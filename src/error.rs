use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Backend API error: {0}")]
    #[diagnostic(code(eventsphere::api))]
    Api(String),

    #[error("Resource not found: {0}")]
    #[diagnostic(code(eventsphere::not_found))]
    NotFound(String),

    #[error("Authentication error: {0}")]
    #[diagnostic(
        code(eventsphere::auth),
        help("Log in again with `eventsphere login`")
    )]
    Auth(String),

    #[error("Validation failed: {0}")]
    #[diagnostic(code(eventsphere::validation))]
    Validation(String),

    #[error("Environment error: {0}")]
    #[diagnostic(code(eventsphere::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(eventsphere::config))]
    Config(String),

    #[error("Calendar error: {0}")]
    #[diagnostic(code(eventsphere::calendar))]
    Calendar(String),

    #[error("Report error: {0}")]
    #[diagnostic(code(eventsphere::report))]
    Report(String),

    #[error(transparent)]
    #[diagnostic(code(eventsphere::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(eventsphere::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(eventsphere::other))]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Api(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Config(format!("Invalid URL: {}", err))
    }
}

impl From<askama::Error> for Error {
    fn from(err: askama::Error) -> Self {
        Error::Report(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create backend API errors
pub fn api_error(message: &str) -> Error {
    Error::Api(message.to_string())
}

/// Helper to create authentication errors
pub fn session_error(message: &str) -> Error {
    Error::Auth(message.to_string())
}

/// Helper to create validation errors
pub fn validation_error(message: &str) -> Error {
    Error::Validation(message.to_string())
}

/// Helper to create calendar errors
pub fn calendar_error(message: &str) -> Error {
    Error::Calendar(message.to_string())
}

/// Helper to create report errors
pub fn report_error(message: &str) -> Error {
    Error::Report(message.to_string())
}
