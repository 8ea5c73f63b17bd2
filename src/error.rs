//! Error types for the dashboard worker
//!
//! Uses thiserror for ergonomic error definitions.
//! Session configuration errors are isolated per session by the board,
//! everything else surfaces as a JSON error response.

use thiserror::Error;

/// Custom Result type using our Error
pub type Result<T> = std::result::Result<T, DeskError>;

/// Dashboard worker errors
#[derive(Error, Debug)]
pub enum DeskError {
    /// Worker configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unknown IANA timezone on a market session
    #[error("Configuration error: session '{session}' has unknown timezone '{timezone}'")]
    InvalidTimezone { session: String, timezone: String },

    /// Malformed or out-of-range local open/close time
    #[error("Configuration error: session '{session}' has invalid time of day '{value}'")]
    InvalidTimeOfDay { session: String, value: String },

    /// Any other malformed session definition (empty or duplicate name)
    #[error("Configuration error: {0}")]
    InvalidSession(String),

    /// Request validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Backend API errors
    #[error("Backend API error: {0}")]
    Backend(String),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rate limit exceeded
    #[error("Rate limit exceeded: retry after {0} seconds")]
    RateLimit(u64),

    /// Worker runtime errors
    #[error("Worker error: {0}")]
    Worker(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DeskError {
    /// Wrap a KV or binding failure
    pub fn storage(err: impl std::fmt::Display) -> Self {
        DeskError::Storage(err.to_string())
    }

    /// Whether this error comes from a malformed market session definition
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            DeskError::InvalidTimezone { .. }
                | DeskError::InvalidTimeOfDay { .. }
                | DeskError::InvalidSession(_)
        )
    }

    /// HTTP status used when the error is returned to the dashboard
    pub fn status_code(&self) -> u16 {
        match self {
            DeskError::Validation(_) => 400,
            DeskError::RateLimit(_) => 429,
            DeskError::Backend(_) | DeskError::Http(_) | DeskError::Json(_) => 502,
            _ => 500,
        }
    }
}

impl From<worker::Error> for DeskError {
    fn from(err: worker::Error) -> Self {
        DeskError::Worker(err.to_string())
    }
}

impl From<reqwest::Error> for DeskError {
    fn from(err: reqwest::Error) -> Self {
        DeskError::Http(err.to_string())
    }
}

impl From<DeskError> for worker::Error {
    fn from(err: DeskError) -> Self {
        worker::Error::RustError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DeskError::InvalidTimezone {
            session: "Tokyo".to_string(),
            timezone: "Asia/Tokio".to_string(),
        };
        assert!(err.to_string().contains("Asia/Tokio"));
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: DeskError = json_err.into();
        assert!(matches!(err, DeskError::Json(_)));
        assert_eq!(err.status_code(), 502);
    }

    #[test]
    fn test_configuration_family() {
        assert!(DeskError::InvalidSession("duplicate name".into()).is_configuration_error());
        assert!(
            DeskError::InvalidTimeOfDay { session: "London".into(), value: "25:00".into() }
                .is_configuration_error()
        );
        assert!(!DeskError::Config("BACKEND_URL".into()).is_configuration_error());
        assert!(!DeskError::Validation("riskPercent".into()).is_configuration_error());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(DeskError::Validation("x".into()).status_code(), 400);
        assert_eq!(DeskError::RateLimit(3).status_code(), 429);
        assert_eq!(DeskError::Backend("HTTP 500".into()).status_code(), 502);
        assert_eq!(DeskError::Storage("kv".into()).status_code(), 500);
    }

    #[test]
    fn test_storage_wraps_any_failure() {
        let binding = DeskError::storage(worker::Error::RustError("no binding STATE".into()));
        assert!(matches!(binding, DeskError::Storage(ref m) if m.contains("STATE")));

        let read: Result<Option<i32>> = serde_json::from_str::<Option<i32>>("{")
            .map_err(DeskError::storage);
        let err = read.unwrap_err();
        assert!(matches!(err, DeskError::Storage(_)));
        assert_eq!(err.status_code(), 500);
    }
}
