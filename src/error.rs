//! Error taxonomy shared by every provider client.
//!
//! Both clients normalize provider-specific failures into [`ApiError`], a
//! single tagged type carrying an [`ErrorKind`] plus structured fields, so
//! presentation layers only ever match on `kind` and never need to know
//! which provider produced the failure.

use thiserror::Error;

/// Failure categories recognized throughout the acquisition core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or invalid credential.
    AuthFailure,
    /// Endpoint or resource absent (HTTP 404).
    NotFound,
    /// Transport-level timeout.
    Timeout,
    /// Provider rate limit hit (HTTP 429).
    RateLimited,
    /// Server-side failure (HTTP 5xx).
    ServerError,
    /// Non-JSON body or missing expected fields.
    Malformed,
    /// Anything the taxonomy cannot classify further.
    Unknown,
}

impl ErrorKind {
    /// Only timeouts and server errors are worth another attempt; retrying an
    /// auth or rate-limit failure would not change the answer.
    #[must_use]
    pub fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::Timeout | ErrorKind::ServerError)
    }
}

/// A classified failure from one of the external providers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{service} API error: {message}{}", fmt_status(.status_code))]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub service: &'static str,
    pub status_code: Option<u16>,
}

impl ApiError {
    pub fn new(
        kind: ErrorKind,
        service: &'static str,
        message: impl Into<String>,
        status_code: Option<u16>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            service,
            status_code,
        }
    }

    pub fn auth_failure(service: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AuthFailure, service, message, Some(401))
    }

    pub fn not_found(service: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, service, message, Some(404))
    }

    pub fn timeout(service: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, service, message, None)
    }

    pub fn rate_limited(service: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RateLimited, service, message, Some(429))
    }

    pub fn server_error(service: &'static str, message: impl Into<String>, status: u16) -> Self {
        Self::new(ErrorKind::ServerError, service, message, Some(status))
    }

    pub fn malformed(service: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Malformed, service, message, None)
    }

    pub fn unknown(
        service: &'static str,
        message: impl Into<String>,
        status_code: Option<u16>,
    ) -> Self {
        Self::new(ErrorKind::Unknown, service, message, status_code)
    }

    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

fn fmt_status(status_code: &Option<u16>) -> String {
    match status_code {
        Some(code) => format!(" (status {code})"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_kind_and_status() {
        let err = ApiError::auth_failure("AQICN", "token missing");
        assert_eq!(err.kind, ErrorKind::AuthFailure);
        assert_eq!(err.status_code, Some(401));
        assert_eq!(err.service, "AQICN");

        let err = ApiError::not_found("WeatherAPI", "endpoint missing");
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.status_code, Some(404));

        let err = ApiError::server_error("WeatherAPI", "upstream unavailable", 503);
        assert_eq!(err.kind, ErrorKind::ServerError);
        assert_eq!(err.status_code, Some(503));

        let err = ApiError::timeout("WeatherAPI", "request timed out");
        assert_eq!(err.status_code, None);
    }

    #[test]
    fn test_only_timeout_and_server_error_are_retryable() {
        assert!(ErrorKind::Timeout.is_retryable());
        assert!(ErrorKind::ServerError.is_retryable());
        assert!(!ErrorKind::AuthFailure.is_retryable());
        assert!(!ErrorKind::NotFound.is_retryable());
        assert!(!ErrorKind::RateLimited.is_retryable());
        assert!(!ErrorKind::Malformed.is_retryable());
        assert!(!ErrorKind::Unknown.is_retryable());
    }

    #[test]
    fn test_display_includes_service_message_and_status() {
        let err = ApiError::rate_limited("AQICN", "rate limit exceeded");
        assert_eq!(
            err.to_string(),
            "AQICN API error: rate limit exceeded (status 429)"
        );

        let err = ApiError::timeout("WeatherAPI", "request timed out");
        assert_eq!(err.to_string(), "WeatherAPI API error: request timed out");
    }
}
