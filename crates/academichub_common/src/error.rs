// --- File: crates/academichub_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by all AcademicHub crates.
///
/// Crate-specific errors convert into it with `From` so handlers and the
/// binary can report them uniformly.
#[derive(Error, Debug)]
pub enum AcademicHubError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for AcademicHubError {
    fn status_code(&self) -> u16 {
        match self {
            AcademicHubError::HttpError(_) => 500,
            AcademicHubError::ParseError(_) => 400,
            AcademicHubError::ConfigError(_) => 500,
            AcademicHubError::AuthError(_) => 401,
            AcademicHubError::ValidationError(_) => 400,
            AcademicHubError::ExternalServiceError { .. } => 502,
            AcademicHubError::NotFoundError(_) => 404,
            AcademicHubError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, AcademicHubError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, AcademicHubError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, AcademicHubError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| AcademicHubError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, AcademicHubError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| AcademicHubError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> AcademicHubError {
    AcademicHubError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> AcademicHubError {
    AcademicHubError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> AcademicHubError {
    AcademicHubError::NotFoundError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> AcademicHubError {
    AcademicHubError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> AcademicHubError {
    AcademicHubError::InternalError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(validation_error("missing title").status_code(), 400);
        assert_eq!(not_found("no token").status_code(), 404);
        assert_eq!(external_service_error("FCM", "boom").status_code(), 502);
        assert_eq!(config_error("no project").status_code(), 500);
    }

    #[test]
    fn test_context_wraps_source_message() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "config/default.toml",
        ));
        let err = result.context("loading configuration").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Internal error: loading configuration: config/default.toml"
        );
    }
}
