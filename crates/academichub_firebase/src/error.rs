// --- File: crates/academichub_firebase/src/error.rs ---
use academichub_common::{config_error, external_service_error, AcademicHubError};
use thiserror::Error;

/// Errors that can occur when talking to Firebase (FCM or Firestore)
#[derive(Error, Debug)]
pub enum FirebaseError {
    /// Error during authentication with Firebase
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error during HTTP request to a Firebase API
    #[error("HTTP request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Missing required configuration
    #[error("Missing configuration: {0}")]
    ConfigError(String),

    /// Error returned by a Firebase API
    #[error("Firebase API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// A response body that does not have the expected shape
    #[error("Failed to parse Firebase response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Only setup failures (service account, HTTP client) surface at this boundary;
/// request-time failures travel boxed through the notify traits.
impl From<FirebaseError> for AcademicHubError {
    fn from(err: FirebaseError) -> Self {
        match err {
            FirebaseError::ConfigError(msg) => config_error(msg),
            other => external_service_error("Firebase", other),
        }
    }
}
