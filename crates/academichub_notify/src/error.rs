// --- File: crates/academichub_notify/src/error.rs ---
use academichub_common::{
    external_service_error, internal_error, not_found, validation_error, AcademicHubError, BoxedError,
    HttpStatusCode,
};
use thiserror::Error;

pub const MISSING_FIELDS_MESSAGE: &str = "targetUserId, title and body are required";
pub const MISSING_TOKEN_MESSAGE: &str = "No FCM token for targetUserId";

/// Errors raised while dispatching a notification
#[derive(Error, Debug)]
pub enum NotifyError {
    /// The caller left out a required field
    #[error("{0}")]
    InvalidArgument(String),

    /// The target user has no delivery token
    #[error("{0}")]
    MissingToken(String),

    /// The user directory could not be read
    #[error("Directory lookup failed: {0}")]
    Directory(#[source] BoxedError),

    /// The push transport rejected or failed to deliver the message
    #[error("Push delivery failed: {0}")]
    Transport(#[source] BoxedError),

    /// No handler is registered for the event tag
    #[error("No handler registered for event type '{0}'")]
    UnknownEvent(String),
}

impl NotifyError {
    pub fn missing_fields() -> Self {
        NotifyError::InvalidArgument(MISSING_FIELDS_MESSAGE.to_string())
    }

    pub fn missing_token() -> Self {
        NotifyError::MissingToken(MISSING_TOKEN_MESSAGE.to_string())
    }

    /// Status name used by the callable error envelope
    pub fn callable_status(&self) -> &'static str {
        match self {
            NotifyError::InvalidArgument(_) => "INVALID_ARGUMENT",
            NotifyError::MissingToken(_) | NotifyError::UnknownEvent(_) => "NOT_FOUND",
            NotifyError::Directory(_) | NotifyError::Transport(_) => "INTERNAL",
        }
    }
}

impl HttpStatusCode for NotifyError {
    fn status_code(&self) -> u16 {
        match self {
            NotifyError::InvalidArgument(_) => 400,
            NotifyError::MissingToken(_) => 404,
            NotifyError::UnknownEvent(_) => 404,
            NotifyError::Directory(_) => 500,
            NotifyError::Transport(_) => 502,
        }
    }
}

impl From<NotifyError> for AcademicHubError {
    fn from(err: NotifyError) -> Self {
        match err {
            NotifyError::InvalidArgument(msg) => validation_error(msg),
            NotifyError::MissingToken(msg) => not_found(msg),
            unknown @ NotifyError::UnknownEvent(_) => not_found(unknown),
            NotifyError::Directory(e) => internal_error(format!("Directory lookup failed: {}", e)),
            NotifyError::Transport(e) => external_service_error("Push", e),
        }
    }
}
