// --- File: crates/academichub_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Shared data structures
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    config_error, external_service_error, internal_error, not_found, validation_error,
    AcademicHubError, Context, HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::{client::create_client, handle_json_result, IntoHttpResponse};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error, log_result};

pub use models::{PlatformHints, Priority, PushMessage, UserRecord};
pub use services::{
    share_directory, share_transport, BoxFuture, BoxedError, PushTransport, SharedDirectory,
    SharedTransport, UserDirectory,
};
