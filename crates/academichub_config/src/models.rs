// --- File: crates/academichub_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests handled at once across all routes; 0 disables the limit.
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,
}

fn default_max_concurrent_requests() -> usize {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_concurrent_requests: default_max_concurrent_requests(),
        }
    }
}

// --- Firebase Config ---
// Holds non-secret Firebase settings. The access token override is a secret and
// is normally written as "secret_from_env" in the config file.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FirebaseConfig {
    pub project_id: Option<String>, // Mandatory for every Firebase call
    pub key_path: Option<String>,   // Service account JSON used for OAuth2
    /// Static bearer token, used instead of the service account when set
    /// (emulators, tests). Loaded via ACADEMICHUB_SECRET_FIREBASE_ACCESS_TOKEN.
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_fcm_base_url")]
    pub fcm_base_url: String,
    #[serde(default = "default_firestore_base_url")]
    pub firestore_base_url: String,
    #[serde(default = "default_users_collection")]
    pub users_collection: String,
    #[serde(default = "default_token_field")]
    pub token_field: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_fcm_base_url() -> String {
    "https://fcm.googleapis.com".to_string()
}

fn default_firestore_base_url() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

fn default_users_collection() -> String {
    "Users".to_string()
}

fn default_token_field() -> String {
    "fcmToken".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            key_path: None,
            access_token: None,
            fcm_base_url: default_fcm_base_url(),
            firestore_base_url: default_firestore_base_url(),
            users_collection: default_users_collection(),
            token_field: default_token_field(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

// --- Notification composition settings ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NotifyConfig {
    /// Comment snippets longer than this many characters are cut and get an ellipsis.
    #[serde(default = "default_body_max_chars")]
    pub body_max_chars: usize,
    #[serde(default = "default_sound")]
    pub default_sound: String,
    /// Label used when a friend request carries no usable sender name.
    #[serde(default = "default_sender_fallback")]
    pub sender_fallback: String,
}

fn default_body_max_chars() -> usize {
    100
}

fn default_sound() -> String {
    "default".to_string()
}

fn default_sender_fallback() -> String {
    "Someone".to_string()
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            body_max_chars: default_body_max_chars(),
            default_sound: default_sound(),
            sender_fallback: default_sender_fallback(),
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_firebase: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub firebase: Option<FirebaseConfig>,
    #[serde(default)]
    pub notify: NotifyConfig,
}
