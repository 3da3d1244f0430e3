// --- File: crates/academichub_common/src/models.rs ---

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A user document as seen by the push backend.
///
/// Owned by the app's user store; this service only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The user identifier (the document id)
    pub user_id: String,

    /// The device push token, absent while the user has not registered a device
    pub fcm_token: Option<String>,
}

impl UserRecord {
    /// Returns the delivery token if it is present and non-empty.
    pub fn delivery_token(&self) -> Option<&str> {
        self.fcm_token.as_deref().filter(|token| !token.is_empty())
    }
}

/// Delivery priority requested from the push platforms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    #[default]
    High,
}

/// Per-platform delivery hints carried alongside the visible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformHints {
    /// Sound name to play, `None` for a silent notification
    pub sound: Option<String>,
    pub priority: Priority,
}

impl Default for PlatformHints {
    fn default() -> Self {
        Self {
            sound: Some("default".to_string()),
            priority: Priority::High,
        }
    }
}

/// A notification ready to be handed to a push transport.
///
/// Built fresh for each dispatch and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    pub title: String,
    pub body: String,

    /// Key-value data the client app uses for routing and deep links
    pub data: BTreeMap<String, String>,

    pub hints: PlatformHints,
}

impl PushMessage {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            data: BTreeMap::new(),
            hints: PlatformHints::default(),
        }
    }

    /// Adds one auxiliary data entry.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn with_hints(mut self, hints: PlatformHints) -> Self {
        self.hints = hints;
        self
    }
}
