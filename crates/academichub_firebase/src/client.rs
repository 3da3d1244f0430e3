//! Firebase Cloud Messaging client.
//!
//! Sends one message to one device token through the FCM HTTP v1 API. The
//! wire types mirror the `projects.messages` resource: a visible
//! notification, a string-to-string data map, and the Android and APNs
//! override blocks used for sound and priority.

use academichub_common::{create_client, BoxFuture, Priority, PushMessage, PushTransport};
use academichub_config::FirebaseConfig;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::auth::Credentials;
use crate::error::FirebaseError;

/// The request body of `messages:send`
#[derive(Debug, Serialize)]
pub struct FcmMessage {
    pub message: Message,
}

/// The message payload for Firebase Cloud Messaging
#[derive(Debug, Serialize)]
pub struct Message {
    /// Registration token of the target device
    pub token: String,

    pub notification: Notification,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,

    pub android: AndroidConfig,

    pub apns: ApnsConfig,
}

/// The notification to be displayed on the user's device
#[derive(Debug, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Serialize)]
pub struct AndroidConfig {
    /// `HIGH` or `NORMAL`
    pub priority: &'static str,
    pub notification: AndroidNotification,
}

#[derive(Debug, Serialize)]
pub struct AndroidNotification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApnsConfig {
    pub headers: BTreeMap<String, String>,
    pub payload: ApnsPayload,
}

#[derive(Debug, Serialize)]
pub struct ApnsPayload {
    pub aps: Aps,
}

#[derive(Debug, Serialize)]
pub struct Aps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
}

impl Message {
    /// Builds the FCM message addressed to `token` from a composed push message.
    pub fn for_token(token: &str, push: PushMessage) -> Self {
        let (android_priority, apns_priority) = match push.hints.priority {
            Priority::High => ("HIGH", "10"),
            Priority::Normal => ("NORMAL", "5"),
        };

        let mut apns_headers = BTreeMap::new();
        apns_headers.insert("apns-priority".to_string(), apns_priority.to_string());

        Self {
            token: token.to_string(),
            notification: Notification {
                title: push.title,
                body: push.body,
            },
            data: push.data,
            android: AndroidConfig {
                priority: android_priority,
                notification: AndroidNotification {
                    sound: push.hints.sound.clone(),
                },
            },
            apns: ApnsConfig {
                headers: apns_headers,
                payload: ApnsPayload {
                    aps: Aps {
                        sound: push.hints.sound,
                    },
                },
            },
        }
    }
}

/// Response from the Firebase Cloud Messaging API
#[derive(Debug, Deserialize)]
pub struct FcmResponse {
    /// The message id, `projects/{project_id}/messages/{message_id}`
    pub name: String,
}

/// Client for the Firebase Cloud Messaging HTTP v1 API
pub struct FirebaseClient {
    client: Client,
    config: FirebaseConfig,
    credentials: Credentials,
}

impl FirebaseClient {
    /// Creates a client from the Firebase configuration.
    ///
    /// # Errors
    ///
    /// Fails if no credentials are configured or the HTTP client cannot be built.
    pub fn new(config: FirebaseConfig) -> Result<Self, FirebaseError> {
        let credentials = Credentials::from_config(&config)?;
        let client = create_client(config.request_timeout_secs)?;
        Ok(Self {
            client,
            config,
            credentials,
        })
    }

    fn send_url(&self) -> Result<String, FirebaseError> {
        let project_id = self.config.project_id.as_deref().ok_or_else(|| {
            FirebaseError::ConfigError("Missing project_id in FirebaseConfig".to_string())
        })?;

        Ok(format!(
            "{}/v1/projects/{}/messages:send",
            self.config.fcm_base_url.trim_end_matches('/'),
            project_id
        ))
    }

    /// Sends a message via FCM and returns the message id.
    ///
    /// The request is attempted once. A rejected token (for example an
    /// unregistered device) comes back as [`FirebaseError::ApiError`] with
    /// FCM's error body.
    pub async fn send_message(&self, message: FcmMessage) -> Result<String, FirebaseError> {
        let url = self.send_url()?;
        let token = self.credentials.access_token().await?;

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            warn!("FCM rejected message ({}): {}", status, error_text);
            return Err(FirebaseError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let fcm_response: FcmResponse = response.json().await?;
        debug!("FCM accepted message {}", fcm_response.name);
        Ok(fcm_response.name)
    }
}

impl PushTransport for FirebaseClient {
    type Error = FirebaseError;

    fn send(&self, token: &str, message: PushMessage) -> BoxFuture<'_, String, Self::Error> {
        let message = FcmMessage {
            message: Message::for_token(token, message),
        };
        Box::pin(async move { self.send_message(message).await })
    }
}
