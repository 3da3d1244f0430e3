//! Read-only Firestore access for the user directory.
//!
//! Documents are fetched one at a time through the Firestore REST API
//! (`GET .../databases/(default)/documents/{path}`). A 404 means the document
//! does not exist and is reported as `None`.

use academichub_common::{create_client, BoxFuture, UserDirectory, UserRecord};
use academichub_config::FirebaseConfig;
use reqwest::{header, Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use crate::auth::Credentials;
use crate::error::FirebaseError;

/// A Firestore document as returned by the REST API
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub name: String,

    /// Typed field values, e.g. `{"fcmToken": {"stringValue": "..."}}`
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

impl Document {
    /// Reads a non-empty string field. Any other type counts as absent.
    pub fn string_field(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .and_then(|value| value.get("stringValue"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// User directory backed by Firestore
pub struct FirestoreDirectory {
    client: Client,
    config: FirebaseConfig,
    credentials: Credentials,
}

impl FirestoreDirectory {
    pub fn new(config: FirebaseConfig) -> Result<Self, FirebaseError> {
        let credentials = Credentials::from_config(&config)?;
        let client = create_client(config.request_timeout_secs)?;
        Ok(Self {
            client,
            config,
            credentials,
        })
    }

    fn document_url(&self, segments: &[&str]) -> Result<Url, FirebaseError> {
        let project_id = self.config.project_id.as_deref().ok_or_else(|| {
            FirebaseError::ConfigError("Missing project_id in FirebaseConfig".to_string())
        })?;

        let base = format!(
            "{}/projects/{}/databases/(default)/documents",
            self.config.firestore_base_url.trim_end_matches('/'),
            project_id
        );
        let mut url = Url::parse(&base)
            .map_err(|e| FirebaseError::ConfigError(format!("Invalid firestore_base_url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                FirebaseError::ConfigError("firestore_base_url cannot be a base".to_string())
            })?
            .extend(segments);
        Ok(url)
    }

    /// Fetches one document by path segments, `None` if it does not exist.
    ///
    /// Empty segments never reach the API; they are reported as a missing document.
    pub async fn get_document(&self, segments: &[&str]) -> Result<Option<Document>, FirebaseError> {
        if segments.iter().any(|s| s.is_empty()) {
            return Ok(None);
        }

        let url = self.document_url(segments)?;
        let token = self.credentials.access_token().await?;

        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Firestore document {} not found", segments.join("/"));
            return Ok(None);
        }
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(FirebaseError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await?;
        let document: Document = serde_json::from_str(&body)?;
        Ok(Some(document))
    }

    pub async fn fetch_user(&self, user_id: &str) -> Result<Option<UserRecord>, FirebaseError> {
        let document = self
            .get_document(&[self.config.users_collection.as_str(), user_id])
            .await?;

        Ok(document.map(|doc| UserRecord {
            user_id: user_id.to_string(),
            fcm_token: doc.string_field(&self.config.token_field),
        }))
    }

    /// Author of `topics/{topic_id}/posts/{post_id}`, `None` when the post or
    /// its author field is missing.
    pub async fn fetch_post_author(
        &self,
        topic_id: &str,
        post_id: &str,
    ) -> Result<Option<String>, FirebaseError> {
        let document = self
            .get_document(&["topics", topic_id, "posts", post_id])
            .await?;

        Ok(document.and_then(|doc| doc.string_field("author")))
    }
}

impl UserDirectory for FirestoreDirectory {
    type Error = FirebaseError;

    fn delivery_token(&self, user_id: &str) -> BoxFuture<'_, Option<String>, Self::Error> {
        let user_id = user_id.to_string();
        Box::pin(async move {
            let user = self.fetch_user(&user_id).await?;
            Ok(user.and_then(|u| u.delivery_token().map(str::to_string)))
        })
    }

    fn post_author(
        &self,
        topic_id: &str,
        post_id: &str,
    ) -> BoxFuture<'_, Option<String>, Self::Error> {
        let topic_id = topic_id.to_string();
        let post_id = post_id.to_string();
        Box::pin(async move {
            self.fetch_post_author(&topic_id, &post_id).await
        })
    }
}
