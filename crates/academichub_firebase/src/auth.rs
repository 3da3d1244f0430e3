//! Access tokens for the Firebase REST APIs.
//!
//! Production deployments authenticate with a service account key file and
//! request a token carrying both the messaging and the datastore scope, so the
//! same credentials serve FCM sends and Firestore reads. A static token can be
//! configured instead for emulators and tests.

use academichub_config::FirebaseConfig;
use std::{error::Error, path::Path};
use tracing::debug;
use yup_oauth2::{read_service_account_key, ServiceAccountAuthenticator};

use crate::error::FirebaseError;

/// Scope required by the FCM HTTP v1 API
pub const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";

/// Scope required by the Firestore REST API
pub const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";

/// Where bearer tokens for Firebase requests come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// OAuth2 service account flow using the key file at this path
    ServiceAccount { key_path: String },
    /// A fixed bearer token
    Static(String),
}

impl Credentials {
    /// Picks the credentials configured for Firebase.
    ///
    /// A non-empty `access_token` wins over `key_path`. Having neither is a
    /// configuration error.
    pub fn from_config(config: &FirebaseConfig) -> Result<Self, FirebaseError> {
        if let Some(token) = config.access_token.as_deref().filter(|t| !t.is_empty()) {
            return Ok(Credentials::Static(token.to_string()));
        }

        config
            .key_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|key_path| Credentials::ServiceAccount {
                key_path: key_path.to_string(),
            })
            .ok_or_else(|| {
                FirebaseError::ConfigError(
                    "Either access_token or key_path must be set in FirebaseConfig".to_string(),
                )
            })
    }

    /// Returns a bearer token valid for the FCM and Firestore scopes.
    pub async fn access_token(&self) -> Result<String, FirebaseError> {
        match self {
            Credentials::Static(token) => Ok(token.clone()),
            Credentials::ServiceAccount { key_path } => {
                get_firebase_auth_token(key_path, &[FCM_SCOPE, DATASTORE_SCOPE])
                    .await
                    .map_err(|e| FirebaseError::AuthError(e.to_string()))
            }
        }
    }
}

/// Obtains an OAuth2 access token from a service account key file.
///
/// # Errors
///
/// Fails if the key file cannot be read, if Google's token endpoint rejects
/// the request, or if the response carries no token.
pub async fn get_firebase_auth_token(
    key_path: &str,
    scopes: &[&str],
) -> Result<String, Box<dyn Error + Send + Sync>> {
    let sa_key = read_service_account_key(Path::new(key_path)).await?;

    let auth = ServiceAccountAuthenticator::builder(sa_key).build().await?;

    let auth_token = auth.token(scopes).await?;
    let token = match auth_token.token() {
        Some(token) => token,
        None => {
            return Err("No token available".into());
        }
    };

    debug!("Obtained Firebase access token for {} scope(s)", scopes.len());
    Ok(token.to_string())
}
