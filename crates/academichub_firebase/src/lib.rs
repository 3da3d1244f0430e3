//! Firebase adapters for the AcademicHub push backend
//!
//! This crate implements the two external collaborators of the notification
//! dispatcher on top of Firebase's REST APIs:
//!
//! - [`FirebaseClient`]: a [`PushTransport`](academichub_common::PushTransport)
//!   sending through the FCM HTTP v1 API
//! - [`FirestoreDirectory`]: a [`UserDirectory`](academichub_common::UserDirectory)
//!   reading user tokens and post authors from Firestore
//!
//! Both authenticate with a service account (OAuth2) or a static bearer token,
//! see [`auth::Credentials`].
//!
//! # Example
//!
//! ```rust,no_run
//! use academichub_config::FirebaseConfig;
//! use academichub_firebase::{FirebaseClient, FirestoreDirectory};
//!
//! fn build() -> Result<(), academichub_firebase::FirebaseError> {
//!     let config = FirebaseConfig {
//!         project_id: Some("my-project-id".to_string()),
//!         key_path: Some("/path/to/service-account.json".to_string()),
//!         ..FirebaseConfig::default()
//!     };
//!     let _transport = FirebaseClient::new(config.clone())?;
//!     let _directory = FirestoreDirectory::new(config)?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod firestore;

pub use client::FirebaseClient;
pub use error::FirebaseError;
pub use firestore::FirestoreDirectory;
