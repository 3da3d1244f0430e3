//! In-memory directory and transport.
//!
//! Used by the test suites and for running the router without Firebase.
//! The transport records every message it is asked to send.

use academichub_common::{BoxFuture, PushMessage, PushTransport, UserDirectory};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("directory offline")]
    Offline,
    #[error("token rejected: {0}")]
    Rejected(String),
}

/// Users and posts held in maps
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    tokens: HashMap<String, String>,
    post_authors: HashMap<(String, String), String>,
    offline: bool,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, user_id: &str, token: &str) -> Self {
        self.tokens.insert(user_id.to_string(), token.to_string());
        self
    }

    pub fn with_post(mut self, topic_id: &str, post_id: &str, author: &str) -> Self {
        self.post_authors
            .insert((topic_id.to_string(), post_id.to_string()), author.to_string());
        self
    }

    /// Every lookup fails with [`MemoryError::Offline`].
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }
}

impl UserDirectory for MemoryDirectory {
    type Error = MemoryError;

    fn delivery_token(&self, user_id: &str) -> BoxFuture<'_, Option<String>, Self::Error> {
        let result = if self.offline {
            Err(MemoryError::Offline)
        } else {
            Ok(self.tokens.get(user_id).filter(|t| !t.is_empty()).cloned())
        };
        Box::pin(async move { result })
    }

    fn post_author(
        &self,
        topic_id: &str,
        post_id: &str,
    ) -> BoxFuture<'_, Option<String>, Self::Error> {
        let result = if self.offline {
            Err(MemoryError::Offline)
        } else {
            Ok(self
                .post_authors
                .get(&(topic_id.to_string(), post_id.to_string()))
                .cloned())
        };
        Box::pin(async move { result })
    }
}

/// One message handed to the [`RecordingTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub token: String,
    pub message: PushMessage,
}

/// Records sends instead of delivering them.
///
/// Clones share the same record, so a test can keep one clone and give
/// another to the dispatcher.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    reject: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send fails with [`MemoryError::Rejected`] and nothing is recorded.
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    fn record(&self) -> MutexGuard<'_, Vec<SentMessage>> {
        self.sent.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.record().clone()
    }

    pub fn count(&self) -> usize {
        self.record().len()
    }
}

impl PushTransport for RecordingTransport {
    type Error = MemoryError;

    fn send(&self, token: &str, message: PushMessage) -> BoxFuture<'_, String, Self::Error> {
        let result = if self.reject {
            Err(MemoryError::Rejected(token.to_string()))
        } else {
            let mut sent = self.record();
            sent.push(SentMessage {
                token: token.to_string(),
                message,
            });
            Ok(format!("memory/messages/{}", sent.len()))
        };
        Box::pin(async move { result })
    }
}
