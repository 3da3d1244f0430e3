// --- File: crates/academichub_common/src/services.rs ---
//! Service abstractions for the external collaborators of the push backend.
//!
//! The dispatch logic only sees these traits, so the Firebase adapters can be
//! swapped for in-memory doubles in tests.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::models::PushMessage;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl BoxedError {
    pub fn new<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        BoxedError(Box::new(err))
    }
}

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// Point lookups against the app's document store.
///
/// A missing document or a missing field is `Ok(None)`, never an error.
/// Errors are reserved for failures talking to the store.
pub trait UserDirectory: Send + Sync {
    /// Error type returned by directory operations.
    type Error: StdError + Send + Sync + 'static;

    /// Resolve a user identifier to the device push token.
    fn delivery_token(&self, user_id: &str) -> BoxFuture<'_, Option<String>, Self::Error>;

    /// Resolve the author of `topics/{topic_id}/posts/{post_id}`.
    fn post_author(
        &self,
        topic_id: &str,
        post_id: &str,
    ) -> BoxFuture<'_, Option<String>, Self::Error>;
}

/// A push delivery service.
pub trait PushTransport: Send + Sync {
    /// Error type returned by the transport.
    type Error: StdError + Send + Sync + 'static;

    /// Send one message to one device token, returning the provider's message id.
    fn send(&self, token: &str, message: PushMessage) -> BoxFuture<'_, String, Self::Error>;
}

pub type SharedDirectory = Arc<dyn UserDirectory<Error = BoxedError>>;
pub type SharedTransport = Arc<dyn PushTransport<Error = BoxedError>>;

/// Adapts any [`UserDirectory`] to the type-erased [`SharedDirectory`].
pub struct ErasedDirectory<D>(pub D);

impl<D: UserDirectory> UserDirectory for ErasedDirectory<D> {
    type Error = BoxedError;

    fn delivery_token(&self, user_id: &str) -> BoxFuture<'_, Option<String>, Self::Error> {
        let lookup = self.0.delivery_token(user_id);
        Box::pin(async move { lookup.await.map_err(BoxedError::new) })
    }

    fn post_author(
        &self,
        topic_id: &str,
        post_id: &str,
    ) -> BoxFuture<'_, Option<String>, Self::Error> {
        let lookup = self.0.post_author(topic_id, post_id);
        Box::pin(async move { lookup.await.map_err(BoxedError::new) })
    }
}

/// Adapts any [`PushTransport`] to the type-erased [`SharedTransport`].
pub struct ErasedTransport<T>(pub T);

impl<T: PushTransport> PushTransport for ErasedTransport<T> {
    type Error = BoxedError;

    fn send(&self, token: &str, message: PushMessage) -> BoxFuture<'_, String, Self::Error> {
        let delivery = self.0.send(token, message);
        Box::pin(async move { delivery.await.map_err(BoxedError::new) })
    }
}

pub fn share_directory<D: UserDirectory + 'static>(directory: D) -> SharedDirectory {
    Arc::new(ErasedDirectory(directory))
}

pub fn share_transport<T: PushTransport + 'static>(transport: T) -> SharedTransport {
    Arc::new(ErasedTransport(transport))
}
