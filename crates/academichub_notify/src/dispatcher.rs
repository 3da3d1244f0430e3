//! The notification pipeline.
//!
//! Every invocation runs the same one-shot sequence: evaluate the condition,
//! look up the recipient's delivery token, compose the message and hand it
//! to the push transport once. Nothing is kept between invocations.
//!
//! Document events are routed through an [`EventTable`], a fixed mapping
//! from event tag to handler function.

use academichub_common::{BoxFuture, PushMessage, SharedDirectory, SharedTransport};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::composer::Composer;
use crate::conditions::{
    comment_condition, friend_request_condition, like_condition, manual_push_condition,
    SkipReason, Verdict,
};
use crate::error::NotifyError;
use crate::events::{
    CommentCreated, EventEnvelope, EventKind, FriendRequestCreated, ManualPushRequest,
    PostUpdated,
};

/// What a handled event led to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// One message was accepted by the transport
    Sent { message_id: String },
    /// The event did not qualify for a notification
    Skipped { reason: SkipReason },
}

/// Signature shared by all document event handlers
pub type EventHandler =
    for<'a> fn(&'a Dispatcher, &'a EventEnvelope) -> BoxFuture<'a, Outcome, NotifyError>;

/// Maps event tags to their handler functions.
#[derive(Clone)]
pub struct EventTable {
    handlers: HashMap<&'static str, EventHandler>,
}

impl EventTable {
    /// The subscriptions of the AcademicHub app.
    pub fn standard() -> Self {
        let mut table = Self {
            handlers: HashMap::new(),
        };
        table.register(EventKind::CommentCreated, handle_comment_created);
        table.register(EventKind::PostUpdated, handle_post_updated);
        table.register(EventKind::FriendRequestCreated, handle_friend_request_created);
        table
    }

    pub fn register(&mut self, kind: EventKind, handler: EventHandler) {
        self.handlers.insert(kind.as_str(), handler);
    }

    pub fn get(&self, event_type: &str) -> Option<EventHandler> {
        self.handlers.get(event_type).copied()
    }

    /// Registered tags, sorted
    pub fn event_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.handlers.keys().copied().collect();
        types.sort_unstable();
        types
    }
}

impl Default for EventTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn handle_comment_created<'a>(
    dispatcher: &'a Dispatcher,
    envelope: &'a EventEnvelope,
) -> BoxFuture<'a, Outcome, NotifyError> {
    Box::pin(dispatcher.on_comment_created(CommentCreated::from_envelope(envelope)))
}

fn handle_post_updated<'a>(
    dispatcher: &'a Dispatcher,
    envelope: &'a EventEnvelope,
) -> BoxFuture<'a, Outcome, NotifyError> {
    Box::pin(dispatcher.on_post_updated(PostUpdated::from_envelope(envelope)))
}

fn handle_friend_request_created<'a>(
    dispatcher: &'a Dispatcher,
    envelope: &'a EventEnvelope,
) -> BoxFuture<'a, Outcome, NotifyError> {
    Box::pin(dispatcher.on_friend_request_created(FriendRequestCreated::from_envelope(envelope)))
}

fn skipped(event: EventKind, reason: SkipReason) -> Outcome {
    debug!("Skipping {} notification: {}", event, reason);
    Outcome::Skipped { reason }
}

/// Runs the notification pipeline against a directory and a transport.
#[derive(Clone)]
pub struct Dispatcher {
    directory: SharedDirectory,
    transport: SharedTransport,
    composer: Composer,
    table: EventTable,
}

impl Dispatcher {
    pub fn new(directory: SharedDirectory, transport: SharedTransport, composer: Composer) -> Self {
        Self {
            directory,
            transport,
            composer,
            table: EventTable::standard(),
        }
    }

    pub fn with_table(mut self, table: EventTable) -> Self {
        self.table = table;
        self
    }

    pub fn table(&self) -> &EventTable {
        &self.table
    }

    /// Routes a document event to the handler registered for its tag.
    pub async fn handle_event(&self, envelope: &EventEnvelope) -> Result<Outcome, NotifyError> {
        let handler = self
            .table
            .get(&envelope.event_type)
            .ok_or_else(|| NotifyError::UnknownEvent(envelope.event_type.clone()))?;

        handler(self, envelope).await
    }

    pub async fn on_comment_created(&self, event: CommentCreated) -> Result<Outcome, NotifyError> {
        let post_author = self
            .directory
            .post_author(&event.topic_id, &event.post_id)
            .await
            .map_err(NotifyError::Directory)?;

        let target = match comment_condition(&event, post_author.as_deref()) {
            Verdict::Notify(target) => target,
            Verdict::Skip(reason) => return Ok(skipped(EventKind::CommentCreated, reason)),
        };

        self.deliver(EventKind::CommentCreated, &target.recipient, || {
            self.composer.comment(&event)
        })
        .await
    }

    pub async fn on_post_updated(&self, event: PostUpdated) -> Result<Outcome, NotifyError> {
        let target = match like_condition(&event) {
            Verdict::Notify(target) => target,
            Verdict::Skip(reason) => return Ok(skipped(EventKind::PostUpdated, reason)),
        };

        self.deliver(EventKind::PostUpdated, &target.recipient, || {
            self.composer.like(&event, &target)
        })
        .await
    }

    pub async fn on_friend_request_created(
        &self,
        event: FriendRequestCreated,
    ) -> Result<Outcome, NotifyError> {
        let target = match friend_request_condition(&event) {
            Verdict::Notify(target) => target,
            Verdict::Skip(reason) => {
                return Ok(skipped(EventKind::FriendRequestCreated, reason))
            }
        };

        self.deliver(EventKind::FriendRequestCreated, &target.recipient, || {
            self.composer.friend_request(&event, &target)
        })
        .await
    }

    /// Sends a caller-supplied notification to one user.
    ///
    /// Unlike document events, every precondition failure is an error here:
    /// missing fields are [`NotifyError::InvalidArgument`] and a user without
    /// a token is [`NotifyError::MissingToken`].
    pub async fn send_manual_push(&self, request: &ManualPushRequest) -> Result<String, NotifyError> {
        let push = manual_push_condition(request).map_err(|_| NotifyError::missing_fields())?;

        let token = self
            .directory
            .delivery_token(&push.target_user_id)
            .await
            .map_err(NotifyError::Directory)?
            .ok_or_else(NotifyError::missing_token)?;

        let message_id = self.send(&token, self.composer.manual(&push)).await?;
        info!(
            "Manual push sent to {} ({})",
            push.target_user_id, message_id
        );
        Ok(message_id)
    }

    /// Looks up the recipient's token and, if there is one, composes and sends.
    async fn deliver<F>(
        &self,
        event: EventKind,
        recipient: &str,
        compose: F,
    ) -> Result<Outcome, NotifyError>
    where
        F: FnOnce() -> PushMessage,
    {
        let token = self
            .directory
            .delivery_token(recipient)
            .await
            .map_err(NotifyError::Directory)?;

        let Some(token) = token else {
            return Ok(skipped(event, SkipReason::NoToken));
        };

        let message_id = self.send(&token, compose()).await?;
        info!("Sent {} notification to {} ({})", event, recipient, message_id);
        Ok(Outcome::Sent { message_id })
    }

    async fn send(&self, token: &str, message: PushMessage) -> Result<String, NotifyError> {
        self.transport
            .send(token, message)
            .await
            .map_err(NotifyError::Transport)
    }
}
