// --- File: crates/academichub_notify/src/routes.rs ---
use axum::{routing::post, Router};
use std::sync::Arc;

use crate::composer::Composer;
use crate::dispatcher::Dispatcher;
use crate::handlers::{event_handler, send_push_notification_handler, NotifyState};
use academichub_common::{SharedDirectory, SharedTransport};
use academichub_config::AppConfig;

/// Creates a router containing all routes for push notifications.
pub fn routes(
    config: Arc<AppConfig>,
    directory: SharedDirectory,
    transport: SharedTransport,
) -> Router {
    let dispatcher = Dispatcher::new(directory, transport, Composer::from_config(&config.notify));
    router(dispatcher)
}

/// Router over an already assembled dispatcher.
pub fn router(dispatcher: Dispatcher) -> Router {
    let state = Arc::new(NotifyState { dispatcher });

    Router::new()
        .route("/events", post(event_handler))
        .route(
            "/callable/sendPushNotification",
            post(send_push_notification_handler),
        )
        .with_state(state)
}
