// File: crates/academichub_notify/src/doc.rs

#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::conditions::SkipReason;
use crate::dispatcher::Outcome;
use crate::events::{EventEnvelope, ManualPushRequest};
use crate::handlers::{
    CallableError, CallableErrorResponse, CallableRequest, CallableResponse, SendPushResult,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::event_handler,
        crate::handlers::send_push_notification_handler
    ),
    components(schemas(
        EventEnvelope,
        Outcome,
        SkipReason,
        CallableRequest,
        ManualPushRequest,
        CallableResponse,
        SendPushResult,
        CallableErrorResponse,
        CallableError
    )),
    tags(
        (name = "Notify", description = "Push notifications for comments, likes, friend requests and manual sends")
    )
)]
pub struct NotifyApiDoc;
