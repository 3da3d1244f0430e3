// File: crates/academichub_notify/src/handlers.rs
use academichub_common::{handle_json_result, AcademicHubError, HttpStatusCode};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::dispatcher::{Dispatcher, Outcome};
use crate::error::NotifyError;
use crate::events::{EventEnvelope, ManualPushRequest};

/// Shared state of the notification routes
#[derive(Clone)]
pub struct NotifyState {
    pub dispatcher: Dispatcher,
}

/// Request envelope of a callable function: the arguments sit under `data`.
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CallableRequest {
    #[serde(default)]
    pub data: Option<ManualPushRequest>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SendPushResult {
    pub success: bool,
}

/// Successful callable response, `{"result": {...}}`
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CallableResponse {
    pub result: SendPushResult,
}

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CallableError {
    /// `INVALID_ARGUMENT`, `NOT_FOUND` or `INTERNAL`
    pub status: String,
    pub message: String,
}

/// Failed callable response, `{"error": {"status": ..., "message": ...}}`
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CallableErrorResponse {
    pub error: CallableError,
}

fn callable_error(status: StatusCode, code: &str, message: String) -> Response {
    let body = CallableErrorResponse {
        error: CallableError {
            status: code.to_string(),
            message,
        },
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for NotifyError {
    /// Renders the error in the callable envelope.
    ///
    /// Directory and transport details are logged, never returned to the caller.
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match self {
            NotifyError::Directory(_) | NotifyError::Transport(_) => callable_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                self.callable_status(),
                "INTERNAL".to_string(),
            ),
            other => callable_error(status, other.callable_status(), other.to_string()),
        }
    }
}

/// Handler for document events forwarded by the event source.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/events", // Path relative to /api
    request_body = EventEnvelope,
    responses(
        (status = 200, description = "Event handled, a notification was sent or skipped", body = Outcome),
        (status = 404, description = "No handler for the event type"),
        (status = 500, description = "User directory unavailable"),
        (status = 502, description = "Push delivery failed")
    ),
    tag = "Notify"
))]
pub async fn event_handler(
    State(state): State<Arc<NotifyState>>,
    Json(envelope): Json<EventEnvelope>,
) -> Result<Json<Outcome>, Response> {
    let result = state.dispatcher.handle_event(&envelope).await;

    if let Err(e) = &result {
        error!("Failed to handle '{}' event: {}", envelope.event_type, e);
    }

    handle_json_result(result.map_err(AcademicHubError::from))
}

/// Callable function `sendPushNotification`: sends a custom notification to one user.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/callable/sendPushNotification",
    request_body = CallableRequest,
    responses(
        (status = 200, description = "Notification sent", body = CallableResponse,
         example = json!({ "result": { "success": true } })),
        (status = 400, description = "targetUserId, title or body missing", body = CallableErrorResponse,
         example = json!({ "error": { "status": "INVALID_ARGUMENT", "message": "targetUserId, title and body are required" } })),
        (status = 404, description = "Target user has no device token", body = CallableErrorResponse,
         example = json!({ "error": { "status": "NOT_FOUND", "message": "No FCM token for targetUserId" } })),
        (status = 500, description = "Lookup or delivery failed", body = CallableErrorResponse)
    ),
    tag = "Notify"
))]
pub async fn send_push_notification_handler(
    State(state): State<Arc<NotifyState>>,
    payload: Result<Json<CallableRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request.data.unwrap_or_default(),
        Err(rejection) => {
            warn!("Rejected callable request: {}", rejection.body_text());
            return callable_error(
                StatusCode::BAD_REQUEST,
                "INVALID_ARGUMENT",
                rejection.body_text(),
            );
        }
    };

    match state.dispatcher.send_manual_push(&request).await {
        Ok(message_id) => {
            info!("sendPushNotification delivered {}", message_id);
            Json(CallableResponse {
                result: SendPushResult { success: true },
            })
            .into_response()
        }
        Err(e) => {
            match &e {
                NotifyError::Directory(_) | NotifyError::Transport(_) => {
                    error!("sendPushNotification failed: {}", e)
                }
                _ => info!("sendPushNotification refused: {}", e),
            }
            e.into_response()
        }
    }
}
