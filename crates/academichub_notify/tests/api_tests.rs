use academichub_common::{share_directory, share_transport};
use academichub_config::AppConfig;
use academichub_notify::memory::{MemoryDirectory, RecordingTransport};
use academichub_notify::routes::routes;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

// Builds the notify router over in-memory users; returns the transport handle to count sends
fn create_app(directory: MemoryDirectory) -> (Router, RecordingTransport) {
    let transport = RecordingTransport::new();
    let app = routes(
        Arc::new(AppConfig::default()),
        share_directory(directory),
        share_transport(transport.clone()),
    );
    (app, transport)
}

fn users() -> MemoryDirectory {
    MemoryDirectory::new()
        .with_token("alice", "device-alice")
        .with_token("bob", "device-bob")
        .with_post("t1", "p1", "alice")
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_comment_event_sends_one_notification() {
    let (app, transport) = create_app(users());

    let (status, body) = post_json(
        app,
        "/events",
        json!({
            "type": "comment.created",
            "params": { "topicId": "t1", "postId": "p1", "commentId": "c9" },
            "value": { "authorId": "bob", "text": "Which chapter is this from?" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "sent");
    assert_eq!(body["message_id"], "memory/messages/1");

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].token, "device-alice");
    assert_eq!(sent[0].message.body, "Which chapter is this from?");
}

#[tokio::test]
async fn test_long_comment_is_truncated() {
    let (app, transport) = create_app(users());
    let text = "a".repeat(101);

    post_json(
        app,
        "/events",
        json!({
            "type": "comment.created",
            "params": { "topicId": "t1", "postId": "p1", "commentId": "c1" },
            "value": { "authorId": "bob", "text": text }
        }),
    )
    .await;

    assert_eq!(transport.sent()[0].message.body, format!("{}…", "a".repeat(100)));
}

#[tokio::test]
async fn test_skipped_event_reports_reason() {
    let (app, transport) = create_app(users());

    let (status, body) = post_json(
        app,
        "/events",
        json!({
            "type": "post.updated",
            "params": { "topicId": "t1", "postId": "p1" },
            "before": { "likeCount": 5, "author": "alice" },
            "after": { "likeCount": 5, "author": "alice" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "outcome": "skipped", "reason": "no_like_increase" }));
    assert_eq!(transport.count(), 0);
}

#[tokio::test]
async fn test_null_params_are_treated_as_absent() {
    let (app, transport) = create_app(users());

    let (status, body) = post_json(
        app,
        "/events",
        json!({ "type": "post.updated", "params": null, "before": null, "after": null }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "skipped");
    assert_eq!(transport.count(), 0);
}

#[tokio::test]
async fn test_fractional_like_increase_is_sent() {
    let (app, transport) = create_app(users());

    let (status, body) = post_json(
        app,
        "/events",
        json!({
            "type": "post.updated",
            "params": { "topicId": "t1", "postId": "p1" },
            "before": { "likeCount": 1, "author": "alice" },
            "after": { "likeCount": 1.5, "author": "alice" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "sent");
    assert_eq!(transport.sent()[0].message.body, "Your post now has 1.5 likes.");
}

#[tokio::test]
async fn test_friend_request_event() {
    let (app, transport) = create_app(users());

    let (status, _) = post_json(
        app,
        "/events",
        json!({
            "type": "friend_request.created",
            "params": { "toUid": "bob", "requesterUid": "alice" },
            "value": { "name": "   " }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].token, "device-bob");
    assert_eq!(sent[0].message.title, "Someone sent you a friend request");
    assert_eq!(sent[0].message.data["friendId"], "alice");
}

#[tokio::test]
async fn test_unknown_event_type_is_404() {
    let (app, transport) = create_app(users());

    let (status, body) = post_json(app, "/events", json!({ "type": "user.deleted" })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 404);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("user.deleted"));
    assert_eq!(transport.count(), 0);
}

#[tokio::test]
async fn test_directory_failure_is_5xx() {
    let (app, transport) = create_app(users().offline());

    let (status, body) = post_json(
        app,
        "/events",
        json!({
            "type": "friend_request.created",
            "params": { "toUid": "bob", "requesterUid": "alice" },
            "value": {}
        }),
    )
    .await;

    assert!(status.is_server_error());
    assert_eq!(body["error"]["code"], status.as_u16());
    assert_eq!(transport.count(), 0);
}

#[tokio::test]
async fn test_callable_success() {
    let (app, transport) = create_app(users());

    let (status, body) = post_json(
        app,
        "/callable/sendPushNotification",
        json!({ "data": { "targetUserId": "bob", "title": "Reminder", "body": "Quiz at 10" } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "result": { "success": true } }));

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].message.title, "Reminder");
    assert_eq!(sent[0].message.body, "Quiz at 10");
    assert_eq!(sent[0].message.data["targetUserId"], "bob");
}

#[tokio::test]
async fn test_callable_missing_field() {
    let (app, transport) = create_app(users());

    let (status, body) = post_json(
        app,
        "/callable/sendPushNotification",
        json!({ "data": { "targetUserId": "bob", "title": "Reminder" } }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": {
            "status": "INVALID_ARGUMENT",
            "message": "targetUserId, title and body are required"
        } })
    );
    assert_eq!(transport.count(), 0);
}

#[tokio::test]
async fn test_callable_without_data() {
    let (app, transport) = create_app(users());

    let (status, body) =
        post_json(app, "/callable/sendPushNotification", json!({ "data": null })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["status"], "INVALID_ARGUMENT");
    assert_eq!(transport.count(), 0);
}

#[tokio::test]
async fn test_callable_unknown_target() {
    let (app, transport) = create_app(users());

    let (status, body) = post_json(
        app,
        "/callable/sendPushNotification",
        json!({ "data": { "targetUserId": "nobody", "title": "Hi", "body": "there" } }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "error": { "status": "NOT_FOUND", "message": "No FCM token for targetUserId" } })
    );
    assert_eq!(transport.count(), 0);
}

#[tokio::test]
async fn test_callable_malformed_body() {
    let (app, _) = create_app(users());

    let request = Request::builder()
        .method("POST")
        .uri("/callable/sendPushNotification")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
