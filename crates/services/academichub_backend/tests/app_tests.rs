use academichub_backend::{build_app, service_factory::NotifyServices, WELCOME};
use academichub_common::{share_directory, share_transport};
use academichub_config::AppConfig;
use academichub_notify::memory::{MemoryDirectory, RecordingTransport};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

fn services(transport: &RecordingTransport) -> NotifyServices {
    NotifyServices::new(
        share_directory(MemoryDirectory::new().with_token("alice", "device-alice")),
        share_transport(transport.clone()),
    )
}

#[tokio::test]
async fn test_welcome_route() {
    let app = build_app(Arc::new(AppConfig::default()), None);

    let response = app
        .oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], WELCOME.as_bytes());
}

#[tokio::test]
async fn test_push_routes_are_nested_under_api() {
    let transport = RecordingTransport::new();
    let app = build_app(Arc::new(AppConfig::default()), Some(services(&transport)));

    let request = Request::builder()
        .method("POST")
        .uri("/api/callable/sendPushNotification")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "data": { "targetUserId": "alice", "title": "Hi", "body": "there" } })
                .to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(transport.count(), 1);
}

#[tokio::test]
async fn test_push_routes_absent_without_services() {
    let app = build_app(Arc::new(AppConfig::default()), None);

    let request = Request::builder()
        .method("POST")
        .uri("/api/events")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "type": "comment.created" }).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_serves_under_concurrency_limit() {
    let mut config = AppConfig::default();
    config.server.max_concurrent_requests = 1;
    let app = build_app(Arc::new(config), None);

    let get = |app: axum::Router| async move {
        app.oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    };
    let (first, second) = tokio::join!(get(app.clone()), get(app.clone()));
    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);

    let mut config = AppConfig::default();
    config.server.max_concurrent_requests = 0;
    let app = build_app(Arc::new(config), None);
    assert_eq!(get(app).await, StatusCode::OK);
}
