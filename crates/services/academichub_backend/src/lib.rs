// File: services/academichub_backend/src/lib.rs
use academichub_config::AppConfig;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::trace::TraceLayer;

pub mod service_factory;

use service_factory::NotifyServices;

pub const WELCOME: &str = "Welcome to the AcademicHub push API!";

/// Assembles the HTTP application: everything lives under `/api`.
///
/// The push routes are only mounted when `services` is present. A non-zero
/// `server.max_concurrent_requests` caps in-flight requests over all routes.
pub fn build_app(config: Arc<AppConfig>, services: Option<NotifyServices>) -> Router {
    let max_concurrent = config.server.max_concurrent_requests;
    let mut api_router = Router::new().route("/", get(|| async { WELCOME }));

    if let Some(services) = services {
        api_router = api_router.merge(academichub_notify::routes(
            config,
            services.directory,
            services.transport,
        ));
    }

    let mut app = Router::new().nest("/api", api_router);

    #[cfg(feature = "openapi")]
    {
        use academichub_notify::doc::NotifyApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "AcademicHub Push API",
                version = "0.1.0",
                description = "Push notifications for comments, likes, friend requests and manual sends"
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(NotifyApiDoc::openapi());
        tracing::info!("Adding Swagger UI at /api/docs");

        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    if max_concurrent > 0 {
        tracing::debug!("Limiting to {} concurrent requests", max_concurrent);
        app = app.layer(GlobalConcurrencyLimitLayer::new(max_concurrent));
    }

    app.layer(TraceLayer::new_for_http())
}
