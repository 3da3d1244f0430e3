// File: services/academichub_backend/src/main.rs
use academichub_backend::{build_app, service_factory::firebase_services};
use academichub_common::{logging, AcademicHubError, Context};
use academichub_config::load_config;
use std::env;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), AcademicHubError> {
    let level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    logging::init_with_level(logging::level_from_str(&level));

    let config = Arc::new(load_config().context("Failed to load config")?);
    let services = firebase_services(&config)?;
    let app = build_app(config.clone(), services);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;
    Ok(())
}
