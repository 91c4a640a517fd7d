use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use laundromat::config::AppConfig;
use laundromat::handlers;
use laundromat::services::mail::smtp::SmtpMailer;
use laundromat::services::mail::Mailer;
use laundromat::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let state = Arc::new(AppState {
        config: config.clone(),
        mailer: Box::new(SmtpMailer::new(config.clone())),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api/appointment",
            post(handlers::appointment::submit_appointment),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::clone(&state));

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");
    tracing::info!(recipient = %config.email_to, "appointment requests will be emailed");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Must not delay accepting connections.
    tokio::spawn(async move {
        state.mailer.verify().await;
    });

    axum::serve(listener, app).await?;

    Ok(())
}
