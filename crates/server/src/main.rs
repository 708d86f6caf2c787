//! Confessly server entry point.

use std::sync::Arc;
use std::time::Duration;

use confessly_api::{AppState, router as api_router};
use confessly_common::{Config, config::LoggingConfig};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "confessly=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Configuration decides the log format, so it loads first
    let config = Config::load()?;
    init_tracing(&config.logging);

    info!("Starting confessly server...");

    let db = confessly_db::init(&config).await?;
    info!("Connected to database");

    info!("Running database migrations...");
    confessly_db::migrate(&db).await?;
    info!("Migrations completed");

    let db = Arc::new(db);
    let state = AppState::new(Arc::clone(&db), &config.auth);

    state
        .credential_service
        .ensure_admin(&config.admin)
        .await?;

    let app = api_router(&state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr = config.bind_address();
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router and its state are dropped once serving stops
    match Arc::try_unwrap(db) {
        Ok(db) => confessly_db::close(db).await?,
        Err(_) => tracing::warn!("Database handle still shared, skipping pool close"),
    }
    info!("Server shutdown complete");
    Ok(())
}
