//! API endpoints.

mod admin;
mod auth;
mod confessions;
mod health;
mod reports;

use axum::{Router, middleware::from_fn_with_state};

use crate::middleware::{AppState, require_auth, resolve_viewer};

/// Create the API router.
///
/// `/public` routes resolve identity best-effort (guest fallback); `/api`
/// routes require a valid bearer token.
pub fn router(state: &AppState) -> Router<AppState> {
    let public = confessions::public_router()
        .route_layer(from_fn_with_state(state.clone(), resolve_viewer));

    let api = Router::new()
        .merge(confessions::api_router())
        .merge(reports::router())
        .nest("/admin", admin::router())
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(health::router())
        .nest("/auth", auth::router())
        .nest("/public", public)
        .nest("/api", api)
}
