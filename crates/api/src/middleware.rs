//! API middleware.

#![allow(missing_docs)]

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use confessly_common::{AppError, AppResult, config::AuthConfig};
use confessly_core::{ConfessionService, CredentialService, IdentityService, ModerationService};
use confessly_db::repositories::{
    ConfessionRepository, GuestUserRepository, ReportRepository, UserRepository,
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::extractors::bearer_token;

/// Name of the cookie carrying a guest's uuid.
pub const GUEST_COOKIE: &str = "guest_uuid";

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub credential_service: CredentialService,
    pub identity_service: IdentityService,
    pub confession_service: ConfessionService,
    pub moderation_service: ModerationService,
    pub guest_cookie_max_age: time::Duration,
}

impl AppState {
    /// Wire repositories and services over a shared connection pool.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>, auth: &AuthConfig) -> Self {
        let user_repo = UserRepository::new(Arc::clone(&db));
        let guest_repo = GuestUserRepository::new(Arc::clone(&db));
        let confession_repo = ConfessionRepository::new(Arc::clone(&db));
        let report_repo = ReportRepository::new(db);

        let credential_service = CredentialService::new(user_repo.clone(), auth);
        let identity_service =
            IdentityService::new(credential_service.clone(), user_repo.clone(), guest_repo.clone());
        let confession_service = ConfessionService::new(confession_repo.clone());
        let moderation_service =
            ModerationService::new(report_repo, user_repo, guest_repo, confession_repo);

        Self {
            credential_service,
            identity_service,
            confession_service,
            moderation_service,
            guest_cookie_max_age: cookie_max_age(auth.guest_cookie_max_age_days),
        }
    }
}

/// Cookie lifetime in days, saturating instead of overflowing.
#[must_use]
pub fn cookie_max_age(days: i64) -> time::Duration {
    time::Duration::seconds(days.saturating_mul(86_400))
}

/// Strict authentication for `/api` routes.
///
/// Rejects the request unless a valid bearer token resolves to an active
/// user; the resulting principal is stored in the request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> AppResult<Response> {
    let token = bearer_token(req.headers())?.ok_or(AppError::Unauthorized)?;
    let principal = state.identity_service.resolve_token(&token).await?;

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// Best-effort identity for `/public` routes.
///
/// Falls back to the guest cookie, minting a guest and setting the cookie
/// on the response when needed.
pub async fn resolve_viewer(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> AppResult<Response> {
    // A malformed header is treated like a missing one here
    let token = bearer_token(req.headers()).ok().flatten();
    let cookie = jar.get(GUEST_COOKIE).map(|c| c.value().to_string());

    let resolved = state
        .identity_service
        .resolve_best_effort(token.as_deref(), cookie.as_deref())
        .await?;

    req.extensions_mut().insert(resolved.principal);
    let response = next.run(req).await;

    Ok(match resolved.issued {
        Some(id) => (jar.add(guest_cookie(id, state.guest_cookie_max_age)), response).into_response(),
        None => response,
    })
}

/// Build the guest identity cookie.
#[must_use]
pub fn guest_cookie(id: Uuid, max_age: time::Duration) -> Cookie<'static> {
    Cookie::build((GUEST_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}
