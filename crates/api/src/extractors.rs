//! Request extractors.

use axum::{
    extract::{FromRequest, FromRequestParts},
    http::{HeaderMap, request::Parts},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use confessly_common::{AppError, AppResult};
use confessly_core::Principal;
use uuid::Uuid;

/// Read the bearer token from the `Authorization` header.
///
/// `Ok(None)` when the header is absent; an error when it is present but
/// not a well-formed, non-empty bearer credential.
pub fn bearer_token(headers: &HeaderMap) -> AppResult<Option<String>> {
    match headers.typed_try_get::<Authorization<Bearer>>() {
        Ok(Some(auth)) if !auth.token().trim().is_empty() => Ok(Some(auth.token().to_string())),
        Ok(Some(_)) => Err(AppError::InvalidToken("empty bearer token".to_string())),
        Ok(None) => Ok(None),
        Err(_) => Err(AppError::InvalidToken(
            "invalid authorization header".to_string(),
        )),
    }
}

/// Authenticated principal, set by [`crate::middleware::require_auth`].
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Principal>() {
            Some(principal @ Principal::Authenticated { .. }) => Ok(Self(principal.clone())),
            _ => Err(AppError::Unauthorized),
        }
    }
}

/// Whoever is viewing a public route, set by
/// [`crate::middleware::resolve_viewer`].
#[derive(Debug, Clone)]
pub struct Viewer(pub Principal);

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .extensions
                .get::<Principal>()
                .cloned()
                .unwrap_or(Principal::Anonymous),
        ))
    }
}

/// JSON body whose rejections use the application error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Query string whose rejections use the application error envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);

/// Parse a positive integer path id.
pub fn parse_id(raw: &str) -> AppResult<i32> {
    raw.parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest("invalid id".to_string()))
}

/// Parse a guest uuid path segment.
pub fn parse_uuid(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("invalid id".to_string()))
}
