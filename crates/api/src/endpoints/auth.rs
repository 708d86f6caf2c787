//! Authentication endpoints.

use axum::{Json, Router, extract::State, routing::post};
use confessly_common::AppResult;
use confessly_core::{LoginInput, RegisterInput};
use serde::Serialize;

use crate::{
    extractors::JsonBody,
    middleware::AppState,
    response::{Created, MessageResponse},
};

/// Login response.
#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Create a new user account.
async fn register(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RegisterInput>,
) -> AppResult<Created<MessageResponse>> {
    state.credential_service.register(input).await?;
    Ok(Created(MessageResponse::new("User registered successfully")))
}

/// Exchange credentials for a session token.
async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginInput>,
) -> AppResult<Json<LoginResponse>> {
    let access_token = state.credential_service.login(input).await?;
    Ok(Json(LoginResponse { access_token }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
