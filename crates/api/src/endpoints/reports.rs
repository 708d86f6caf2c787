//! Report endpoints.

use axum::{Router, extract::State, routing::post};
use confessly_common::AppResult;
use confessly_core::CreateReportInput;

use crate::{
    extractors::{AuthUser, JsonBody},
    middleware::AppState,
    response::{Created, MessageResponse},
};

/// Report a confession.
async fn create_report(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    JsonBody(input): JsonBody<CreateReportInput>,
) -> AppResult<Created<MessageResponse>> {
    state
        .moderation_service
        .create_report(&principal, input)
        .await?;
    Ok(Created(MessageResponse::new("Report created successfully")))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/reports", post(create_report))
}
