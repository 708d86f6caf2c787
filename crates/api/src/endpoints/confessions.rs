//! Confession endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use confessly_common::AppResult;
use confessly_core::{ConfessionView, CreateConfessionInput, UpdateConfessionInput};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{AuthUser, JsonBody, QueryParams, Viewer, parse_id},
    middleware::AppState,
    response::{Created, MessageResponse},
};

/// Search query string.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// List of confessions.
#[derive(Serialize)]
pub struct ConfessionsResponse {
    pub confessions: Vec<ConfessionView>,
}

/// Single confession.
#[derive(Serialize)]
pub struct ConfessionResponse {
    pub confession: ConfessionView,
}

/// List every confession, newest first.
async fn list_confessions(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
) -> AppResult<Json<ConfessionsResponse>> {
    let confessions = state.confession_service.list(&viewer).await?;
    Ok(Json(ConfessionsResponse { confessions }))
}

/// Show one confession.
async fn get_confession(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(id): Path<String>,
) -> AppResult<Json<ConfessionResponse>> {
    let id = parse_id(&id)?;
    let confession = state.confession_service.get(&viewer, id).await?;
    Ok(Json(ConfessionResponse { confession }))
}

/// Search titles as a public viewer.
async fn search_public(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    QueryParams(query): QueryParams<SearchQuery>,
) -> AppResult<Json<ConfessionsResponse>> {
    let confessions = state.confession_service.search(&viewer, &query.q).await?;
    Ok(Json(ConfessionsResponse { confessions }))
}

/// Search titles as an authenticated user.
async fn search_authenticated(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    QueryParams(query): QueryParams<SearchQuery>,
) -> AppResult<Json<ConfessionsResponse>> {
    let confessions = state.confession_service.search(&principal, &query.q).await?;
    Ok(Json(ConfessionsResponse { confessions }))
}

/// Post a confession as a user or guest.
async fn create_confession(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    JsonBody(input): JsonBody<CreateConfessionInput>,
) -> AppResult<Created<MessageResponse>> {
    state.confession_service.create(&viewer, input).await?;
    Ok(Created(MessageResponse::new("Confession created successfully")))
}

/// Edit one's own confession.
async fn update_confession(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateConfessionInput>,
) -> AppResult<MessageResponse> {
    let id = parse_id(&id)?;
    state.confession_service.update(&principal, id, input).await?;
    Ok(MessageResponse::new("Confession updated successfully"))
}

/// Delete one's own confession.
async fn delete_confession(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    Path(id): Path<String>,
) -> AppResult<MessageResponse> {
    let id = parse_id(&id)?;
    state.confession_service.delete(&principal, id).await?;
    Ok(MessageResponse::new("Confession deleted successfully"))
}

/// Routes mounted under `/public`.
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route(
            "/confessions",
            get(list_confessions).post(create_confession),
        )
        .route("/confessions/search", get(search_public))
        .route("/confessions/{id}", get(get_confession))
}

/// Routes mounted under `/api`.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/confessions/search", get(search_authenticated))
        .route(
            "/confessions/{id}",
            put(update_confession).delete(delete_confession),
        )
}
