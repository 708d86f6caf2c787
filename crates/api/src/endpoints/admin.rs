//! Admin/Moderation endpoints.
//!
//! Every handler passes the caller to the moderation service, which
//! refuses non-admin principals.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use confessly_common::AppResult;
use confessly_core::UpdateReportInput;
use confessly_db::entities::{guest_user, report, user};
use serde::Serialize;

use crate::{
    extractors::{AuthUser, JsonBody, parse_id, parse_uuid},
    middleware::AppState,
    response::MessageResponse,
};

#[derive(Serialize)]
pub struct ReportsResponse {
    pub reports: Vec<report::Model>,
}

#[derive(Serialize)]
pub struct ReportResponse {
    pub report: report::Model,
}

#[derive(Serialize)]
pub struct UsersResponse {
    pub users: Vec<user::Model>,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub user: user::Model,
}

#[derive(Serialize)]
pub struct GuestUsersResponse {
    pub guest_users: Vec<guest_user::Model>,
}

#[derive(Serialize)]
pub struct GuestUserResponse {
    pub guest_user: guest_user::Model,
}

// ==================== Reports ====================

async fn list_reports(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
) -> AppResult<Json<ReportsResponse>> {
    let reports = state.moderation_service.list_reports(&admin).await?;
    Ok(Json(ReportsResponse { reports }))
}

async fn get_report(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ReportResponse>> {
    let id = parse_id(&id)?;
    let report = state.moderation_service.get_report(&admin, id).await?;
    Ok(Json(ReportResponse { report }))
}

async fn update_report(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateReportInput>,
) -> AppResult<MessageResponse> {
    let id = parse_id(&id)?;
    state
        .moderation_service
        .update_report_status(&admin, id, input)
        .await?;
    Ok(MessageResponse::new("Report updated successfully"))
}

// ==================== Users ====================

async fn list_users(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
) -> AppResult<Json<UsersResponse>> {
    let users = state.moderation_service.list_users(&admin).await?;
    Ok(Json(UsersResponse { users }))
}

async fn get_user(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let id = parse_id(&id)?;
    let user = state.moderation_service.get_user(&admin, id).await?;
    Ok(Json(UserResponse { user }))
}

async fn ban_user(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    Path(id): Path<String>,
) -> AppResult<MessageResponse> {
    let id = parse_id(&id)?;
    state.moderation_service.ban_user(&admin, id).await?;
    Ok(MessageResponse::new("User banned successfully"))
}

async fn unban_user(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    Path(id): Path<String>,
) -> AppResult<MessageResponse> {
    let id = parse_id(&id)?;
    state.moderation_service.unban_user(&admin, id).await?;
    Ok(MessageResponse::new("User unbanned successfully"))
}

// ==================== Guests ====================

async fn list_guests(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
) -> AppResult<Json<GuestUsersResponse>> {
    let guest_users = state.moderation_service.list_guests(&admin).await?;
    Ok(Json(GuestUsersResponse { guest_users }))
}

async fn get_guest(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    Path(uuid): Path<String>,
) -> AppResult<Json<GuestUserResponse>> {
    let uuid = parse_uuid(&uuid)?;
    let guest_user = state.moderation_service.get_guest(&admin, uuid).await?;
    Ok(Json(GuestUserResponse { guest_user }))
}

async fn ban_guest(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    Path(uuid): Path<String>,
) -> AppResult<MessageResponse> {
    let uuid = parse_uuid(&uuid)?;
    state.moderation_service.ban_guest(&admin, uuid).await?;
    Ok(MessageResponse::new("Guest user banned successfully"))
}

async fn unban_guest(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    Path(uuid): Path<String>,
) -> AppResult<MessageResponse> {
    let uuid = parse_uuid(&uuid)?;
    state.moderation_service.unban_guest(&admin, uuid).await?;
    Ok(MessageResponse::new("Guest user unbanned successfully"))
}

// ==================== Content ====================

async fn delete_confession(
    State(state): State<AppState>,
    AuthUser(admin): AuthUser,
    Path(id): Path<String>,
) -> AppResult<MessageResponse> {
    let id = parse_id(&id)?;
    state.moderation_service.delete_confession(&admin, id).await?;
    Ok(MessageResponse::new("Confession deleted successfully by admin"))
}

pub fn router() -> Router<AppState> {
    Router::new()
        // Reports
        .route("/reports", get(list_reports))
        .route("/reports/{id}", get(get_report).put(update_report))
        // Users
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/ban", post(ban_user))
        .route("/users/{id}/unban", post(unban_user))
        // Guests
        .route("/guests", get(list_guests))
        .route("/guests/{uuid}", get(get_guest))
        .route("/guests/{uuid}/ban", post(ban_guest))
        .route("/guests/{uuid}/unban", post(unban_guest))
        // Content
        .route("/confessions/{id}", delete(delete_confession))
}
