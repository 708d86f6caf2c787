//! Error types for confessly.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === Not Found ===
    #[error("not found: {0}")]
    NotFound(String),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("guest user not found: {0}")]
    GuestNotFound(String),

    #[error("confession not found")]
    ConfessionNotFound,

    #[error("report not found: {0}")]
    ReportNotFound(String),

    // === Invalid Input ===
    #[error("{0}")]
    BadRequest(String),

    #[error("validation error: {0}")]
    Validation(String),

    // === Duplicates and guards ===
    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("you have already reported this confession")]
    AlreadyReported,

    #[error("{0} is already banned")]
    AlreadyBanned(String),

    #[error("{0} is not banned")]
    NotBanned(String),

    // === Identity ===
    #[error("incorrect username or password")]
    InvalidCredentials,

    #[error("unauthorized")]
    Unauthorized,

    #[error("{0}")]
    InvalidToken(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("your account has been banned")]
    UserBanned,

    #[error("your guest account has been banned")]
    GuestBanned,

    #[error("you cannot ban yourself")]
    CannotBanSelf,

    #[error("you cannot ban other administrators")]
    CannotBanAdmin,

    // === Server Errors ===
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            // 4xx Client Errors
            Self::NotFound(_)
            | Self::UserNotFound(_)
            | Self::GuestNotFound(_)
            | Self::ConfessionNotFound
            | Self::ReportNotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_)
            | Self::Validation(_)
            | Self::AlreadyExists(_)
            | Self::AlreadyReported
            | Self::AlreadyBanned(_)
            | Self::NotBanned(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthorized | Self::InvalidToken(_) => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden(_)
            | Self::UserBanned
            | Self::GuestBanned
            | Self::CannotBanSelf
            | Self::CannotBanAdmin => StatusCode::FORBIDDEN,

            // 5xx Server Errors
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::GuestNotFound(_) => "GUEST_NOT_FOUND",
            Self::ConfessionNotFound => "CONFESSION_NOT_FOUND",
            Self::ReportNotFound(_) => "REPORT_NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::AlreadyReported => "ALREADY_REPORTED",
            Self::AlreadyBanned(_) => "ALREADY_BANNED",
            Self::NotBanned(_) => "NOT_BANNED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::UserBanned => "USER_BANNED",
            Self::GuestBanned => "GUEST_BANNED",
            Self::CannotBanSelf => "CANNOT_BAN_SELF",
            Self::CannotBanAdmin => "CANNOT_BAN_ADMIN",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether this error should be logged at error level.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Message shown to the client. Server-side details stay in the logs.
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.is_server_error() {
            "internal server error".to_string()
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if self.is_server_error() {
            tracing::error!(error = %self, code = code, "Server error occurred");
        } else {
            tracing::debug!(error = %self, code = code, "Client error occurred");
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.public_message(),
            }
        }));

        (status, body).into_response()
    }
}

// === From implementations ===

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
