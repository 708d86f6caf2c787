//! Liveness ping.

use axum::{Router, routing::get};

use crate::{middleware::AppState, response::MessageResponse};

async fn ping() -> MessageResponse {
    MessageResponse::new("Confessly server up and running")
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(ping))
}
