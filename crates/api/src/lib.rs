//! HTTP API layer for confessly.
//!
//! - **Endpoints**: public, authenticated and admin routes
//! - **Middleware**: identity resolution and guest cookie issuance
//! - **Extractors**: the resolved [`confessly_core::Principal`]
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
