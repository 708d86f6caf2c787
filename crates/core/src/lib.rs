//! Core business logic for confessly.

pub mod policy;
pub mod principal;
pub mod services;
pub mod visibility;

pub use policy::{Action, decide};
pub use principal::Principal;
pub use services::*;
pub use visibility::{ConfessionView, redact};
