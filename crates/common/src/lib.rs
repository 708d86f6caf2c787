//! Common utilities and shared types for confessly.
//!
//! This crate provides foundational components used across all confessly crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: Guest identifiers via [`IdGenerator`]
//!
//! # Example
//!
//! ```no_run
//! use confessly_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let guest_id = id_gen.generate_guest_id();
//!     println!("Listening on port {} for guest {}", config.server.port, guest_id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
