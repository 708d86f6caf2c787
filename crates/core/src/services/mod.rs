//! Business logic services.

#![allow(missing_docs)]

pub mod confession;
pub mod credential;
pub mod identity;
pub mod moderation;

pub use confession::{ConfessionService, CreateConfessionInput, UpdateConfessionInput};
pub use credential::{Claims, CredentialService, LoginInput, RegisterInput};
pub use identity::{GuestResolution, IdentityService};
pub use moderation::{CreateReportInput, ModerationService, ReportStatus, UpdateReportInput};
