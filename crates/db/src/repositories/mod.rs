//! Repositories wrapping entity queries.

mod confession;
mod guest_user;
mod report;
mod user;

pub use confession::{ConfessionRepository, NewConfession, SEARCH_LIMIT};
pub use guest_user::GuestUserRepository;
pub use report::ReportRepository;
pub use user::UserRepository;
