//! Database entities.

#![allow(missing_docs)]

pub mod confession;
pub mod guest_user;
pub mod report;
pub mod user;

pub use confession::Entity as Confession;
pub use guest_user::Entity as GuestUser;
pub use report::Entity as Report;
pub use user::Entity as User;
