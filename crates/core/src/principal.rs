//! The acting identity of a request.

use confessly_db::entities::user::Role;
use uuid::Uuid;

/// Who is making a request.
///
/// A request resolves to exactly one variant. A valid bearer token always
/// wins over a guest cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// No credentials at all.
    Anonymous,
    /// Cookie-carried pseudo-identity. Guests never hold a role.
    Guest {
        /// Guest uuid.
        id: Uuid,
    },
    /// Registered user holding a verified session token.
    Authenticated {
        /// User id.
        id: i32,
        /// Username at the time the token was issued.
        username: String,
        /// Role claimed by the token.
        role: Role,
    },
}

impl Principal {
    /// Whether this principal holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(
            self,
            Self::Authenticated {
                role: Role::Admin,
                ..
            }
        )
    }

    /// Registered user id, if any.
    #[must_use]
    pub const fn user_id(&self) -> Option<i32> {
        match self {
            Self::Authenticated { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Guest uuid, if any.
    #[must_use]
    pub const fn guest_id(&self) -> Option<Uuid> {
        match self {
            Self::Guest { id } => Some(*id),
            _ => None,
        }
    }
}
