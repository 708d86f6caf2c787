//! Authorization decisions.
//!
//! Pure functions over a [`Principal`] and an [`Action`]; nothing here
//! touches storage.

use confessly_common::{AppError, AppResult};
use confessly_db::entities::{confession, user};

use crate::principal::Principal;

const UPDATE_DENIED: &str = "you don't have permission to access this resource";
const DELETE_DENIED: &str = "you don't have permission to delete this confession";
const ADMIN_REQUIRED: &str = "administrator access required";

/// Something a principal attempts to do.
#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
    /// Read, list or search confessions.
    ReadConfession,
    /// Post a new confession.
    CreateConfession,
    /// Edit an existing confession.
    UpdateConfession(&'a confession::Model),
    /// Delete one's own confession.
    DeleteConfession(&'a confession::Model),
    /// File a report against a confession.
    CreateReport,
    /// Any administrative operation.
    Administer(AdminAction),
}

/// Operations reserved for administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    ViewReports,
    UpdateReport,
    ViewUsers,
    BanUser,
    UnbanUser,
    ViewGuests,
    BanGuest,
    UnbanGuest,
    DeleteAnyConfession,
}

/// Decide whether `principal` may perform `action`.
pub fn decide(principal: &Principal, action: Action<'_>) -> AppResult<()> {
    match action {
        Action::Administer(_) => {
            if principal.is_admin() {
                Ok(())
            } else {
                Err(AppError::Forbidden(ADMIN_REQUIRED.to_string()))
            }
        }
        Action::UpdateConfession(target) => require_owner(principal, target, UPDATE_DENIED),
        Action::DeleteConfession(target) => require_owner(principal, target, DELETE_DENIED),
        Action::CreateConfession => match principal {
            Principal::Anonymous => Err(AppError::Unauthorized),
            Principal::Guest { .. } | Principal::Authenticated { .. } => Ok(()),
        },
        Action::CreateReport => match principal {
            Principal::Authenticated { .. } => Ok(()),
            _ => Err(AppError::Unauthorized),
        },
        Action::ReadConfession => Ok(()),
    }
}

fn require_owner(
    principal: &Principal,
    target: &confession::Model,
    denied: &str,
) -> AppResult<()> {
    match principal {
        // Guest-owned confessions have no user id and never match
        Principal::Authenticated { id, .. } if target.is_owned_by_user(*id) => Ok(()),
        Principal::Authenticated { .. } => Err(AppError::Forbidden(denied.to_string())),
        Principal::Anonymous | Principal::Guest { .. } => Err(AppError::Unauthorized),
    }
}

/// Guard applied before an admin bans a registered user.
pub fn check_ban_target(actor: &Principal, target: &user::Model) -> AppResult<()> {
    if actor.user_id() == Some(target.id) {
        return Err(AppError::CannotBanSelf);
    }
    if target.role.is_admin() {
        return Err(AppError::CannotBanAdmin);
    }
    Ok(())
}
