//! Moderation service: reports, bans and administrative deletion.

use confessly_common::{AppError, AppResult};
use confessly_db::{
    entities::{guest_user, report, user},
    repositories::{ConfessionRepository, GuestUserRepository, ReportRepository, UserRepository},
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::policy::{Action, AdminAction, check_ban_target, decide};
use crate::principal::Principal;

pub use confessly_db::entities::report::ReportStatus;

/// Input for filing a report.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReportInput {
    #[validate(range(min = 1))]
    pub confession_id: i32,

    #[validate(length(min = 1, max = 2000))]
    pub reason: String,
}

/// Input for reviewing a report.
#[derive(Debug, Deserialize)]
pub struct UpdateReportInput {
    pub status: ReportStatus,
}

/// Moderation service.
#[derive(Clone)]
pub struct ModerationService {
    report_repo: ReportRepository,
    user_repo: UserRepository,
    guest_repo: GuestUserRepository,
    confession_repo: ConfessionRepository,
}

impl ModerationService {
    /// Create a new moderation service.
    #[must_use]
    pub const fn new(
        report_repo: ReportRepository,
        user_repo: UserRepository,
        guest_repo: GuestUserRepository,
        confession_repo: ConfessionRepository,
    ) -> Self {
        Self {
            report_repo,
            user_repo,
            guest_repo,
            confession_repo,
        }
    }

    // ========== Reports ==========

    /// File a report. Each user may report a confession once.
    pub async fn create_report(
        &self,
        principal: &Principal,
        input: CreateReportInput,
    ) -> AppResult<report::Model> {
        decide(principal, Action::CreateReport)?;
        input.validate()?;
        let reporter_id = principal.user_id().ok_or(AppError::Unauthorized)?;

        let reason = input.reason.trim();
        if reason.is_empty() {
            return Err(AppError::BadRequest("report reason is required".to_string()));
        }

        let report = self
            .report_repo
            .create(reporter_id, input.confession_id, reason.to_string())
            .await?;

        tracing::info!(
            report_id = report.id,
            reporter_id,
            confession_id = report.confession_id,
            "Report filed"
        );
        Ok(report)
    }

    /// List all reports, newest first.
    pub async fn list_reports(&self, actor: &Principal) -> AppResult<Vec<report::Model>> {
        decide(actor, Action::Administer(AdminAction::ViewReports))?;
        self.report_repo.list_all().await
    }

    /// Get one report.
    pub async fn get_report(&self, actor: &Principal, id: i32) -> AppResult<report::Model> {
        decide(actor, Action::Administer(AdminAction::ViewReports))?;
        self.report_repo.get_by_id(id).await
    }

    /// Approve or reject a pending report.
    pub async fn update_report_status(
        &self,
        actor: &Principal,
        id: i32,
        input: UpdateReportInput,
    ) -> AppResult<()> {
        decide(actor, Action::Administer(AdminAction::UpdateReport))?;

        if input.status == ReportStatus::Pending {
            return Err(AppError::BadRequest(
                "status must be approved or rejected".to_string(),
            ));
        }

        let current = self.report_repo.get_by_id(id).await?;
        if !current.status.can_transition_to(input.status) {
            return Err(AppError::BadRequest(
                "report has already been reviewed".to_string(),
            ));
        }

        // A concurrent reviewer may have moved it since the read above
        let applied = self
            .report_repo
            .update_status(id, current.status, input.status)
            .await?;
        if !applied {
            return Err(AppError::BadRequest(
                "report has already been reviewed".to_string(),
            ));
        }

        tracing::info!(report_id = id, status = ?input.status, "Report reviewed");
        Ok(())
    }

    // ========== Users ==========

    /// List all registered users.
    pub async fn list_users(&self, actor: &Principal) -> AppResult<Vec<user::Model>> {
        decide(actor, Action::Administer(AdminAction::ViewUsers))?;
        self.user_repo.list_all().await
    }

    /// Get one registered user.
    pub async fn get_user(&self, actor: &Principal, id: i32) -> AppResult<user::Model> {
        decide(actor, Action::Administer(AdminAction::ViewUsers))?;
        self.user_repo.get_by_id(id).await
    }

    /// Ban a user. Admins can ban neither themselves nor other admins.
    pub async fn ban_user(&self, actor: &Principal, id: i32) -> AppResult<()> {
        decide(actor, Action::Administer(AdminAction::BanUser))?;

        let target = self.user_repo.get_by_id(id).await?;
        check_ban_target(actor, &target)?;
        if target.banned {
            return Err(AppError::AlreadyBanned("user".to_string()));
        }

        self.user_repo.set_banned(id, true).await?;
        tracing::info!(user_id = id, admin_id = ?actor.user_id(), "User banned");
        Ok(())
    }

    /// Lift a user's ban.
    pub async fn unban_user(&self, actor: &Principal, id: i32) -> AppResult<()> {
        decide(actor, Action::Administer(AdminAction::UnbanUser))?;

        let target = self.user_repo.get_by_id(id).await?;
        if !target.banned {
            return Err(AppError::NotBanned("user".to_string()));
        }

        self.user_repo.set_banned(id, false).await?;
        tracing::info!(user_id = id, admin_id = ?actor.user_id(), "User unbanned");
        Ok(())
    }

    // ========== Guests ==========

    /// List all guest identities.
    pub async fn list_guests(&self, actor: &Principal) -> AppResult<Vec<guest_user::Model>> {
        decide(actor, Action::Administer(AdminAction::ViewGuests))?;
        self.guest_repo.list_all().await
    }

    /// Get one guest identity.
    pub async fn get_guest(&self, actor: &Principal, id: Uuid) -> AppResult<guest_user::Model> {
        decide(actor, Action::Administer(AdminAction::ViewGuests))?;
        self.guest_repo.get_by_id(id).await
    }

    /// Ban a guest.
    pub async fn ban_guest(&self, actor: &Principal, id: Uuid) -> AppResult<()> {
        decide(actor, Action::Administer(AdminAction::BanGuest))?;

        let target = self.guest_repo.get_by_id(id).await?;
        if target.banned {
            return Err(AppError::AlreadyBanned("guest user".to_string()));
        }

        self.guest_repo.set_banned(id, true).await?;
        tracing::info!(guest_id = %id, admin_id = ?actor.user_id(), "Guest banned");
        Ok(())
    }

    /// Lift a guest's ban.
    pub async fn unban_guest(&self, actor: &Principal, id: Uuid) -> AppResult<()> {
        decide(actor, Action::Administer(AdminAction::UnbanGuest))?;

        let target = self.guest_repo.get_by_id(id).await?;
        if !target.banned {
            return Err(AppError::NotBanned("guest user".to_string()));
        }

        self.guest_repo.set_banned(id, false).await?;
        tracing::info!(guest_id = %id, admin_id = ?actor.user_id(), "Guest unbanned");
        Ok(())
    }

    // ========== Content ==========

    /// Delete any confession and every report against it.
    pub async fn delete_confession(&self, actor: &Principal, id: i32) -> AppResult<()> {
        decide(actor, Action::Administer(AdminAction::DeleteAnyConfession))?;

        let reports = self.confession_repo.delete_with_reports(id).await?;
        tracing::info!(
            confession_id = id,
            reports_removed = reports,
            admin_id = ?actor.user_id(),
            "Confession deleted by admin"
        );
        Ok(())
    }
}
