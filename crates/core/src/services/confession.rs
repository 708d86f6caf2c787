//! Confession service.

use chrono::Utc;
use confessly_common::{AppError, AppResult, IdGenerator};
use confessly_db::{
    entities::confession::{self, Owner},
    repositories::{ConfessionRepository, NewConfession},
};
use sea_orm::{IntoActiveModel, Set};
use serde::Deserialize;
use validator::Validate;

use crate::policy::{Action, decide};
use crate::principal::Principal;
use crate::visibility::{ConfessionView, redact, redact_all};

/// Input for posting a confession.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateConfessionInput {
    #[validate(length(min = 5, max = 100))]
    pub title: String,

    #[validate(length(min = 1))]
    pub text: String,

    /// Ignored for guests, whose confessions are always anonymous.
    #[serde(default)]
    pub anon: bool,
}

/// Partial update of a confession. Absent fields keep their value.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateConfessionInput {
    #[validate(length(min = 5, max = 100))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub text: Option<String>,

    pub anon: Option<bool>,
}

/// Confession service for business logic.
#[derive(Clone)]
pub struct ConfessionService {
    confession_repo: ConfessionRepository,
    id_gen: IdGenerator,
}

impl ConfessionService {
    /// Create a new confession service.
    #[must_use]
    pub const fn new(confession_repo: ConfessionRepository) -> Self {
        Self {
            confession_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Post a confession as a registered user or a guest.
    pub async fn create(
        &self,
        principal: &Principal,
        input: CreateConfessionInput,
    ) -> AppResult<confession::Model> {
        decide(principal, Action::CreateConfession)?;
        input.validate()?;

        let (owner, username, anon) = match principal {
            Principal::Authenticated { id, username, .. } => {
                (Owner::User(*id), username.clone(), input.anon)
            }
            Principal::Guest { id } => (
                Owner::Guest(*id),
                self.id_gen.guest_display_name(id),
                true,
            ),
            Principal::Anonymous => return Err(AppError::Unauthorized),
        };

        let confession = self
            .confession_repo
            .create(NewConfession {
                owner,
                username,
                title: input.title,
                text: input.text,
                anon,
            })
            .await?;

        tracing::debug!(confession_id = confession.id, "Confession created");
        Ok(confession)
    }

    /// Get one confession as seen by `viewer`.
    pub async fn get(&self, viewer: &Principal, id: i32) -> AppResult<ConfessionView> {
        decide(viewer, Action::ReadConfession)?;
        let confession = self.confession_repo.get_by_id(id).await?;
        Ok(redact(confession, viewer))
    }

    /// List every confession, newest first.
    pub async fn list(&self, viewer: &Principal) -> AppResult<Vec<ConfessionView>> {
        decide(viewer, Action::ReadConfession)?;
        let confessions = self.confession_repo.list_all().await?;
        Ok(redact_all(confessions, viewer))
    }

    /// Search titles. A blank query lists everything.
    pub async fn search(&self, viewer: &Principal, query: &str) -> AppResult<Vec<ConfessionView>> {
        decide(viewer, Action::ReadConfession)?;

        let query = query.trim();
        let confessions = if query.is_empty() {
            self.confession_repo.list_all().await?
        } else {
            self.confession_repo.search_by_title(query).await?
        };

        Ok(redact_all(confessions, viewer))
    }

    /// Apply a partial update. Only the owning user may edit.
    pub async fn update(
        &self,
        principal: &Principal,
        id: i32,
        input: UpdateConfessionInput,
    ) -> AppResult<confession::Model> {
        let existing = self.confession_repo.get_by_id(id).await?;
        decide(principal, Action::UpdateConfession(&existing))?;
        input.validate()?;

        let mut active = existing.into_active_model();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(text) = input.text {
            active.text = Set(text);
        }
        if let Some(anon) = input.anon {
            active.anon = Set(anon);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = self.confession_repo.update(active).await?;
        tracing::debug!(confession_id = id, "Confession updated");
        Ok(updated)
    }

    /// Delete one's own confession together with its reports.
    pub async fn delete(&self, principal: &Principal, id: i32) -> AppResult<()> {
        let existing = self.confession_repo.get_by_id(id).await?;
        decide(principal, Action::DeleteConfession(&existing))?;

        let reports = self.confession_repo.delete_with_reports(id).await?;
        tracing::info!(confession_id = id, reports_removed = reports, "Confession deleted by owner");
        Ok(())
    }
}
