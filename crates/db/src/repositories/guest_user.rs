//! Guest user repository.

use std::sync::Arc;

use crate::entities::{GuestUser, guest_user};
use chrono::Utc;
use confessly_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};
use uuid::Uuid;

/// Guest user repository for database operations.
#[derive(Clone)]
pub struct GuestUserRepository {
    db: Arc<DatabaseConnection>,
}

impl GuestUserRepository {
    /// Create a new guest user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Persist a new, unbanned guest.
    pub async fn create(&self, uuid: Uuid) -> AppResult<guest_user::Model> {
        guest_user::ActiveModel {
            uuid: Set(uuid),
            banned: Set(false),
            created_at: Set(Utc::now().into()),
        }
        .insert(self.db.as_ref())
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a guest by uuid.
    pub async fn find_by_id(&self, uuid: Uuid) -> AppResult<Option<guest_user::Model>> {
        GuestUser::find_by_id(uuid)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a guest by uuid, returning an error if not found.
    pub async fn get_by_id(&self, uuid: Uuid) -> AppResult<guest_user::Model> {
        self.find_by_id(uuid)
            .await?
            .ok_or_else(|| AppError::GuestNotFound(uuid.to_string()))
    }

    /// List all guests, newest first.
    pub async fn list_all(&self) -> AppResult<Vec<guest_user::Model>> {
        GuestUser::find()
            .order_by_desc(guest_user::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Set the banned flag.
    pub async fn set_banned(&self, uuid: Uuid, banned: bool) -> AppResult<()> {
        let result = GuestUser::update_many()
            .col_expr(guest_user::Column::Banned, Expr::value(banned))
            .filter(guest_user::Column::Uuid.eq(uuid))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AppError::GuestNotFound(uuid.to_string()));
        }
        Ok(())
    }
}
