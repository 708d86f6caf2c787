//! Confession repository.

use std::sync::Arc;

use crate::entities::{
    Confession, Report,
    confession::{self, Owner},
    report,
};
use chrono::Utc;
use confessly_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
    sea_query::{Expr, Func, LikeExpr},
};

/// Maximum number of rows a title search returns.
pub const SEARCH_LIMIT: u64 = 100;

/// Fields of a new confession.
#[derive(Debug, Clone)]
pub struct NewConfession {
    pub owner: Owner,
    pub username: String,
    pub title: String,
    pub text: String,
    pub anon: bool,
}

/// Confession repository for database operations.
#[derive(Clone)]
pub struct ConfessionRepository {
    db: Arc<DatabaseConnection>,
}

impl ConfessionRepository {
    /// Create a new confession repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a confession owned by exactly one identity.
    pub async fn create(&self, input: NewConfession) -> AppResult<confession::Model> {
        let (user_id, guest_uuid) = input.owner.into_columns();
        let now = Utc::now();

        confession::ActiveModel {
            user_id: Set(user_id),
            guest_uuid: Set(guest_uuid),
            username: Set(input.username),
            title: Set(input.title),
            text: Set(input.text),
            anon: Set(input.anon),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a confession by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<confession::Model>> {
        Confession::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a confession by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<confession::Model> {
        self.find_by_id(id)
            .await?
            .ok_or(AppError::ConfessionNotFound)
    }

    /// List all confessions, newest first.
    pub async fn list_all(&self) -> AppResult<Vec<confession::Model>> {
        Confession::find()
            .order_by_desc(confession::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Case-insensitive substring search on titles, newest first.
    pub async fn search_by_title(&self, query: &str) -> AppResult<Vec<confession::Model>> {
        let pattern = format!("%{}%", escape_like(&query.to_lowercase()));

        Confession::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(confession::Column::Title)))
                    .like(LikeExpr::new(pattern).escape('\\')),
            )
            .order_by_desc(confession::Column::CreatedAt)
            .limit(SEARCH_LIMIT)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a confession.
    pub async fn update(&self, model: confession::ActiveModel) -> AppResult<confession::Model> {
        model.update(self.db.as_ref()).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => AppError::ConfessionNotFound,
            e => AppError::Database(e.to_string()),
        })
    }

    /// Delete a confession together with every report that references it.
    ///
    /// Both deletes commit atomically. Returns the number of reports removed.
    pub async fn delete_with_reports(&self, id: i32) -> AppResult<u64> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let reports = Report::delete_many()
            .filter(report::Column::ConfessionId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let deleted = Confession::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        // Dropping the transaction rolls the report deletion back
        if deleted.rows_affected == 0 {
            return Err(AppError::ConfessionNotFound);
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(reports.rows_affected)
    }
}

/// Escape `LIKE` wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
