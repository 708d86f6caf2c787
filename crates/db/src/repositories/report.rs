//! Report repository.

use std::sync::Arc;

use crate::entities::{
    Confession, Report,
    report::{self, ReportStatus},
};
use crate::error::{ConstraintKind, constraint_violation, constraints};
use chrono::Utc;
use confessly_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait, sea_query::Expr,
};

/// Report repository for database operations.
#[derive(Clone)]
pub struct ReportRepository {
    db: Arc<DatabaseConnection>,
}

impl ReportRepository {
    /// Create a new report repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// File a report.
    ///
    /// The existence check, duplicate check and insert share one
    /// transaction. A concurrent duplicate that passes the pre-check is
    /// rejected by the unique index and reported as
    /// [`AppError::AlreadyReported`].
    pub async fn create(
        &self,
        reporter_id: i32,
        confession_id: i32,
        reason: String,
    ) -> AppResult<report::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if Confession::find_by_id(confession_id)
            .one(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .is_none()
        {
            return Err(AppError::ConfessionNotFound);
        }

        let existing = Report::find()
            .filter(report::Column::UserId.eq(reporter_id))
            .filter(report::Column::ConfessionId.eq(confession_id))
            .one(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        if existing.is_some() {
            return Err(AppError::AlreadyReported);
        }

        let model = report::ActiveModel {
            user_id: Set(reporter_id),
            confession_id: Set(confession_id),
            reason: Set(reason),
            status: Set(ReportStatus::Pending),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| classify_insert_error(&e, reporter_id))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(model)
    }

    /// Get a report by ID.
    pub async fn get_by_id(&self, id: i32) -> AppResult<report::Model> {
        Report::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::ReportNotFound(id.to_string()))
    }

    /// List all reports, newest first.
    pub async fn list_all(&self) -> AppResult<Vec<report::Model>> {
        Report::find()
            .order_by_desc(report::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Move a report from `expected` to `next`.
    ///
    /// The update only applies while the stored status still equals
    /// `expected`; returns `false` if another writer got there first.
    pub async fn update_status(
        &self,
        id: i32,
        expected: ReportStatus,
        next: ReportStatus,
    ) -> AppResult<bool> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();

        let result = Report::update_many()
            .col_expr(report::Column::Status, Expr::value(next))
            .col_expr(report::Column::UpdatedAt, Expr::value(now))
            .filter(report::Column::Id.eq(id))
            .filter(report::Column::Status.eq(expected))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected == 1)
    }
}

fn classify_insert_error(err: &DbErr, reporter_id: i32) -> AppError {
    match constraint_violation(err) {
        Some(v) if v.is(ConstraintKind::Unique, constraints::REPORT_USER_CONFESSION) => {
            AppError::AlreadyReported
        }
        Some(v) if v.is(ConstraintKind::ForeignKey, constraints::REPORT_CONFESSION) => {
            AppError::ConfessionNotFound
        }
        Some(v) if v.is(ConstraintKind::ForeignKey, constraints::REPORT_USER) => {
            AppError::UserNotFound(reporter_id.to_string())
        }
        _ => AppError::Database(err.to_string()),
    }
}
