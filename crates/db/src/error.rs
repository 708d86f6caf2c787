//! Storage error classification.
//!
//! Constraint violations are recognised through the driver's typed error
//! kind and the constraint name reported by `PostgreSQL`.

use sea_orm::{
    DbErr, RuntimeErr,
    sqlx::{self, error::ErrorKind},
};

/// Constraint and index names declared by the migrations.
pub mod constraints {
    /// Unique username.
    pub const USER_USERNAME: &str = "idx_user_username";
    /// Unique email.
    pub const USER_EMAIL: &str = "idx_user_email";
    /// One report per (reporter, confession).
    pub const REPORT_USER_CONFESSION: &str = "idx_report_user_confession";
    /// Report reporter reference.
    pub const REPORT_USER: &str = "fk_report_user";
    /// Report target reference.
    pub const REPORT_CONFESSION: &str = "fk_report_confession";
}

/// Kind of integrity constraint that rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Unique index or constraint.
    Unique,
    /// Foreign key.
    ForeignKey,
    /// CHECK constraint.
    Check,
    /// NOT NULL column.
    NotNull,
}

/// A write rejected by a database constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    /// Violated constraint kind.
    pub kind: ConstraintKind,
    /// Constraint name, when the database reports one.
    pub constraint: Option<String>,
}

impl ConstraintViolation {
    /// Whether this is a violation of the named constraint of the given kind.
    #[must_use]
    pub fn is(&self, kind: ConstraintKind, name: &str) -> bool {
        self.kind == kind && self.constraint.as_deref() == Some(name)
    }
}

/// Classify a database error as a constraint violation, if it is one.
#[must_use]
pub fn constraint_violation(err: &DbErr) -> Option<ConstraintViolation> {
    let (DbErr::Exec(RuntimeErr::SqlxError(sqlx::Error::Database(db_err)))
    | DbErr::Query(RuntimeErr::SqlxError(sqlx::Error::Database(db_err)))) = err
    else {
        return None;
    };

    let kind = match db_err.kind() {
        ErrorKind::UniqueViolation => ConstraintKind::Unique,
        ErrorKind::ForeignKeyViolation => ConstraintKind::ForeignKey,
        ErrorKind::CheckViolation => ConstraintKind::Check,
        ErrorKind::NotNullViolation => ConstraintKind::NotNull,
        _ => return None,
    };

    Some(ConstraintViolation {
        kind,
        constraint: db_err.constraint().map(str::to_owned),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_driver_errors_are_not_violations() {
        assert!(constraint_violation(&DbErr::Custom("boom".to_string())).is_none());
        assert!(constraint_violation(&DbErr::RecordNotFound("x".to_string())).is_none());
        assert!(
            constraint_violation(&DbErr::Query(RuntimeErr::Internal("x".to_string()))).is_none()
        );
    }

    #[test]
    fn test_violation_matching() {
        let violation = ConstraintViolation {
            kind: ConstraintKind::Unique,
            constraint: Some(constraints::REPORT_USER_CONFESSION.to_string()),
        };

        assert!(violation.is(ConstraintKind::Unique, constraints::REPORT_USER_CONFESSION));
        assert!(!violation.is(ConstraintKind::ForeignKey, constraints::REPORT_USER_CONFESSION));
        assert!(!violation.is(ConstraintKind::Unique, constraints::USER_EMAIL));
    }
}
