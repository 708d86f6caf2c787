//! User repository.

use std::sync::Arc;

use crate::entities::{User, user};
use crate::error::{ConstraintKind, constraint_violation, constraints};
use confessly_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, sea_query::Expr,
};

/// User repository for database operations.
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<user::Model>> {
        User::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<user::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(id.to_string()))
    }

    /// Find a user by exact username.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find any user holding either the username or the email.
    pub async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(
                Condition::any()
                    .add(user::Column::Username.eq(username))
                    .add(user::Column::Email.eq(email)),
            )
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new user.
    ///
    /// A username or email collision that slipped past the caller's
    /// pre-check surfaces as [`AppError::AlreadyExists`].
    pub async fn create(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| {
            match constraint_violation(&e) {
                Some(v)
                    if v.is(ConstraintKind::Unique, constraints::USER_USERNAME)
                        || v.is(ConstraintKind::Unique, constraints::USER_EMAIL) =>
                {
                    AppError::AlreadyExists("user".to_string())
                }
                _ => AppError::Database(e.to_string()),
            }
        })
    }

    /// List all users, oldest first.
    pub async fn list_all(&self) -> AppResult<Vec<user::Model>> {
        User::find()
            .order_by_asc(user::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Set the banned flag (single UPDATE query, no fetch).
    pub async fn set_banned(&self, id: i32, banned: bool) -> AppResult<()> {
        let result = User::update_many()
            .col_expr(user::Column::Banned, Expr::value(banned))
            .filter(user::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AppError::UserNotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::user::Role;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Set};

    fn create_test_user(id: i32, username: &str) -> user::Model {
        user::Model {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            role: Role::User,
            password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            banned: false,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_found() {
        let user = create_test_user(1, "alice");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_by_id(1).await.unwrap();

        assert_eq!(result, Some(user));
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.get_by_id(42).await;

        match result {
            Err(AppError::UserNotFound(id)) => assert_eq!(id, "42"),
            other => panic!("Expected UserNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_find_by_username_or_email() {
        let user = create_test_user(1, "alice");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo
            .find_by_username_or_email("bob", "alice@example.com")
            .await
            .unwrap();

        assert_eq!(result.unwrap().username, "alice");
    }

    #[tokio::test]
    async fn test_create_user() {
        let user = create_test_user(1, "newuser");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user.clone()]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);

        let active = user::ActiveModel {
            username: Set("newuser".to_string()),
            email: Set("newuser@example.com".to_string()),
            role: Set(Role::User),
            password: Set("hash".to_string()),
            banned: Set(false),
            ..Default::default()
        };

        let result = repo.create(active).await.unwrap();
        assert_eq!(result.username, "newuser");
        assert_eq!(result.id, 1);
    }

    #[tokio::test]
    async fn test_set_banned_missing_user() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                }])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.set_banned(9, true).await;

        assert!(matches!(result, Err(AppError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_set_banned() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        assert!(repo.set_banned(2, true).await.is_ok());
    }
}
