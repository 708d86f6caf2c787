//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `confessly_test`)
//!   `TEST_DB_PASSWORD` (default: `confessly_test`)
//!   `TEST_DB_NAME` (default: `confessly_test`)

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::Utc;
use confessly_common::AppError;
use confessly_db::{
    entities::{confession::Owner, report::ReportStatus, user},
    repositories::{
        ConfessionRepository, GuestUserRepository, NewConfession, ReportRepository,
        UserRepository,
    },
    test_utils::{TestDatabase, TestDbConfig},
};
use sea_orm::{ConnectionTrait, DatabaseBackend, Set, Statement};
use uuid::Uuid;

fn new_user(username: &str) -> user::ActiveModel {
    user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(format!("{username}@example.com")),
        role: Set(user::Role::User),
        password: Set("not-a-real-hash".to_string()),
        banned: Set(false),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let db = TestDatabase::new().await.expect("Failed to connect");
    let result = db
        .connection()
        .execute(Statement::from_string(
            DatabaseBackend::Postgres,
            "SELECT 1".to_string(),
        ))
        .await;

    assert!(result.is_ok(), "Query failed: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_duplicate_username_is_rejected() {
    let db = TestDatabase::create_unique().await.unwrap();
    let users = UserRepository::new(db.shared());

    users.create(new_user("alice")).await.unwrap();
    let result = users.create(new_user("alice")).await;
    assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    drop(users);

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_confession_needs_exactly_one_owner() {
    let db = TestDatabase::create_unique().await.unwrap();

    let result = db
        .connection()
        .execute(Statement::from_string(
            DatabaseBackend::Postgres,
            "INSERT INTO confessions (username, title, text, anon, created_at, updated_at) \
             VALUES ('x', 'Hello', 'text', false, now(), now())"
                .to_string(),
        ))
        .await;
    assert!(result.is_err());

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_report_once_and_cascade_delete() {
    let db = TestDatabase::create_unique().await.unwrap();
    let conn = db.shared();
    let users = UserRepository::new(Arc::clone(&conn));
    let guests = GuestUserRepository::new(Arc::clone(&conn));
    let confessions = ConfessionRepository::new(Arc::clone(&conn));
    let reports = ReportRepository::new(Arc::clone(&conn));

    let reporter = users.create(new_user("bob")).await.unwrap();
    let guest = guests.create(Uuid::new_v4()).await.unwrap();
    let confession = confessions
        .create(NewConfession {
            owner: Owner::Guest(guest.uuid),
            username: "Guest_00000000".to_string(),
            title: "Late again".to_string(),
            text: "I blamed the bus".to_string(),
            anon: true,
        })
        .await
        .unwrap();

    let report = reports
        .create(reporter.id, confession.id, "spam".to_string())
        .await
        .unwrap();
    assert_eq!(report.status, ReportStatus::Pending);

    let again = reports
        .create(reporter.id, confession.id, "spam".to_string())
        .await;
    assert!(matches!(again, Err(AppError::AlreadyReported)));

    assert!(
        reports
            .update_status(report.id, ReportStatus::Pending, ReportStatus::Approved)
            .await
            .unwrap()
    );

    let removed = confessions.delete_with_reports(confession.id).await.unwrap();
    assert_eq!(removed, 1);
    assert!(matches!(
        reports.get_by_id(report.id).await,
        Err(AppError::ReportNotFound(_))
    ));

    drop((users, guests, confessions, reports, conn));
    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_concurrent_duplicate_reports_keep_one_row() {
    let db = TestDatabase::create_unique().await.unwrap();
    let users = UserRepository::new(db.shared());
    let confessions = ConfessionRepository::new(db.shared());
    let reports = ReportRepository::new(db.shared());

    let author = users.create(new_user("carol")).await.unwrap();
    let reporter = users.create(new_user("dave")).await.unwrap();
    let confession = confessions
        .create(NewConfession {
            owner: Owner::User(author.id),
            username: author.username.clone(),
            title: "Skipped the gym".to_string(),
            text: "Every day this month".to_string(),
            anon: false,
        })
        .await
        .unwrap();

    let (first, second) = tokio::join!(
        reports.create(reporter.id, confession.id, "spam".to_string()),
        reports.create(reporter.id, confession.id, "spam".to_string()),
    );

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        outcomes
            .iter()
            .filter(|r| matches!(r, Err(AppError::AlreadyReported)))
            .count(),
        1
    );
    assert_eq!(reports.list_all().await.unwrap().len(), 1);

    drop((users, confessions, reports));
    db.drop_database().await.unwrap();
}

#[test]
fn test_config_from_env() {
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
    assert!(!config.database.is_empty());
}
