//! API integration tests.
//!
//! Drive the full router over a mock database.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use chrono::Utc;
use confessly_api::{AppState, router as api_router};
use confessly_common::config::AuthConfig;
use confessly_db::entities::{
    confession, guest_user,
    user::{self, Role},
};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-secret".to_string(),
        token_ttl_hours: 1,
        guest_cookie_max_age_days: 30,
    }
}

fn create_test_app(db: MockDatabase) -> (Router, AppState) {
    let state = AppState::new(Arc::new(db.into_connection()), &auth_config());
    let app = api_router(&state).with_state(state.clone());
    (app, state)
}

fn create_test_user(id: i32, role: Role, banned: bool) -> user::Model {
    user::Model {
        id,
        username: format!("user{id}"),
        email: format!("user{id}@example.com"),
        role,
        password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_string(),
        banned,
        created_at: Utc::now().into(),
    }
}

fn create_test_guest(uuid: Uuid) -> guest_user::Model {
    guest_user::Model {
        uuid,
        banned: false,
        created_at: Utc::now().into(),
    }
}

fn create_test_confession(id: i32, user_id: Option<i32>, guest: Option<Uuid>) -> confession::Model {
    confession::Model {
        id,
        user_id,
        guest_uuid: guest,
        username: "author".to_string(),
        title: "Something I did".to_string(),
        text: "I ate the last cookie".to_string(),
        anon: true,
        created_at: Utc::now().into(),
        updated_at: Utc::now().into(),
    }
}

fn exec(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

fn bearer(state: &AppState, user: &user::Model) -> String {
    format!(
        "Bearer {}",
        state.credential_service.issue_token(user).unwrap()
    )
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_ping() {
    let (app, _) = create_test_app(MockDatabase::new(DatabaseBackend::Postgres));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await["message"],
        "Confessly server up and running"
    );
}

#[tokio::test]
async fn test_register() {
    let (app, _) = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .append_query_results([[create_test_user(1, Role::User, false)]]),
    );

    let response = app
        .oneshot(json_request(
            "POST",
            "/auth/register",
            r#"{"username":"user1","email":"user1@example.com","password":"secret"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_register_malformed_body_uses_error_envelope() {
    let (app, _) = create_test_app(MockDatabase::new(DatabaseBackend::Postgres));

    let response = app
        .oneshot(json_request("POST", "/auth/register", r#"{"username":"x"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_banned_user_cannot_login() {
    let (app, _) = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_user(1, Role::User, true)]]),
    );

    let response = app
        .oneshot(json_request(
            "POST",
            "/auth/login",
            r#"{"username":"user1","password":"whatever"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(response).await["error"]["code"], "USER_BANNED");
}

#[tokio::test]
async fn test_strict_route_requires_token() {
    let (app, _) = create_test_app(MockDatabase::new(DatabaseBackend::Postgres));

    let missing = app
        .clone()
        .oneshot(json_request("POST", "/api/reports", "{}"))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(missing).await["error"]["code"], "UNAUTHORIZED");

    let malformed = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/confessions/search?q=x")
                .header(header::AUTHORIZATION, "Token abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(malformed.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(malformed).await["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_old_token_of_banned_user_is_forbidden() {
    let user = create_test_user(2, Role::User, false);
    let (app, state) = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_user(2, Role::User, true)]]),
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/confessions/search?q=cookie")
                .header(header::AUTHORIZATION, bearer(&state, &user))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_guest_posts_confession_and_gets_cookie() {
    let guest = Uuid::new_v4();
    let (app, _) = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_guest(guest)]])
            .append_query_results([[create_test_confession(1, None, Some(guest))]]),
    );

    let response = app
        .oneshot(json_request(
            "POST",
            "/public/confessions",
            r#"{"title":"Something I did","text":"I ate the last cookie","anon":false}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("guest cookie issued")
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("guest_uuid="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_public_list_redacts_for_returning_guest() {
    let guest = Uuid::new_v4();
    let (app, _) = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_guest(guest)]])
            .append_query_results([[create_test_confession(1, Some(7), None)]]),
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/public/confessions")
                .header(header::COOKIE, format!("guest_uuid={guest}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let body = json_body(response).await;
    let first = &body["confessions"][0];
    assert_eq!(first["title"], "Something I did");
    assert!(first.get("user_id").is_none());
    assert!(first.get("username").is_none());
}

#[tokio::test]
async fn test_bad_search_query_uses_error_envelope() {
    let guest = Uuid::new_v4();
    let (app, _) = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[create_test_guest(guest)]]),
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/public/confessions/search?q=a&q=b")
                .header(header::COOKIE, format!("guest_uuid={guest}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("duplicate field")
    );
}

#[tokio::test]
async fn test_admin_sees_anonymous_author() {
    let admin = create_test_user(1, Role::Admin, false);
    let (app, state) = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[admin.clone()]])
            .append_query_results([[create_test_confession(3, Some(7), None)]]),
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/public/confessions/3")
                .header(header::AUTHORIZATION, bearer(&state, &admin))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["confession"]["user_id"], 7);
    assert_eq!(body["confession"]["username"], "author");
}

#[tokio::test]
async fn test_non_owner_cannot_update() {
    let intruder = create_test_user(5, Role::User, false);
    let (app, state) = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[intruder.clone()]])
            .append_query_results([[create_test_confession(3, Some(4), None)]]),
    );

    let mut request = json_request("PUT", "/api/confessions/3", r#"{"title":"Rewritten title"}"#);
    request.headers_mut().insert(
        header::AUTHORIZATION,
        bearer(&state, &intruder).parse().unwrap(),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        json_body(response).await["error"]["message"],
        "you don't have permission to access this resource"
    );
}

#[tokio::test]
async fn test_regular_user_cannot_reach_admin_routes() {
    let user = create_test_user(5, Role::User, false);
    let (app, state) = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[user.clone()]]),
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/users")
                .header(header::AUTHORIZATION, bearer(&state, &user))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invalid_path_id() {
    let admin = create_test_user(1, Role::Admin, false);
    let (app, state) = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[admin.clone()]]),
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/admin/users/-4")
                .header(header::AUTHORIZATION, bearer(&state, &admin))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["message"], "invalid id");
}

#[tokio::test]
async fn test_unknown_report_status_rejected() {
    let admin = create_test_user(1, Role::Admin, false);
    let (app, state) = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[admin.clone()]]),
    );

    let mut request = json_request("PUT", "/api/admin/reports/1", r#"{"status":"resolved"}"#);
    request.headers_mut().insert(
        header::AUTHORIZATION,
        bearer(&state, &admin).parse().unwrap(),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_delete_cascades_then_retry_is_not_found() {
    let admin = create_test_user(1, Role::Admin, false);
    let (app, state) = create_test_app(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[admin.clone()], [admin.clone()]])
            .append_exec_results([exec(2), exec(1), exec(0), exec(0)]),
    );
    let auth = bearer(&state, &admin);

    let delete = |auth: String| {
        Request::builder()
            .method("DELETE")
            .uri("/api/admin/confessions/9")
            .header(header::AUTHORIZATION, auth)
            .body(Body::empty())
            .unwrap()
    };

    let first = app.clone().oneshot(delete(auth.clone())).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(
        json_body(first).await["message"],
        "Confession deleted successfully by admin"
    );

    let retry = app.oneshot(delete(auth)).await.unwrap();
    assert_eq!(retry.status(), StatusCode::NOT_FOUND);
}
