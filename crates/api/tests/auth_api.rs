//! HTTP-level tests for registration, login, lockout and `/auth/me`.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json};
use roster_api::auth::password::hash_password;
use roster_api::handlers::auth::MAX_FAILED_ATTEMPTS;
use roster_db::models::user::{CreateUser, User};
use roster_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

const PASSWORD: &str = "correct-horse-battery";

async fn create_test_user(pool: &PgPool, username: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hash_password(PASSWORD).expect("hashing should succeed"),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

fn credentials(username: &str, password: &str) -> serde_json::Value {
    json!({ "username": username, "password": password })
}

// ---------------------------------------------------------------------------
// Register
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_creates_user(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = json!({ "username": "newbie", "email": "newbie@test.com", "password": PASSWORD });
    let response = post_json(&app.router, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "newbie");
    assert!(json["data"].get("password_hash").is_none());

    let stored = UserRepo::find_by_username(&pool, "newbie").await.unwrap();
    assert!(stored.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({ "username": "shorty", "email": "s@test.com", "password": "short" });
    let response = post_json(&app.router, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_duplicate_username_is_409(pool: PgPool) {
    create_test_user(&pool, "taken").await;
    let app = common::build_test_app(pool);

    let body = json!({ "username": "taken", "email": "other@test.com", "password": PASSWORD });
    let response = post_json(&app.router, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_bearer_token(pool: PgPool) {
    let user = create_test_user(&pool, "loginuser").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        &app.router,
        "/api/v1/auth/login",
        credentials("loginuser", PASSWORD),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["token_type"], "Bearer");
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["id"], user.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_wrong_password_is_401(pool: PgPool) {
    create_test_user(&pool, "wrongpw").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        &app.router,
        "/api/v1/auth/login",
        credentials("wrongpw", "not-the-password"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_unknown_user_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        &app.router,
        "/api/v1/auth/login",
        credentials("nobody", PASSWORD),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeated_failures_lock_the_account(pool: PgPool) {
    create_test_user(&pool, "locked").await;
    let app = common::build_test_app(pool.clone());

    for _ in 0..MAX_FAILED_ATTEMPTS {
        let response = post_json(
            &app.router,
            "/api/v1/auth/login",
            credentials("locked", "wrong-password"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Even the correct password is refused while locked.
    let response = post_json(
        &app.router,
        "/api/v1/auth/login",
        credentials("locked", PASSWORD),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let user = UserRepo::find_by_username(&pool, "locked")
        .await
        .unwrap()
        .unwrap();
    assert!(user.locked_until.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn successful_login_resets_failures(pool: PgPool) {
    let user = create_test_user(&pool, "resetme").await;
    UserRepo::increment_failed_login(&pool, user.id).await.unwrap();
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        &app.router,
        "/api/v1/auth/login",
        credentials("resetme", PASSWORD),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let user = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(user.failed_login_count, 0);
    assert!(user.last_login_at.is_some());
}

// ---------------------------------------------------------------------------
// Me / token use
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_returns_current_user_and_token_opens_protected_routes(pool: PgPool) {
    create_test_user(&pool, "meuser").await;
    let app = common::build_test_app(pool);

    let login = post_json(
        &app.router,
        "/api/v1/auth/login",
        credentials("meuser", PASSWORD),
    )
    .await;
    let token = body_json(login).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let me = get_auth(&app.router, "/api/v1/auth/me", &token).await;
    assert_eq!(me.status(), StatusCode::OK);
    assert_eq!(body_json(me).await["data"]["username"], "meuser");

    let form = get_auth(&app.router, "/api/v1/employees/create", &token).await;
    assert_eq!(form.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_without_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(&app.router, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
