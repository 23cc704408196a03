mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, build_test_app_with, get, get_auth, post_json, post_json_auth,
    register_and_login, test_config, TEST_PASSWORD,
};
use roomswap_core::lifecycle::SwapPolicy;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_returns_created_user(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({ "email": "  Jane@Example.EDU ", "name": "Jane", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Registration successful! Please log in.");
    assert_eq!(json["data"]["email"], "jane@example.edu");
    assert!(json["data"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_duplicate_email_conflicts(pool: PgPool) {
    let app = build_test_app(pool);
    register_and_login(&app, "jane").await;

    let response = post_json(
        app,
        "/api/v1/auth/register",
        json!({ "email": "JANE@example.edu", "name": "Other", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_validation_errors(pool: PgPool) {
    let app = build_test_app(pool);

    let missing = post_json(
        app.clone(),
        "/api/v1/auth/register",
        json!({ "email": "jane@example.edu" }),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(missing).await["code"], "VALIDATION_ERROR");

    let short = post_json(
        app,
        "/api/v1/auth/register",
        json!({ "email": "jane@example.edu", "name": "Jane", "password": "short" }),
    )
    .await;
    assert_eq!(short.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_enforces_allowed_domain(pool: PgPool) {
    let mut config = test_config(SwapPolicy::default());
    config.allowed_email_domain = Some("campus.edu".to_string());
    let app = build_test_app_with(pool, config);

    let rejected = post_json(
        app.clone(),
        "/api/v1/auth/register",
        json!({ "email": "jane@gmail.com", "name": "Jane", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let accepted = post_json(
        app,
        "/api/v1/auth/register",
        json!({ "email": "jane@campus.edu", "name": "Jane", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(accepted.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_wrong_password_is_unauthorized(pool: PgPool) {
    let app = build_test_app(pool);
    register_and_login(&app, "jane").await;

    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "email": "jane@example.edu", "password": "wrong_password_1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let unknown = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "nobody@example.edu", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(unknown).await["error"], "Invalid email or password");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_requires_token(pool: PgPool) {
    let app = build_test_app(pool);
    let user = register_and_login(&app, "jane").await;

    let anonymous = get(app.clone(), "/api/v1/user/me").await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let garbage = get_auth(app.clone(), "/api/v1/user/me", "not-a-jwt").await;
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/user/me", &user.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user.id);
    assert_eq!(json["data"]["email"], user.email);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_token(pool: PgPool) {
    let app = build_test_app(pool);
    register_and_login(&app, "jane").await;

    let login = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "email": "jane@example.edu", "password": TEST_PASSWORD }),
    )
    .await;
    let refresh_token = body_json(login).await["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();

    let first = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);
    assert!(body_json(first).await["access_token"].is_string());

    // The presented token is single-use.
    let replay = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_revokes_sessions(pool: PgPool) {
    let app = build_test_app(pool);
    register_and_login(&app, "jane").await;

    let login = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "email": "jane@example.edu", "password": TEST_PASSWORD }),
    )
    .await;
    let json = body_json(login).await;
    let token = json["access_token"].as_str().unwrap().to_string();
    let refresh_token = json["refresh_token"].as_str().unwrap().to_string();

    let response = post_json_auth(app.clone(), "/api/v1/auth/logout", json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let refresh = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(refresh.status(), StatusCode::UNAUTHORIZED);
}
