//! Integration tests for Google sign-in and the admin-only gate.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{
    body_json, build_test_app, get, get_anonymous, test_config, ADMIN_CODE, ADMIN_EMAIL,
    STRANGER_CODE,
};
use sqlx::PgPool;
use studio_api::auth::jwt::{generate_access_token, generate_state_token};
use tower::ServiceExt;

fn state_token() -> String {
    generate_state_token(&test_config().jwt).unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn authorization_url_carries_signed_state(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get_anonymous(app, "/api/v1/auth/google/url").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let state = json["state"].as_str().unwrap();
    assert!(!state.is_empty());
    assert!(json["url"].as_str().unwrap().ends_with(state));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_callback_issues_working_token(pool: PgPool) {
    let app = build_test_app(pool);
    let uri = format!(
        "/api/v1/auth/google/callback?code={ADMIN_CODE}&state={}",
        state_token()
    );
    let response = get_anonymous(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["email"], ADMIN_EMAIL);
    assert_eq!(json["token_type"], "Bearer");
    assert_eq!(json["expires_in"], 15 * 60);

    let token = json["access_token"].as_str().unwrap();
    let request = Request::builder()
        .uri("/api/v1/auth/me")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["email"], ADMIN_EMAIL);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn other_google_account_is_forbidden(pool: PgPool) {
    let app = build_test_app(pool);
    let uri = format!(
        "/api/v1/auth/google/callback?code={STRANGER_CODE}&state={}",
        state_token()
    );
    let response = get_anonymous(app, &uri).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn callback_rejects_forged_state(pool: PgPool) {
    let app = build_test_app(pool);
    let uri = format!("/api/v1/auth/google/callback?code={ADMIN_CODE}&state=forged");
    let response = get_anonymous(app, &uri).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn access_token_is_not_a_valid_state(pool: PgPool) {
    let app = build_test_app(pool);
    let token = generate_access_token(ADMIN_EMAIL, &test_config().jwt).unwrap();
    let uri = format!("/api/v1/auth/google/callback?code={ADMIN_CODE}&state={token}");
    let response = get_anonymous(app, &uri).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn callback_with_provider_error_is_unauthorized(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get_anonymous(app, "/api/v1/auth/google/callback?error=access_denied").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejected_code_is_unauthorized(pool: PgPool) {
    let app = build_test_app(pool);
    let uri = format!(
        "/api/v1/auth/google/callback?code=expired&state={}",
        state_token()
    );
    let response = get_anonymous(app, &uri).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_code_is_bad_request(pool: PgPool) {
    let app = build_test_app(pool);
    let uri = format!("/api/v1/auth/google/callback?state={}", state_token());
    let response = get_anonymous(app, &uri).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn protected_routes_require_token(pool: PgPool) {
    let app = build_test_app(pool);
    for uri in [
        "/api/v1/auth/me",
        "/api/v1/customers",
        "/api/v1/quotations",
        "/api/v1/orders",
        "/api/v1/expenses",
        "/api/v1/payments",
        "/api/v1/dashboard",
        "/api/v1/reports",
    ] {
        let response = get_anonymous(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn token_for_another_email_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let token = generate_access_token("someone@gmail.test", &test_config().jwt).unwrap();
    let request = Request::builder()
        .uri("/api/v1/customers")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn garbage_token_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);
    let request = Request::builder()
        .uri("/api/v1/customers")
        .header("authorization", "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_token_reaches_protected_route(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/customers").await;
    assert_eq!(response.status(), StatusCode::OK);
}
