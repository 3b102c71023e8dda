#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use studio_api::auth::google::{OAuthConfig, OAuthError, OAuthProvider, OAuthUser};
use studio_api::auth::jwt::{generate_access_token, JwtConfig};
use studio_api::config::{ServerConfig, StudioBranding};
use studio_api::router::build_app_router;
use studio_api::state::AppState;

pub const ADMIN_EMAIL: &str = "owner@studio.test";
pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Authorization code the stub provider exchanges for the admin's profile.
pub const ADMIN_CODE: &str = "admin-code";
/// Authorization code for a verified Google account that is not the admin.
pub const STRANGER_CODE: &str = "stranger-code";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        oauth: OAuthConfig::default(),
        admin_email: ADMIN_EMAIL.to_string(),
        studio: StudioBranding::default(),
    }
}

/// OAuth provider that answers from a fixed table of codes.
pub struct StubOAuth;

#[async_trait]
impl OAuthProvider for StubOAuth {
    fn authorization_url(&self, state: &str) -> Result<String, OAuthError> {
        Ok(format!("https://accounts.example.test/auth?state={state}"))
    }

    async fn fetch_user(&self, code: &str) -> Result<OAuthUser, OAuthError> {
        let email = match code {
            ADMIN_CODE => ADMIN_EMAIL,
            STRANGER_CODE => "someone@gmail.test",
            _ => return Err(OAuthError::Rejected("invalid_grant".into())),
        };
        Ok(OAuthUser {
            email: email.to_string(),
            email_verified: true,
            name: None,
            picture: None,
        })
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and the stub OAuth provider.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        oauth: Arc::new(StubOAuth),
    };
    build_app_router(state, &config)
}

/// A valid bearer token for the admin.
pub fn admin_token() -> String {
    generate_access_token(ADMIN_EMAIL, &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Authenticated GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(&admin_token()), None).await
}

/// GET without an `Authorization` header.
pub async fn get_anonymous(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(&admin_token()), Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(&admin_token()), Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(&admin_token()), Some(body)).await
}

/// PATCH without an `Authorization` header.
pub async fn patch_json_anonymous(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, None, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(&admin_token()), None).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn customer_body(name: &str) -> Value {
    json!({
        "name": name,
        "phone": "9876543210",
        "email": "",
        "address": "MG Road, Kochi"
    })
}

/// A wedding quotation worth 45,000: 20,000 + 10,000 coverage and a 15,000
/// LED wall booked three times (quantity does not scale the rate).
pub fn quotation_body(customer_id: i64) -> Value {
    json!({
        "customer_id": customer_id,
        "event_type": "Wedding",
        "event_date_start": "2026-12-04",
        "event_date_end": "2026-12-05",
        "location": "Kochi",
        "package_type": "Package 2",
        "session_type": "Full Session",
        "services": {
            "photography": [{
                "type": "Candid",
                "stage": "Stage",
                "camera_count": 2,
                "rate": 20000,
                "session": "Full Session"
            }],
            "videography": [{
                "type": "Traditional",
                "stage": "Reception",
                "camera_count": 1,
                "rate": 10000,
                "session": "Half Session"
            }],
            "additional": [{
                "name": "LED Wall",
                "session": "Full Session",
                "rate": 15000,
                "quantity": 3
            }]
        },
        "deliverables": { "others": { "other_works_text": "Two 12x36 albums" } }
    })
}

/// Create a customer through the API and return its ID.
pub async fn create_customer(app: &Router, name: &str) -> i64 {
    let response = post_json(app.clone(), "/api/v1/customers", customer_body(name)).await;
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a quotation through the API and return its JSON.
pub async fn create_quotation(app: &Router, customer_id: i64) -> Value {
    let response = post_json(app.clone(), "/api/v1/quotations", quotation_body(customer_id)).await;
    body_json(response).await
}

/// Create and confirm a quotation; return the new order's JSON.
pub async fn create_order(app: &Router, customer_name: &str) -> Value {
    let customer_id = create_customer(app, customer_name).await;
    let quotation = create_quotation(app, customer_id).await;
    let id = quotation["id"].as_i64().unwrap();
    let response = patch_json(
        app.clone(),
        &format!("/api/v1/quotations/{id}/status"),
        json!({ "status": "Confirmed" }),
    )
    .await;
    body_json(response).await["order"]["order"].clone()
}
