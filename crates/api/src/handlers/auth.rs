//! Handlers for the `/auth` resource (Google sign-in, current session).

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use studio_core::error::CoreError;

use crate::auth::google::OAuthError;
use crate::auth::jwt::{generate_access_token, generate_state_token, verify_state_token};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Response for `GET /auth/google/url`.
#[derive(Debug, Serialize)]
pub struct AuthorizationUrlResponse {
    pub url: String,
    /// Signed state value the callback must echo back.
    pub state: String,
}

/// Query string Google appends to the redirect.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set by Google when the user cancels or consent fails.
    pub error: Option<String>,
}

/// Successful sign-in response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub email: String,
}

fn map_oauth_error(err: OAuthError) -> AppError {
    match err {
        OAuthError::NotConfigured => {
            AppError::BadRequest("Google sign-in is not configured".into())
        }
        OAuthError::Rejected(reason) => {
            tracing::warn!(%reason, "OAuth provider rejected the sign-in");
            AppError::Core(CoreError::Unauthorized(
                "Google sign-in was rejected".into(),
            ))
        }
        other => AppError::InternalError(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/auth/google/url
///
/// Build the Google authorization URL carrying a signed, short-lived state.
pub async fn google_url(State(state): State<AppState>) -> AppResult<Json<AuthorizationUrlResponse>> {
    let signed_state = generate_state_token(&state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Failed to sign state: {e}")))?;
    let url = state
        .oauth
        .authorization_url(&signed_state)
        .map_err(map_oauth_error)?;

    Ok(Json(AuthorizationUrlResponse {
        url,
        state: signed_state,
    }))
}

/// GET /api/v1/auth/google/callback?code=&state=
///
/// Exchange the code, require the verified admin email, and issue an access
/// token.
pub async fn google_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> AppResult<Json<AuthResponse>> {
    if let Some(error) = params.error {
        tracing::info!(%error, "Google sign-in cancelled");
        return Err(AppError::Core(CoreError::Unauthorized(format!(
            "Google sign-in failed: {error}"
        ))));
    }

    let signed_state = params.state.unwrap_or_default();
    if !verify_state_token(&signed_state, &state.config.jwt) {
        tracing::warn!("OAuth callback with invalid or expired state");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid or expired sign-in state".into(),
        )));
    }

    let code = params
        .code
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing authorization code".into()))?;

    let user = state
        .oauth
        .fetch_user(&code)
        .await
        .map_err(map_oauth_error)?;

    if !user.email_verified || !state.config.is_admin_email(&user.email) {
        tracing::warn!(email = %user.email, verified = user.email_verified, "Sign-in refused");
        return Err(AppError::Core(CoreError::Forbidden(
            "This account is not allowed to access the studio".into(),
        )));
    }

    let email = user.email.trim().to_lowercase();
    let access_token = generate_access_token(&email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Failed to generate token: {e}")))?;

    tracing::info!(%email, "Admin signed in");

    Ok(Json(AuthResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        email,
    }))
}

/// GET /api/v1/auth/me
pub async fn me(auth: AuthUser) -> Json<SessionInfo> {
    Json(SessionInfo { email: auth.email })
}
