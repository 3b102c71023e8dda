//! Google OAuth 2.0 authorization-code flow.
//!
//! The handlers only talk to the [`OAuthProvider`] trait so tests can swap in
//! a provider that never leaves the process.

use async_trait::async_trait;
use url::Url;
use serde::Deserialize;

pub const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
pub const SCOPES: &str = "openid email profile";

/// Google OAuth client settings.
#[derive(Debug, Clone, Default)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Must match a redirect URI registered for the client.
    pub redirect_url: String,
}

impl OAuthConfig {
    /// Load OAuth settings from environment variables.
    ///
    /// | Env Var                | Required for login |
    /// |------------------------|--------------------|
    /// | `GOOGLE_CLIENT_ID`     | yes                |
    /// | `GOOGLE_CLIENT_SECRET` | yes                |
    /// | `OAUTH_REDIRECT_URL`   | yes                |
    ///
    /// Missing values leave the server running with login disabled.
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).unwrap_or_default().trim().to_string();
        let config = Self {
            client_id: read("GOOGLE_CLIENT_ID"),
            client_secret: read("GOOGLE_CLIENT_SECRET"),
            redirect_url: read("OAUTH_REDIRECT_URL"),
        };
        if !config.is_configured() {
            tracing::warn!("Google OAuth is not configured; sign-in is disabled");
        }
        config
    }

    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty() && !self.redirect_url.is_empty()
    }
}

/// Profile returned by the userinfo endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthUser {
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    pub name: Option<String>,
    pub picture: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    #[error("OAuth is not configured")]
    NotConfigured,

    #[error("Invalid OAuth URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("OAuth request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OAuth provider rejected the request: {0}")]
    Rejected(String),
}

/// An OAuth identity provider.
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// URL the browser is sent to, carrying the signed `state`.
    fn authorization_url(&self, state: &str) -> Result<String, OAuthError>;

    /// Exchange an authorization code for the signed-in user's profile.
    async fn fetch_user(&self, code: &str) -> Result<OAuthUser, OAuthError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// [`OAuthProvider`] backed by Google's endpoints.
pub struct GoogleOAuth {
    config: OAuthConfig,
    http: reqwest::Client,
}

impl GoogleOAuth {
    pub fn new(config: OAuthConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl OAuthProvider for GoogleOAuth {
    fn authorization_url(&self, state: &str) -> Result<String, OAuthError> {
        if !self.config.is_configured() {
            return Err(OAuthError::NotConfigured);
        }
        let url = Url::parse_with_params(
            AUTHORIZE_URL,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
                ("response_type", "code"),
                ("scope", SCOPES),
                ("state", state),
                ("prompt", "select_account"),
            ],
        )?;
        Ok(url.into())
    }

    async fn fetch_user(&self, code: &str) -> Result<OAuthUser, OAuthError> {
        if !self.config.is_configured() {
            return Err(OAuthError::NotConfigured);
        }

        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_url.as_str()),
        ];
        let response = self.http.post(TOKEN_URL).form(&params).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response
                .json::<TokenErrorResponse>()
                .await
                .map(|e| match e.error_description {
                    Some(description) => format!("{}: {description}", e.error),
                    None => e.error,
                })
                .unwrap_or_else(|_| status.to_string());
            return Err(OAuthError::Rejected(detail));
        }
        let token: TokenResponse = response.json().await?;

        let user = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await?
            .error_for_status()?
            .json::<OAuthUser>()
            .await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> OAuthConfig {
        OAuthConfig {
            client_id: "client-123".to_string(),
            client_secret: "shh".to_string(),
            redirect_url: "http://localhost:5173/auth/callback".to_string(),
        }
    }

    #[test]
    fn authorization_url_carries_client_and_state() {
        let provider = GoogleOAuth::new(configured());
        let url = Url::parse(&provider.authorization_url("signed-state").unwrap()).unwrap();

        let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(params.contains(&("client_id".into(), "client-123".into())));
        assert!(params.contains(&("state".into(), "signed-state".into())));
        assert!(params.contains(&("scope".into(), SCOPES.into())));
        assert!(params.contains(&(
            "redirect_uri".into(),
            "http://localhost:5173/auth/callback".into()
        )));
    }

    #[test]
    fn unconfigured_provider_refuses() {
        let provider = GoogleOAuth::new(OAuthConfig::default());
        assert!(matches!(
            provider.authorization_url("s"),
            Err(OAuthError::NotConfigured)
        ));
    }
}
