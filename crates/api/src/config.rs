use crate::auth::google::OAuthConfig;
use crate::auth::jwt::JwtConfig;

/// Default studio name printed on documents.
pub const DEFAULT_STUDIO_NAME: &str = "AURA KNOT PHOTOGRAPHY";
/// Default tagline printed under the studio name.
pub const DEFAULT_STUDIO_TAGLINE: &str = "Professional Photography & Videography Services";

/// Log output format, selected with `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// `LOG_FORMAT=json` selects JSON lines; anything else is human-readable text.
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Letterhead text for generated PDFs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudioBranding {
    pub name: String,
    pub tagline: String,
}

impl Default for StudioBranding {
    fn default() -> Self {
        Self {
            name: DEFAULT_STUDIO_NAME.to_string(),
            tagline: DEFAULT_STUDIO_TAGLINE.to_string(),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets and the admin email have defaults suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Google OAuth client settings.
    pub oauth: OAuthConfig,
    /// The only email allowed to sign in.
    pub admin_email: String,
    pub studio: StudioBranding,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                           |
    /// |------------------------|---------------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                         |
    /// | `PORT`                 | `3000`                                            |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`                           |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                              |
    /// | `ADMIN_EMAIL`          | required                                          |
    /// | `STUDIO_NAME`          | `AURA KNOT PHOTOGRAPHY`                           |
    /// | `STUDIO_TAGLINE`       | `Professional Photography & Videography Services` |
    ///
    /// JWT and OAuth variables are documented on [`JwtConfig::from_env`] and
    /// [`OAuthConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on malformed numbers or a missing `ADMIN_EMAIL`.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let admin_email = std::env::var("ADMIN_EMAIL")
            .expect("ADMIN_EMAIL must be set in the environment")
            .trim()
            .to_lowercase();
        assert!(!admin_email.is_empty(), "ADMIN_EMAIL must not be empty");

        let defaults = StudioBranding::default();
        let studio = StudioBranding {
            name: std::env::var("STUDIO_NAME").unwrap_or(defaults.name),
            tagline: std::env::var("STUDIO_TAGLINE").unwrap_or(defaults.tagline),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            oauth: OAuthConfig::from_env(),
            admin_email,
            studio,
        }
    }

    /// Whether `email` is the allow-listed admin address.
    pub fn is_admin_email(&self, email: &str) -> bool {
        email.trim().eq_ignore_ascii_case(&self.admin_email)
    }
}
