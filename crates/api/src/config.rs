use mpms_core::registration::MIN_PASSWORD_LENGTH;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Email suffix every self-registered account must carry.
    pub allowed_email_domain: String,
    /// Capacity given to a mentor profile created on promotion (default: `10`).
    pub default_mentor_capacity: i32,
    /// Minimum password length at registration.
    pub min_password_length: usize,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `5000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `ALLOWED_EMAIL_DOMAIN`    | `@jaipur.manipal.edu`   |
    /// | `DEFAULT_MENTOR_CAPACITY` | `10`                    |
    ///
    /// # Panics
    ///
    /// Panics on unparsable values so misconfiguration fails at boot.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
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

        let allowed_email_domain = std::env::var("ALLOWED_EMAIL_DOMAIN")
            .unwrap_or_else(|_| "@jaipur.manipal.edu".into());
        assert!(
            allowed_email_domain.starts_with('@'),
            "ALLOWED_EMAIL_DOMAIN must start with '@'"
        );

        let default_mentor_capacity: i32 = std::env::var("DEFAULT_MENTOR_CAPACITY")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("DEFAULT_MENTOR_CAPACITY must be a valid i32");
        assert!(
            default_mentor_capacity >= 0,
            "DEFAULT_MENTOR_CAPACITY must not be negative"
        );

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            allowed_email_domain,
            default_mentor_capacity,
            min_password_length: MIN_PASSWORD_LENGTH,
            jwt,
        }
    }
}
