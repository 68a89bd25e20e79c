//! Server configuration, loaded from environment variables

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the SQLite database file
    pub database_path: String,
    /// HTTP listen port
    pub port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Directory where uploaded menu images are stored
    pub upload_dir: String,
    /// Public URL prefix under which uploaded images are served
    pub upload_public_path: String,
    /// Email of the bootstrap super admin account
    pub default_admin_email: String,
    /// Password of the bootstrap super admin account
    pub default_admin_password: String,
}

impl Config {
    /// Require a secret env var: must be set and non-empty outside development.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "restaurant.db".into()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            upload_dir: std::env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "public/static/uploads".into()),
            upload_public_path: std::env::var("UPLOAD_PUBLIC_PATH")
                .unwrap_or_else(|_| "/static/uploads".into()),
            default_admin_email: std::env::var("DEFAULT_ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@restaurant-alas.de".into()),
            default_admin_password: Self::require_secret("DEFAULT_ADMIN_PASSWORD", &environment)?,
            environment,
        })
    }
}
