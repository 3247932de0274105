/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development; override via
/// environment variables in production.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Admin gate configuration (password, cookie signing).
    pub admin: AdminConfig,
    /// Media object-storage configuration.
    pub storage: StorageConfig,
}

/// Single-operator admin gate settings.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// The shared admin password. Empty disables login entirely.
    pub password: String,
    /// HMAC key for the session cookie signature.
    pub cookie_secret: String,
    /// Session lifetime in seconds (default: 7 days).
    pub session_ttl_secs: u64,
}

/// Where uploaded media lands and how it is addressed publicly.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Local directory uploads are written under.
    pub root: String,
    /// Base URL the stored keys are served from.
    pub public_base_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                        |
    /// |--------------------------|--------------------------------|
    /// | `HOST`                   | `0.0.0.0`                      |
    /// | `PORT`                   | `3000`                         |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`        |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                           |
    /// | `ADMIN_PASSWORD`         | (empty: login disabled)        |
    /// | `ADMIN_COOKIE_SECRET`    | `dev-secret-change-me`         |
    /// | `ADMIN_SESSION_TTL_SECS` | `604800` (7 days)              |
    /// | `STORAGE_ROOT`           | `storage/media`                |
    /// | `STORAGE_PUBLIC_URL`     | `http://localhost:3000/media`  |
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

        let admin = AdminConfig {
            password: std::env::var("ADMIN_PASSWORD").unwrap_or_default(),
            cookie_secret: std::env::var("ADMIN_COOKIE_SECRET")
                .unwrap_or_else(|_| "dev-secret-change-me".into()),
            session_ttl_secs: std::env::var("ADMIN_SESSION_TTL_SECS")
                .unwrap_or_else(|_| "604800".into())
                .parse()
                .expect("ADMIN_SESSION_TTL_SECS must be a valid u64"),
        };

        let storage = StorageConfig {
            root: std::env::var("STORAGE_ROOT").unwrap_or_else(|_| "storage/media".into()),
            public_base_url: std::env::var("STORAGE_PUBLIC_URL")
                .unwrap_or_else(|_| "http://localhost:3000/media".into()),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            admin,
            storage,
        }
    }
}
