use std::str::FromStr;

use versaver_core::versioning::DEFAULT_MAX_SAVE_ATTEMPTS;

/// Default request body cap: 64 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Which [`VersionStore`](versaver_db::store::VersionStore) backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Process-local storage; contents vanish on restart. Saves for
    /// different names share one lock, so use it for development only.
    Memory,
}

impl StoreBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        }
    }
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{other}'")),
        }
    }
}

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

/// Storage settings.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Required when `backend` is [`StoreBackend::Postgres`].
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// Upper bound on one store call, retries included.
    pub op_timeout_secs: u64,
    /// Insert attempts a save may spend on a contended name.
    pub max_save_attempts: u32,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    /// A `*` entry allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Request body cap in bytes (default: 64 MiB). `0` removes the cap.
    pub max_body_bytes: usize,
    pub log_format: LogFormat,
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default    |
    /// |-------------------------|------------|
    /// | `HOST`                  | `0.0.0.0`  |
    /// | `PORT`                  | `8080`     |
    /// | `CORS_ORIGINS`          | `*`        |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`       |
    /// | `MAX_BODY_BYTES`        | `67108864` |
    /// | `LOG_FORMAT`            | `pretty`   |
    /// | `STORE_BACKEND`         | `postgres` |
    /// | `DATABASE_URL`          | (none)     |
    /// | `DB_MAX_CONNECTIONS`    | `20`       |
    /// | `STORE_OP_TIMEOUT_SECS` | `10`       |
    /// | `SAVE_MAX_ATTEMPTS`     | `16`       |
    ///
    /// `STORE_BACKEND=memory` serializes saves for all names behind a single
    /// lock; it is meant for local development and tests.
    ///
    /// Panics on malformed values; misconfiguration should stop startup.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let store = StoreConfig {
            backend: parse_or_panic("STORE_BACKEND", &var("STORE_BACKEND", "postgres")),
            database_url: lookup("DATABASE_URL").filter(|s| !s.is_empty()),
            max_connections: parse_or_panic("DB_MAX_CONNECTIONS", &var("DB_MAX_CONNECTIONS", "20")),
            op_timeout_secs: parse_or_panic(
                "STORE_OP_TIMEOUT_SECS",
                &var("STORE_OP_TIMEOUT_SECS", "10"),
            ),
            max_save_attempts: parse_or_panic(
                "SAVE_MAX_ATTEMPTS",
                &var("SAVE_MAX_ATTEMPTS", &DEFAULT_MAX_SAVE_ATTEMPTS.to_string()),
            ),
        };

        Self {
            host: var("HOST", "0.0.0.0"),
            port: parse_or_panic("PORT", &var("PORT", "8080")),
            cors_origins,
            request_timeout_secs: parse_or_panic(
                "REQUEST_TIMEOUT_SECS",
                &var("REQUEST_TIMEOUT_SECS", "30"),
            ),
            max_body_bytes: parse_or_panic(
                "MAX_BODY_BYTES",
                &var("MAX_BODY_BYTES", &DEFAULT_MAX_BODY_BYTES.to_string()),
            ),
            log_format: parse_or_panic("LOG_FORMAT", &var("LOG_FORMAT", "pretty")),
            store,
        }
    }
}

fn parse_or_panic<T>(key: &str, raw: &str) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}"))
}
