use std::time::Duration;

use marquee_db::PoolConfig;

/// Log output format, selected with `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `4000`).
    pub port: u16,
    /// Reported by the healthcheck (default: `development`).
    pub environment: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Largest accepted JSON request body (default: 1 MiB).
    pub max_body_bytes: usize,
    /// Time allowed for in-flight background tasks after the listener
    /// closes (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub log_format: LogFormat,
    /// Postgres connection string. Required.
    pub database_url: String,
    pub pool: PoolConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `4000`                     |
    /// | `APP_ENV`              | `development`              |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `MAX_BODY_BYTES`       | `1048576`                  |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `LOG_FORMAT`           | `pretty`                   |
    /// | `DATABASE_URL`         | none, must be set          |
    /// | `DB_MAX_CONNECTIONS`   | `25`                       |
    /// | `DB_IDLE_TIMEOUT_SECS` | `900`                      |
    ///
    /// Panics on a missing `DATABASE_URL` or an unparseable value, so
    /// misconfiguration stops the process at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "4000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let environment = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());

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

        let max_body_bytes: usize = std::env::var("MAX_BODY_BYTES")
            .unwrap_or_else(|_| "1048576".into())
            .parse()
            .expect("MAX_BODY_BYTES must be a valid usize");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let log_format = match std::env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("pretty") | Err(_) => LogFormat::Pretty,
            Ok(other) => panic!("LOG_FORMAT must be `json` or `pretty`, got `{other}`"),
        };

        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "25".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        let idle_timeout_secs: u64 = std::env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "900".into())
            .parse()
            .expect("DB_IDLE_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            environment,
            cors_origins,
            request_timeout_secs,
            max_body_bytes,
            shutdown_timeout_secs,
            log_format,
            database_url,
            pool: PoolConfig {
                max_connections,
                idle_timeout: Duration::from_secs(idle_timeout_secs),
            },
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}
