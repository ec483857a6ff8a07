/// Configuration management for the API server
///
/// Configuration comes from environment variables; a `.env` file in the
/// working directory is loaded first when present.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `PRODUCTION`: Enables HSTS (default: false)
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `DATABASE_ACQUIRE_TIMEOUT_SECONDS`: Wait for a free connection (default: 30)
/// - `AUTH_OPERATION_TIMEOUT_MS`: Bound on each store and hashing call (default: 5000)
/// - `ARGON2_MEMORY_KIB` / `ARGON2_ITERATIONS` / `ARGON2_PARALLELISM`: hash cost (default: 65536 / 3 / 4)
/// - `RUST_LOG`: Log filter
/// - `LOG_FORMAT`: `json` for JSON logs
///
/// # Example
///
/// ```no_run
/// use printshop_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use anyhow::Context;
use printshop_shared::{auth::password::HashParams, db::pool};
use std::{env, str::FromStr, time::Duration};

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Credential handling configuration
    pub auth: AuthConfig,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origins; `*` means permissive
    pub cors_origins: Vec<String>,

    /// Production mode (HSTS on)
    pub production: bool,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection
    pub acquire_timeout_seconds: u64,
}

/// Credential handling configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Upper bound for each store call and each hash/verify call
    pub operation_timeout: Duration,

    /// Argon2id cost parameters
    pub hash_params: HashParams,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            operation_timeout: Duration::from_millis(5000),
            hash_params: HashParams::default(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a numeric/boolean
    /// variable cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let defaults = HashParams::default();

        Ok(Self {
            api: ApiConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env_or("API_PORT", 8080)?,
                cors_origins: parse_origins(
                    &env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
                ),
                production: env_or("PRODUCTION", false)?,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10)?,
                acquire_timeout_seconds: env_or("DATABASE_ACQUIRE_TIMEOUT_SECONDS", 30)?,
            },
            auth: AuthConfig {
                operation_timeout: Duration::from_millis(env_or("AUTH_OPERATION_TIMEOUT_MS", 5000)?),
                hash_params: HashParams {
                    memory_kib: env_or("ARGON2_MEMORY_KIB", defaults.memory_kib)?,
                    iterations: env_or("ARGON2_ITERATIONS", defaults.iterations)?,
                    parallelism: env_or("ARGON2_PARALLELISM", defaults.parallelism)?,
                },
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Pool settings for [`printshop_shared::db::pool::create_pool`]
    pub fn pool_config(&self) -> pool::DatabaseConfig {
        pool::DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            acquire_timeout_seconds: self.database.acquire_timeout_seconds,
            ..Default::default()
        }
    }
}

/// Reads and parses a variable, falling back to `default` when unset
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
