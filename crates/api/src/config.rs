use std::path::PathBuf;

/// Which environment the process runs in.
///
/// Test mode runs on an embedded SQLite database instead of PostgreSQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Test,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value: {value}")]
    Invalid { var: &'static str, value: String },
}

/// Application configuration, resolved once at startup and carried in
/// [`AppState`](crate::state::AppState).
#[derive(Clone)]
pub struct AppConfig {
    pub environment: Environment,
    /// Connection string. May embed credentials, so it is kept out of `Debug`.
    pub database_url: String,
    /// Maximum pool size (default: `10`).
    pub db_max_connections: u32,
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins. A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub log_format: LogFormat,
    /// Optional file receiving a DEBUG-level copy of the log.
    pub log_file: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("environment", &self.environment)
            .field("database_url", &"<redacted>")
            .field("db_max_connections", &self.db_max_connections)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("cors_origins", &self.cors_origins)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_format", &self.log_format)
            .field("log_file", &self.log_file)
            .finish()
    }
}

/// Embedded database used in test mode when `DATABASE_URL` is unset.
pub const TEST_DATABASE_URL: &str = "sqlite::memory:";

impl AppConfig {
    /// Load configuration from process environment variables.
    ///
    /// | Env Var                | Default                              |
    /// |------------------------|--------------------------------------|
    /// | `APP_ENV`              | `production` (`test` for SQLite)     |
    /// | `DATABASE_URL`         | built from `POSTGRES_*`              |
    /// | `POSTGRES_USER`        | required in production               |
    /// | `POSTGRES_PASSWORD`    | required in production               |
    /// | `POSTGRES_HOST`        | required in production               |
    /// | `POSTGRES_PORT`        | required in production               |
    /// | `POSTGRES_DB`          | required in production               |
    /// | `DB_MAX_CONNECTIONS`   | `10`                                 |
    /// | `HOST`                 | `0.0.0.0`                            |
    /// | `PORT`                 | `8000`                               |
    /// | `CORS_ORIGINS`         | `*`                                  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                 |
    /// | `LOG_FORMAT`           | `pretty`                             |
    /// | `LOG_FILE`             | unset (console only)                 |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            None | Some("production") => Environment::Production,
            Some("test") => Environment::Test,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "APP_ENV",
                    value: other.to_string(),
                })
            }
        };

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None if environment == Environment::Test => TEST_DATABASE_URL.to_string(),
            None => postgres_url(&lookup)?,
        };

        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 8000)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    value: other.to_string(),
                })
            }
        };

        let log_file = match lookup("LOG_FILE") {
            None => None,
            Some(value) if value.trim().is_empty() => None,
            Some(value) => {
                let path = PathBuf::from(value.trim());
                if path.file_name().is_none() {
                    return Err(ConfigError::Invalid {
                        var: "LOG_FILE",
                        value,
                    });
                }
                Some(path)
            }
        };

        Ok(Self {
            environment,
            database_url,
            db_max_connections,
            host,
            port,
            cors_origins,
            request_timeout_secs,
            log_format,
            log_file,
        })
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var).ok_or(ConfigError::Missing(var))
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

fn postgres_url<F>(lookup: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let user = required(lookup, "POSTGRES_USER")?;
    let password = required(lookup, "POSTGRES_PASSWORD")?;
    let host = required(lookup, "POSTGRES_HOST")?;
    let port = required(lookup, "POSTGRES_PORT")?;
    let db = required(lookup, "POSTGRES_DB")?;
    Ok(format!("postgres://{user}:{password}@{host}:{port}/{db}"))
}
