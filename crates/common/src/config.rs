//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Token and guest cookie settings.
    pub auth: AuthConfig,
    /// Administrator account seeded at startup.
    #[serde(default)]
    pub admin: AdminSeedConfig,
    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Session token and guest identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign session tokens.
    pub jwt_secret: String,
    /// Session token lifetime in hours.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    /// Lifetime of the guest identity cookie in days.
    #[serde(default = "default_guest_cookie_max_age_days")]
    pub guest_cookie_max_age_days: i64,
}

/// Seeded administrator account.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminSeedConfig {
    /// Administrator username.
    #[serde(default = "default_admin_username")]
    pub username: String,
    /// Administrator email.
    #[serde(default = "default_admin_email")]
    pub email: String,
    /// Administrator password (hashed before it is stored).
    #[serde(default = "default_admin_password")]
    pub password: String,
}

impl Default for AdminSeedConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            email: default_admin_email(),
            password: default_admin_password(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON log lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8080
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    2
}

const fn default_token_ttl_hours() -> i64 {
    24
}

const fn default_guest_cookie_max_age_days() -> i64 {
    30
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_email() -> String {
    "admin@admin.com".to_string()
}

fn default_admin_password() -> String {
    "admin".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present, exported into the process environment)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `CONFESSLY_ENV`)
    /// 4. Environment variables with `CONFESSLY_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("CONFESSLY_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CONFESSLY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("CONFESSLY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that deserialize but cannot be used.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.auth.token_ttl_hours <= 0 {
            return Err(config::ConfigError::Message(
                "auth.token_ttl_hours must be positive".to_string(),
            ));
        }
        if self.auth.guest_cookie_max_age_days <= 0 {
            return Err(config::ConfigError::Message(
                "auth.guest_cookie_max_age_days must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Address the HTTP listener binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
