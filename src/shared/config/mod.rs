//! Application configuration module
//!
//! Configuration is assembled by [`AppConfigBuilder`] from three layers, in
//! increasing precedence:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file (path taken from `BLOG_CONFIG`)
//! 3. Environment variables
//!
//! The result is validated once and then treated as read-only for the life
//! of the process.
//!
//! # Environment Variables
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `SERVER_ADDR` | Listen address | `0.0.0.0:8000` |
//! | `DATABASE_URL` | PostgreSQL URL | unset (in-memory store) |
//! | `JWT_SECRET` | Token signing secret | required |
//! | `JWT_ALGORITHM` | `HS256`, `HS384` or `HS512` | `HS256` |
//! | `ACCESS_TOKEN_EXPIRE_MINUTES` | Token lifetime | `90` |
//! | `BCRYPT_COST` | bcrypt work factor | `12` |
//! | `CORS_ORIGINS` | Comma-separated allowed origins | `http://localhost,http://localhost:3000` |

use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use jsonwebtoken::Algorithm;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming the optional TOML configuration file
pub const CONFIG_FILE_ENV: &str = "BLOG_CONFIG";

const DEFAULT_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_TOKEN_TTL_MINUTES: u64 = 90;
const DEFAULT_ORIGINS: [&str; 2] = ["http://localhost", "http://localhost:3000"];

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// PostgreSQL connection string; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// Secret used to sign session tokens
    pub jwt_secret: String,
    /// HMAC algorithm used to sign session tokens
    pub jwt_algorithm: Algorithm,
    /// Lifetime of an issued session token
    pub token_ttl: Duration,
    /// bcrypt work factor for password hashing
    pub bcrypt_cost: u32,
    /// Origins allowed by the CORS layer
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the optional `BLOG_CONFIG` file and the
    /// process environment
    pub fn from_env() -> Result<AppConfig, ConfigError> {
        let mut builder = AppConfig::builder();
        if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
            builder = builder.merge_toml_file(path)?;
        }
        builder.merge_env_with(|key| std::env::var(key).ok())?.build()
    }
}

// The signing secret must never end up in logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("jwt_secret", &"<redacted>")
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

/// On-disk layout of the TOML configuration file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    bind_addr: Option<String>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    jwt_algorithm: Option<String>,
    token_ttl_minutes: Option<u64>,
    bcrypt_cost: Option<u32>,
    cors_origins: Option<Vec<String>>,
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    bind_addr: Option<String>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    jwt_algorithm: Option<String>,
    token_ttl_minutes: Option<u64>,
    bcrypt_cost: Option<u32>,
    cors_origins: Option<Vec<String>>,
}

impl AppConfigBuilder {
    /// Set the listen address
    pub fn bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = Some(addr.into());
        self
    }

    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the token signing secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    /// Set the token signing algorithm by name
    pub fn jwt_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.jwt_algorithm = Some(algorithm.into());
        self
    }

    /// Set the token lifetime in minutes
    pub fn token_ttl_minutes(mut self, minutes: u64) -> Self {
        self.token_ttl_minutes = Some(minutes);
        self
    }

    /// Set the bcrypt cost
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Set the allowed CORS origins
    pub fn cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Overlay values from a TOML file
    pub fn merge_toml_file(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge_toml_str(&raw)
    }

    /// Overlay values from TOML text
    pub fn merge_toml_str(mut self, raw: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(raw)?;
        if file.bind_addr.is_some() {
            self.bind_addr = file.bind_addr;
        }
        if file.database_url.is_some() {
            self.database_url = file.database_url;
        }
        if file.jwt_secret.is_some() {
            self.jwt_secret = file.jwt_secret;
        }
        if file.jwt_algorithm.is_some() {
            self.jwt_algorithm = file.jwt_algorithm;
        }
        if file.token_ttl_minutes.is_some() {
            self.token_ttl_minutes = file.token_ttl_minutes;
        }
        if file.bcrypt_cost.is_some() {
            self.bcrypt_cost = file.bcrypt_cost;
        }
        if file.cors_origins.is_some() {
            self.cors_origins = file.cors_origins;
        }
        Ok(self)
    }

    /// Overlay values from environment variables, looked up through `lookup`
    pub fn merge_env_with<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("SERVER_ADDR") {
            self.bind_addr = Some(addr);
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = Some(url);
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.jwt_secret = Some(secret);
        }
        if let Some(algorithm) = lookup("JWT_ALGORITHM") {
            self.jwt_algorithm = Some(algorithm);
        }
        if let Some(minutes) = lookup("ACCESS_TOKEN_EXPIRE_MINUTES") {
            let minutes = minutes.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "ACCESS_TOKEN_EXPIRE_MINUTES",
                message: format!("expected a whole number of minutes, got '{}'", minutes),
            })?;
            self.token_ttl_minutes = Some(minutes);
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            let cost = cost.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                message: format!("expected an integer, got '{}'", cost),
            })?;
            self.bcrypt_cost = Some(cost);
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            self.cors_origins = Some(
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect(),
            );
        }
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let bind_addr = self
            .bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_ADDR)
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                key: "SERVER_ADDR",
                message: e.to_string(),
            })?;

        let jwt_secret = self.jwt_secret.ok_or(ConfigError::MissingValue("JWT_SECRET"))?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "JWT_SECRET",
                message: "secret must not be empty".to_string(),
            });
        }

        let jwt_algorithm = match self.jwt_algorithm.as_deref().unwrap_or("HS256") {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "JWT_ALGORITHM",
                    message: format!("unsupported algorithm '{}', expected HS256, HS384 or HS512", other),
                })
            }
        };

        let minutes = self.token_ttl_minutes.unwrap_or(DEFAULT_TOKEN_TTL_MINUTES);
        if minutes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "ACCESS_TOKEN_EXPIRE_MINUTES",
                message: "token lifetime must be positive".to_string(),
            });
        }
        let ttl_secs = minutes.checked_mul(60).ok_or_else(|| ConfigError::InvalidValue {
            key: "ACCESS_TOKEN_EXPIRE_MINUTES",
            message: format!("{} minutes is too large", minutes),
        })?;

        let bcrypt_cost = self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST);
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                message: format!("cost {} is outside 4..=31", bcrypt_cost),
            });
        }

        let database_url = self.database_url.filter(|url| !url.trim().is_empty());

        Ok(AppConfig {
            bind_addr,
            database_url,
            jwt_secret,
            jwt_algorithm,
            token_ttl: Duration::from_secs(ttl_secs),
            bcrypt_cost,
            cors_origins: self
                .cors_origins
                .unwrap_or_else(|| DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect()),
        })
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
