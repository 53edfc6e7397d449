//! Centralized configuration for the issuer.
//!
//! All configuration is loaded from environment variables (optionally via a
//! `.env` file) and validated at startup.

use crate::jwt::IssuePolicy;
use crate::lifecycle::SeedPolicy;
use rust_common::{parse_value, PlatformError, TracingConfig};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Service name used in logs.
pub const SERVICE_NAME: &str = "jwks-issuer";

/// Issuer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // Server settings
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    // Storage
    /// SQLite database file
    pub database_path: PathBuf,

    // JWT settings
    /// `iss` claim
    pub jwt_issuer: String,
    /// `aud` claim
    pub jwt_audience: String,
    /// Lifetime of a normal token
    pub token_ttl: Duration,
    /// Distance of an expired token's `exp` before `iat`
    pub expired_token_backdate: Duration,

    // Key seeding
    /// Lifetime of the active seed key
    pub active_key_ttl: Duration,
    /// Distance of the expired seed key's expiry before startup
    pub expired_key_backdate: Duration,

    // Logging
    /// Default log filter
    pub log_level: String,
    /// Emit JSON log lines
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_path: PathBuf::from("data/keys.db"),
            jwt_issuer: "jwks-issuer".to_string(),
            jwt_audience: "jwks-clients".to_string(),
            token_ttl: Duration::from_secs(3600),
            expired_token_backdate: Duration::from_secs(60),
            active_key_ttl: Duration::from_secs(3600),
            expired_key_backdate: Duration::from_secs(10),
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is malformed or validation fails.
    pub fn from_env() -> Result<Self, PlatformError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is malformed or validation fails.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PlatformError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name);
        let seconds = |name: &str, default: Duration| -> Result<Duration, PlatformError> {
            parse_value(name, var(name), default.as_secs()).map(Duration::from_secs)
        };

        let config = Self {
            host: parse_value("HOST", var("HOST"), defaults.host)?,
            port: parse_value("PORT", var("PORT"), defaults.port)?,
            database_path: parse_value(
                "DATABASE_PATH",
                var("DATABASE_PATH"),
                defaults.database_path,
            )?,
            jwt_issuer: parse_value("JWT_ISSUER", var("JWT_ISSUER"), defaults.jwt_issuer)?,
            jwt_audience: parse_value("JWT_AUDIENCE", var("JWT_AUDIENCE"), defaults.jwt_audience)?,
            token_ttl: seconds("TOKEN_TTL", defaults.token_ttl)?,
            expired_token_backdate: seconds(
                "EXPIRED_TOKEN_BACKDATE",
                defaults.expired_token_backdate,
            )?,
            active_key_ttl: seconds("ACTIVE_KEY_TTL", defaults.active_key_ttl)?,
            expired_key_backdate: seconds("EXPIRED_KEY_BACKDATE", defaults.expired_key_backdate)?,
            log_level: parse_value("LOG_LEVEL", var("LOG_LEVEL"), defaults.log_level)?,
            log_json: parse_value("LOG_JSON", var("LOG_JSON"), defaults.log_json)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Config`] naming the first invalid setting.
    pub fn validate(&self) -> Result<(), PlatformError> {
        if self.jwt_issuer.trim().is_empty() {
            return Err(PlatformError::config("JWT_ISSUER cannot be empty"));
        }
        if self.jwt_audience.trim().is_empty() {
            return Err(PlatformError::config("JWT_AUDIENCE cannot be empty"));
        }

        let durations = [
            ("TOKEN_TTL", self.token_ttl),
            ("EXPIRED_TOKEN_BACKDATE", self.expired_token_backdate),
            ("ACTIVE_KEY_TTL", self.active_key_ttl),
            ("EXPIRED_KEY_BACKDATE", self.expired_key_backdate),
        ];
        if let Some((name, _)) = durations.iter().find(|(_, d)| d.is_zero()) {
            return Err(PlatformError::config(format!("{name} must be greater than 0")));
        }

        Ok(())
    }

    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Config`] if `HOST` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, PlatformError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| PlatformError::config(format!("Invalid HOST: {e}")))
    }

    #[must_use]
    pub fn issue_policy(&self) -> IssuePolicy {
        IssuePolicy {
            issuer: self.jwt_issuer.clone(),
            audience: self.jwt_audience.clone(),
            token_ttl: self.token_ttl,
            expired_backdate: self.expired_token_backdate,
        }
    }

    #[must_use]
    pub const fn seed_policy(&self) -> SeedPolicy {
        SeedPolicy {
            expired_backdate: self.expired_key_backdate,
            active_ttl: self.active_key_ttl,
        }
    }

    #[must_use]
    pub fn tracing(&self) -> TracingConfig {
        TracingConfig::default()
            .with_service_name(SERVICE_NAME)
            .with_log_level(self.log_level.clone())
            .with_json_output(self.log_json)
    }
}

/// Whole seconds of `duration` as a timestamp offset, saturating at `i64::MAX`.
pub(crate) fn duration_secs(duration: Duration) -> i64 {
    i64::try_from(duration.as_secs()).unwrap_or(i64::MAX)
}
