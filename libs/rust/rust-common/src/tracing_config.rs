//! Tracing subscriber initialisation.
//!
//! Every service installs the same subscriber stack: an `EnvFilter` seeded
//! from configuration (overridable through `RUST_LOG`) and a fmt layer that
//! writes either human-readable or JSON lines.

use crate::error::PlatformError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Tracing configuration.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Service name attached to the startup event
    pub service_name: String,
    /// Log level filter
    pub log_level: String,
    /// Whether to output JSON format
    pub json_output: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            service_name: "rust-service".to_string(),
            log_level: "info".to_string(),
            json_output: false,
        }
    }
}

impl TracingConfig {
    /// Create config with custom service name.
    #[must_use]
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Create config with custom log level.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable or disable JSON output.
    #[must_use]
    pub const fn with_json_output(mut self, enabled: bool) -> Self {
        self.json_output = enabled;
        self
    }

    fn filter(&self) -> Result<EnvFilter, PlatformError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.log_level).map_err(|e| {
                PlatformError::config(format!("Invalid log level {:?}: {e}", self.log_level))
            }),
        }
    }
}

/// Initialize tracing with the given configuration.
///
/// Should be called once at application startup.
///
/// # Errors
///
/// Returns an error if the log level does not parse as a filter directive or
/// a global subscriber is already installed.
pub fn init_tracing(config: &TracingConfig) -> Result<(), PlatformError> {
    let filter = config.filter()?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json_output {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };
    installed.map_err(|e| PlatformError::internal(format!("Tracing already initialised: {e}")))?;

    tracing::info!(service = %config.service_name, "Tracing initialised");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TracingConfig::default();
        assert_eq!(config.service_name, "rust-service");
        assert_eq!(config.log_level, "info");
        assert!(!config.json_output);
    }

    #[test]
    fn test_config_builder() {
        let config = TracingConfig::default()
            .with_service_name("my-service")
            .with_log_level("debug")
            .with_json_output(true);

        assert_eq!(config.service_name, "my-service");
        assert_eq!(config.log_level, "debug");
        assert!(config.json_output);
    }
}
