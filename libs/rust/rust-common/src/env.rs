//! Environment variable parsing shared by service configurations.
//!
//! Services load their configuration from the process environment at
//! startup. These helpers keep the "default when unset, error when
//! malformed" rule identical everywhere.

use crate::error::PlatformError;
use std::str::FromStr;

/// Parse an already looked-up raw value, falling back to `default` when absent.
///
/// Surrounding whitespace is ignored. An empty value counts as unset.
///
/// # Errors
///
/// Returns [`PlatformError::Config`] naming the variable when parsing fails.
pub fn parse_value<T: FromStr>(
    name: &str,
    raw: Option<String>,
    default: T,
) -> Result<T, PlatformError>
where
    T::Err: std::fmt::Display,
{
    match raw.as_deref().map(str::trim) {
        Some(val) if !val.is_empty() => val
            .parse()
            .map_err(|e| PlatformError::config(format!("Invalid {name}: {e}"))),
        _ => Ok(default),
    }
}
