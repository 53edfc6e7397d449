use crate::storage::StoreError;
use rust_common::PlatformError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IssuerError {
    #[error("Subject required via Basic credentials or JSON body")]
    MissingSubject,

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("No suitable signing key found (expired={expired})")]
    NoSuitableKey { expired: bool },

    #[error("Stored key material is corrupt: {0}")]
    KeyMaterialCorrupt(String),

    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("JWT signing error: {0}")]
    Signing(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IssuerError {
    /// True when the caller must fix the request; everything else is a
    /// server-side fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingSubject | Self::MalformedRequest(_))
    }

    /// Stable machine-readable code for responses, logs and metrics.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingSubject => MISSING_SUBJECT,
            Self::MalformedRequest(_) => MALFORMED_REQUEST,
            Self::NoSuitableKey { .. } => NO_SUITABLE_KEY,
            Self::KeyMaterialCorrupt(_) => KEY_MATERIAL_CORRUPT,
            Self::KeyGeneration(_) => KEY_GENERATION_FAILED,
            Self::Signing(_) => SIGNING_FAILED,
            Self::Storage(_) => STORAGE_ERROR,
            Self::Config(_) => CONFIG_ERROR,
        }
    }

    pub fn key_material(msg: impl Into<String>) -> Self {
        Self::KeyMaterialCorrupt(msg.into())
    }

    pub fn key_generation(msg: impl Into<String>) -> Self {
        Self::KeyGeneration(msg.into())
    }

    pub fn signing(msg: impl Into<String>) -> Self {
        Self::Signing(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<jsonwebtoken::errors::Error> for IssuerError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Signing(err.to_string())
    }
}

impl From<PlatformError> for IssuerError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::Config(msg) => Self::Config(msg),
            other => Self::Config(other.to_string()),
        }
    }
}

// Error codes for HTTP responses
pub const MISSING_SUBJECT: &str = "MISSING_SUBJECT";
pub const MALFORMED_REQUEST: &str = "MALFORMED_REQUEST";
pub const NO_SUITABLE_KEY: &str = "NO_SUITABLE_KEY";
pub const KEY_MATERIAL_CORRUPT: &str = "KEY_MATERIAL_CORRUPT";
pub const KEY_GENERATION_FAILED: &str = "KEY_GENERATION_FAILED";
pub const SIGNING_FAILED: &str = "SIGNING_FAILED";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(IssuerError::MissingSubject.is_client_error());
        assert!(IssuerError::MalformedRequest("bad json".into()).is_client_error());
    }

    #[test]
    fn test_server_errors() {
        assert!(!IssuerError::NoSuitableKey { expired: false }.is_client_error());
        assert!(!IssuerError::key_material("bad pem").is_client_error());
        assert!(!IssuerError::signing("ring").is_client_error());
        assert!(!IssuerError::Storage(StoreError::LockPoisoned).is_client_error());
    }

    #[test]
    fn test_no_suitable_key_display() {
        let err = IssuerError::NoSuitableKey { expired: true };
        assert_eq!(err.to_string(), "No suitable signing key found (expired=true)");
        let err = IssuerError::NoSuitableKey { expired: false };
        assert_eq!(err.to_string(), "No suitable signing key found (expired=false)");
    }

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            IssuerError::MissingSubject.code(),
            IssuerError::MalformedRequest(String::new()).code(),
            IssuerError::NoSuitableKey { expired: false }.code(),
            IssuerError::key_material("").code(),
            IssuerError::key_generation("").code(),
            IssuerError::signing("").code(),
            IssuerError::Storage(StoreError::LockPoisoned).code(),
            IssuerError::config("").code(),
        ];
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_platform_config_error_maps_to_config() {
        let err: IssuerError = PlatformError::config("Invalid PORT").into();
        assert_eq!(err.code(), CONFIG_ERROR);
        assert!(err.to_string().contains("Invalid PORT"));
    }
}
