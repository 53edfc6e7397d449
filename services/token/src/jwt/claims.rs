use serde::{Deserialize, Serialize};

/// Registered claims carried by every issued token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
}

impl Claims {
    /// True when `exp` is at or before `timestamp`.
    #[must_use]
    pub const fn is_expired_at(&self, timestamp: i64) -> bool {
        self.exp <= timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(exp: i64) -> Claims {
        Claims {
            sub: "alice".to_string(),
            iat: 1_000,
            iss: "jwks-issuer".to_string(),
            aud: "jwks-clients".to_string(),
            exp,
        }
    }

    #[test]
    fn test_serializes_exactly_registered_claims() {
        let value = serde_json::to_value(claims(4_600)).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["aud", "exp", "iat", "iss", "sub"]);
        assert_eq!(object["aud"], "jwks-clients");
    }

    #[test]
    fn test_expiry_boundary() {
        let c = claims(1_000);
        assert!(c.is_expired_at(1_000));
        assert!(!c.is_expired_at(999));
    }
}
