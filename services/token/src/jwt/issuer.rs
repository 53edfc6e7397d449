//! Token issuance: key selection, claim assembly and signing.

use crate::crypto::KeyCodec;
use crate::config::duration_secs as secs;
use crate::error::IssuerError;
use crate::jwt::builder::JwtBuilder;
use crate::jwt::serializer::JwtSerializer;
use crate::metrics;
use crate::storage::KeyStore;
use std::time::Duration;
use tracing::{info, warn};

/// Claim values and lifetimes applied to every token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuePolicy {
    pub issuer: String,
    pub audience: String,
    /// Lifetime of a normal token.
    pub token_ttl: Duration,
    /// How far before `iat` an expired token's `exp` lies.
    pub expired_backdate: Duration,
}

impl Default for IssuePolicy {
    fn default() -> Self {
        Self {
            issuer: "jwks-issuer".to_string(),
            audience: "jwks-clients".to_string(),
            token_ttl: Duration::from_secs(3600),
            expired_backdate: Duration::from_secs(60),
        }
    }
}

impl IssuePolicy {
    fn expiry_for(&self, now: i64, want_expired: bool) -> i64 {
        if want_expired {
            now.saturating_sub(secs(self.expired_backdate))
        } else {
            now.saturating_add(secs(self.token_ttl))
        }
    }
}

/// A signed token together with the key it was signed under.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub kid: String,
    pub expires_at: i64,
}

impl std::fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"<redacted>")
            .field("kid", &self.kid)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

pub struct TokenIssuer<S> {
    store: S,
    policy: IssuePolicy,
}

impl<S: KeyStore> TokenIssuer<S> {
    pub const fn new(store: S, policy: IssuePolicy) -> Self {
        Self { store, policy }
    }

    /// Issues a token for `subject` at `now`.
    ///
    /// With `want_expired` the most recently expired key signs a token whose
    /// `exp` already lies in the past; otherwise the active key closest to
    /// expiry signs a token valid for the configured TTL.
    ///
    /// # Errors
    ///
    /// - [`IssuerError::MissingSubject`] for a blank subject, before any store access
    /// - [`IssuerError::NoSuitableKey`] when no key matches the policy
    /// - [`IssuerError::KeyMaterialCorrupt`] when the selected key does not load
    /// - [`IssuerError::Signing`] or [`IssuerError::Storage`] otherwise
    pub async fn issue(
        &self,
        subject: &str,
        want_expired: bool,
        now: i64,
    ) -> Result<IssuedToken, IssuerError> {
        let result = self.try_issue(subject, want_expired, now).await;

        match &result {
            Ok(issued) => {
                metrics::record_token_issued(want_expired);
                info!(
                    kid = %issued.kid,
                    expired = want_expired,
                    subject,
                    "Issued token"
                );
            }
            Err(e) => {
                metrics::record_issuance_failure(e.code());
                warn!(code = e.code(), expired = want_expired, error = %e, "Token issuance failed");
            }
        }

        result
    }

    async fn try_issue(
        &self,
        subject: &str,
        want_expired: bool,
        now: i64,
    ) -> Result<IssuedToken, IssuerError> {
        let expires_at = self.policy.expiry_for(now, want_expired);
        let claims = JwtBuilder::new(&self.policy.issuer, &self.policy.audience)
            .subject(subject)
            .issued_at(now)
            .expires_at(expires_at)
            .build()?;

        let key = self
            .store
            .select_one(want_expired, now)
            .await?
            .ok_or(IssuerError::NoSuitableKey {
                expired: want_expired,
            })?;

        let kid = key.kid();
        let encoding_key = KeyCodec::encoding_key(key.material())?;
        let token = JwtSerializer::serialize(&claims, &encoding_key, &kid)?;

        Ok(IssuedToken {
            token,
            kid,
            expires_at,
        })
    }
}
