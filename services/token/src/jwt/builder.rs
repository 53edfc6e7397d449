use crate::error::IssuerError;
use crate::jwt::claims::Claims;

/// Assembles [`Claims`] for one issuance.
///
/// Timestamps are supplied by the caller so issuance stays deterministic
/// under test.
#[derive(Debug, Clone)]
pub struct JwtBuilder {
    issuer: String,
    audience: String,
    subject: Option<String>,
    issued_at: i64,
    expires_at: i64,
}

impl JwtBuilder {
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            subject: None,
            issued_at: 0,
            expires_at: 0,
        }
    }

    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub const fn issued_at(mut self, iat: i64) -> Self {
        self.issued_at = iat;
        self
    }

    #[must_use]
    pub const fn expires_at(mut self, exp: i64) -> Self {
        self.expires_at = exp;
        self
    }

    /// # Errors
    ///
    /// Returns [`IssuerError::MissingSubject`] if no subject was set or it is
    /// blank.
    pub fn build(self) -> Result<Claims, IssuerError> {
        let subject = self
            .subject
            .filter(|s| !s.trim().is_empty())
            .ok_or(IssuerError::MissingSubject)?;

        Ok(Claims {
            sub: subject,
            iat: self.issued_at,
            iss: self.issuer,
            aud: self.audience,
            exp: self.expires_at,
        })
    }
}
