//! Compact JWS encoding for RS256 tokens.

use crate::error::IssuerError;
use crate::jwks::Jwk;
use crate::jwt::claims::Claims;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// The only signing algorithm this issuer speaks.
pub const ALGORITHM: Algorithm = Algorithm::RS256;

/// Name of [`ALGORITHM`] as it appears in headers and JWKs.
pub const ALGORITHM_NAME: &str = "RS256";

pub struct JwtSerializer;

impl JwtSerializer {
    /// Signs `claims` with header `{"typ":"JWT","alg":"RS256","kid":kid}`.
    ///
    /// # Errors
    ///
    /// Returns [`IssuerError::Signing`] if encoding or signing fails.
    pub fn serialize(claims: &Claims, key: &EncodingKey, kid: &str) -> Result<String, IssuerError> {
        let mut header = Header::new(ALGORITHM);
        header.kid = Some(kid.to_string());

        encode(&header, claims, key).map_err(|e| IssuerError::signing(e.to_string()))
    }

    /// Verifies `token` against a published key.
    ///
    /// Checks the header `kid` against the key, the signature, `iss`, `aud`
    /// and `exp` with no leeway.
    ///
    /// # Errors
    ///
    /// Returns the `jsonwebtoken` error describing the first failed check.
    pub fn verify(
        token: &str,
        jwk: &Jwk,
        issuer: &str,
        audience: &str,
    ) -> jsonwebtoken::errors::Result<Claims> {
        let header = decode_header(token)?;
        if header.kid.as_deref() != Some(jwk.kid.as_str()) {
            return Err(ErrorKind::InvalidToken.into());
        }
        if jwk.alg != ALGORITHM_NAME || header.alg != ALGORITHM {
            return Err(ErrorKind::InvalidAlgorithm.into());
        }

        let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)?;
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);

        Ok(decode::<Claims>(token, &key, &validation)?.claims)
    }

    /// Reads the header `kid` and the claims without checking the signature.
    ///
    /// For diagnostics only; never trust the result.
    ///
    /// # Errors
    ///
    /// Returns [`IssuerError::MalformedRequest`] if the token is not a
    /// three-part JWS with a JSON payload.
    pub fn decode_unverified(token: &str) -> Result<(Option<String>, Claims), IssuerError> {
        let malformed = IssuerError::MalformedRequest;

        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return Err(malformed("Invalid token format".to_string()));
        }

        let header = decode_header(token).map_err(|e| malformed(e.to_string()))?;
        let payload = URL_SAFE_NO_PAD
            .decode(parts[1])
            .map_err(|e| malformed(e.to_string()))?;
        let claims = serde_json::from_slice(&payload).map_err(|e| malformed(e.to_string()))?;

        Ok((header.kid, claims))
    }
}
