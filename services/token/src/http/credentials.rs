//! Subject extraction for `POST /auth`.

use super::models::AuthRequest;
use crate::error::IssuerError;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Username from an `Authorization: Basic` header.
///
/// Anything that is not well-formed Basic credentials with a non-empty
/// username yields `None`.
#[must_use]
pub fn basic_username(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, _password) = decoded.split_once(':')?;
    (!username.is_empty()).then(|| username.to_string())
}

/// Username from a JSON body; an empty body carries none.
///
/// # Errors
///
/// Returns [`IssuerError::MalformedRequest`] for a non-empty body that is not
/// a JSON credentials object.
pub fn body_username(body: &[u8]) -> Result<Option<String>, IssuerError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let request: AuthRequest = serde_json::from_slice(body)
        .map_err(|e| IssuerError::MalformedRequest(format!("invalid JSON body: {e}")))?;
    Ok(request.username)
}

/// Subject for the request: Basic credentials first, then the JSON body.
///
/// The body is only parsed when Basic credentials supply no username.
/// Returns an empty subject when neither source has one; the issuer rejects
/// it.
///
/// # Errors
///
/// Propagates [`body_username`] failures.
pub fn resolve_subject(headers: &HeaderMap, body: &[u8]) -> Result<String, IssuerError> {
    if let Some(username) = basic_username(headers) {
        return Ok(username);
    }
    Ok(body_username(body)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn basic(raw: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let value = format!("Basic {}", STANDARD.encode(raw));
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
        headers
    }

    #[test]
    fn test_basic_username() {
        assert_eq!(basic_username(&basic("alice:secret")).as_deref(), Some("alice"));
        assert_eq!(basic_username(&basic("alice:")).as_deref(), Some("alice"));
        assert_eq!(basic_username(&basic("a:b:c")).as_deref(), Some("a"));
    }

    #[test]
    fn test_malformed_basic_is_absent() {
        assert!(basic_username(&basic("no-colon")).is_none());
        assert!(basic_username(&basic(":password")).is_none());

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic %%%"));
        assert!(basic_username(&headers).is_none());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert!(basic_username(&headers).is_none());
        assert!(basic_username(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        let value = format!("basic {}", STANDARD.encode("bob:pw"));
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
        assert_eq!(basic_username(&headers).as_deref(), Some("bob"));
    }

    #[test]
    fn test_body_username() {
        let body = br#"{"username":"userABC","password":"password123"}"#;
        assert_eq!(body_username(body).unwrap().as_deref(), Some("userABC"));
        assert_eq!(body_username(b"{}").unwrap(), None);
        assert_eq!(body_username(b"  ").unwrap(), None);
        assert!(matches!(
            body_username(b"username=alice"),
            Err(IssuerError::MalformedRequest(_))
        ));
    }

    #[test]
    fn test_basic_takes_precedence() {
        let headers = basic("from-header:x");
        let subject = resolve_subject(&headers, br#"{"username":"from-body"}"#).unwrap();
        assert_eq!(subject, "from-header");

        let subject = resolve_subject(&HeaderMap::new(), br#"{"username":"from-body"}"#).unwrap();
        assert_eq!(subject, "from-body");

        assert_eq!(resolve_subject(&HeaderMap::new(), b"").unwrap(), "");
    }
}
