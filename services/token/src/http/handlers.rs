use super::credentials::resolve_subject;
use super::models::TokenResponse;
use super::AppState;
use crate::error::IssuerError;
use crate::jwks::Jwks;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::collections::HashMap;

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// True when the client asked for `text/plain` and not for JSON.
fn wants_plain_text(headers: &HeaderMap) -> bool {
    let Some(accept) = headers.get(ACCEPT).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let media_types: Vec<&str> = accept
        .split(',')
        .filter_map(|part| part.split(';').next())
        .map(str::trim)
        .collect();

    media_types
        .iter()
        .any(|m| m.eq_ignore_ascii_case("text/plain"))
        && !media_types
            .iter()
            .any(|m| m.eq_ignore_ascii_case("application/json"))
}

/// `POST /auth`
///
/// The presence of an `expired` query parameter, whatever its value,
/// requests a token that is already expired.
pub async fn issue_token(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, IssuerError> {
    let want_expired = params.contains_key("expired");
    let subject = resolve_subject(&headers, &body)?;

    let issued = state.issuer.issue(&subject, want_expired, now()).await?;

    if wants_plain_text(&headers) {
        return Ok(issued.token.into_response());
    }
    Ok(Json(TokenResponse::bearer(issued.token)).into_response())
}

/// `GET /.well-known/jwks.json`
pub async fn jwks(State(state): State<AppState>) -> Result<Json<Jwks>, IssuerError> {
    let jwks = state.publisher.publish_active_keys(now()).await?;
    Ok(Json(jwks))
}

/// `GET /metrics`
pub async fn metrics() -> Response {
    match crate::metrics::gather_text() {
        Ok(text) => (
            [(CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn accept(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_wants_plain_text() {
        assert!(wants_plain_text(&accept("text/plain")));
        assert!(wants_plain_text(&accept("text/plain; charset=utf-8")));
        assert!(!wants_plain_text(&accept("application/json, text/plain")));
        assert!(!wants_plain_text(&accept("*/*")));
        assert!(!wants_plain_text(&HeaderMap::new()));
    }
}
