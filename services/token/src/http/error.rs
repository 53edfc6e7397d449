use super::models::ErrorResponse;
use crate::error::IssuerError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

const INTERNAL_MESSAGE: &str = "An unexpected error occurred";

impl IntoResponse for IssuerError {
    fn into_response(self) -> Response {
        let (status, message) = if self.is_client_error() {
            (StatusCode::BAD_REQUEST, self.to_string())
        } else {
            tracing::error!(code = self.code(), error = %self, "Request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
        };

        let body = ErrorResponse {
            error: self.code().to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
