//! Inbound HTTP surface.
//!
//! The core issuer and publisher know nothing about HTTP; this module only
//! extracts inputs, calls them, and shapes responses.

mod credentials;
mod error;
mod handlers;
pub mod models;

pub use credentials::{basic_username, body_username, resolve_subject};

use crate::jwks::JwksPublisher;
use crate::jwt::{IssuePolicy, TokenIssuer};
use crate::storage::SqliteKeyStore;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub issuer: Arc<TokenIssuer<SqliteKeyStore>>,
    pub publisher: Arc<JwksPublisher<SqliteKeyStore>>,
}

impl AppState {
    #[must_use]
    pub fn new(store: SqliteKeyStore, policy: IssuePolicy) -> Self {
        Self {
            issuer: Arc::new(TokenIssuer::new(store.clone(), policy)),
            publisher: Arc::new(JwksPublisher::new(store)),
        }
    }
}

/// Routes: `POST /auth`, `GET /.well-known/jwks.json`, `GET /metrics`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/auth", post(handlers::issue_token))
        .route("/.well-known/jwks.json", get(handlers::jwks))
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
