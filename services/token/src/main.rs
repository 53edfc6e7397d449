use anyhow::Context;
use jwks_issuer::http::{router, AppState};
use jwks_issuer::shutdown::shutdown_signal;
use jwks_issuer::{Config, KeyLifecycleManager, KeyStore, SqliteKeyStore};
use rust_common::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(&config.tracing()).context("Failed to initialise tracing")?;

    info!("Starting JWKS issuer");

    let addr = config.bind_addr()?;

    let store = SqliteKeyStore::open(&config.database_path)
        .with_context(|| format!("Failed to open {}", config.database_path.display()))?;
    store.init().await.context("Failed to initialise key store")?;

    let outcome = KeyLifecycleManager::new(store.clone(), config.seed_policy())
        .bootstrap(chrono::Utc::now().timestamp())
        .await
        .context("Failed to bootstrap signing keys")?;
    info!(?outcome, "Signing keys ready");

    let app = router(AppState::new(store, config.issue_policy()));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, "JWKS issuer listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("JWKS issuer stopped");
    Ok(())
}
