use anyhow::Context;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod errors;
mod handlers;
mod initial;
mod models;
mod openapi;
mod routes;
mod services;
mod state;
mod store;

use auth::DemoIdentityProvider;
use config::Config;
use services::session::{JsonFileStore, MemoryStore, PersistedState, SessionStore};
use state::AppState;
use store::ConsoleData;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ─── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tyre_centre=debug,tower_http=info")),
        )
        .with_max_level(Level::TRACE)
        .init();

    // ─── Config ───────────────────────────────────────────────────────────────
    let config = Config::from_env()?;
    let addr = config.server_addr();

    // ─── Persisted session state ──────────────────────────────────────────────
    let backend: Arc<dyn PersistedState> = match &config.data_dir {
        Some(dir) => {
            let store = JsonFileStore::open(dir.clone())
                .await
                .with_context(|| format!("failed to open data dir {}", dir.display()))?;
            info!(dir = %dir.display(), "Persisting session state to disk");
            Arc::new(store)
        }
        None => {
            info!("Persisting session state in memory");
            Arc::new(MemoryStore::new())
        }
    };

    // ─── App State ────────────────────────────────────────────────────────────
    let data = if config.seed_demo_data {
        info!("Seeding demo employees, attendance, stock and payroll");
        initial::demo_data()
    } else {
        ConsoleData::new()
    };
    let identity = DemoIdentityProvider::new()?;
    let state = AppState::new(data, SessionStore::new(backend), Arc::new(identity), config);

    let app = routes::app(state);

    // ─── Start Server ─────────────────────────────────────────────────────────
    info!("Tyre centre console listening on http://{}", addr);
    info!("Swagger UI:  http://{}/docs", addr);
    info!("Health:      http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
