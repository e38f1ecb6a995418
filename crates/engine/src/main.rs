//! Notiflow Engine binary.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use notiflow_engine::api::{cors::cors_layer, http::routes};
use notiflow_engine::app::{App, Repositories};
use notiflow_engine::infrastructure::{clock::SystemClock, config::EngineConfig, sqlite::SqliteStore};

const DEFAULT_LOG_FILTER: &str = "notiflow_engine=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_env_files();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = EngineConfig::from_env();
    tracing::info!(database_url = %config.database_url, "Starting Notiflow Engine");

    let store = SqliteStore::connect(&config.database_url).await?;
    let app = Arc::new(App::new(
        Repositories::sqlite(&store),
        Arc::new(SystemClock::new()),
    ));

    let mut router = routes().with_state(app).layer(TraceLayer::new_for_http());
    match cors_layer(config.cors_allowed_origins.as_deref()) {
        Some(cors) => router = router.layer(cors),
        None => tracing::debug!("CORS disabled"),
    }

    let addr: SocketAddr = config.bind_address().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");
    axum::serve(listener, router).await?;

    Ok(())
}

/// `.env.local` then `.env` at the workspace root; earlier files win.
fn load_env_files() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    for name in [".env.local", ".env"] {
        let path = root.join(name);
        if path.is_file() {
            if let Err(e) = dotenvy::from_path(&path) {
                eprintln!("Failed to load {}: {}", path.display(), e);
            }
        }
    }
}
