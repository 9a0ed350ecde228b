use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use skyfare_api::{app, sessions::spawn_idle_sweep, AppState, SearchSettings};
use skyfare_store::{Config, HttpBackendClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyfare_api=debug,skyfare_search=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting Skyfare API on port {}", config.server.port);

    let backend = Arc::new(HttpBackendClient::new(&config.lookup)?);
    tracing::info!("Flight lookup service at {}", config.lookup.base_url);

    let settings = SearchSettings::from_config(&config)?;
    let app_state = AppState::new(backend.clone(), backend.clone(), backend, settings)?;
    let sweep_every = Duration::from_secs(config.sessions.sweep_seconds.max(1));
    spawn_idle_sweep(app_state.sessions.clone(), sweep_every);
    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
