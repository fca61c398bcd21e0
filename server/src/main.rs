mod config;
mod routes;
mod state;
mod upstream;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; real deployments set the environment.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::ServerConfig::from_env()?;
    let backend = upstream::HttpQueryBackend::new(&config.upstream_url, config.timeouts)?;
    tracing::info!(upstream = backend.base_url(), "query upstream configured");

    let state = state::AppState::new(Arc::new(backend));
    let app = routes::leptos_app(state)?;

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "insight chat listening");
    axum::serve(listener, app).await?;
    Ok(())
}
