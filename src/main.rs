mod config;
mod pages;
mod routes;
mod services;
mod state;
mod surface;

use config::{ConfigError, ServerConfig};

#[derive(Debug, thiserror::Error)]
enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: std::net::SocketAddr, source: std::io::Error },
    #[error("server failed: {0}")]
    Serve(#[source] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt::init();
    load_dotenv(dotenvy::dotenv().map(|_| ()));

    let config = ServerConfig::from_env()?;
    let state = state::AppState::with_static_account(config.auth_timeout);

    let app = routes::app(state);
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    tracing::info!(%addr, auth_timeout = ?config.auth_timeout, "login-gate listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("login-gate stopped");
    Ok(())
}

/// Report the outcome of loading `.env`. Returns false when a file was found
/// but could not be read or parsed; a missing file is normal outside local
/// development.
fn load_dotenv(result: Result<(), dotenvy::Error>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) if e.not_found() => true,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable .env file");
            false
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
