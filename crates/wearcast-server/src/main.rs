mod api;
mod error;
mod middleware;
mod prompt;
mod upstream;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::{build_app, RelayState};
use crate::upstream::GenerationClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Arc::new(wearcast_core::load_relay_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let upstream = GenerationClient::new(&config.upstream_base_url, config.request_timeout_secs)?;
    let app = build_app(RelayState {
        config: Arc::clone(&config),
        upstream,
    });

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, static_dir = %config.static_dir.display(), "relay listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
