//! Server binary.
//!
//! Starts the axum web server that hosts the duplicate finder page and its
//! JSON API, and stops it on Ctrl+C.

use tracing_subscriber::EnvFilter;

use emote_dupe_finder_lib::app::SharedState;
use emote_dupe_finder_lib::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting emote duplicate finder");

    let config = emote_dupe_finder_lib::init_config();
    let state = SharedState::new(config)?;

    let server_state = state.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::start_server(server_state).await {
            tracing::error!("Server failed: {e}");
        }
    });

    tracing::info!(
        port = state.server_port(),
        "Server running. Press Ctrl+C to stop."
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    state.shutdown_token().cancel();
    server_handle.await?;
    Ok(())
}
