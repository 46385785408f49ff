//! Rankdown Board binary
//!
//! Polls the configured snapshot and serves the live board over HTTP.

use std::sync::Arc;

use rankdown_board::{BoardConfig, BoardServer, BoardState, RefreshController, SnapshotSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rankdown_board=info,rankdown_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = BoardConfig::from_env()?;
    if let Some(source) = std::env::args().nth(1) {
        config.source = source;
    }

    let source = SnapshotSource::parse(&config.source);
    tracing::info!(source = %source, refresh_secs = config.refresh.as_secs(), "Starting Rankdown board");

    let state = Arc::new(BoardState::from_config(&config));
    let refresh = RefreshController::new(source, Arc::clone(&state), config.refresh).spawn();

    BoardServer::new(state, refresh.trigger())
        .serve(config.api_addr)
        .await?;

    refresh.shutdown();
    Ok(())
}
