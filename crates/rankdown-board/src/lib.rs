//! Rankdown Board - Live Game Display
//!
//! Polls a published Rankdown snapshot and serves the current game state.
//!
//! # Architecture
//!
//! - **Source**: snapshot retrieval over HTTP(S) or from a local file
//! - **State**: the displayed state and latest-snapshot-wins sequencing
//! - **Refresh**: periodic and on-demand polling
//! - **Board**: display-ready projection of a snapshot
//! - **Server**: HTTP API and the board page
//! - **Render**: plain-text board for terminals (`rankdown-check`)
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use rankdown_board::{BoardConfig, BoardServer, BoardState, RefreshController, SnapshotSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BoardConfig::from_env()?;
//!     let state = Arc::new(BoardState::from_config(&config));
//!     let source = SnapshotSource::parse(&config.source);
//!     let refresh = RefreshController::new(source, Arc::clone(&state), config.refresh).spawn();
//!     BoardServer::new(state, refresh.trigger()).serve(config.api_addr).await?;
//!     Ok(())
//! }
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod refresh;
pub mod render;
pub mod server;
pub mod source;
pub mod state;

pub use board::Board;
pub use config::BoardConfig;
pub use error::{Error, Result};
pub use refresh::{RefreshController, RefreshHandle, RefreshTrigger};
pub use render::{BoardText, IssuesText};
pub use server::BoardServer;
pub use source::{SnapshotFetch, SnapshotSource};
pub use state::{BoardState, BoardView, DisplayState};
