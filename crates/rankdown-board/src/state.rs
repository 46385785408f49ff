//! Displayed state and latest-snapshot-wins sequencing.
//!
//! Fetches may overlap and may complete out of order. Each fetch takes a
//! sequence number from [`BoardState::begin`] when it starts, and hands its
//! outcome back through [`BoardState::complete`]. An outcome is applied only
//! if its fetch is still the most recently started one and newer than
//! whatever is displayed; anything else is dropped.
//!
//! ```text
//! begin() -> 1 ─────────────────────────────── complete(1)  dropped
//! begin() -> 2 ──────── complete(2)  applied
//! ```
//!
//! The displayed [`DisplayState`] is replaced wholesale, never patched.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rankdown_core::{Issue, Snapshot};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::board::Board;
use crate::config::BoardConfig;
use crate::error::Result;

/// What the presentation layer shows right now.
#[derive(Debug, Clone)]
pub enum DisplayState {
    /// Nothing has been fetched yet
    Loading,
    /// The last applied fetch succeeded
    Ready { seq: u64, board: Arc<Board> },
    /// The last applied fetch failed
    Failed {
        seq: u64,
        message: String,
        /// Only kept when the board is configured to keep the last good state
        last_good: Option<Arc<Board>>,
    },
}

impl DisplayState {
    /// The board to render, if there is one.
    pub fn board(&self) -> Option<&Arc<Board>> {
        match self {
            DisplayState::Loading => None,
            DisplayState::Ready { board, .. } => Some(board),
            DisplayState::Failed { last_good, .. } => last_good.as_ref(),
        }
    }

    /// Sequence number of the fetch this state came from (0 while loading).
    pub fn seq(&self) -> u64 {
        match self {
            DisplayState::Loading => 0,
            DisplayState::Ready { seq, .. } | DisplayState::Failed { seq, .. } => *seq,
        }
    }

    /// Validator findings for the board being shown, if any.
    pub fn issues(&self) -> &[Issue] {
        match self.board() {
            Some(board) => &board.issues,
            None => &[],
        }
    }

    /// Serializable view for the HTTP API.
    pub fn view(&self) -> BoardView<'_> {
        match self {
            DisplayState::Loading => BoardView::Loading,
            DisplayState::Ready { board, .. } => BoardView::Ready {
                board: board.as_ref(),
            },
            DisplayState::Failed {
                message, last_good, ..
            } => BoardView::Error {
                message: message.as_str(),
                last_good: last_good.as_deref(),
            },
        }
    }
}

/// Wire shape of [`DisplayState`].
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum BoardView<'a> {
    Loading,
    Ready {
        board: &'a Board,
    },
    Error {
        message: &'a str,
        #[serde(rename = "lastGood")]
        last_good: Option<&'a Board>,
    },
}

struct Inner {
    applied: u64,
    display: Arc<DisplayState>,
}

/// Holder of the displayed state.
///
/// Starts in [`DisplayState::Loading`] and is replaced atomically on every
/// sequence-valid completion. The board is built once per applied snapshot;
/// reads hand out the stored `Arc<Board>`.
pub struct BoardState {
    issued: AtomicU64,
    refresh: Duration,
    keep_last_good: bool,
    inner: RwLock<Inner>,
}

impl BoardState {
    /// Create an empty holder.
    pub fn new(refresh: Duration, keep_last_good: bool) -> Self {
        Self {
            issued: AtomicU64::new(0),
            refresh,
            keep_last_good,
            inner: RwLock::new(Inner {
                applied: 0,
                display: Arc::new(DisplayState::Loading),
            }),
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(config.refresh, config.keep_last_good)
    }

    /// Reserve the sequence number for a fetch that is about to start.
    pub fn begin(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Most recently issued sequence number.
    pub fn latest(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Invalidate every fetch started so far.
    ///
    /// Used on teardown: in-flight fetches are left to finish but their
    /// outcomes will be dropped.
    pub fn close(&self) {
        let seq = self.begin();
        tracing::debug!(seq, "board state closed to earlier fetches");
    }

    /// Hand back the outcome of fetch `seq`. Returns whether it was applied.
    pub async fn complete(&self, seq: u64, outcome: Result<Snapshot>) -> bool {
        let mut inner = self.inner.write().await;

        let latest = self.latest();
        if seq != latest || seq <= inner.applied {
            tracing::debug!(seq, latest, applied = inner.applied, "discarding stale fetch");
            return false;
        }

        let next = match outcome {
            Ok(snapshot) => {
                let board = Arc::new(Board::from_snapshot(&snapshot, self.refresh));
                tracing::info!(
                    seq,
                    players = board.players.len(),
                    issues = board.issues.len(),
                    "snapshot applied"
                );
                for issue in board.issues.iter().filter(|issue| issue.is_error()) {
                    tracing::warn!(seq, "{}", issue);
                }
                DisplayState::Ready { seq, board }
            }
            Err(e) => {
                tracing::warn!(seq, "snapshot refresh failed: {}", e);
                let last_good = if self.keep_last_good {
                    inner.display.board().cloned()
                } else {
                    None
                };
                DisplayState::Failed {
                    seq,
                    message: e.to_string(),
                    last_good,
                }
            }
        };

        inner.applied = seq;
        inner.display = Arc::new(next);
        true
    }

    /// The currently displayed state.
    pub async fn current(&self) -> Arc<DisplayState> {
        Arc::clone(&self.inner.read().await.display)
    }
}
