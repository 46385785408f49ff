//! Axum web server exposing the board.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{Error, Result};
use crate::refresh::RefreshTrigger;
use crate::state::BoardState;

/// Shared application state.
pub struct AppState {
    board: Arc<BoardState>,
    trigger: RefreshTrigger,
}

/// Board HTTP server.
pub struct BoardServer {
    state: Arc<AppState>,
}

impl BoardServer {
    pub fn new(board: Arc<BoardState>, trigger: RefreshTrigger) -> Self {
        Self {
            state: Arc::new(AppState { board, trigger }),
        }
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/health", get(health))
            .route("/api/board", get(board_handler))
            .route("/api/issues", get(issues_handler))
            .route("/api/refresh", post(refresh_handler))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(Arc::clone(&self.state))
    }

    /// Serve until Ctrl-C.
    pub async fn serve(self, addr: SocketAddr) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(Error::Server)?;
        tracing::info!("Board server running on http://{}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!("failed to listen for shutdown signal: {}", e);
                }
            })
            .await
            .map_err(Error::Server)
    }
}

async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn health() -> &'static str {
    "OK"
}

async fn board_handler(State(state): State<Arc<AppState>>) -> Response {
    let current = state.board.current().await;
    Json(current.view()).into_response()
}

async fn issues_handler(State(state): State<Arc<AppState>>) -> Response {
    let current = state.board.current().await;
    Json(current.issues()).into_response()
}

async fn refresh_handler(State(state): State<Arc<AppState>>) -> StatusCode {
    state.trigger.fire();
    StatusCode::ACCEPTED
}
