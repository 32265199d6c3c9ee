//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        api, close_room, get_room_detail, get_rooms, get_status, get_update, health_check,
        make_move, new_game, new_round, open_room, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Board game server
///
/// # Example
///
/// ```ignore
/// let state = AppState::new(repository, message_pusher, random, clock);
/// Server::new(state).run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Routes of the per-game HTTP API, the monitoring API and the WebSocket lobby
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/rooms/{room_id}", get(websocket_handler))
            // 監視用 HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_id}", get(get_room_detail))
            // ゲームごとの HTTP エンドポイント
            .route("/{game}/Open", post(open_room))
            .route("/{game}/Close", post(close_room))
            .route("/{game}/NewGame", post(new_game))
            .route("/{game}/NewRound", post(new_round))
            .route("/{game}/Move", post(make_move))
            .route("/{game}/Update", post(get_update))
            .route("/{game}/Status", post(get_status))
            .route("/{game}/api", get(api).post(api))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Serve on an already bound listener until a shutdown signal arrives
    pub async fn serve(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let app = self.router();
        tracing::info!("Board game server listening on {}", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Run the board game server
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(
        self,
        host: String,
        port: u16,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        tracing::info!("Connect to: ws://{}/rooms/<room>?client_id=<name>", bind_addr);
        self.serve(listener).await
    }
}
