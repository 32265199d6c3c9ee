//! Board game server.
//!
//! Hosts TicTacToe, ConnectFour, ManDontGetAngry and Battleships rooms over
//! HTTP and a WebSocket lobby.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin boardroom-server
//! cargo run --bin boardroom-server -- --host 0.0.0.0 --port 3000 --log-level debug
//! ```

use std::sync::Arc;

use boardroom_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher, random::ThreadRandom,
        repository::InMemoryRoomRepository,
    },
    ui::{Server, state::AppState},
};
use boardroom_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "boardroom-server")]
#[command(about = "Turn-based board game server (HTTP + WebSocket)", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // 1. Repository と MessagePusher
    let repository = Arc::new(InMemoryRoomRepository::new());
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 2. UseCase をまとめた AppState
    let state = AppState::new(
        repository,
        message_pusher,
        Arc::new(ThreadRandom),
        Arc::new(SystemClock),
    );

    // 3. Server
    if let Err(e) = Server::new(state).run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
