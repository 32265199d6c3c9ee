//! Terminal client for a Boardroom game room.
//!
//! Joins a room over WebSocket, renders the boards pushed by the server
//! and sends the commands typed at the prompt.
//! Reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin boardroom-client -- --room 7 --client-id alice
//! cargo run --bin boardroom-client -- -r 7 -c bob -u ws://127.0.0.1:8080
//! ```

use clap::Parser;

use boardroom_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "boardroom-client")]
#[command(about = "Terminal client for Boardroom game rooms", long_about = None)]
struct Args {
    /// Room to join (must be opened first, e.g. via `POST /TicTacToe/Open`)
    #[arg(short = 'r', long)]
    room: String,

    /// Client ID; reconnecting with the same ID reclaims your seat
    #[arg(short = 'c', long)]
    client_id: String,

    /// Server base URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080")]
    url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    if let Err(e) = boardroom_client::run_client(args.url, args.room, args.client_id).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
