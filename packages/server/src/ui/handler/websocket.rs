//! WebSocket lobby handlers.
//!
//! 接続ごとに送信用チャネルを持ち、pusher ループがソケットへ書き出す。
//! 返信も一斉通知も同じチャネルを通るので、接続ごとの送信順は保たれる。

use std::sync::Arc;

use axum::{
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{ClientId, ConnectionId, GameKind, Role, RoomId, SeatEntry},
    infrastructure::dto::websocket::{ClientMessage, ServerMessage, UserEntry},
    ui::state::AppState,
    usecase::{CommandError, JoinError, JoinReceipt},
};

use super::push_updates;

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub client_id: String,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let Ok(room_id) = RoomId::new(room_id.clone()) else {
        tracing::warn!("Invalid room id: '{}'", room_id);
        return Err(StatusCode::NOT_FOUND);
    };
    let client_id = match ClientId::try_from(query.client_id.clone()) {
        Ok(id) => id,
        Err(_) => {
            tracing::warn!("Invalid client_id format: '{}'", query.client_id);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    // Create a channel for this client to receive messages
    let (tx, rx) = mpsc::unbounded_channel();

    // 席の割り当てと MessagePusher への登録は UseCase 内で行う
    match state
        .join_room_usecase
        .execute(&room_id, client_id.clone(), tx.clone())
        .await
    {
        Ok(receipt) => {
            // 最初に役割、ホストならホスト通知を送る
            send(&tx, &role_message(receipt.role));
            if receipt.is_host {
                send(&tx, &host_message(receipt.game, &room_id));
            }
            // アップグレードに失敗したら席と送信チャネルを解放する
            let connection_id = receipt.connection_id;
            let game = receipt.game;
            let failed_state = state.clone();
            let failed_room_id = room_id.clone();
            Ok(ws
                .on_failed_upgrade(move |e| {
                    tracing::warn!("WebSocket upgrade failed for {}: {}", connection_id, e);
                    tokio::spawn(async move {
                        release_connection(&failed_state, &failed_room_id, connection_id, game)
                            .await;
                    });
                })
                .on_upgrade(move |socket| handle_socket(socket, state, room_id, receipt, rx)))
        }
        Err(JoinError::RoomNotFound(_)) => {
            tracing::warn!("Room '{}' doesn't exist. Rejecting '{}'", room_id, client_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(JoinError::Role(e)) => {
            tracing::warn!("Rejecting '{}' in room '{}': {}", client_id, room_id, e);
            Err(StatusCode::CONFLICT)
        }
    }
}

fn to_json(message: &ServerMessage) -> Option<String> {
    serde_json::to_string(message)
        .inspect_err(|e| tracing::error!("Failed to serialize {:?}: {}", message, e))
        .ok()
}

fn send(tx: &mpsc::UnboundedSender<String>, message: &ServerMessage) {
    if let Some(json) = to_json(message)
        && tx.send(json).is_err()
    {
        tracing::warn!("Channel closed before the socket was upgraded");
    }
}

fn role_message(role: Role) -> ServerMessage {
    ServerMessage::GetRole {
        accepted: true,
        response: role.to_string(),
        description: role.description(),
        uid: role.viewer_id(),
        oid: match role {
            Role::Observer(slot) => Some(slot),
            Role::Player(_) => None,
        },
    }
}

fn host_message(game: GameKind, room_id: &RoomId) -> ServerMessage {
    ServerMessage::RoomHost {
        accepted: true,
        game: game.route_name().to_string(),
        room: room_id.to_string(),
    }
}

fn users_message(users: Vec<SeatEntry>, left: bool) -> ServerMessage {
    let users: Vec<UserEntry> = users.into_iter().map(UserEntry::from).collect();
    if left {
        ServerMessage::Left {
            accepted: true,
            users,
        }
    } else {
        ServerMessage::Joined {
            accepted: true,
            users,
        }
    }
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    room_id: RoomId,
    receipt: JoinReceipt,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, mut receiver) = socket.split();
    let connection_id = receipt.connection_id;
    let game = receipt.game;

    // Broadcast the user list to everyone in the room (including the joiner)
    if let Some(json) = to_json(&users_message(receipt.users, false)) {
        state
            .fan_out_usecase
            .broadcast(receipt.connections, &json)
            .await;
    }

    let state_clone = state.clone();
    let room_id_clone = room_id.clone();

    // Spawn a task to receive messages from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from {}: {}", connection_id, text);
                    handle_message(&state_clone, &room_id_clone, connection_id, text.as_str())
                        .await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection {} requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push queued messages to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    release_connection(&state, &room_id, connection_id, game).await;
}

/// 席を空け、残りの接続へ Left を、新しいホストへ RoomHost を送る
async fn release_connection(
    state: &AppState,
    room_id: &RoomId,
    connection_id: ConnectionId,
    game: GameKind,
) {
    let Some(left) = state
        .leave_room_usecase
        .execute(room_id, connection_id)
        .await
    else {
        tracing::info!("Connection {} closed after its room was removed", connection_id);
        return;
    };

    if let Some(json) = to_json(&users_message(left.users, true)) {
        state.fan_out_usecase.broadcast(left.remaining, &json).await;
    }
    if let Some(new_host) = left.new_host
        && let Some(json) = to_json(&host_message(game, room_id))
    {
        tracing::info!("Room '{}': hosting passed to {}", room_id, new_host);
        state.fan_out_usecase.push_to(new_host, &json).await;
    }
}

/// Dispatch one client message and queue the reply
async fn handle_message(
    state: &AppState,
    room_id: &RoomId,
    connection_id: ConnectionId,
    text: &str,
) {
    let message = match ClientMessage::parse(text) {
        Ok(message) => message,
        Err(response) => {
            tracing::debug!("Rejected message from {}: {}", connection_id, response);
            reply(state, connection_id, &ServerMessage::error(response)).await;
            return;
        }
    };

    match message {
        ClientMessage::NewGame { roles } => {
            let result = state
                .start_new_game_usecase
                .execute_as_host(room_id, connection_id, &roles)
                .await;
            let reseated = host_reply(
                state,
                connection_id,
                result,
                "New game started!",
                |accepted, message| ServerMessage::NewGame { accepted, message },
            )
            .await;
            let Some(reseated) = reseated else {
                return;
            };
            if reseated {
                state
                    .fan_out_usecase
                    .push_roles(room_id, |role| to_json(&role_message(role)))
                    .await;
                state
                    .fan_out_usecase
                    .broadcast_users(room_id, |users| to_json(&users_message(users, false)))
                    .await;
            }
            push_updates(state, room_id).await;
        }
        ClientMessage::NewRound => {
            let result = state
                .start_new_round_usecase
                .execute_as_host(room_id, connection_id)
                .await;
            let replied = host_reply(
                state,
                connection_id,
                result,
                "New round started!",
                |accepted, message| ServerMessage::NewRound { accepted, message },
            )
            .await;
            if replied.is_some() {
                push_updates(state, room_id).await;
            }
        }
        ClientMessage::Move { notation, board } => {
            let result = state
                .make_move_usecase
                .execute_as_connection(room_id, connection_id, &notation)
                .await;
            match result {
                Ok(receipt) => {
                    let response = match receipt.dices {
                        Some(dices) => ServerMessage::Throw {
                            accepted: true,
                            message: receipt.message.to_string(),
                            dices,
                            board: board.or(receipt.board).unwrap_or_default(),
                        },
                        None => ServerMessage::Move {
                            accepted: true,
                            message: receipt.message.to_string(),
                        },
                    };
                    reply(state, connection_id, &response).await;
                    push_updates(state, room_id).await;
                }
                Err(e) => {
                    let response = ServerMessage::Move {
                        accepted: false,
                        message: e.to_string(),
                    };
                    reply(state, connection_id, &response).await;
                }
            }
        }
        ClientMessage::Update => {
            let response = match state
                .get_update_usecase
                .execute_for_connection(room_id, connection_id)
                .await
            {
                Ok(view) => ServerMessage::Update {
                    accepted: true,
                    state: view,
                },
                Err(e) => ServerMessage::error(e.to_string()),
            };
            reply(state, connection_id, &response).await;
        }
        ClientMessage::Ping => {
            reply(state, connection_id, &ServerMessage::Pong { accepted: true }).await;
        }
        ClientMessage::List => {
            let response = match state
                .list_users_usecase
                .execute(room_id, connection_id)
                .await
            {
                Ok(users) => ServerMessage::List {
                    accepted: true,
                    users: users.into_iter().map(UserEntry::from).collect(),
                },
                Err(e) => ServerMessage::error(e.to_string()),
            };
            reply(state, connection_id, &response).await;
        }
    }
}

/// ホスト専用コマンドの返信: ホスト以外は Error、その他の失敗は同じ action で返す
///
/// 受理された場合だけ `Some` を返す。
async fn host_reply<T, F>(
    state: &AppState,
    connection_id: ConnectionId,
    result: Result<T, CommandError>,
    success: &str,
    render: F,
) -> Option<T>
where
    F: FnOnce(bool, String) -> ServerMessage,
{
    let (response, accepted) = match result {
        Ok(value) => (render(true, success.to_string()), Some(value)),
        Err(CommandError::NotHost) => (
            ServerMessage::error(CommandError::NotHost.to_string()),
            None,
        ),
        Err(e) => (render(false, e.to_string()), None),
    };
    reply(state, connection_id, &response).await;
    accepted
}

async fn reply(state: &AppState, connection_id: ConnectionId, message: &ServerMessage) {
    if let Some(json) = to_json(message) {
        state.fan_out_usecase.push_to(connection_id, &json).await;
    }
}
