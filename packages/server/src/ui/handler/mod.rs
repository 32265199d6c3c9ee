//! HTTP / WebSocket handlers.

mod http;
mod websocket;

pub use http::{
    api, close_room, get_room_detail, get_rooms, get_status, get_update, health_check, make_move,
    new_game, new_round, open_room,
};
pub use websocket::websocket_handler;

use crate::{
    domain::RoomId, infrastructure::dto::websocket::ServerMessage, ui::state::AppState,
};

/// 変更系コマンドの後、ルームの全接続へそれぞれの視点の盤面を送る
async fn push_updates(state: &AppState, room_id: &RoomId) {
    state
        .fan_out_usecase
        .broadcast_update(room_id, |view| {
            serde_json::to_string(&ServerMessage::Update {
                accepted: true,
                state: view.clone(),
            })
            .ok()
        })
        .await;
}
