//! UseCase: WebSocket 接続への一斉通知
//!
//! 盤面の更新は視点ごとに内容が異なる（Battleships では自分の艦隊だけが見える）
//! ため、接続ごとに描画してから送る。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, Role, RoomId, RoomRepository, SeatEntry, StateView,
};

pub struct FanOutUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl FanOutUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// ルームの全接続に、それぞれの視点の盤面を送る
    ///
    /// ルームのロックを保持したまま送るので、後続のコマンドの通知と順序が入れ替わらない。
    pub async fn broadcast_update<F>(&self, room_id: &RoomId, render: F)
    where
        F: Fn(&StateView) -> Option<String> + Send + Sync,
    {
        let Ok(shared) = self.repository.get_room(room_id).await else {
            return;
        };
        let room = shared.lock().await;
        for (connection_id, viewer) in room.seats().viewers() {
            let Some(content) = room.update(viewer).ok().as_ref().and_then(&render) else {
                continue;
            };
            if let Err(e) = self.message_pusher.push_to(connection_id, &content).await {
                tracing::warn!("Failed to push update to {}: {}", connection_id, e);
            }
        }
    }

    /// 席の入れ替え後、各接続に自分の新しい役割を送る
    pub async fn push_roles<F>(&self, room_id: &RoomId, render: F)
    where
        F: Fn(Role) -> Option<String> + Send + Sync,
    {
        let Ok(shared) = self.repository.get_room(room_id).await else {
            return;
        };
        let room = shared.lock().await;
        for (connection_id, role) in room.seats().roles() {
            let Some(content) = render(role) else {
                continue;
            };
            if let Err(e) = self.message_pusher.push_to(connection_id, &content).await {
                tracing::warn!("Failed to push role to {}: {}", connection_id, e);
            }
        }
    }

    /// ルームの全接続に現在のユーザー一覧を送る
    pub async fn broadcast_users<F>(&self, room_id: &RoomId, render: F)
    where
        F: FnOnce(Vec<SeatEntry>) -> Option<String> + Send,
    {
        let Ok(shared) = self.repository.get_room(room_id).await else {
            return;
        };
        let room = shared.lock().await;
        let Some(content) = render(room.seats().entries()) else {
            return;
        };
        self.broadcast(room.seats().connections(), &content).await;
    }

    /// 同じ内容を複数の接続に送る
    pub async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str) {
        if let Err(e) = self.message_pusher.broadcast(targets, content).await {
            tracing::warn!("Failed to broadcast: {}", e);
        }
    }

    pub async fn push_to(&self, connection_id: ConnectionId, content: &str) {
        if let Err(e) = self.message_pusher.push_to(connection_id, content).await {
            tracing::warn!("Failed to push to {}: {}", connection_id, e);
        }
    }
}
