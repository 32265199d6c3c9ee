//! UseCase: ルーム削除

use std::sync::Arc;

use crate::domain::{ConnectionId, GameKind, MessagePusher, RoomId, RoomRepository};

use super::{ensure_game, error::CommandError};

/// ルーム削除のユースケース
pub struct CloseRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl CloseRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// ルームを削除し、まだ接続している接続 ID を返す
    pub async fn execute(
        &self,
        game: GameKind,
        room_id: &RoomId,
    ) -> Result<Vec<ConnectionId>, CommandError> {
        {
            let room = self.repository.get_room(room_id).await?;
            ensure_game(&*room.lock().await, game)?;
        }
        let removed = self.repository.remove_room(room_id).await?;
        let connections = removed.lock().await.seats().connections();
        tracing::info!(
            "{}: room '{}' closed ({} connections left)",
            game,
            room_id,
            connections.len()
        );
        Ok(connections)
    }

    /// 削除されたルームに残っていた接続へ通知する
    pub async fn notify_closed(&self, targets: Vec<ConnectionId>, message: &str) {
        if let Err(e) = self.message_pusher.broadcast(targets, message).await {
            tracing::warn!("Failed to notify room closing: {}", e);
        }
    }
}
