//! UseCase: ルーム作成

use std::sync::Arc;

use boardroom_shared::time::Clock;

use crate::domain::{GameKind, Room, RoomId, RoomRepository, Timestamp};

use super::error::CommandError;

/// ルーム作成のユースケース
pub struct OpenRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
}

impl OpenRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// 非アクティブな新しいルームを登録する（ID が使用中ならエラー）
    pub async fn execute(&self, game: GameKind, room_id: RoomId) -> Result<(), CommandError> {
        let room = Room::open(room_id, game, Timestamp::new(self.clock.now_millis()));
        let shared = self.repository.insert_room(room).await?;
        tracing::info!("{}: room '{}' opened", game, shared.lock().await.id());
        Ok(())
    }
}
