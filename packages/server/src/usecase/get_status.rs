//! UseCase: サーバー / ルームの状態確認

use std::sync::Arc;

use crate::domain::{GameKind, RoomId, RoomRepository, StatusView};

use super::{ensure_game, error::CommandError};

pub struct GetStatusUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetStatusUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルーム指定なしなら `None`（サーバーが動いていることだけを示す）
    pub async fn execute(
        &self,
        game: GameKind,
        room_id: Option<RoomId>,
    ) -> Result<Option<StatusView>, CommandError> {
        let Some(room_id) = room_id else {
            return Ok(None);
        };
        let shared = self.repository.get_room(&room_id).await?;
        let room = shared.lock().await;
        ensure_game(&room, game)?;
        Ok(Some(room.status()))
    }
}
