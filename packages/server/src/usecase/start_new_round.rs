//! UseCase: 新しいラウンドの開始（盤面だけをリセット）

use std::sync::Arc;

use crate::domain::{ConnectionId, GameKind, RandomSource, RoomId, RoomRepository};

use super::{ensure_game, error::CommandError};

pub struct StartNewRoundUseCase {
    repository: Arc<dyn RoomRepository>,
    random: Arc<dyn RandomSource>,
}

impl StartNewRoundUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, random: Arc<dyn RandomSource>) -> Self {
        Self { repository, random }
    }

    pub async fn execute(&self, game: GameKind, room_id: &RoomId) -> Result<(), CommandError> {
        let shared = self.repository.get_room(room_id).await?;
        let mut room = shared.lock().await;
        ensure_game(&room, game)?;
        room.start_new_round(self.random.as_ref());
        Ok(())
    }

    pub async fn execute_as_host(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
    ) -> Result<(), CommandError> {
        let shared = self.repository.get_room(room_id).await?;
        let mut room = shared.lock().await;
        if !room.seats().is_host(connection_id) {
            return Err(CommandError::NotHost);
        }
        room.start_new_round(self.random.as_ref());
        Ok(())
    }
}
