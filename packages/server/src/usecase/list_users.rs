//! UseCase: ルーム内のユーザー一覧（ホスト専用）

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomId, RoomRepository, SeatEntry};

use super::error::CommandError;

pub struct ListUsersUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl ListUsersUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
    ) -> Result<Vec<SeatEntry>, CommandError> {
        let shared = self.repository.get_room(room_id).await?;
        let room = shared.lock().await;
        if !room.seats().is_host(connection_id) {
            return Err(CommandError::NotHost);
        }
        Ok(room.seats().entries())
    }
}
