//! UseCase: ルーム一覧・詳細の取得（監視用 REST API）

use std::sync::Arc;

use crate::domain::{Room, RoomId, RoomRepository};

use super::error::CommandError;

pub struct GetRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルーム ID 順のスナップショット
    pub async fn execute(&self) -> Vec<Room> {
        let mut rooms = Vec::new();
        for shared in self.repository.list_rooms().await {
            rooms.push(shared.lock().await.clone());
        }
        rooms
    }

    pub async fn count(&self) -> usize {
        self.repository.count_rooms().await
    }
}

pub struct GetRoomDetailUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, room_id: &RoomId) -> Result<Room, CommandError> {
        let shared = self.repository.get_room(room_id).await?;
        let room = shared.lock().await.clone();
        Ok(room)
    }
}
