//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! BTreeMap をインメモリ DB として使用します（一覧は ID 順）。
//!
//! 各ルームは自分専用の `Mutex` を持つため、別々のルームへのコマンドは
//! 並行に処理されます。登録簿のロックは検索・追加・削除の間だけ保持します。

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RepositoryError, Room, RoomId, RoomRepository, SharedRoom};

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: Mutex<BTreeMap<RoomId, SharedRoom>>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn insert_room(&self, room: Room) -> Result<SharedRoom, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        if rooms.contains_key(room.id()) {
            return Err(RepositoryError::RoomAlreadyExists(room.id().to_string()));
        }
        let room_id = room.id().clone();
        let shared = Arc::new(Mutex::new(room));
        rooms.insert(room_id.clone(), shared.clone());
        tracing::debug!("Room '{}' inserted ({} rooms)", room_id, rooms.len());
        Ok(shared)
    }

    async fn remove_room(&self, room_id: &RoomId) -> Result<SharedRoom, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let removed = rooms
            .remove(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.to_string()))?;
        tracing::debug!("Room '{}' removed ({} rooms)", room_id, rooms.len());
        Ok(removed)
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<SharedRoom, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .cloned()
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.to_string()))
    }

    async fn list_rooms(&self) -> Vec<SharedRoom> {
        let rooms = self.rooms.lock().await;
        rooms.values().cloned().collect()
    }

    async fn count_rooms(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }
}
