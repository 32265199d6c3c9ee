//! UseCase: WebSocket 切断時の後片付け

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, Role, RoomId, RoomRepository, SeatEntry};

/// 切断結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveReceipt {
    pub role: Role,
    /// 退出したのがホストで、ホストが引き継がれた場合の新ホスト
    pub new_host: Option<ConnectionId>,
    /// 残っている接続（通知先）
    pub remaining: Vec<ConnectionId>,
    pub users: Vec<SeatEntry>,
}

/// 参加者切断のユースケース
pub struct LeaveRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 席を空けて送信チャネルの登録を解除する
    ///
    /// ルームが既に削除されていれば `None`（登録解除だけ行う）。
    pub async fn execute(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
    ) -> Option<LeaveReceipt> {
        self.message_pusher.unregister_client(connection_id).await;

        let shared = self.repository.get_room(room_id).await.ok()?;
        let mut room = shared.lock().await;
        let was_host = room.seats().is_host(connection_id);
        let (role, occupant) = room.seats_mut().leave(connection_id)?;

        let new_host = if was_host { room.seats().host() } else { None };
        tracing::info!(
            "Client '{}' ({}) left room '{}'",
            occupant.client_id,
            role,
            room_id
        );
        Some(LeaveReceipt {
            role,
            new_host,
            remaining: room.seats().connections(),
            users: room.seats().entries(),
        })
    }
}
