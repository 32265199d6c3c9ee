//! UseCase: WebSocket 接続時の席割り当て
//!
//! 記憶している席 → 最小の空席 → 観戦者枠 の順で割り当て、ホストのいない
//! ルームでは最初の参加者をホストにする。

use std::sync::Arc;

use boardroom_shared::time::Clock;

use crate::domain::{
    ClientId, ConnectionId, GameKind, MessagePusher, Occupant, PusherChannel, RepositoryError,
    Role, RoomId, RoomRepository, SeatEntry, Timestamp,
};

use super::error::JoinError;

/// 接続結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinReceipt {
    pub connection_id: ConnectionId,
    pub role: Role,
    pub is_host: bool,
    pub game: GameKind,
    pub connected_at: Timestamp,
    /// 接続後のユーザー一覧
    pub users: Vec<SeatEntry>,
    /// ルーム内の全接続（自分を含む）
    pub connections: Vec<ConnectionId>,
}

/// 参加者接続のユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// 席を割り当て、送信チャネルを MessagePusher に登録する
    pub async fn execute(
        &self,
        room_id: &RoomId,
        client_id: ClientId,
        sender: PusherChannel,
    ) -> Result<JoinReceipt, JoinError> {
        let shared = self.repository.get_room(room_id).await.map_err(|e| match e {
            RepositoryError::RoomNotFound(id) | RepositoryError::RoomAlreadyExists(id) => {
                JoinError::RoomNotFound(id)
            }
        })?;
        let mut room = shared.lock().await;

        let connection_id = ConnectionId::generate();
        let connected_at = Timestamp::new(self.clock.now_millis());
        let role = room.seats_mut().join(Occupant {
            client_id: client_id.clone(),
            connection_id,
            connected_at,
        })?;

        // ルームのロック中に登録し、直後のブロードキャストを取りこぼさない
        self.message_pusher
            .register_client(connection_id, sender)
            .await;

        tracing::info!(
            "Client '{}' joined room '{}' as {}",
            client_id,
            room_id,
            role
        );
        Ok(JoinReceipt {
            connection_id,
            role,
            is_host: room.seats().is_host(connection_id),
            game: room.game(),
            connected_at,
            users: room.seats().entries(),
            connections: room.seats().connections(),
        })
    }
}
