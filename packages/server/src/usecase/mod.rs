//! UseCase 層
//!
//! HTTP / WebSocket から呼ばれるコマンドを実装します。
//! 各コマンドはルームのロックを取得し、検証から変更までをロックを保持したまま
//! 行います（ルーム単位の逐次実行）。

mod close_room;
mod error;
mod fan_out;
mod get_rooms;
mod get_status;
mod get_update;
mod join_room;
mod leave_room;
mod list_users;
mod make_move;
mod open_room;
mod start_new_game;
mod start_new_round;

pub use close_room::CloseRoomUseCase;
pub use error::{CommandError, JoinError};
pub use fan_out::FanOutUseCase;
pub use get_rooms::{GetRoomDetailUseCase, GetRoomsUseCase};
pub use get_status::GetStatusUseCase;
pub use get_update::GetUpdateUseCase;
pub use join_room::{JoinReceipt, JoinRoomUseCase};
pub use leave_room::{LeaveReceipt, LeaveRoomUseCase};
pub use list_users::ListUsersUseCase;
pub use make_move::{MakeMoveUseCase, MoveReceipt};
pub use open_room::OpenRoomUseCase;
pub use start_new_game::StartNewGameUseCase;
pub use start_new_round::StartNewRoundUseCase;

use crate::domain::{GameKind, Room};

/// HTTP コマンドはパスのゲームとルームのゲームが一致している必要がある
fn ensure_game(room: &Room, requested: GameKind) -> Result<(), CommandError> {
    if room.game() == requested {
        Ok(())
    } else {
        Err(CommandError::GameMismatch {
            room: room.id().to_string(),
            actual: room.game(),
            requested,
        })
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use tokio::sync::mpsc;

    use crate::{
        domain::{ClientId, GameKind, RoomId, RoomRepository},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, random::SeededRandom,
            repository::InMemoryRoomRepository,
        },
    };
    use boardroom_shared::time::FixedClock;

    use super::{JoinReceipt, JoinRoomUseCase, OpenRoomUseCase};

    pub const NOW: i64 = 1_700_000_000_000;

    pub fn room_id(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    pub fn client_id(id: &str) -> ClientId {
        ClientId::new(id.to_string()).unwrap()
    }

    pub fn repository() -> Arc<InMemoryRoomRepository> {
        Arc::new(InMemoryRoomRepository::new())
    }

    pub fn pusher() -> Arc<WebSocketMessagePusher> {
        Arc::new(WebSocketMessagePusher::new())
    }

    pub fn random() -> Arc<SeededRandom> {
        Arc::new(SeededRandom::new(7))
    }

    pub async fn open(repository: &Arc<InMemoryRoomRepository>, game: GameKind, id: &str) {
        OpenRoomUseCase::new(repository.clone(), Arc::new(FixedClock::new(NOW)))
            .execute(game, room_id(id))
            .await
            .unwrap();
    }

    /// Connect `name` and keep the receiving end of its channel
    pub async fn join(
        repository: &Arc<InMemoryRoomRepository>,
        pusher: &Arc<WebSocketMessagePusher>,
        id: &str,
        name: &str,
    ) -> (JoinReceipt, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let repository: Arc<dyn RoomRepository> = repository.clone();
        let receipt = JoinRoomUseCase::new(repository, pusher.clone(), Arc::new(FixedClock::new(NOW)))
            .execute(&room_id(id), client_id(name), tx)
            .await
            .unwrap();
        (receipt, rx)
    }
}
