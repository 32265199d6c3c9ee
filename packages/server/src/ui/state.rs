//! Server state shared by all handlers.

use std::sync::Arc;

use boardroom_shared::time::Clock;

use crate::{
    domain::{MessagePusher, RandomSource, RoomRepository},
    usecase::{
        CloseRoomUseCase, FanOutUseCase, GetRoomDetailUseCase, GetRoomsUseCase,
        GetStatusUseCase, GetUpdateUseCase, JoinRoomUseCase, LeaveRoomUseCase, ListUsersUseCase,
        MakeMoveUseCase, OpenRoomUseCase, StartNewGameUseCase, StartNewRoundUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// OpenRoomUseCase（ルーム作成）
    pub open_room_usecase: OpenRoomUseCase,
    /// CloseRoomUseCase（ルーム削除）
    pub close_room_usecase: CloseRoomUseCase,
    /// StartNewGameUseCase（ゲーム開始）
    pub start_new_game_usecase: StartNewGameUseCase,
    /// StartNewRoundUseCase（ラウンド開始）
    pub start_new_round_usecase: StartNewRoundUseCase,
    /// MakeMoveUseCase（手の適用）
    pub make_move_usecase: MakeMoveUseCase,
    pub get_update_usecase: GetUpdateUseCase,
    pub get_status_usecase: GetStatusUseCase,
    /// JoinRoomUseCase（WebSocket 接続）
    pub join_room_usecase: JoinRoomUseCase,
    /// LeaveRoomUseCase（WebSocket 切断）
    pub leave_room_usecase: LeaveRoomUseCase,
    pub list_users_usecase: ListUsersUseCase,
    /// FanOutUseCase（接続への一斉通知）
    pub fan_out_usecase: FanOutUseCase,
    pub get_rooms_usecase: GetRoomsUseCase,
    pub get_room_detail_usecase: GetRoomDetailUseCase,
}

impl AppState {
    /// 依存を受け取り、すべての UseCase を組み立てる
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        random: Arc<dyn RandomSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            open_room_usecase: OpenRoomUseCase::new(repository.clone(), clock.clone()),
            close_room_usecase: CloseRoomUseCase::new(repository.clone(), message_pusher.clone()),
            start_new_game_usecase: StartNewGameUseCase::new(repository.clone(), random.clone()),
            start_new_round_usecase: StartNewRoundUseCase::new(repository.clone(), random.clone()),
            make_move_usecase: MakeMoveUseCase::new(repository.clone(), random),
            get_update_usecase: GetUpdateUseCase::new(repository.clone()),
            get_status_usecase: GetStatusUseCase::new(repository.clone()),
            join_room_usecase: JoinRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock,
            ),
            leave_room_usecase: LeaveRoomUseCase::new(repository.clone(), message_pusher.clone()),
            list_users_usecase: ListUsersUseCase::new(repository.clone()),
            fan_out_usecase: FanOutUseCase::new(repository.clone(), message_pusher),
            get_rooms_usecase: GetRoomsUseCase::new(repository.clone()),
            get_room_detail_usecase: GetRoomDetailUseCase::new(repository),
        }
    }
}
