//! UseCase: 新しいゲームの開始（スコアと盤面をリセット）

use std::sync::Arc;

use crate::domain::{ConnectionId, GameKind, RandomSource, RoomId, RoomRepository};

use super::{ensure_game, error::CommandError};

pub struct StartNewGameUseCase {
    repository: Arc<dyn RoomRepository>,
    random: Arc<dyn RandomSource>,
}

impl StartNewGameUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, random: Arc<dyn RandomSource>) -> Self {
        Self { repository, random }
    }

    /// HTTP から: 人数は省略時ゲームの最小人数
    pub async fn execute(
        &self,
        game: GameKind,
        room_id: &RoomId,
        players: Option<u8>,
    ) -> Result<(), CommandError> {
        let shared = self.repository.get_room(room_id).await?;
        let mut room = shared.lock().await;
        ensure_game(&room, game)?;
        room.start_new_game(players, self.random.as_ref())?;
        Ok(())
    }

    /// WebSocket のホストから: `roles` が空でなければ先に席を入れ替え、
    /// 着席人数（最小人数以上）でゲームを始める。
    ///
    /// 席が入れ替わった場合は `true` を返す。
    pub async fn execute_as_host(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        roles: &[String],
    ) -> Result<bool, CommandError> {
        let shared = self.repository.get_room(room_id).await?;
        let mut room = shared.lock().await;
        if !room.seats().is_host(connection_id) {
            return Err(CommandError::NotHost);
        }

        let reseated = !roles.is_empty();
        if reseated {
            room.seats_mut().reassign(roles)?;
        }

        let descriptor = room.game().descriptor();
        let players = room
            .seats()
            .seated()
            .clamp(descriptor.min_players, descriptor.max_players);
        room.start_new_game(Some(players), self.random.as_ref())?;
        Ok(reseated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Role, RoomError, RoundState},
        usecase::fixtures,
    };

    #[tokio::test]
    async fn test_new_game_activates_room() {
        // テスト項目: NewGame でルームがアクティブになり手番は 1 から始まる
        // given (前提条件):
        let repository = fixtures::repository();
        fixtures::open(&repository, GameKind::ConnectFour, "r1").await;
        let usecase = StartNewGameUseCase::new(repository.clone(), fixtures::random());

        // when (操作):
        let result = usecase
            .execute(GameKind::ConnectFour, &fixtures::room_id("r1"), Some(3))
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        let room = repository.get_room(&fixtures::room_id("r1")).await.unwrap();
        let room = room.lock().await;
        assert_eq!(room.round(), RoundState::Active);
        assert_eq!(room.turn().players, 3);
        assert_eq!(room.turn().player, 1);
    }

    #[tokio::test]
    async fn test_new_game_with_too_many_players_fails() {
        // テスト項目: 人数が範囲外なら拒否される
        // given (前提条件):
        let repository = fixtures::repository();
        fixtures::open(&repository, GameKind::TicTacToe, "r1").await;
        let usecase = StartNewGameUseCase::new(repository.clone(), fixtures::random());

        // when (操作):
        let result = usecase
            .execute(GameKind::TicTacToe, &fixtures::room_id("r1"), Some(3))
            .await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(CommandError::Room(RoomError::InvalidPlayerCount { .. }))
        ));
    }

    #[tokio::test]
    async fn test_non_host_cannot_start_game() {
        // テスト項目: ホスト以外は WebSocket から NewGame できない
        // given (前提条件):
        let repository = fixtures::repository();
        let pusher = fixtures::pusher();
        fixtures::open(&repository, GameKind::TicTacToe, "r1").await;
        fixtures::join(&repository, &pusher, "r1", "alice").await;
        let (bob, _rx) = fixtures::join(&repository, &pusher, "r1", "bob").await;
        let usecase = StartNewGameUseCase::new(repository.clone(), fixtures::random());

        // when (操作):
        let result = usecase
            .execute_as_host(&fixtures::room_id("r1"), bob.connection_id, &[])
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(CommandError::NotHost));
    }

    #[tokio::test]
    async fn test_host_reseats_and_starts_with_seated_count() {
        // テスト項目: ホストが役割を入れ替えると着席人数でゲームが始まる
        // given (前提条件):
        let repository = fixtures::repository();
        let pusher = fixtures::pusher();
        fixtures::open(&repository, GameKind::ConnectFour, "r1").await;
        let (alice, _rx1) = fixtures::join(&repository, &pusher, "r1", "alice").await;
        let (bob, _rx2) = fixtures::join(&repository, &pusher, "r1", "bob").await;
        let (carol, _rx3) = fixtures::join(&repository, &pusher, "r1", "carol").await;
        let usecase = StartNewGameUseCase::new(repository.clone(), fixtures::random());
        let roles = vec!["u3".to_string(), "u1".to_string()];

        // when (操作):
        let result = usecase
            .execute_as_host(&fixtures::room_id("r1"), alice.connection_id, &roles)
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(true));
        let room = repository.get_room(&fixtures::room_id("r1")).await.unwrap();
        let room = room.lock().await;
        assert_eq!(room.seats().role_of(carol.connection_id), Some(Role::Player(1)));
        assert_eq!(room.seats().role_of(alice.connection_id), Some(Role::Player(2)));
        assert_eq!(room.seats().role_of(bob.connection_id), Some(Role::Observer(0)));
        assert_eq!(room.turn().players, 2);
    }

    #[tokio::test]
    async fn test_host_duplicate_roles_rejected_without_change() {
        // テスト項目: 重複した役割指定は拒否され、席もゲーム状態も変わらない
        // given (前提条件):
        let repository = fixtures::repository();
        let pusher = fixtures::pusher();
        fixtures::open(&repository, GameKind::TicTacToe, "r1").await;
        let (alice, _rx1) = fixtures::join(&repository, &pusher, "r1", "alice").await;
        let usecase = StartNewGameUseCase::new(repository.clone(), fixtures::random());
        let roles = vec!["u1".to_string(), "u1".to_string()];

        // when (操作):
        let result = usecase
            .execute_as_host(&fixtures::room_id("r1"), alice.connection_id, &roles)
            .await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err().to_string(), "Double role: 'u1'");
        let room = repository.get_room(&fixtures::room_id("r1")).await.unwrap();
        assert_eq!(room.lock().await.round(), RoundState::Inactive);
    }
}
