//! UseCase: 盤面の取得（視点ごと）

use std::sync::Arc;

use crate::domain::{ConnectionId, GameKind, RoomId, RoomRepository, StateView};

use super::{ensure_game, error::CommandError};

pub struct GetUpdateUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetUpdateUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// `viewer` は 0 が観戦者、`n` が席 `n`
    pub async fn execute(
        &self,
        game: GameKind,
        room_id: &RoomId,
        viewer: u8,
    ) -> Result<StateView, CommandError> {
        let shared = self.repository.get_room(room_id).await?;
        let room = shared.lock().await;
        ensure_game(&room, game)?;
        Ok(room.update(viewer)?)
    }

    /// 接続の役割に応じた視点で取得する
    pub async fn execute_for_connection(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
    ) -> Result<StateView, CommandError> {
        let shared = self.repository.get_room(room_id).await?;
        let room = shared.lock().await;
        let role = room
            .seats()
            .role_of(connection_id)
            .ok_or(CommandError::NotConnected)?;
        Ok(room.update(role.viewer_id())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{RoomError, RoundState},
        usecase::fixtures,
    };

    #[tokio::test]
    async fn test_update_of_fresh_room() {
        // テスト項目: 開いたばかりのルームは空の盤面と非アクティブ状態を返す
        // given (前提条件):
        let repository = fixtures::repository();
        fixtures::open(&repository, GameKind::TicTacToe, "r1").await;
        let usecase = GetUpdateUseCase::new(repository);

        // when (操作):
        let state = usecase
            .execute(GameKind::TicTacToe, &fixtures::room_id("r1"), 0)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(state.board, Some(vec![0; 9]));
        assert_eq!(state.state, RoundState::Inactive);
        assert_eq!(state.score, vec![0, 0, 0]);
    }

    #[tokio::test]
    async fn test_update_with_viewer_beyond_capacity() {
        // テスト項目: 最大人数を超える視点は拒否される
        // given (前提条件):
        let repository = fixtures::repository();
        fixtures::open(&repository, GameKind::TicTacToe, "r1").await;
        let usecase = GetUpdateUseCase::new(repository);

        // when (操作):
        let result = usecase
            .execute(GameKind::TicTacToe, &fixtures::room_id("r1"), 3)
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(CommandError::Room(RoomError::InvalidViewer(3))));
    }

    #[tokio::test]
    async fn test_battleships_update_follows_connection_role() {
        // テスト項目: WebSocket 接続では役割に応じた盤面レイヤーが返る
        // given (前提条件):
        let repository = fixtures::repository();
        let pusher = fixtures::pusher();
        fixtures::open(&repository, GameKind::Battleships, "r1").await;
        let (alice, _rx1) = fixtures::join(&repository, &pusher, "r1", "alice").await;
        let (_bob, _rx2) = fixtures::join(&repository, &pusher, "r1", "bob").await;
        let (carol, _rx3) = fixtures::join(&repository, &pusher, "r1", "carol").await;
        let usecase = GetUpdateUseCase::new(repository);

        // when (操作):
        let player = usecase
            .execute_for_connection(&fixtures::room_id("r1"), alice.connection_id)
            .await
            .unwrap();
        let observer = usecase
            .execute_for_connection(&fixtures::room_id("r1"), carol.connection_id)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(player.boards.map(|layers| layers.len()), Some(2));
        assert_eq!(observer.boards.map(|layers| layers.len()), Some(2));
        assert_eq!(player.board, None);
    }
}
