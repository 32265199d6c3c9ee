//! UseCase: 手の適用
//!
//! サイコロを使うゲームの `throw` では、出目が渡されなければサーバーが振る。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DiceSpec, GameKind, MoveError, MoveOutcome, RandomSource, Role, Room, RoomId,
    RoomRepository,
};

use super::{ensure_game, error::CommandError};

const THROW: &str = "throw";

/// 受理された手の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReceipt {
    pub message: &'static str,
    /// `throw` の場合の出目（サイコロごとの回転中の目、最後が確定値）
    pub dices: Option<Vec<Vec<u8>>>,
    /// サイコロ盤の位置（ゲーム記述子の `boards` の添字）
    pub board: Option<usize>,
    pub outcome: MoveOutcome,
}

impl MoveReceipt {
    pub fn is_throw(&self) -> bool {
        self.dices.is_some()
    }
}

pub struct MakeMoveUseCase {
    repository: Arc<dyn RoomRepository>,
    random: Arc<dyn RandomSource>,
}

impl MakeMoveUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, random: Arc<dyn RandomSource>) -> Self {
        Self { repository, random }
    }

    /// HTTP から: プレイヤー番号を明示して手を打つ
    pub async fn execute(
        &self,
        game: GameKind,
        room_id: &RoomId,
        player: u8,
        notation: &str,
        dices: Option<Vec<Vec<u8>>>,
    ) -> Result<MoveReceipt, CommandError> {
        let shared = self.repository.get_room(room_id).await?;
        let mut room = shared.lock().await;
        ensure_game(&room, game)?;
        self.apply(&mut room, player, notation, dices)
    }

    /// WebSocket から: 接続の席番号で手を打つ。観戦者は拒否される。
    pub async fn execute_as_connection(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        notation: &str,
    ) -> Result<MoveReceipt, CommandError> {
        let shared = self.repository.get_room(room_id).await?;
        let mut room = shared.lock().await;
        let player = match room.seats().role_of(connection_id) {
            Some(Role::Player(seat)) => seat,
            Some(Role::Observer(_)) => return Err(MoveError::WrongPlayer(0).into()),
            None => return Err(CommandError::NotConnected),
        };
        self.apply(&mut room, player, notation, None)
    }

    fn apply(
        &self,
        room: &mut Room,
        player: u8,
        notation: &str,
        dices: Option<Vec<Vec<u8>>>,
    ) -> Result<MoveReceipt, CommandError> {
        let descriptor = room.game().descriptor();
        let dices = match descriptor.dice() {
            Some(spec) if notation == THROW => {
                Some(dices.unwrap_or_else(|| roll_dice(spec, self.random.as_ref())))
            }
            _ => None,
        };
        let roll = dices
            .as_ref()
            .and_then(|sets| sets.first())
            .and_then(|faces| faces.last())
            .copied();

        let outcome = room.make_move(player, notation, roll)?;
        tracing::debug!(
            "Room '{}': player {} played '{}' -> {:?}",
            room.id(),
            player,
            notation,
            outcome
        );

        let (message, board) = if dices.is_some() {
            ("Throw accepted", descriptor.dice_board())
        } else {
            ("Move accepted", None)
        };
        Ok(MoveReceipt {
            message,
            dices,
            board,
            outcome,
        })
    }
}

/// サイコロごとに `rotations` 個の目を振る（最後の目が確定値）
fn roll_dice(spec: &DiceSpec, random: &dyn RandomSource) -> Vec<Vec<u8>> {
    (0..spec.number_of_dices)
        .map(|_| {
            (0..spec.rotations.max(1))
                .map(|_| random.roll_die(spec.number_of_sides))
                .collect()
        })
        .collect()
}
