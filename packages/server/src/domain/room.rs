//! Room aggregate: one game table with its board, score, turn and seats.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    error::{MoveError, RoomError},
    game::{BoardView, GameEngine, GameKind},
    random::RandomSource,
    round::{MoveOutcome, NextMove, RoundState, Turn},
    seat::Seats,
    value_object::{RoomId, Timestamp},
};

/// Snapshot of a room as seen by one viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boards: Option<Vec<Vec<u8>>>,
    pub score: Vec<u32>,
    pub state: RoundState,
    pub next_move: NextMove,
    pub next_player: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolled: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusView {
    pub score: Vec<u32>,
    pub state: RoundState,
}

#[derive(Debug, Clone)]
pub struct Room {
    id: RoomId,
    game: GameKind,
    created_at: Timestamp,
    round: RoundState,
    turn: Turn,
    /// Index 0 counts draws, index `n` the wins of seat `n`
    score: Vec<u32>,
    engine: GameEngine,
    seats: Seats,
}

impl Room {
    /// New inactive room
    pub fn open(id: RoomId, game: GameKind, created_at: Timestamp) -> Self {
        let descriptor = game.descriptor();
        Self {
            id,
            game,
            created_at,
            round: RoundState::Inactive,
            turn: Turn::new(descriptor.min_players),
            score: vec![0; usize::from(descriptor.max_players) + 1],
            engine: GameEngine::open(game),
            seats: Seats::new(descriptor.max_players),
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    pub fn game(&self) -> GameKind {
        self.game
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn round(&self) -> RoundState {
        self.round
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn score(&self) -> &[u32] {
        &self.score
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn seats(&self) -> &Seats {
        &self.seats
    }

    pub fn seats_mut(&mut self) -> &mut Seats {
        &mut self.seats
    }

    /// Reset score and board; `players` defaults to the game's minimum.
    pub fn start_new_game(
        &mut self,
        players: Option<u8>,
        random: &dyn RandomSource,
    ) -> Result<(), RoomError> {
        let descriptor = self.game.descriptor();
        let requested = players.unwrap_or(descriptor.min_players);
        if !(descriptor.min_players..=descriptor.max_players).contains(&requested) {
            return Err(RoomError::InvalidPlayerCount {
                requested,
                min: descriptor.min_players,
                max: descriptor.max_players,
            });
        }

        self.turn = Turn::new(requested);
        self.score = vec![0; usize::from(descriptor.max_players) + 1];
        self.engine.rules_mut().reset(requested, random);
        self.round = RoundState::Active;
        info!(
            "Room '{}': new {} game with {} players",
            self.id, self.game, requested
        );
        Ok(())
    }

    /// Reset the board and hand the opening move to the next seat.
    pub fn start_new_round(&mut self, random: &dyn RandomSource) {
        self.turn.rotate_begin();
        self.engine.rules_mut().reset(self.turn.players, random);
        self.round = RoundState::Active;
        info!(
            "Room '{}': new round, player {} begins",
            self.id, self.turn.player_begin
        );
    }

    /// Validate and apply a move. On error the room is unchanged.
    pub fn make_move(
        &mut self,
        player: u8,
        notation: &str,
        roll: Option<u8>,
    ) -> Result<MoveOutcome, RoomError> {
        if !self.round.is_active() {
            return Err(MoveError::GameInactive.into());
        }
        if player != self.turn.player {
            return Err(MoveError::WrongPlayer(player).into());
        }

        let outcome = self
            .engine
            .rules_mut()
            .play(player, notation, roll)
            .inspect_err(|e| debug!("Room '{}': rejected '{}': {}", self.id, notation, e))?;

        match outcome {
            MoveOutcome::Won => {
                self.score[usize::from(player)] += 1;
                self.round = RoundState::Won(player);
            }
            MoveOutcome::Draw => {
                self.score[0] += 1;
                self.round = RoundState::Draw;
            }
            MoveOutcome::Pass => {
                self.turn.pass();
                self.engine.rules_mut().on_turn_passed(self.turn.player);
            }
            MoveOutcome::Again => {}
        }
        Ok(outcome)
    }

    /// State as seen by `viewer` (0 = observer, `n` = seat `n`)
    pub fn update(&self, viewer: u8) -> Result<StateView, RoomError> {
        if viewer > self.seats.max_players() {
            return Err(RoomError::InvalidViewer(viewer));
        }
        let rules = self.engine.rules();
        let (board, boards) = match rules.view(viewer) {
            BoardView::Single(board) => (Some(board), None),
            BoardView::Layers(layers) => (None, Some(layers)),
        };
        Ok(StateView {
            board,
            boards,
            score: self.score.clone(),
            state: self.round,
            next_move: rules.next_move(),
            next_player: self.turn.player,
            rolled: rules.pending_roll(),
        })
    }

    pub fn status(&self) -> StatusView {
        StatusView {
            score: self.score.clone(),
            state: self.round,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::random::MockRandomSource;

    fn room(game: GameKind) -> Room {
        Room::open(
            RoomId::new("table-1".to_string()).unwrap(),
            game,
            Timestamp::new(0),
        )
    }

    fn random() -> MockRandomSource {
        let mut random = MockRandomSource::new();
        random.expect_pick_index().returning(|_| 0);
        random.expect_roll_die().returning(|_| 6);
        random
    }

    fn active(game: GameKind) -> Room {
        let mut room = room(game);
        room.start_new_game(None, &random()).unwrap();
        room
    }

    fn board(room: &Room) -> Vec<u8> {
        room.update(0).unwrap().board.unwrap()
    }

    #[test]
    fn test_first_move_marks_cell_and_passes_turn() {
        // テスト項目: Open → NewGame → a1 で (0,0) に 1 が置かれ、次は player 2 になる
        // given (前提条件):
        let mut room = active(GameKind::TicTacToe);

        // when (操作):
        let outcome = room.make_move(1, "a1", None);

        // then (期待する結果):
        assert_eq!(outcome, Ok(MoveOutcome::Pass));
        let view = room.update(1).unwrap();
        assert_eq!(view.board.as_deref().map(|b| b[0]), Some(1));
        assert_eq!(view.next_player, 2);
    }

    #[test]
    fn test_wrong_player_is_rejected_for_every_game() {
        // テスト項目: すべてのゲームで手番でないプレイヤーの手は拒否され盤面は変わらない
        for game in GameKind::ALL {
            // given (前提条件):
            let mut room = active(game);
            let before = room.update(0).unwrap();
            let notation = if game == GameKind::ManDontGetAngry {
                "throw"
            } else {
                "a1"
            };

            // when (操作):
            let result = room.make_move(2, notation, Some(6));

            // then (期待する結果):
            assert_eq!(result, Err(RoomError::Move(MoveError::WrongPlayer(2))), "{game}");
            assert_eq!(room.update(0).unwrap(), before, "{game}");
        }
    }

    #[test]
    fn test_move_before_new_game_is_rejected() {
        // テスト項目: NewGame 前の手は Game inactive! で拒否される
        // given (前提条件):
        let mut room = room(GameKind::ConnectFour);

        // when (操作):
        let result = room.make_move(1, "a1", None);

        // then (期待する結果):
        assert_eq!(result.unwrap_err().to_string(), "Game inactive!");
    }

    #[test]
    fn test_two_updates_are_identical() {
        // テスト項目: 手を挟まない 2 回の Update は同じ内容を返す
        // given (前提条件):
        let mut room = active(GameKind::TicTacToe);
        room.make_move(1, "b2", None).unwrap();

        // when (操作):
        let first = room.update(1).unwrap();
        let second = room.update(1).unwrap();

        // then (期待する結果):
        assert_eq!(first, second);
    }

    #[test]
    fn test_win_counts_score_and_ends_round() {
        // テスト項目: 勝利するとスコアが加算されラウンドが終了する
        // given (前提条件):
        let mut room = active(GameKind::TicTacToe);
        for (player, cell) in [(1, "a1"), (2, "a2"), (1, "b1"), (2, "b2")] {
            room.make_move(player, cell, None).unwrap();
        }

        // when (操作):
        let outcome = room.make_move(1, "c1", None);

        // then (期待する結果):
        assert_eq!(outcome, Ok(MoveOutcome::Won));
        assert_eq!(room.round(), RoundState::Won(1));
        assert_eq!(room.score(), &[0, 1, 0]);
        assert_eq!(
            room.make_move(2, "c2", None),
            Err(RoomError::Move(MoveError::GameInactive))
        );
    }

    #[test]
    fn test_draw_counts_tie() {
        // テスト項目: 引き分けはスコアの 0 番目に加算される
        // given (前提条件):
        let mut room = active(GameKind::TicTacToe);
        let moves = [
            (1, "a1"),
            (2, "b1"),
            (1, "c1"),
            (2, "b2"),
            (1, "a2"),
            (2, "c2"),
            (1, "b3"),
            (2, "a3"),
        ];
        for (player, cell) in moves {
            assert_eq!(room.make_move(player, cell, None), Ok(MoveOutcome::Pass));
        }

        // when (操作):
        let outcome = room.make_move(1, "c3", None);

        // then (期待する結果):
        assert_eq!(outcome, Ok(MoveOutcome::Draw));
        assert_eq!(room.round(), RoundState::Draw);
        assert_eq!(room.score(), &[1, 0, 0]);
    }

    #[test]
    fn test_new_round_rotates_opening_player_and_keeps_score() {
        // テスト項目: 新しいラウンドでは盤面だけが消え、開始プレイヤーが交代する
        // given (前提条件):
        let mut room = active(GameKind::TicTacToe);
        for (player, cell) in [(1, "a1"), (2, "a2"), (1, "b1"), (2, "b2"), (1, "c1")] {
            room.make_move(player, cell, None).unwrap();
        }

        // when (操作):
        room.start_new_round(&random());

        // then (期待する結果):
        assert_eq!(room.round(), RoundState::Active);
        assert_eq!(room.turn().player, 2);
        assert_eq!(room.score(), &[0, 1, 0]);
        assert_eq!(board(&room), vec![0; 9]);
    }

    #[test]
    fn test_invalid_player_count_is_rejected() {
        // テスト項目: ゲームの人数範囲外の NewGame は拒否される
        // given (前提条件):
        let mut room = room(GameKind::ConnectFour);

        // when (操作):
        let result = room.start_new_game(Some(5), &random());

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RoomError::InvalidPlayerCount {
                requested: 5,
                min: 2,
                max: 4
            })
        );
        assert_eq!(room.round(), RoundState::Inactive);
    }

    #[test]
    fn test_four_player_connect_four_cycles_through_seats() {
        // テスト項目: 4 人の ConnectFour では 4 番の次に 1 番へ戻る
        // given (前提条件):
        let mut room = room(GameKind::ConnectFour);
        room.start_new_game(Some(4), &random()).unwrap();

        // when (操作):
        for (player, cell) in [(1, "a1"), (2, "b1"), (3, "c1"), (4, "d1")] {
            room.make_move(player, cell, None).unwrap();
        }

        // then (期待する結果):
        assert_eq!(room.turn().player, 1);
        assert_eq!(room.score().len(), 5);
    }

    #[test]
    fn test_viewer_beyond_capacity_is_rejected() {
        // テスト項目: 席数を超える viewer id は拒否される
        // given (前提条件):
        let room = active(GameKind::TicTacToe);

        // when (操作):
        let result = room.update(3);

        // then (期待する結果):
        assert_eq!(result, Err(RoomError::InvalidViewer(3)));
    }

    #[test]
    fn test_battleships_update_returns_layers_per_viewer() {
        // テスト項目: Battleships の Update は視点ごとに 2 枚の盤面を返す
        // given (前提条件):
        let room = active(GameKind::Battleships);

        // when (操作):
        let player = room.update(1).unwrap();
        let observer = room.update(0).unwrap();

        // then (期待する結果):
        let player_boards = player.boards.unwrap();
        assert_eq!(player_boards.len(), 2);
        assert_eq!(player_boards[0][0], 1);
        assert!(player.board.is_none());
        assert_eq!(observer.boards.unwrap()[0], vec![0; 64]);
    }

    #[test]
    fn test_ludo_throw_exposes_pending_roll() {
        // テスト項目: サイコロを振ると出目と次の操作種別が Update に現れる
        // given (前提条件):
        let mut room = active(GameKind::ManDontGetAngry);

        // when (操作):
        let outcome = room.make_move(1, "throw", Some(6));

        // then (期待する結果):
        assert_eq!(outcome, Ok(MoveOutcome::Again));
        let view = room.update(0).unwrap();
        assert_eq!(view.rolled, Some(6));
        assert_eq!(view.next_move, NextMove::Move);
        assert_eq!(view.next_player, 1);
    }

    #[test]
    fn test_state_view_serializes_camel_case() {
        // テスト項目: StateView は nextMove / nextPlayer を含む camelCase JSON になる
        // given (前提条件):
        let room = active(GameKind::TicTacToe);

        // when (操作):
        let json = serde_json::to_value(room.update(0).unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(json["nextMove"], "choice");
        assert_eq!(json["nextPlayer"], 1);
        assert_eq!(json["state"]["gameActive"], true);
        assert!(json.get("boards").is_none());
        assert!(json.get("rolled").is_none());
    }
}
