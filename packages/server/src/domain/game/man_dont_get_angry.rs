//! ManDontGetAngry, a Ludo variant for two to four players.
//!
//! Each seat owns four pawns that leave their base on a six, travel once
//! around a 40-square track and enter a private finish. A turn alternates
//! between throwing the die and moving a pawn with the roll.

use std::{fmt, str::FromStr};

use tracing::{debug, info};

use super::{BoardView, GameRules};
use crate::domain::{
    error::MoveError,
    random::RandomSource,
    round::{MoveOutcome, NextMove},
};

pub const TRACK_LENGTH: u8 = 40;
pub const PAWNS: u8 = 4;
const MAX_SEATS: usize = 4;
const SAFE_SQUARES: [u8; 8] = [2, 6, 12, 16, 22, 26, 32, 36];
const START_SQUARES: [u8; MAX_SEATS] = [0, 20, 10, 30];
/// Throws granted to a seat with no pawn on the track
const THROWS_FROM_BASE: u8 = 3;

fn start_square(seat: u8) -> u8 {
    START_SQUARES[usize::from(seat - 1)]
}

/// Square from which a pawn of `seat` enters its finish
fn last_square(seat: u8) -> u8 {
    (start_square(seat) + TRACK_LENGTH - 1) % TRACK_LENGTH
}

fn is_safe(square: u8) -> bool {
    SAFE_SQUARES.contains(&square)
}

/// Forward distance along the track
fn distance(from: u8, to: u8) -> u8 {
    (to + TRACK_LENGTH - from) % TRACK_LENGTH
}

/// A parsed move.
///
/// Text forms: `throw`, `b<seat>|s<square>`, `m<from>|m<to>` and
/// `m<from>|f<seat>`. Track squares may be written with `m` or `s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LudoMove {
    Throw,
    BaseExit { seat: u8, to: u8 },
    TrackMove { from: u8, to: u8 },
    FinishEntry { from: u8, seat: u8 },
}

enum Slot {
    Base(u8),
    Track(u8),
    Finish(u8),
}

fn parse_slot(text: &str) -> Option<Slot> {
    let mut chars = text.chars();
    let kind = chars.next()?;
    let digits = chars.as_str();
    if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let id: u8 = digits.parse().ok()?;
    let seat = (1..=MAX_SEATS as u8).contains(&id).then_some(id);
    match kind {
        'b' => seat.map(Slot::Base),
        'f' => seat.map(Slot::Finish),
        'm' | 's' if id < TRACK_LENGTH => Some(Slot::Track(id)),
        _ => None,
    }
}

impl FromStr for LudoMove {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "throw" {
            return Ok(LudoMove::Throw);
        }
        let malformed = || MoveError::Malformed(s.to_string());
        let (source, target) = s.split_once('|').ok_or_else(malformed)?;
        match (parse_slot(source), parse_slot(target)) {
            (Some(Slot::Base(seat)), Some(Slot::Track(to))) => Ok(LudoMove::BaseExit { seat, to }),
            (Some(Slot::Track(from)), Some(Slot::Track(to))) => Ok(LudoMove::TrackMove { from, to }),
            (Some(Slot::Track(from)), Some(Slot::Finish(seat))) => {
                Ok(LudoMove::FinishEntry { from, seat })
            }
            _ => Err(malformed()),
        }
    }
}

fn square_label(square: u8) -> String {
    let prefix = if is_safe(square) || START_SQUARES.contains(&square) {
        's'
    } else {
        'm'
    };
    format!("{}{}", prefix, square)
}

impl fmt::Display for LudoMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LudoMove::Throw => f.write_str("throw"),
            LudoMove::BaseExit { seat, to } => write!(f, "b{}|{}", seat, square_label(*to)),
            LudoMove::TrackMove { from, to } => {
                write!(f, "{}|{}", square_label(*from), square_label(*to))
            }
            LudoMove::FinishEntry { from, seat } => write!(f, "{}|f{}", square_label(*from), seat),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManDontGetAngry {
    /// Owner seat of each track square, 0 when empty
    track: [u8; TRACK_LENGTH as usize],
    /// Pawns waiting in each seat's base
    bases: [u8; MAX_SEATS],
    /// Pawns that reached each seat's finish
    finishes: [u8; MAX_SEATS],
    phase: NextMove,
    throws: u8,
    rolled: Option<u8>,
}

impl ManDontGetAngry {
    pub fn new(players: u8) -> Self {
        let mut game = Self {
            track: [0; TRACK_LENGTH as usize],
            bases: [0; MAX_SEATS],
            finishes: [0; MAX_SEATS],
            phase: NextMove::Throw,
            throws: THROWS_FROM_BASE,
            rolled: None,
        };
        game.clear(players);
        game
    }

    fn clear(&mut self, players: u8) {
        self.track = [0; TRACK_LENGTH as usize];
        for (index, base) in self.bases.iter_mut().enumerate() {
            *base = if index < usize::from(players) { PAWNS } else { 0 };
        }
        self.finishes = [0; MAX_SEATS];
        self.phase = NextMove::Throw;
        self.throws = THROWS_FROM_BASE;
        self.rolled = None;
    }

    pub fn throws_left(&self) -> u8 {
        self.throws
    }

    pub fn owner_at(&self, square: u8) -> u8 {
        self.track[usize::from(square)]
    }

    pub fn in_base(&self, seat: u8) -> u8 {
        self.bases[usize::from(seat - 1)]
    }

    pub fn finished(&self, seat: u8) -> u8 {
        self.finishes[usize::from(seat - 1)]
    }

    fn has_pawn_on_track(&self, seat: u8) -> bool {
        self.track.contains(&seat)
    }

    fn can_leave_base(&self, seat: u8, rolled: u8) -> bool {
        rolled == 6 && self.in_base(seat) > 0 && self.owner_at(start_square(seat)) != seat
    }

    /// Check a track step without applying it
    ///
    /// The step length is checked before pawn ownership.
    fn check_step(&self, seat: u8, from: u8, to: u8, rolled: u8) -> Result<(), MoveError> {
        let step = distance(from, to);
        if step == 0 || step != rolled {
            return Err(MoveError::IllegalStep { from, to, rolled });
        }
        if self.owner_at(from) != seat {
            return Err(MoveError::NoPawn(from));
        }
        if step > distance(from, last_square(seat)) {
            return Err(MoveError::SecondLap);
        }
        match self.owner_at(to) {
            0 => Ok(()),
            owner if owner == seat => Err(MoveError::Blocked(to)),
            owner if is_safe(to) || to == start_square(owner) => Err(MoveError::Blocked(to)),
            _ => Ok(()),
        }
    }

    fn has_any_move(&self, seat: u8, rolled: u8) -> bool {
        if self.can_leave_base(seat, rolled) {
            return true;
        }
        (0..TRACK_LENGTH)
            .filter(|&square| self.owner_at(square) == seat)
            .any(|square| {
                square == last_square(seat)
                    || self
                        .check_step(seat, square, (square + rolled) % TRACK_LENGTH, rolled)
                        .is_ok()
            })
    }

    fn capture(&mut self, square: u8) {
        let owner = self.owner_at(square);
        if owner != 0 {
            debug!("ManDontGetAngry: pawn of player {} captured on {}", owner, square);
            self.bases[usize::from(owner - 1)] += 1;
            self.track[usize::from(square)] = 0;
        }
    }

    /// The pawn has moved; the next input is a throw again.
    fn end_move(&mut self) {
        self.phase = NextMove::Throw;
        self.rolled = None;
    }

    fn throw(&mut self, seat: u8, roll: Option<u8>) -> Result<MoveOutcome, MoveError> {
        let rolled = roll.ok_or(MoveError::MissingRoll)?;
        if !(1..=6).contains(&rolled) {
            return Err(MoveError::InvalidRoll(rolled));
        }

        self.throws = self.throws.saturating_sub(1);
        if rolled == 6 {
            self.throws = 1;
        }

        if self.has_any_move(seat, rolled) {
            self.phase = NextMove::Move;
            self.rolled = Some(rolled);
            return Ok(MoveOutcome::Again);
        }

        debug!("ManDontGetAngry: player {} cannot use {}", seat, rolled);
        self.rolled = None;
        if self.throws == 0 {
            Ok(MoveOutcome::Pass)
        } else {
            Ok(MoveOutcome::Again)
        }
    }

    fn leave_base(&mut self, seat: u8, to: u8, rolled: u8) -> Result<MoveOutcome, MoveError> {
        let start = start_square(seat);
        if to != start || rolled != 6 {
            return Err(MoveError::IllegalBaseExit);
        }
        if self.in_base(seat) == 0 {
            return Err(MoveError::BaseEmpty);
        }
        if self.owner_at(start) == seat {
            return Err(MoveError::StartOccupied);
        }

        self.capture(start);
        self.track[usize::from(start)] = seat;
        self.bases[usize::from(seat - 1)] -= 1;
        self.end_move();
        Ok(MoveOutcome::Again)
    }

    fn step(&mut self, seat: u8, from: u8, to: u8, rolled: u8) -> Result<MoveOutcome, MoveError> {
        self.check_step(seat, from, to, rolled)?;

        self.track[usize::from(from)] = 0;
        self.capture(to);
        self.track[usize::from(to)] = seat;
        self.end_move();
        if rolled == 6 {
            Ok(MoveOutcome::Again)
        } else {
            Ok(MoveOutcome::Pass)
        }
    }

    fn enter_finish(&mut self, seat: u8, from: u8) -> Result<MoveOutcome, MoveError> {
        if self.owner_at(from) != seat {
            return Err(MoveError::NoPawn(from));
        }
        if from != last_square(seat) {
            return Err(MoveError::NotAtFinishEntry(from));
        }

        self.track[usize::from(from)] = 0;
        self.finishes[usize::from(seat - 1)] += 1;
        self.end_move();

        if self.finished(seat) == PAWNS {
            info!("ManDontGetAngry: player {} won", seat);
            Ok(MoveOutcome::Won)
        } else if self.throws > 0 {
            Ok(MoveOutcome::Again)
        } else {
            Ok(MoveOutcome::Pass)
        }
    }
}

impl GameRules for ManDontGetAngry {
    fn reset(&mut self, players: u8, _random: &dyn RandomSource) {
        self.clear(players);
    }

    fn play(
        &mut self,
        player: u8,
        notation: &str,
        roll: Option<u8>,
    ) -> Result<MoveOutcome, MoveError> {
        let parsed: LudoMove = notation.parse()?;

        match (self.phase, parsed) {
            (NextMove::Throw, LudoMove::Throw) => self.throw(player, roll),
            (NextMove::Throw, _) | (_, LudoMove::Throw) => Err(MoveError::WrongPhase),
            (_, movement) => {
                let rolled = self.rolled.ok_or(MoveError::MissingRoll)?;
                match movement {
                    LudoMove::BaseExit { seat, to } if seat == player => {
                        self.leave_base(player, to, rolled)
                    }
                    LudoMove::BaseExit { .. } => Err(MoveError::IllegalBaseExit),
                    LudoMove::TrackMove { from, to } => self.step(player, from, to, rolled),
                    LudoMove::FinishEntry { from, seat } if seat == player => {
                        self.enter_finish(player, from)
                    }
                    LudoMove::FinishEntry { .. } => Err(MoveError::WrongFinish),
                    LudoMove::Throw => Err(MoveError::WrongPhase),
                }
            }
        }
    }

    fn on_turn_passed(&mut self, next_player: u8) {
        self.throws = if self.has_pawn_on_track(next_player) {
            1
        } else {
            THROWS_FROM_BASE
        };
        self.end_move();
    }

    /// Track, then four base slots per seat, then four finish slots per seat
    fn view(&self, _viewer: u8) -> BoardView {
        let slots = |counts: &[u8; MAX_SEATS]| {
            counts
                .iter()
                .zip(1u8..)
                .flat_map(|(&count, seat)| {
                    (0..PAWNS).map(move |slot| if slot < count { seat } else { 0 })
                })
                .collect::<Vec<u8>>()
        };
        let mut board = self.track.to_vec();
        board.extend(slots(&self.bases));
        board.extend(slots(&self.finishes));
        BoardView::Single(board)
    }

    fn next_move(&self) -> NextMove {
        self.phase
    }

    fn pending_roll(&self) -> Option<u8> {
        self.rolled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Game in the move phase with `rolled` pending
    fn rolled(mut game: ManDontGetAngry, rolled: u8) -> ManDontGetAngry {
        game.phase = NextMove::Move;
        game.rolled = Some(rolled);
        game.throws = if rolled == 6 { 1 } else { 0 };
        game
    }

    #[test]
    fn test_parse_move_forms() {
        // テスト項目: 各種の手の表記を解析できる
        // when (操作):
        let moves: Vec<LudoMove> = ["throw", "b1|s0", "m3|m9", "s36|m39", "m39|f1"]
            .iter()
            .map(|text| text.parse().unwrap())
            .collect();

        // then (期待する結果):
        assert_eq!(
            moves,
            vec![
                LudoMove::Throw,
                LudoMove::BaseExit { seat: 1, to: 0 },
                LudoMove::TrackMove { from: 3, to: 9 },
                LudoMove::TrackMove { from: 36, to: 39 },
                LudoMove::FinishEntry { from: 39, seat: 1 },
            ]
        );
        assert_eq!(moves[2].to_string(), "m3|m9");
        assert_eq!(moves[1].to_string(), "b1|s0");
    }

    #[test]
    fn test_parse_rejects_malformed_moves() {
        // テスト項目: 不正な表記は Incorrect move data で拒否される
        // given (前提条件):
        let inputs = ["", "roll", "m3", "x1|m2", "m40|m2", "b5|s0", "f1|m3", "m3|b1", "m3|m9|m10"];

        // when (操作) / then (期待する結果):
        for input in inputs {
            let result = input.parse::<LudoMove>();
            assert_eq!(result, Err(MoveError::Malformed(input.to_string())), "{input}");
        }
    }

    #[test]
    fn test_only_active_seats_fill_their_base() {
        // テスト項目: 参加している席の拠点だけに駒が置かれる
        // when (操作):
        let game = ManDontGetAngry::new(2);

        // then (期待する結果):
        let BoardView::Single(board) = game.view(0) else {
            panic!("expected a single board");
        };
        assert_eq!(board.len(), 72);
        assert_eq!(&board[40..48], &[1, 1, 1, 1, 2, 2, 2, 2]);
        assert_eq!(&board[48..56], &[0; 8]);
        assert_eq!(game.next_move(), NextMove::Throw);
    }

    #[test]
    fn test_three_useless_throws_pass_the_turn() {
        // テスト項目: 駒がトラックにない場合は 3 回まで投げられ、使えなければ手番が移る
        // given (前提条件):
        let mut game = ManDontGetAngry::new(2);

        // when (操作):
        let first = game.play(1, "throw", Some(3));
        let second = game.play(1, "throw", Some(5));
        let third = game.play(1, "throw", Some(1));

        // then (期待する結果):
        assert_eq!(first, Ok(MoveOutcome::Again));
        assert_eq!(second, Ok(MoveOutcome::Again));
        assert_eq!(third, Ok(MoveOutcome::Pass));
        assert_eq!(game.pending_roll(), None);
    }

    #[test]
    fn test_six_leaves_base_and_keeps_turn() {
        // テスト項目: 6 を出すと拠点から出られ、同じプレイヤーが続けて投げる
        // given (前提条件):
        let mut game = ManDontGetAngry::new(2);

        // when (操作):
        let thrown = game.play(2, "throw", Some(6));
        let exit = game.play(2, "b2|s20", None);

        // then (期待する結果):
        assert_eq!(thrown, Ok(MoveOutcome::Again));
        assert_eq!(exit, Ok(MoveOutcome::Again));
        assert_eq!(game.owner_at(20), 2);
        assert_eq!(game.in_base(2), 3);
        assert_eq!(game.next_move(), NextMove::Throw);
        assert_eq!(game.throws_left(), 1);
    }

    #[test]
    fn test_step_different_from_roll_is_illegal() {
        // テスト項目: 出目と異なる歩数の移動は Illegal move で拒否される
        // given (前提条件):
        let mut game = ManDontGetAngry::new(2);
        game.track[3] = 1;
        game.bases[0] = 3;
        let mut game = rolled(game, 4);
        let before = game.clone();

        // when (操作):
        let result = game.play(1, "m3|m9", None);

        // then (期待する結果):
        let error = result.unwrap_err();
        assert!(error.to_string().starts_with("Illegal move"));
        assert_eq!(game, before);
    }

    #[test]
    fn test_step_length_is_checked_before_pawn_ownership() {
        // テスト項目: 自分の駒がないマスからでも、歩数が出目と違えば Illegal move になる
        // given (前提条件):
        let mut game = ManDontGetAngry::new(2);
        game.track[3] = 1;
        let mut game = rolled(game, 3);

        // when (操作):
        let mismatch = game.play(1, "m5|m9", None);
        let empty = game.play(1, "m5|m8", None);

        // then (期待する結果):
        assert_eq!(
            mismatch,
            Err(MoveError::IllegalStep {
                from: 5,
                to: 9,
                rolled: 3
            })
        );
        assert!(mismatch.unwrap_err().to_string().starts_with("Illegal move"));
        assert_eq!(empty, Err(MoveError::NoPawn(5)));
    }

    #[test]
    fn test_base_exit_requires_a_six() {
        // テスト項目: 6 以外の出目や他人の拠点からは駒を出せない
        // given (前提条件):
        let mut game = rolled(ManDontGetAngry::new(2), 4);
        let before = game.clone();

        // when (操作):
        let without_six = game.play(1, "b1|s0", None);
        let foreign_base = game.play(1, "b2|s20", None);

        // then (期待する結果):
        assert_eq!(without_six, Err(MoveError::IllegalBaseExit));
        assert_eq!(foreign_base, Err(MoveError::IllegalBaseExit));
        assert_eq!(game, before);
    }

    #[test]
    fn test_base_exit_onto_own_pawn_is_rejected() {
        // テスト項目: スタートマスに自分の駒がある場合は拠点から出られない
        // given (前提条件):
        let mut game = ManDontGetAngry::new(2);
        game.track[0] = 1;
        game.bases[0] = 3;
        let mut game = rolled(game, 6);

        // when (操作):
        let result = game.play(1, "b1|s0", None);

        // then (期待する結果):
        assert_eq!(result, Err(MoveError::StartOccupied));
        assert_eq!(game.in_base(1), 3);
    }

    #[test]
    fn test_finish_entry_only_from_last_square() {
        // テスト項目: 最後のマス以外からはゴールに入れない
        // given (前提条件):
        let mut game = ManDontGetAngry::new(2);
        game.track[30] = 1;
        let mut game = rolled(game, 2);

        // when (操作):
        let result = game.play(1, "m30|f1", None);

        // then (期待する結果):
        assert_eq!(result, Err(MoveError::NotAtFinishEntry(30)));
        assert_eq!(game.owner_at(30), 1);
    }

    #[test]
    fn test_foreign_finish_is_rejected() {
        // テスト項目: 他のプレイヤーのゴールには入れない
        // given (前提条件):
        let mut game = ManDontGetAngry::new(2);
        game.track[39] = 1;
        let mut game = rolled(game, 2);

        // when (操作):
        let result = game.play(1, "m39|f2", None);

        // then (期待する結果):
        assert_eq!(result, Err(MoveError::WrongFinish));
        assert_eq!(game.finished(1), 0);
    }

    #[test]
    fn test_step_captures_foreign_pawn() {
        // テスト項目: 相手の駒があるマスに止まると相手の駒は拠点に戻る
        // given (前提条件):
        let mut game = ManDontGetAngry::new(2);
        game.track[3] = 1;
        game.track[7] = 2;
        game.bases = [3, 3, 0, 0];
        let mut game = rolled(game, 4);

        // when (操作):
        let outcome = game.play(1, "m3|m7", None);

        // then (期待する結果):
        assert_eq!(outcome, Ok(MoveOutcome::Pass));
        assert_eq!(game.owner_at(7), 1);
        assert_eq!(game.owner_at(3), 0);
        assert_eq!(game.in_base(2), 4);
    }

    #[test]
    fn test_foreign_pawn_on_safe_square_blocks() {
        // テスト項目: 安全マスにいる相手の駒は取れない
        // given (前提条件):
        let mut game = ManDontGetAngry::new(2);
        game.track[3] = 1;
        game.track[6] = 2;
        let mut game = rolled(game, 3);

        // when (操作):
        let result = game.play(1, "m3|s6", None);

        // then (期待する結果):
        assert_eq!(result, Err(MoveError::Blocked(6)));
    }

    #[test]
    fn test_second_lap_is_rejected() {
        // テスト項目: 最後のマスを越えて二周目に入る移動は拒否される
        // given (前提条件):
        let mut game = ManDontGetAngry::new(2);
        game.track[37] = 1;
        let mut game = rolled(game, 5);

        // when (操作):
        let result = game.play(1, "m37|m2", None);

        // then (期待する結果):
        assert_eq!(result, Err(MoveError::SecondLap));
    }

    #[test]
    fn test_last_pawn_in_finish_wins() {
        // テスト項目: 4 つ目の駒がゴールに入ると勝利になる
        // given (前提条件):
        let mut game = ManDontGetAngry::new(2);
        game.bases = [0, 4, 0, 0];
        game.finishes = [3, 0, 0, 0];
        game.track[39] = 1;
        let mut game = rolled(game, 2);

        // when (操作):
        let outcome = game.play(1, "m39|f1", None);

        // then (期待する結果):
        assert_eq!(outcome, Ok(MoveOutcome::Won));
        assert_eq!(game.finished(1), 4);
    }

    #[test]
    fn test_wrong_phase_is_rejected() {
        // テスト項目: 投げる番に駒を動かそうとすると拒否される
        // given (前提条件):
        let mut game = ManDontGetAngry::new(2);

        // when (操作):
        let result = game.play(1, "b1|s0", None);

        // then (期待する結果):
        assert_eq!(result, Err(MoveError::WrongPhase));
    }

    #[test]
    fn test_turn_passed_grants_single_throw_when_on_track() {
        // テスト項目: トラックに駒があるプレイヤーには 1 回だけ投げる権利が与えられる
        // given (前提条件):
        let mut game = ManDontGetAngry::new(2);
        game.track[25] = 2;

        // when (操作):
        game.on_turn_passed(2);

        // then (期待する結果):
        assert_eq!(game.throws_left(), 1);
        game.on_turn_passed(1);
        assert_eq!(game.throws_left(), 3);
    }
}
