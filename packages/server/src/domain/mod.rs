//! ドメイン層
//!
//! ルーム、席、ターン状態機械、各ゲームのルールエンジンを定義します。
//! 外部（HTTP / WebSocket / 乱数 / 時刻）には依存しません。

pub mod error;
pub mod game;
pub mod message_pusher;
pub mod random;
pub mod repository;
pub mod room;
pub mod round;
pub mod seat;
pub mod value_object;

pub use error::{MessagePushError, MoveError, RepositoryError, RoleError, RoomError, ValidationError};
pub use game::{
    BoardGeometry, BoardView, DiceSpec, GameDescriptor, GameEngine, GameKind, GameRules, LudoMove,
    UnknownGame,
};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use random::RandomSource;
pub use repository::{RoomRepository, SharedRoom};
pub use room::{Room, StateView, StatusView};
pub use round::{MoveOutcome, NextMove, RoundState, Turn};
pub use seat::{Occupant, Role, SeatEntry, Seats};
pub use value_object::{ClientId, ConnectionId, RoomId, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
#[cfg(test)]
pub use random::MockRandomSource;
