//! UseCase 層のエラー定義
//!
//! `Display` の文字列がそのまま `{accepted: false, message}` の message になる。

use thiserror::Error;

use crate::domain::{
    GameKind, MoveError, RepositoryError, RoleError, RoomError, UnknownGame, ValidationError,
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Game doesn't exist!")]
    UnknownGame(String),

    #[error("Room doesn't exist!")]
    RoomNotFound(String),

    #[error("Room exist!")]
    RoomExists(String),

    #[error("Room '{room}' plays {actual}, not {requested}")]
    GameMismatch {
        room: String,
        actual: GameKind,
        requested: GameKind,
    },

    #[error("Only the room host can do that")]
    NotHost,

    #[error("Connection is not seated in this room")]
    NotConnected,

    #[error("Invalid room id: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Room(#[from] RoomError),
}

impl From<RepositoryError> for CommandError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::RoomNotFound(id) => CommandError::RoomNotFound(id),
            RepositoryError::RoomAlreadyExists(id) => CommandError::RoomExists(id),
        }
    }
}

impl From<MoveError> for CommandError {
    fn from(error: MoveError) -> Self {
        CommandError::Room(error.into())
    }
}

impl From<RoleError> for CommandError {
    fn from(error: RoleError) -> Self {
        CommandError::Room(error.into())
    }
}

impl From<UnknownGame> for CommandError {
    fn from(error: UnknownGame) -> Self {
        CommandError::UnknownGame(error.0)
    }
}

/// WebSocket 接続時のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JoinError {
    #[error("Room doesn't exist!")]
    RoomNotFound(String),

    #[error(transparent)]
    Role(#[from] RoleError),
}
