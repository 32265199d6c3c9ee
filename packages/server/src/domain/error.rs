//! Domain errors.
//!
//! Every rule violation is a value, never a panic: the room stays untouched
//! and the caller turns the error into `{accepted: false, message}`.

use thiserror::Error;

/// Invalid identifier text
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Identifier must not be empty")]
    Empty,

    #[error("Identifier must be at most {0} characters")]
    TooLong(usize),

    #[error("Identifier must not contain whitespace: '{0}'")]
    ContainsWhitespace(String),
}

/// A rejected move. The board is unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("Game inactive!")]
    GameInactive,

    #[error("Wrong player id: {0}")]
    WrongPlayer(u8),

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Column index out of range: {0}")]
    ColumnOutOfRange(i32),

    #[error("Row index out of range: {0}")]
    RowOutOfRange(i32),

    #[error("Position already taken: {0}")]
    Occupied(String),

    #[error("Incorrect move type")]
    WrongPhase,

    #[error("Incorrect move data: {0}")]
    Malformed(String),

    #[error("Dice roll missing")]
    MissingRoll,

    #[error("Invalid dice roll: {0}")]
    InvalidRoll(u8),

    #[error("Illegal base escape")]
    IllegalBaseExit,

    #[error("Base empty")]
    BaseEmpty,

    #[error("Base exit occupied")]
    StartOccupied,

    #[error("Illegal move: {from} -> {to} with roll {rolled}")]
    IllegalStep { from: u8, to: u8, rolled: u8 },

    #[error("Second lap")]
    SecondLap,

    #[error("Incorrect finish zone")]
    WrongFinish,

    #[error("No own pawn on square {0}")]
    NoPawn(u8),

    #[error("Pawn on square {0} cannot enter the finish")]
    NotAtFinishEntry(u8),

    #[error("Square {0} is blocked")]
    Blocked(u8),
}

/// Seat and role bookkeeping failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Client '{0}' is already connected to this room")]
    ClientAlreadyConnected(String),

    #[error("Incorrect role: '{0}'")]
    IncorrectRole(String),

    #[error("Double role: '{0}'")]
    DuplicateRole(String),

    #[error("Role '{0}' refers to an empty slot")]
    EmptySlot(String),

    #[error("Too many roles: {given} (at most {max})")]
    TooManyRoles { given: usize, max: usize },
}

/// Room-level command failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoomError {
    #[error("Invalid number of players: {requested} (allowed {min}..={max})")]
    InvalidPlayerCount { requested: u8, min: u8, max: u8 },

    #[error("Invalid viewer id: {0}")]
    InvalidViewer(u8),

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Role(#[from] RoleError),
}

/// Repository（データアクセス層）のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Room doesn't exist!")]
    RoomNotFound(String),

    #[error("Room exist!")]
    RoomAlreadyExists(String),
}

/// MessagePusher（通知層）のエラー
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("Connection '{0}' not found")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
