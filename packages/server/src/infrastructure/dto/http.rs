//! HTTP request / response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::{GameDescriptor, RoundState, StateView, StatusView};

/// Body of `Open`, `Close` and `NewRound`
#[derive(Debug, Clone, Deserialize)]
pub struct RoomRequest {
    pub room: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGameRequest {
    pub room: String,
    #[serde(default)]
    pub players: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoveRequest {
    pub room: String,
    pub player: u8,
    #[serde(rename = "move")]
    pub notation: String,
    /// One list of faces per die; the last face is the result
    #[serde(default)]
    pub dices: Option<Vec<Vec<u8>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRequest {
    pub room: String,
    pub player: u8,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusRequest {
    #[serde(default)]
    pub room: Option<String>,
}

/// `{accepted, message, ...payload}`
#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    pub accepted: bool,
    pub message: String,
    #[serde(flatten)]
    pub update: Option<StateView>,
    #[serde(flatten)]
    pub status: Option<StatusView>,
}

impl CommandResponse {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            accepted: true,
            message: message.into(),
            update: None,
            status: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            accepted: false,
            message: message.into(),
            update: None,
            status: None,
        }
    }

    pub fn with_update(mut self, update: StateView) -> Self {
        self.update = Some(update);
        self
    }

    pub fn with_status(mut self, status: StatusView) -> Self {
        self.status = Some(status);
        self
    }
}

/// Capability descriptor of one game
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub accepted: bool,
    pub api: &'static GameDescriptor,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub rooms: usize,
}

/// Room summary for `/api/rooms`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub game: String,
    pub players: usize,
    pub observers: usize,
    pub state: RoundState,
    pub created_at: String,
}

/// Room detail for `/api/rooms/{room_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub id: String,
    pub game: String,
    pub state: RoundState,
    pub score: Vec<u32>,
    pub next_player: u8,
    pub users: Vec<UserDetailDto>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDetailDto {
    pub role: String,
    pub client_id: String,
    pub host: bool,
    pub connected_at: String,
}
