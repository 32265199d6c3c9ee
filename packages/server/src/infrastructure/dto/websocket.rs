//! WebSocket message DTOs.
//!
//! Both directions are tagged by `action`. Every server message carries
//! `accepted`.

use serde::{Deserialize, Serialize};

use crate::domain::StateView;

/// Messages sent by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ClientMessage {
    /// Host only; `roles[i]` names the occupant of seat `i + 1`
    NewGame {
        #[serde(default)]
        roles: Vec<String>,
    },
    /// Host only
    NewRound,
    Move {
        #[serde(rename = "move")]
        notation: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        board: Option<usize>,
    },
    Update,
    Ping,
    /// Host only
    List,
}

const ACTIONS: [&str; 6] = ["NewGame", "NewRound", "Move", "Update", "Ping", "List"];

impl ClientMessage {
    /// Parse a socket frame; the error text is sent back to the client.
    pub fn parse(text: &str) -> Result<Self, String> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|_| "Incorrect message format".to_string())?;
        let action = value
            .get("action")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string();
        serde_json::from_value(value).map_err(|e| {
            if ACTIONS.contains(&action.as_str()) {
                format!("Incorrect {} data: {}", action, e)
            } else {
                format!("Unknown action: '{}'", action)
            }
        })
    }
}

/// One connected user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntry {
    /// `u<seat>` or `o<slot>`
    pub role: String,
    pub client_id: String,
    pub connected_at: i64,
    pub host: bool,
}

/// Messages sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ServerMessage {
    GetRole {
        accepted: bool,
        response: String,
        description: String,
        /// Seat, 0 for observers
        uid: u8,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        oid: Option<usize>,
    },
    RoomHost {
        accepted: bool,
        game: String,
        room: String,
    },
    Joined {
        accepted: bool,
        users: Vec<UserEntry>,
    },
    Left {
        accepted: bool,
        users: Vec<UserEntry>,
    },
    NewGame {
        accepted: bool,
        message: String,
    },
    NewRound {
        accepted: bool,
        message: String,
    },
    Move {
        accepted: bool,
        message: String,
    },
    Throw {
        accepted: bool,
        message: String,
        dices: Vec<Vec<u8>>,
        /// Index of the dice board in the game descriptor
        board: usize,
    },
    Update {
        accepted: bool,
        state: StateView,
    },
    Pong {
        accepted: bool,
    },
    List {
        accepted: bool,
        users: Vec<UserEntry>,
    },
    Error {
        accepted: bool,
        response: String,
    },
}

impl ServerMessage {
    pub fn error(response: impl Into<String>) -> Self {
        ServerMessage::Error {
            accepted: false,
            response: response.into(),
        }
    }
}
