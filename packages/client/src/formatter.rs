//! Message formatting utilities for client display.

use boardroom_server::{
    domain::{NextMove, RoundState, StateView},
    infrastructure::dto::websocket::{ServerMessage, UserEntry},
};
use boardroom_shared::time::timestamp_to_jst_clock;

const RULE: &str = "============================================================";
const COLUMN_LABELS: &str = "abcdefghi";
const LUDO_TRACK: usize = 40;
const LUDO_SEATS: usize = 4;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Render any server message; `me` marks the current client in user lists.
    pub fn format_server_message(message: &ServerMessage, me: &str) -> String {
        match message {
            ServerMessage::GetRole {
                response,
                description,
                ..
            } => Self::format_role(response, description),
            ServerMessage::RoomHost { game, room, .. } => Self::format_host(game, room),
            ServerMessage::Joined { users, .. } => Self::format_users("Users", users, me),
            ServerMessage::Left { users, .. } => Self::format_users("Someone left. Users", users, me),
            ServerMessage::List { users, .. } => Self::format_users("Connected users", users, me),
            ServerMessage::NewGame { accepted, message }
            | ServerMessage::NewRound { accepted, message }
            | ServerMessage::Move { accepted, message } => Self::format_reply(*accepted, message),
            ServerMessage::Throw { message, dices, .. } => Self::format_throw(message, dices),
            ServerMessage::Update { state, .. } => Self::format_board(state),
            ServerMessage::Pong { .. } => "\npong\n".to_string(),
            ServerMessage::Error { response, .. } => format!("\n! {}\n", response),
        }
    }

    pub fn format_role(response: &str, description: &str) -> String {
        format!("\nYour role: {} ({})\n", response, description)
    }

    pub fn format_host(game: &str, room: &str) -> String {
        format!("\n* You host room '{}' ({})\n", room, game)
    }

    /// Format a user list, marking the host and the current client
    pub fn format_users(title: &str, users: &[UserEntry], me: &str) -> String {
        let mut output = format!("\n{}\n{}:\n", RULE, title);
        if users.is_empty() {
            output.push_str("(No users)\n");
        }
        for user in users {
            let me_suffix = if user.client_id == me { " (me)" } else { "" };
            let host_suffix = if user.host { " [host]" } else { "" };
            output.push_str(&format!(
                "{:>3} {}{}{} - since {}\n",
                user.role,
                user.client_id,
                me_suffix,
                host_suffix,
                timestamp_to_jst_clock(user.connected_at)
            ));
        }
        output.push_str(RULE);
        output.push('\n');
        output
    }

    pub fn format_reply(accepted: bool, message: &str) -> String {
        if accepted {
            format!("\n{}\n", message)
        } else {
            format!("\nRejected: {}\n", message)
        }
    }

    /// The last face of each die is its result
    pub fn format_throw(message: &str, dices: &[Vec<u8>]) -> String {
        let results: Vec<String> = dices
            .iter()
            .filter_map(|faces| faces.last())
            .map(u8::to_string)
            .collect();
        format!("\n{}: rolled {}\n", message, results.join(", "))
    }

    /// Render the board(s) and the round summary
    pub fn format_board(state: &StateView) -> String {
        let mut output = String::from("\n");
        if let Some(board) = &state.board {
            output.push_str(&Self::format_cells(board));
        }
        if let Some(layers) = &state.boards {
            for (index, layer) in layers.iter().enumerate() {
                output.push_str(&format!("Board {}:\n", index + 1));
                output.push_str(&Self::format_cells(layer));
            }
        }
        output.push_str(&Self::format_summary(state));
        output
    }

    fn format_cells(cells: &[u8]) -> String {
        match cells.len() {
            9 => Self::format_grid(cells, 3),
            64 => Self::format_grid(cells, 8),
            81 => Self::format_grid(cells, 9),
            n if n == LUDO_TRACK + 2 * LUDO_SEATS * 4 => Self::format_ludo(cells),
            _ => format!("{:?}\n", cells),
        }
    }

    /// Row `1` first, columns labelled `a`, `b`, ...
    fn format_grid(cells: &[u8], width: usize) -> String {
        let mut output = String::from("   ");
        for label in COLUMN_LABELS.chars().take(width) {
            output.push(' ');
            output.push(label);
        }
        output.push('\n');
        for (row, line) in cells.chunks(width).enumerate() {
            output.push_str(&format!("{:>2} ", row + 1));
            for &cell in line {
                output.push(' ');
                output.push(cell_symbol(cell));
            }
            output.push('\n');
        }
        output
    }

    fn format_ludo(cells: &[u8]) -> String {
        let (track, rest) = cells.split_at(LUDO_TRACK);
        let (bases, finishes) = rest.split_at(LUDO_SEATS * 4);
        let mut output = String::from("track:");
        for (square, chunk) in track.chunks(10).enumerate() {
            output.push_str(&format!("\n  {:>2}..{:>2} ", square * 10, square * 10 + 9));
            output.extend(chunk.iter().map(|&cell| cell_symbol(cell)));
        }
        output.push('\n');
        for seat in 0..LUDO_SEATS {
            let base: String = bases[seat * 4..seat * 4 + 4]
                .iter()
                .map(|&c| cell_symbol(c))
                .collect();
            let finish: String = finishes[seat * 4..seat * 4 + 4]
                .iter()
                .map(|&c| cell_symbol(c))
                .collect();
            output.push_str(&format!(
                "player {}: base [{}] finish [{}]\n",
                seat + 1,
                base,
                finish
            ));
        }
        output
    }

    fn format_summary(state: &StateView) -> String {
        let round = match state.state {
            RoundState::Inactive => "not started".to_string(),
            RoundState::Active => "in progress".to_string(),
            RoundState::Won(player) => format!("player {} won", player),
            RoundState::Draw => "draw".to_string(),
        };
        let next = match state.next_move {
            NextMove::Choice => "pick a cell",
            NextMove::Throw => "throw",
            NextMove::Move => "move a pawn",
        };
        let mut output = format!(
            "score {:?} | {} | next: player {} ({})",
            state.score, round, state.next_player, next
        );
        if let Some(rolled) = state.rolled {
            output.push_str(&format!(" | rolled {}", rolled));
        }
        output.push('\n');
        output
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}

fn cell_symbol(cell: u8) -> char {
    match cell {
        0 => '.',
        n => char::from_digit(u32::from(n), 36).unwrap_or('?'),
    }
}
