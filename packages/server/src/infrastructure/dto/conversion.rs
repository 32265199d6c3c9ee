//! Conversion logic from domain models to DTOs.

use boardroom_shared::time::timestamp_to_jst_rfc3339;

use crate::domain::{Room, SeatEntry};
use crate::infrastructure::dto::{http, websocket};

impl From<SeatEntry> for websocket::UserEntry {
    fn from(entry: SeatEntry) -> Self {
        Self {
            role: entry.role.to_string(),
            client_id: entry.client_id.into_string(),
            connected_at: entry.connected_at.value(),
            host: entry.host,
        }
    }
}

impl From<SeatEntry> for http::UserDetailDto {
    fn from(entry: SeatEntry) -> Self {
        Self {
            role: entry.role.to_string(),
            client_id: entry.client_id.into_string(),
            host: entry.host,
            connected_at: timestamp_to_jst_rfc3339(entry.connected_at.value()),
        }
    }
}

impl From<&Room> for http::RoomSummaryDto {
    fn from(room: &Room) -> Self {
        let entries = room.seats().entries();
        let players = entries
            .iter()
            .filter(|entry| entry.role.viewer_id() != 0)
            .count();
        Self {
            id: room.id().to_string(),
            game: room.game().to_string(),
            players,
            observers: entries.len() - players,
            state: room.round(),
            created_at: timestamp_to_jst_rfc3339(room.created_at().value()),
        }
    }
}

impl From<&Room> for http::RoomDetailDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id().to_string(),
            game: room.game().to_string(),
            state: room.round(),
            score: room.score().to_vec(),
            next_player: room.turn().player,
            users: room.seats().entries().into_iter().map(Into::into).collect(),
            created_at: timestamp_to_jst_rfc3339(room.created_at().value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClientId, ConnectionId, GameKind, Occupant, RoomId, Timestamp};

    fn room_with_users() -> Room {
        let mut room = Room::open(
            RoomId::new("r1".to_string()).unwrap(),
            GameKind::TicTacToe,
            Timestamp::new(0),
        );
        for name in ["alice", "bob", "carol"] {
            room.seats_mut()
                .join(Occupant {
                    client_id: ClientId::new(name.to_string()).unwrap(),
                    connection_id: ConnectionId::generate(),
                    connected_at: Timestamp::new(1000),
                })
                .unwrap();
        }
        room
    }

    #[test]
    fn test_seat_entry_to_user_entry() {
        // テスト項目: 席情報が u<n> / o<n> 形式のユーザー一覧に変換される
        // given (前提条件):
        let room = room_with_users();

        // when (操作):
        let users: Vec<websocket::UserEntry> =
            room.seats().entries().into_iter().map(Into::into).collect();

        // then (期待する結果):
        let roles: Vec<&str> = users.iter().map(|u| u.role.as_str()).collect();
        assert_eq!(roles, vec!["u1", "u2", "o0"]);
        assert!(users[0].host);
        assert!(!users[2].host);
        assert_eq!(users[2].client_id, "carol");
    }

    #[test]
    fn test_room_to_summary_counts_players_and_observers() {
        // テスト項目: ルーム概要にプレイヤー数と観戦者数が入る
        // given (前提条件):
        let room = room_with_users();

        // when (操作):
        let summary = http::RoomSummaryDto::from(&room);

        // then (期待する結果):
        assert_eq!(summary.id, "r1");
        assert_eq!(summary.game, "TicTacToe");
        assert_eq!(summary.players, 2);
        assert_eq!(summary.observers, 1);
        assert_eq!(summary.created_at, "1970-01-01T09:00:00+09:00");
    }
}
