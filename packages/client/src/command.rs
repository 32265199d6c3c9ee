//! Parsing of the lines typed at the prompt.

use boardroom_server::infrastructure::dto::websocket::ClientMessage;

/// One typed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(ClientMessage),
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  move <notation>   e.g. `move a1`, `move b1|s0`, `move m3|m9`
  throw             throw the dice (ManDontGetAngry)
  new [roles...]    host: start a new game, optionally re-seating (`new u2 o0 -`)
  round             host: start a new round
  update            fetch the board
  list              host: list connected users
  ping              check the connection
  help              show this help
  quit              leave the room
";

impl Command {
    /// Parse a trimmed, non-empty input line
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err("Empty command".to_string());
        };
        let rest: Vec<&str> = words.collect();

        let message = match (name, rest.as_slice()) {
            ("move" | "m", [notation]) => ClientMessage::Move {
                notation: notation.to_string(),
                board: None,
            },
            ("move" | "m", _) => return Err("Usage: move <notation>".to_string()),
            ("throw" | "t", []) => ClientMessage::Move {
                notation: "throw".to_string(),
                board: None,
            },
            ("new", roles) => ClientMessage::NewGame {
                // `-` leaves a seat empty
                roles: roles
                    .iter()
                    .map(|role| if *role == "-" { String::new() } else { role.to_string() })
                    .collect(),
            },
            ("round", []) => ClientMessage::NewRound,
            ("update" | "u", []) => ClientMessage::Update,
            ("list", []) => ClientMessage::List,
            ("ping", []) => ClientMessage::Ping,
            ("help" | "?", _) => return Ok(Command::Help),
            ("quit" | "exit" | "q", _) => return Ok(Command::Quit),
            (other, _) => return Err(format!("Unknown command: '{}' (try `help`)", other)),
        };
        Ok(Command::Send(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_moves_and_throw() {
        // テスト項目: move と throw が Move メッセージになる
        // when (操作):
        let cell = Command::parse("move a1");
        let ludo = Command::parse("move m3|m9");
        let throw = Command::parse("throw");

        // then (期待する結果):
        assert_eq!(
            cell,
            Ok(Command::Send(ClientMessage::Move {
                notation: "a1".to_string(),
                board: None
            }))
        );
        assert!(matches!(
            ludo,
            Ok(Command::Send(ClientMessage::Move { ref notation, .. })) if notation == "m3|m9"
        ));
        assert!(matches!(
            throw,
            Ok(Command::Send(ClientMessage::Move { ref notation, .. })) if notation == "throw"
        ));
    }

    #[test]
    fn test_parse_new_game_roles() {
        // テスト項目: new の引数が役割の並びになり、`-` は空席になる
        // when (操作):
        let plain = Command::parse("new");
        let roles = Command::parse("new o0 - u1");

        // then (期待する結果):
        assert_eq!(
            plain,
            Ok(Command::Send(ClientMessage::NewGame { roles: vec![] }))
        );
        assert_eq!(
            roles,
            Ok(Command::Send(ClientMessage::NewGame {
                roles: vec!["o0".to_string(), String::new(), "u1".to_string()]
            }))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_and_malformed() {
        // テスト項目: 未知のコマンドや引数の誤りはエラーになる
        // when / then:
        assert!(Command::parse("dance").is_err());
        assert!(Command::parse("move").is_err());
        assert!(Command::parse("move a1 b2").is_err());
        assert!(Command::parse("round now").is_err());
        assert_eq!(Command::parse("quit"), Ok(Command::Quit));
        assert_eq!(Command::parse("ping"), Ok(Command::Send(ClientMessage::Ping)));
    }
}
