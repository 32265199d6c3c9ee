//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use boardroom_server::infrastructure::dto::websocket::ServerMessage;
use url::Url;

use crate::{
    command::{Command, HELP},
    error::ClientError,
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

/// How a session ended when no error occurred
enum SessionEnd {
    Quit,
    Lost,
}

/// `{base}/rooms/{room}?client_id={client_id}` with both values percent-encoded
fn build_room_url(base_url: &str, room: &str, client_id: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base_url)?;
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push("rooms").push(room);
    }
    url.query_pairs_mut().append_pair("client_id", client_id);
    Ok(url)
}

/// Run the WebSocket client session for one room
pub async fn run_client_session(url: &str, room: &str, client_id: &str) -> Result<(), ClientError> {
    let url = build_room_url(url, room, client_id)
        .map_err(|e| ClientError::ConnectionError(format!("Invalid server URL: {}", e)))?;

    let (ws_stream, _response) = match connect_async(url.as_str()).await {
        Ok(result) => result,
        Err(tungstenite::Error::Http(response)) => {
            return Err(match response.status().as_u16() {
                409 => ClientError::DuplicateClientId(client_id.to_string()),
                404 => ClientError::RoomNotFound(room.to_string()),
                status => ClientError::ConnectionError(format!("HTTP {}", status)),
            });
        }
        Err(e) => return Err(ClientError::ConnectionError(e.to_string())),
    };

    tracing::info!("Connected to room '{}'", room);
    println!(
        "\nYou are '{}' in room '{}'. Type `help` for commands, `quit` to leave.\n",
        client_id, room
    );

    let (mut write, mut read) = ws_stream.split();

    let client_id_for_read = client_id.to_string();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            let formatted = match message {
                Ok(Message::Text(text)) => match serde_json::from_str::<ServerMessage>(&text) {
                    Ok(message) => {
                        MessageFormatter::format_server_message(&message, &client_id_for_read)
                    }
                    Err(_) => MessageFormatter::format_raw_message(&text),
                },
                Ok(Message::Binary(data)) => MessageFormatter::format_binary_message(data.len()),
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    return SessionEnd::Lost;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return SessionEnd::Lost;
                }
                _ => continue,
            };
            print!("{}", formatted);
            redisplay_prompt(&client_id_for_read);
        }
        SessionEnd::Lost
    });

    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // rustyline は同期 API なので専用スレッドで読む
    let client_id_for_prompt = client_id.to_string();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", client_id_for_prompt);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    // Ctrl+C / Ctrl+D
                    input_tx.send("quit".to_string()).ok();
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    let client_id_for_write = client_id.to_string();
    let mut write_task = tokio::spawn(async move {
        while let Some(line) = input_rx.recv().await {
            let message = match Command::parse(&line) {
                Ok(Command::Send(message)) => message,
                Ok(Command::Help) => {
                    print!("\n{}", HELP);
                    redisplay_prompt(&client_id_for_write);
                    continue;
                }
                Ok(Command::Quit) => {
                    write.send(Message::Close(None)).await.ok();
                    return SessionEnd::Quit;
                }
                Err(e) => {
                    println!("\n{}", e);
                    redisplay_prompt(&client_id_for_write);
                    continue;
                }
            };

            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send message: {}", e);
                return SessionEnd::Lost;
            }
        }
        // 入力スレッドが終了した
        SessionEnd::Quit
    });

    // どちらかのタスクが終わったらもう一方も止める
    let end = tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            read_result.unwrap_or(SessionEnd::Lost)
        }
        write_result = &mut write_task => {
            read_task.abort();
            write_result.unwrap_or(SessionEnd::Lost)
        }
    };

    match end {
        SessionEnd::Quit => Ok(()),
        SessionEnd::Lost => Err(ClientError::ConnectionError(
            "Connection lost".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_room_url() {
        // テスト項目: ルームとクライアント ID が URL に埋め込まれる
        // when (操作):
        let url = build_room_url("ws://127.0.0.1:8080", "r1", "alice").unwrap();

        // then (期待する結果):
        assert_eq!(url.as_str(), "ws://127.0.0.1:8080/rooms/r1?client_id=alice");
    }

    #[test]
    fn test_build_room_url_encodes_values() {
        // テスト項目: 予約文字を含む値はパーセントエンコードされる
        // when (操作):
        let url = build_room_url("ws://127.0.0.1:8080/", "a/b?c", "bob&x=1").unwrap();

        // then (期待する結果):
        assert_eq!(
            url.as_str(),
            "ws://127.0.0.1:8080/rooms/a%2Fb%3Fc?client_id=bob%26x%3D1"
        );
    }

    #[test]
    fn test_build_room_url_rejects_invalid_base() {
        // テスト項目: 不正なサーバー URL はエラーになる
        // when (操作):
        let result = build_room_url("not a url", "r1", "alice");

        // then (期待する結果):
        assert!(result.is_err());
    }
}
