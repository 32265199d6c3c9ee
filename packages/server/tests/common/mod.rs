//! Shared helpers: an in-process server on an ephemeral port plus HTTP and
//! WebSocket test clients.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use boardroom_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher, random::SeededRandom,
        repository::InMemoryRoomRepository,
    },
    ui::{Server, state::AppState},
};
use boardroom_shared::time::SystemClock;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(3);

/// Server running inside the test runtime
pub struct TestServer {
    addr: SocketAddr,
    http: reqwest::Client,
}

impl TestServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind ephemeral port");
        let addr = listener.local_addr().expect("Failed to read local address");

        let state = AppState::new(
            Arc::new(InMemoryRoomRepository::new()),
            Arc::new(WebSocketMessagePusher::new()),
            Arc::new(SeededRandom::new(42)),
            Arc::new(SystemClock),
        );
        tokio::spawn(async move {
            if let Err(e) = Server::new(state).serve(listener).await {
                eprintln!("test server stopped: {}", e);
            }
        });

        Self {
            addr,
            http: reqwest::Client::new(),
        }
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn ws_url(&self, room: &str, client_id: &str) -> String {
        format!("ws://{}/rooms/{}?client_id={}", self.addr, room, client_id)
    }

    /// POST a JSON body and return the JSON answer
    pub async fn post(&self, path: &str, body: Value) -> Value {
        self.http
            .post(self.http_url(path))
            .json(&body)
            .send()
            .await
            .expect("HTTP request failed")
            .json()
            .await
            .expect("Response is not JSON")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.http
            .get(self.http_url(path))
            .send()
            .await
            .expect("HTTP request failed")
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Open `room` for `game` and start a game with the minimum players
    pub async fn open_and_start(&self, game: &str, room: &str) {
        let opened = self
            .post(&format!("/{}/Open", game), serde_json::json!({"room": room}))
            .await;
        assert_eq!(opened["accepted"], true, "{opened}");
        let started = self
            .post(&format!("/{}/NewGame", game), serde_json::json!({"room": room}))
            .await;
        assert_eq!(started["accepted"], true, "{started}");
    }
}

/// WebSocket lobby client
pub struct TestSocket {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestSocket {
    pub async fn connect(server: &TestServer, room: &str, client_id: &str) -> Self {
        let (stream, _) = tokio_tungstenite::connect_async(server.ws_url(room, client_id))
            .await
            .expect("WebSocket connection failed");
        Self { stream }
    }

    pub async fn send(&mut self, message: Value) {
        self.stream
            .send(Message::Text(message.to_string().into()))
            .await
            .expect("Failed to send");
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.stream
            .send(Message::Text(text.to_string().into()))
            .await
            .expect("Failed to send");
    }

    /// Next JSON text frame
    pub async fn recv(&mut self) -> Value {
        loop {
            let frame = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("Timed out waiting for a message")
                .expect("Stream ended")
                .expect("WebSocket error");
            if let Message::Text(text) = frame {
                return serde_json::from_str(text.as_str()).expect("Message is not JSON");
            }
        }
    }

    /// Skip messages until one with `action` arrives
    pub async fn recv_action(&mut self, action: &str) -> Value {
        loop {
            let message = self.recv().await;
            if message["action"] == action {
                return message;
            }
        }
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
