use std::time::Duration;

use friends_common::{AccountId, FriendEvent, RelationshipRecord};
use futures_util::StreamExt;
use reqwest::{Response, StatusCode};
use serde_json::Value;
use tokio::{net::TcpStream, time::timeout};
use tokio_tungstenite::{
    connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream,
};

const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Thin HTTP client for the friends api.
pub struct FriendsClient {
    http: reqwest::Client,
    base: String,
}

impl FriendsClient {
    pub fn new(address: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: format!("http://{address}/friends/api/v1"),
        }
    }

    /// Registers a fresh account and returns its id.
    pub async fn new_account(&self) -> AccountId {
        let account_id = AccountId::generate();
        let res = self.register(&account_id).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        account_id
    }

    pub async fn register(&self, account_id: &AccountId) -> Response {
        self.http
            .put(format!("{}/{account_id}", self.base))
            .send()
            .await
            .expect("Can reach server")
    }

    pub async fn summary_response(&self, account_id: &AccountId) -> Response {
        self.http
            .get(format!("{}/{account_id}/summary", self.base))
            .send()
            .await
            .expect("Can reach server")
    }

    pub async fn summary(&self, account_id: &AccountId) -> RelationshipRecord {
        let res = self.summary_response(account_id).await;
        assert_eq!(res.status(), StatusCode::OK);
        res.json().await.expect("Summary is a relationship record")
    }

    pub async fn add_friend(&self, account_id: &AccountId, friend_id: &AccountId) -> Response {
        self.http
            .post(format!("{}/{account_id}/friends/{friend_id}", self.base))
            .send()
            .await
            .expect("Can reach server")
    }

    pub async fn accept(&self, account_id: &AccountId, friend_id: &AccountId) -> Response {
        self.http
            .post(format!(
                "{}/{account_id}/incoming/{friend_id}/accept",
                self.base
            ))
            .send()
            .await
            .expect("Can reach server")
    }

    pub async fn delete(&self, account_id: &AccountId, friend_id: &AccountId) -> Response {
        self.http
            .delete(format!("{}/{account_id}/friends/{friend_id}", self.base))
            .send()
            .await
            .expect("Can reach server")
    }

    pub async fn block(&self, account_id: &AccountId, friend_id: &AccountId) -> Response {
        self.http
            .post(format!("{}/{account_id}/blocklist/{friend_id}", self.base))
            .send()
            .await
            .expect("Can reach server")
    }
}

/// Reads the `error` code out of a rejected request.
pub async fn error_code(res: Response) -> String {
    let body: Value = res.json().await.expect("Error body is json");
    body["error"]
        .as_str()
        .expect("Error body has a code")
        .to_string()
}

pub struct EventStream {
    socket: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl EventStream {
    pub async fn connect(address: &str, account_id: &AccountId) -> Self {
        let (socket, _) = connect_async(websocket_url(address, account_id))
            .await
            .expect("Can open event stream");
        Self { socket }
    }

    pub async fn next_event(&mut self) -> FriendEvent {
        loop {
            let msg = timeout(EVENT_TIMEOUT, self.socket.next())
                .await
                .expect("Event arrives in time")
                .expect("Stream is open")
                .expect("Can read from stream");
            if let Message::Text(text) = msg {
                return FriendEvent::decode(text.as_str()).expect("Can decode event");
            }
        }
    }

    /// Asserts that no event arrives within `window`.
    pub async fn assert_silent(&mut self, window: Duration) {
        if let Ok(Some(Ok(Message::Text(text)))) = timeout(window, self.socket.next()).await {
            panic!("Unexpected event: {text}");
        }
    }

    pub async fn close(mut self) {
        let _ = self.socket.close(None).await;
    }
}

pub fn websocket_url(address: &str, account_id: &AccountId) -> String {
    format!("ws://{address}/friends/api/v1/{account_id}/websocket")
}
