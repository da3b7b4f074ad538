//! Shared fixtures for session manager tests

#![allow(dead_code)]

use ara_frontend_common::{
    MemorySessionStore, Navigator, Role, Session, SessionConfig, SessionManager, SessionStore,
    SessionVault, StoreError, UserId, UserRecord,
};
use serde_json::{Map, Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Records redirects and notices instead of touching a page
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    redirects: Mutex<Vec<String>>,
    notices: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, location: &str) {
        self.redirects.lock().unwrap().push(location.to_string());
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }
}

/// Storage that cannot be reached at all
pub struct UnavailableStore;

impl SessionStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("localStorage is disabled".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("localStorage is disabled".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("localStorage is disabled".into()))
    }
}

pub struct Harness {
    pub manager: SessionManager,
    pub store: Arc<MemorySessionStore>,
    pub navigator: Arc<RecordingNavigator>,
}

impl Harness {
    pub fn new(api_base_url: &str) -> Self {
        Self::with_interval(api_base_url, Duration::from_secs(60))
    }

    pub fn with_interval(api_base_url: &str, refresh_interval: Duration) -> Self {
        let store = Arc::new(MemorySessionStore::new());
        let navigator = Arc::new(RecordingNavigator::default());
        let config = SessionConfig::default()
            .with_api_base_url(api_base_url)
            .with_refresh_interval(refresh_interval);
        let manager = SessionManager::new(config, store.clone(), navigator.clone()).unwrap();
        Self {
            manager,
            store,
            navigator,
        }
    }

    /// Persist a session directly, as a previous page would have
    pub fn sign_in_as(&self, role: Role) -> Session {
        let session = session(role);
        SessionVault::new(self.store.clone()).persist(&session).unwrap();
        session
    }
}

pub fn user_json(role: &str) -> Value {
    json!({
        "id": 7,
        "username": "jdoe",
        "email": "jdoe@example.com",
        "role": role,
        "first_name": "Jane",
        "profile": { "school": { "name": "North Elementary" }, "children": [11, 12] }
    })
}

pub fn user(role: Role) -> UserRecord {
    UserRecord {
        id: UserId::Number(7),
        username: Some("jdoe".to_string()),
        email: Some("jdoe@example.com".to_string()),
        role,
        display_name: None,
        extra: Map::new(),
    }
}

pub fn session(role: Role) -> Session {
    Session {
        access_token: "access-1".to_string(),
        refresh_token: "refresh-1".to_string(),
        user: user(role),
    }
}

pub fn login_body(role: &str) -> Value {
    json!({ "access": "access-1", "refresh": "refresh-1", "user": user_json(role) })
}

/// Base URL of a one-shot server that answers 200 with a body cut short
pub async fn truncated_body_server() -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 200\r\n\r\n[{\"id\":",
            )
            .await
            .unwrap();
        socket.flush().await.unwrap();
    });
    format!("http://{addr}")
}
