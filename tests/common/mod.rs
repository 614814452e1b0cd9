// tests/common/mod.rs — Scripted in-process backend for integration tests
//
// Each (method, path) pair gets a queue of replies. Replies are served in
// order; the last one repeats. Every request is recorded for assertions.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use heyme::auth::{AuthService, CookieJar, MemoryStorage, TokenStore};
use heyme::client::ApiClient;
use heyme::session::SessionContext;

#[derive(Clone, Debug)]
pub enum Reply {
    Json(u16, Value),
    Text(u16, String),
    NoContent,
}

#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub accept: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Default)]
pub struct MockState {
    routes: Mutex<HashMap<(String, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<Recorded>>,
}

pub struct MockBackend {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Queue a reply for `method path`.
    pub fn on(&self, method: &str, path: &str, reply: Reply) -> &Self {
        self.state
            .routes
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests_to(method, path).len()
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let recorded = Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        accept: header("accept"),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body,
    };
    state.requests.lock().unwrap().push(recorded);

    let reply = {
        let mut routes = state.routes.lock().unwrap();
        let key = (method.to_string(), uri.path().to_string());
        match routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        }
    };

    match reply {
        Some(Reply::Json(status, value)) => (code(status), Json(value)).into_response(),
        Some(Reply::Text(status, text)) => (code(status), text).into_response(),
        Some(Reply::NoContent) => StatusCode::NO_CONTENT.into_response(),
        None => (StatusCode::NOT_FOUND, format!("no route for {method} {uri}")).into_response(),
    }
}

fn code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap()
}

/// Token store whose layers the test can inspect directly.
pub struct Stores {
    pub tokens: TokenStore,
    pub durable: Arc<MemoryStorage>,
    pub cookies: CookieJar,
}

pub fn stores() -> Stores {
    let durable = Arc::new(MemoryStorage::new());
    let cookies = CookieJar::new(Arc::new(MemoryStorage::new()));
    let tokens = TokenStore::new(durable.clone(), cookies.clone(), 7);
    Stores {
        tokens,
        durable,
        cookies,
    }
}

pub fn client(mock: &MockBackend, tokens: TokenStore) -> ApiClient {
    ApiClient::new(mock.base_url.clone(), tokens)
}

/// A session whose navigator never leaves the process.
pub fn session(mock: &MockBackend, tokens: TokenStore) -> SessionContext {
    let auth = AuthService::with_navigator(client(mock, tokens), Arc::new(NoopNavigator));
    SessionContext::new(auth)
}

pub struct NoopNavigator;

impl heyme::auth::oauth::Navigator for NoopNavigator {
    fn navigate(&self, _url: &str) {}
}

pub fn user_json(id: &str, email: &str) -> Value {
    serde_json::json!({
        "id": id,
        "email": email,
        "name": "Test User",
        "provider": "local",
        "created_at": "2025-11-02T09:00:00+00:00"
    })
}

pub fn doc_json(id: &str, group_id: Option<&str>, status: &str) -> Value {
    serde_json::json!({
        "id": id,
        "title": format!("{id} title"),
        "original_file_name": format!("{id}.pdf"),
        "mime_type": "application/pdf",
        "size": 2048,
        "status": status,
        "group_id": group_id,
        "created_at": "2025-11-02T09:00:00+00:00"
    })
}

pub fn group_json(id: &str, name: &str) -> Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "description": null,
        "persona_prompt": null,
        "created_at": "2025-11-02T09:00:00+00:00",
        "updated_at": "2025-11-02T09:00:00+00:00"
    })
}
