//! Axum-based mock of the auth extension, its EdgeQL endpoint and the
//! Google and GitHub APIs, bound to an ephemeral port per test.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde_json::{Value, json};
use sha2::{Digest, Sha256};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};
use uuid::Uuid;

use super::fixtures::{AUTH_TOKEN, PROVIDER_TOKEN, VALID_CODE, identity_id};

pub struct MockUpstream {
    pub base_url: String,
    pub state: MockState,
}

#[derive(Clone)]
pub struct MockState {
    base_url: String,
    /// Path of every request received, in order
    hits: Arc<Mutex<Vec<String>>>,
    expected_challenge: Arc<Mutex<Option<String>>>,
    token_failure: Arc<Mutex<Option<(StatusCode, String)>>>,
    token_delay: Arc<Mutex<Option<Duration>>>,
    google_userinfo: Arc<Mutex<Value>>,
    google_userinfo_status: Arc<Mutex<StatusCode>>,
    github_user: Arc<Mutex<Value>>,
    github_emails: Arc<Mutex<Value>>,
    edgeql: Arc<Mutex<EdgeqlState>>,
}

#[derive(Default)]
struct EdgeqlState {
    /// identity id -> (issuer, client token allowed to see it)
    identities: HashMap<Uuid, (String, String)>,
    /// identity id -> user id
    users: HashMap<Uuid, Uuid>,
    requests: Vec<Value>,
}

impl MockState {
    fn new(base_url: String) -> Self {
        Self {
            base_url,
            hits: Arc::default(),
            expected_challenge: Arc::default(),
            token_failure: Arc::default(),
            token_delay: Arc::default(),
            google_userinfo: Arc::new(Mutex::new(json!({
                "sub": "1234567890",
                "email": "g@example.com",
                "email_verified": true,
                "name": "G User",
                "picture": "http://g.example/p.jpg"
            }))),
            google_userinfo_status: Arc::new(Mutex::new(StatusCode::OK)),
            github_user: Arc::new(Mutex::new(json!({
                "login": "ab",
                "id": 42,
                "name": "A B",
                "email": "a@b.com",
                "avatar_url": "http://x"
            }))),
            github_emails: Arc::new(Mutex::new(json!([]))),
            edgeql: Arc::default(),
        }
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    pub fn hit_count(&self, prefix: &str) -> usize {
        self.hits().iter().filter(|p| p.starts_with(prefix)).count()
    }

    pub fn expect_challenge(&self, challenge: &str) {
        *self.expected_challenge.lock().unwrap() = Some(challenge.to_string());
    }

    pub fn fail_token(&self, status: StatusCode, body: &str) {
        *self.token_failure.lock().unwrap() = Some((status, body.to_string()));
    }

    pub fn delay_token(&self, delay: Duration) {
        *self.token_delay.lock().unwrap() = Some(delay);
    }

    pub fn set_google_userinfo_status(&self, status: StatusCode) {
        *self.google_userinfo_status.lock().unwrap() = status;
    }

    pub fn set_github_user(&self, user: Value) {
        *self.github_user.lock().unwrap() = user;
    }

    pub fn set_github_emails(&self, emails: Value) {
        *self.github_emails.lock().unwrap() = emails;
    }

    pub fn register_edgeql_identity(&self, id: Uuid, issuer: &str, client_token: &str) {
        self.edgeql
            .lock()
            .unwrap()
            .identities
            .insert(id, (issuer.to_string(), client_token.to_string()));
    }

    pub fn edgeql_user_count(&self) -> usize {
        self.edgeql.lock().unwrap().users.len()
    }

    pub fn edgeql_requests(&self) -> Vec<Value> {
        self.edgeql.lock().unwrap().requests.clone()
    }

    fn record(&self, path: &str) {
        self.hits.lock().unwrap().push(path.to_string());
    }
}

pub async fn spawn_mock_upstream() -> MockUpstream {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock upstream");
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let state = MockState::new(base_url.clone());

    let app = Router::new()
        .route("/ext/auth/token", get(token))
        .route("/google/.well-known/openid-configuration", get(google_discovery))
        .route("/google/userinfo", get(google_userinfo))
        .route("/github/user", get(github_user))
        .route("/github/user/emails", get(github_emails))
        .route("/branch/main/edgeql", post(edgeql))
        .with_state(state.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock upstream failed");
    });

    MockUpstream { base_url, state }
}

fn has_bearer(headers: &HeaderMap, token: &str) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {token}"))
}

async fn token(State(state): State<MockState>, Query(q): Query<HashMap<String, String>>) -> Response {
    state.record("/ext/auth/token");

    let delay = *state.token_delay.lock().unwrap();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let failure = state.token_failure.lock().unwrap().clone();
    if let Some((status, body)) = failure {
        return (status, body).into_response();
    }

    if q.get("code").map(String::as_str) != Some(VALID_CODE) {
        return (StatusCode::BAD_REQUEST, "invalid code").into_response();
    }
    let Some(verifier) = q.get("verifier") else {
        return (StatusCode::BAD_REQUEST, "missing verifier").into_response();
    };

    let expected = state.expected_challenge.lock().unwrap().clone();
    if let Some(expected) = expected {
        let challenge = URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()));
        if challenge != expected {
            return (StatusCode::FORBIDDEN, "challenge mismatch").into_response();
        }
    }

    Json(json!({
        "auth_token": AUTH_TOKEN,
        "identity_id": identity_id(),
        "provider_token": PROVIDER_TOKEN,
    }))
    .into_response()
}

async fn google_discovery(State(state): State<MockState>) -> Json<Value> {
    state.record("/google/.well-known/openid-configuration");
    Json(json!({
        "issuer": "https://accounts.google.com",
        "userinfo_endpoint": format!("{}/google/userinfo", state.base_url),
        "token_endpoint": format!("{}/google/token", state.base_url),
    }))
}

async fn google_userinfo(State(state): State<MockState>, headers: HeaderMap) -> Response {
    state.record("/google/userinfo");
    if !has_bearer(&headers, PROVIDER_TOKEN) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let status = *state.google_userinfo_status.lock().unwrap();
    if status != StatusCode::OK {
        return status.into_response();
    }
    Json(state.google_userinfo.lock().unwrap().clone()).into_response()
}

fn github_headers_ok(headers: &HeaderMap) -> bool {
    has_bearer(headers, PROVIDER_TOKEN)
        && headers.get("accept").and_then(|v| v.to_str().ok())
            == Some("application/vnd.github+json")
        && headers
            .get("x-github-api-version")
            .and_then(|v| v.to_str().ok())
            == Some("2022-11-28")
        && headers.contains_key("user-agent")
}

async fn github_user(State(state): State<MockState>, headers: HeaderMap) -> Response {
    state.record("/github/user");
    if !github_headers_ok(&headers) {
        return (StatusCode::FORBIDDEN, "bad headers").into_response();
    }
    Json(state.github_user.lock().unwrap().clone()).into_response()
}

async fn github_emails(State(state): State<MockState>, headers: HeaderMap) -> Response {
    state.record("/github/user/emails");
    if !github_headers_ok(&headers) {
        return (StatusCode::FORBIDDEN, "bad headers").into_response();
    }
    Json(state.github_emails.lock().unwrap().clone()).into_response()
}

async fn edgeql(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    state.record("/branch/main/edgeql");

    let mut db = state.edgeql.lock().unwrap();
    db.requests.push(body.clone());

    let token = body["globals"]["ext::auth::client_token"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    let query = body["query"].as_str().unwrap_or_default();
    let Some(id) = body["variables"]["identity_id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": {"message": "missing identity_id", "type": "QueryError"}})),
        )
            .into_response();
    };

    let visible = db
        .identities
        .get(&id)
        .filter(|(_, allowed)| *allowed == token)
        .map(|(issuer, _)| issuer.clone());

    if query.contains("insert User") {
        if visible.is_none() {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": {
                    "message": "missing value for required link 'identity'",
                    "type": "MissingRequiredError",
                    "code": 84017154
                }})),
            )
                .into_response();
        }
        if db.users.contains_key(&id) {
            return Json(json!({"data": []})).into_response();
        }
        let user_id = Uuid::new_v4();
        db.users.insert(id, user_id);
        return Json(json!({"data": [{"id": user_id}]})).into_response();
    }

    if query.contains("select ext::auth::Identity") {
        let data = match visible {
            Some(issuer) => json!([{"id": id, "issuer": issuer}]),
            None => json!([]),
        };
        return Json(json!({ "data": data })).into_response();
    }

    if query.contains("select User") {
        let data = match (visible, db.users.get(&id)) {
            (Some(_), Some(user_id)) => json!([{"id": user_id}]),
            _ => json!([]),
        };
        return Json(json!({ "data": data })).into_response();
    }

    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": {"message": "unexpected query", "type": "QueryError"}})),
    )
        .into_response()
}
