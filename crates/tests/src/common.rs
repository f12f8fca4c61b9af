use axum::{
    body::Body,
    extract::{Path, Query, RawQuery, State},
    http::{header, HeaderMap, Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get as route_get, post},
    Json, Router,
};
use serde_json::{json, Value};
use server::backend::{AnyBackend, BackendConfig, MemoryBackend, RestBackend};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const ANON_KEY: &str = "test-anon-key";

/// One request as the fake backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub query: String,
    pub apikey: Option<String>,
    pub bearer: Option<String>,
}

#[derive(Default)]
struct FakeState {
    tables: HashMap<String, Vec<Value>>,
    failing: HashSet<String>,
    users: Vec<(String, String, String)>,
    access: HashMap<String, String>,
    refresh: HashMap<String, String>,
    requests: Vec<Recorded>,
    next_token: u64,
    page_size: Option<usize>,
}

/// Loopback stand-in for the hosted backend: GoTrue-style auth under
/// `/auth/v1` and a PostgREST-style read API under `/rest/v1`.
#[derive(Clone, Default)]
pub struct FakeBaas {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBaas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, table: &str, rows: impl IntoIterator<Item = Value>) -> Self {
        self.state
            .lock()
            .unwrap()
            .tables
            .entry(table.to_string())
            .or_default()
            .extend(rows);
        self
    }

    pub fn with_user(self, id: &str, email: &str, password: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .users
            .push((id.to_string(), email.to_string(), password.to_string()));
        self
    }

    /// Return at most `n` rows per select while still reporting the full total.
    pub fn with_page_size(self, n: usize) -> Self {
        self.state.lock().unwrap().page_size = Some(n);
        self
    }

    pub fn fail_table(&self, table: &str) {
        self.state.lock().unwrap().failing.insert(table.to_string());
    }

    /// Mint a token pair for a known user, bypassing sign-in.
    pub fn issue(&self, user_id: &str) -> (String, String) {
        let mut state = self.state.lock().unwrap();
        mint(&mut state, user_id)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, prefix: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.starts_with(prefix))
            .collect()
    }

    /// Serve on an ephemeral loopback port and return the base URL.
    pub async fn spawn(&self) -> String {
        let router = Router::new()
            .route("/auth/v1/user", route_get(auth_user))
            .route("/auth/v1/token", post(auth_token))
            .route("/auth/v1/logout", post(auth_logout))
            .route("/rest/v1/{table}", route_get(rest_select))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// A `RestBackend` pointed at a freshly spawned instance of this fake.
    pub async fn rest_backend(&self) -> RestBackend {
        let url = self.spawn().await;
        RestBackend::new(BackendConfig::new(url, ANON_KEY))
    }

    fn record(&self, path: String, query: String, headers: &HeaderMap) {
        let apikey = headers
            .get("apikey")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bearer = bearer(headers);
        self.state.lock().unwrap().requests.push(Recorded {
            path,
            query,
            apikey,
            bearer,
        });
    }
}

fn mint(state: &mut FakeState, user_id: &str) -> (String, String) {
    state.next_token += 1;
    let access = format!("fake-access-{}", state.next_token);
    let refresh = format!("fake-refresh-{}", state.next_token);
    state.access.insert(access.clone(), user_id.to_string());
    state.refresh.insert(refresh.clone(), user_id.to_string());
    (access, refresh)
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn session_body(state: &mut FakeState, user_id: &str) -> Value {
    let email = state
        .users
        .iter()
        .find(|(id, _, _)| id == user_id)
        .map(|(_, email, _)| email.clone());
    let (access, refresh) = mint(state, user_id);
    json!({
        "access_token": access,
        "refresh_token": refresh,
        "token_type": "bearer",
        "expires_in": 3600,
        "user": { "id": user_id, "email": email }
    })
}

async fn auth_user(State(fake): State<FakeBaas>, headers: HeaderMap) -> Response {
    fake.record("/auth/v1/user".into(), String::new(), &headers);
    let state = fake.state.lock().unwrap();
    let user = bearer(&headers)
        .and_then(|t| state.access.get(&t).cloned())
        .and_then(|id| state.users.iter().find(|(uid, _, _)| *uid == id).cloned());
    match user {
        Some((id, email, _)) => Json(json!({ "id": id, "email": email })).into_response(),
        None => (StatusCode::UNAUTHORIZED, Json(json!({ "msg": "invalid JWT" }))).into_response(),
    }
}

async fn auth_token(
    State(fake): State<FakeBaas>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let grant = params.get("grant_type").cloned().unwrap_or_default();
    fake.record("/auth/v1/token".into(), format!("grant_type={grant}"), &headers);
    let mut state = fake.state.lock().unwrap();

    let user_id = match grant.as_str() {
        "password" => {
            let email = body["email"].as_str().unwrap_or_default();
            let password = body["password"].as_str().unwrap_or_default();
            state
                .users
                .iter()
                .find(|(_, e, p)| e == email && p == password)
                .map(|(id, _, _)| id.clone())
        }
        "refresh_token" => {
            let token = body["refresh_token"].as_str().unwrap_or_default();
            state.refresh.remove(token)
        }
        _ => None,
    };

    match user_id {
        Some(id) => Json(session_body(&mut state, &id)).into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials"
            })),
        )
            .into_response(),
    }
}

async fn auth_logout(State(fake): State<FakeBaas>, headers: HeaderMap) -> Response {
    fake.record("/auth/v1/logout".into(), String::new(), &headers);
    let mut state = fake.state.lock().unwrap();
    match bearer(&headers).and_then(|t| state.access.remove(&t)) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => (StatusCode::UNAUTHORIZED, Json(json!({ "msg": "invalid JWT" }))).into_response(),
    }
}

fn cell_matches(cell: Option<&Value>, expected: &str) -> bool {
    match cell {
        Some(Value::String(s)) => s == expected,
        Some(Value::Null) | None => expected == "null",
        Some(other) => other.to_string() == expected,
    }
}

async fn rest_select(
    State(fake): State<FakeBaas>,
    Path(table): Path<String>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Response {
    let raw = raw.unwrap_or_default();
    fake.record(format!("/rest/v1/{table}"), raw.clone(), &headers);
    let state = fake.state.lock().unwrap();

    if state.failing.contains(&table) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "relation is unavailable" })),
        )
            .into_response();
    }

    let filters: Vec<(String, String)> = raw
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, _)| *key != "select")
        .filter_map(|(key, value)| {
            let value = urlencoding::decode(value).ok()?;
            let expected = value.strip_prefix("eq.")?.to_string();
            Some((urlencoding::decode(key).ok()?.into_owned(), expected))
        })
        .collect();

    let matched: Vec<Value> = state
        .tables
        .get(&table)
        .map(|rows| {
            rows.iter()
                .filter(|row| filters.iter().all(|(col, val)| cell_matches(row.get(col), val)))
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    let single = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("vnd.pgrst.object"));
    if single {
        if matched.len() != 1 {
            return (
                StatusCode::NOT_ACCEPTABLE,
                Json(json!({
                    "code": "PGRST116",
                    "details": format!("The result contains {} rows", matched.len()),
                    "message": "JSON object requested, multiple (or no) rows returned"
                })),
            )
                .into_response();
        }
        return Json(matched[0].clone()).into_response();
    }

    let total = matched.len();
    let page: Vec<Value> = match state.page_size {
        Some(n) => matched.into_iter().take(n).collect(),
        None => matched,
    };

    let wants_count = headers
        .get("prefer")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("count=exact"));
    let mut response = Json(Value::Array(page.clone())).into_response();
    if wants_count {
        let range = if page.is_empty() {
            format!("*/{total}")
        } else {
            format!("0-{}/{total}", page.len() - 1)
        };
        response
            .headers_mut()
            .insert(header::CONTENT_RANGE, range.parse().unwrap());
    }
    response
}

/// The REST surface over the given backend, behind the session middleware.
pub fn api_app(backend: AnyBackend) -> Router {
    server::openapi::api_router(backend.clone()).layer(middleware::from_fn_with_state(
        backend,
        server::auth::middleware::session_middleware,
    ))
}

/// The REST surface over an in-memory backend; the handle stays inspectable.
pub fn memory_app(backend: MemoryBackend) -> (Router, Arc<MemoryBackend>) {
    let backend = Arc::new(backend);
    let app = api_app(AnyBackend::Memory(backend.clone()));
    (app, backend)
}

/// GET a route, optionally with a `Cookie` header.
pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

/// GET a route with a bearer token.
pub async fn get_bearer(app: &Router, uri: &str, token: &str) -> (StatusCode, HeaderMap, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, headers, value)
}

/// Every `Set-Cookie` value on a response.
pub fn set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}
