use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_RANGE};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};
use shared_types::{AuthSession, SessionUser};

use super::{parse_content_range, Backend, BackendError, Query, Rows};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const NO_ROWS_CODE: &str = "PGRST116";

/// Connection settings for the hosted backend.
#[derive(Clone)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    /// Read `BACKEND_URL` and `BACKEND_ANON_KEY`, loading `.env` first.
    pub fn from_env() -> Result<Self, BackendError> {
        let _ = dotenvy::dotenv();
        let url = non_empty_var("BACKEND_URL")?;
        let anon_key = non_empty_var("BACKEND_ANON_KEY")?;
        Ok(Self::new(url, anon_key))
    }
}

fn non_empty_var(name: &'static str) -> Result<String, BackendError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(BackendError::NotConfigured(name))
}

/// HTTP implementation of [`Backend`].
#[derive(Clone)]
pub struct RestBackend {
    client: reqwest::Client,
    config: BackendConfig,
    access_token: Option<String>,
}

impl std::fmt::Debug for RestBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestBackend")
            .field("url", &self.config.url)
            .field("user_scoped", &self.access_token.is_some())
            .finish()
    }
}

impl RestBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            access_token: None,
        }
    }

    /// Clone this client so data reads are made as the given user.
    pub fn with_access_token(&self, token: &str) -> Self {
        Self {
            client: self.client.clone(),
            config: self.config.clone(),
            access_token: Some(token.to_string()),
        }
    }

    fn authed(&self, builder: RequestBuilder, bearer: &str) -> RequestBuilder {
        builder
            .header("apikey", &self.config.anon_key)
            .header(AUTHORIZATION, format!("Bearer {bearer}"))
    }

    fn data_bearer(&self) -> &str {
        self.access_token
            .as_deref()
            .unwrap_or(self.config.anon_key.as_str())
    }

    async fn token_grant(&self, grant_type: &str, body: Value) -> Result<AuthSession, BackendError> {
        let url = format!("{}/auth/v1/token?grant_type={grant_type}", self.config.url);
        let response = self
            .authed(self.client.post(&url), &self.config.anon_key)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        let response = ensure_success(response).await?;
        response
            .json::<AuthSession>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }
}

fn transport(err: reqwest::Error) -> BackendError {
    BackendError::Transport(err.to_string())
}

/// Pass through 2xx responses; turn anything else into a `BackendError`.
async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, &body))
}

fn status_error(status: StatusCode, body: &str) -> BackendError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    if status == StatusCode::NOT_ACCEPTABLE {
        let code = parsed
            .as_ref()
            .and_then(|v| v.get("code"))
            .and_then(Value::as_str);
        if code == Some(NO_ROWS_CODE) {
            return BackendError::NoRows;
        }
    }
    let message = parsed
        .as_ref()
        .and_then(|v| {
            ["message", "msg", "error_description", "error"]
                .iter()
                .find_map(|key| v.get(*key).and_then(Value::as_str))
        })
        .map(str::to_string)
        .unwrap_or_else(|| body.chars().take(200).collect());
    BackendError::Status {
        status: status.as_u16(),
        message,
    }
}

impl Backend for RestBackend {
    async fn current_user(&self, access_token: &str) -> Result<Option<SessionUser>, BackendError> {
        let url = format!("{}/auth/v1/user", self.config.url);
        let response = self
            .authed(self.client.get(&url), access_token)
            .send()
            .await
            .map_err(transport)?;
        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }
        let response = ensure_success(response).await?;
        response
            .json::<SessionUser>()
            .await
            .map(Some)
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, BackendError> {
        self.token_grant("password", json!({ "email": email, "password": password }))
            .await
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, BackendError> {
        self.token_grant("refresh_token", json!({ "refresh_token": refresh_token }))
            .await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        let url = format!("{}/auth/v1/logout", self.config.url);
        let response = self
            .authed(self.client.post(&url), access_token)
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response).await.map(|_| ())
    }

    async fn select(&self, query: &Query) -> Result<Rows, BackendError> {
        let url = format!(
            "{}/rest/v1/{}?{}",
            self.config.url,
            query.target().as_str(),
            query.to_query_string()
        );
        let mut request = self.authed(self.client.get(&url), self.data_bearer());
        if query.is_single() {
            request = request.header(ACCEPT, SINGLE_OBJECT);
        }
        if query.wants_count() {
            request = request.header("Prefer", "count=exact");
        }

        let response = request.send().await.map_err(transport)?;
        let response = ensure_success(response).await?;

        let total = if query.wants_count() {
            response
                .headers()
                .get(CONTENT_RANGE)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_content_range)
        } else {
            None
        };

        let body: Value = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        let rows = match body {
            Value::Array(rows) => rows,
            Value::Object(map) if query.is_single() => vec![Value::Object(map)],
            other => {
                return Err(BackendError::Decode(format!(
                    "expected rows, got {}",
                    type_name(&other)
                )))
            }
        };
        tracing::debug!(table = query.target().as_str(), rows = rows.len(), "backend select");
        Ok(Rows { rows, total })
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
