//! Client for the hosted backend: GoTrue-style auth endpoints plus a
//! PostgREST-style read API over the platform tables.

pub mod memory;
pub mod rest;

use serde::de::DeserializeOwned;
use serde_json::Value;
use shared_types::{AuthSession, SessionUser};
use std::future::Future;
use std::sync::{Arc, OnceLock};

pub use memory::MemoryBackend;
pub use rest::{BackendConfig, RestBackend};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BackendError {
    #[error("backend unreachable: {0}")]
    Transport(String),
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("query matched no rows")]
    NoRows,
    #[error("unexpected backend payload: {0}")]
    Decode(String),
    #[error("backend not configured: {0} is not set")]
    NotConfigured(&'static str),
}

impl BackendError {
    /// True for rejections of the caller's credentials or token.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, BackendError::Status { status, .. } if matches!(status, 400 | 401 | 403 | 422))
    }
}

/// Tables the application reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Profiles,
    Modules,
    UserProgress,
    MentorshipMatches,
    Curriculums,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Profiles => "profiles",
            Table::Modules => "modules",
            Table::UserProgress => "user_progress",
            Table::MentorshipMatches => "mentorship_matches",
            Table::Curriculums => "curriculums",
        }
    }
}

/// A read against one table.
///
/// ```ignore
/// Query::table(Table::Profiles).select("role").eq("id", &user.id).single()
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    table: Table,
    columns: String,
    filters: Vec<(String, String)>,
    single: bool,
    count_exact: bool,
}

impl Query {
    pub fn table(table: Table) -> Self {
        Self {
            table,
            columns: "*".to_string(),
            filters: Vec::new(),
            single: false,
            count_exact: false,
        }
    }

    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((column.into(), value.to_string()));
        self
    }

    /// Expect exactly one row; zero or several yield `BackendError::NoRows`.
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    pub fn count_exact(mut self) -> Self {
        self.count_exact = true;
        self
    }

    pub fn target(&self) -> Table {
        self.table
    }

    pub fn columns(&self) -> &str {
        &self.columns
    }

    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    pub fn is_single(&self) -> bool {
        self.single
    }

    pub fn wants_count(&self) -> bool {
        self.count_exact
    }

    /// Percent-encoded query string, e.g. `select=role&id=eq.abc`.
    pub fn to_query_string(&self) -> String {
        let mut parts = vec![format!("select={}", urlencoding::encode(&self.columns))];
        for (column, value) in &self.filters {
            parts.push(format!(
                "{}=eq.{}",
                urlencoding::encode(column),
                urlencoding::encode(value)
            ));
        }
        parts.join("&")
    }
}

/// Rows returned by a select, plus the exact total when one was requested.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rows {
    pub rows: Vec<Value>,
    pub total: Option<u64>,
}

impl Rows {
    pub fn len_or_total(&self) -> u64 {
        self.total.unwrap_or(self.rows.len() as u64)
    }

    pub fn decode<T: DeserializeOwned>(self) -> Result<Vec<T>, BackendError> {
        self.rows
            .into_iter()
            .map(|row| serde_json::from_value(row).map_err(|e| BackendError::Decode(e.to_string())))
            .collect()
    }

    /// Decode row by row, dropping rows that do not fit `T`.
    pub fn decode_lossy<T: DeserializeOwned>(self) -> Vec<T> {
        self.rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value(row) {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping undecodable row");
                    None
                }
            })
            .collect()
    }

    pub fn decode_first<T: DeserializeOwned>(self) -> Result<Option<T>, BackendError> {
        Ok(self.decode()?.into_iter().next())
    }
}

/// Total from a `Content-Range` header: `0-9/42` and `*/0` both carry one,
/// `0-9/*` does not.
pub fn parse_content_range(header: &str) -> Option<u64> {
    let (_, total) = header.trim().rsplit_once('/')?;
    total.parse().ok()
}

/// Remote auth and data operations.
pub trait Backend: Send + Sync {
    /// Resolve an access token to its user. Rejected tokens yield `Ok(None)`.
    fn current_user(
        &self,
        access_token: &str,
    ) -> impl Future<Output = Result<Option<SessionUser>, BackendError>> + Send;

    fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthSession, BackendError>> + Send;

    fn refresh_session(
        &self,
        refresh_token: &str,
    ) -> impl Future<Output = Result<AuthSession, BackendError>> + Send;

    fn sign_out(&self, access_token: &str) -> impl Future<Output = Result<(), BackendError>> + Send;

    fn select(&self, query: &Query) -> impl Future<Output = Result<Rows, BackendError>> + Send;
}

/// The backend chosen at startup.
#[derive(Clone, Debug)]
pub enum AnyBackend {
    Rest(RestBackend),
    Memory(Arc<MemoryBackend>),
    /// Required settings are missing; every call fails with `NotConfigured`.
    Unconfigured(&'static str),
}

impl AnyBackend {
    pub fn from_env() -> Self {
        match BackendConfig::from_env() {
            Ok(config) => AnyBackend::Rest(RestBackend::new(config)),
            Err(BackendError::NotConfigured(var)) => {
                tracing::warn!(var, "backend not configured; data views will be empty");
                AnyBackend::Unconfigured(var)
            }
            Err(e) => {
                tracing::warn!(error = %e, "backend configuration rejected");
                AnyBackend::Unconfigured("BACKEND_URL")
            }
        }
    }

    pub fn memory(backend: MemoryBackend) -> Self {
        AnyBackend::Memory(Arc::new(backend))
    }

    /// A handle whose data reads carry the user's token.
    pub fn with_access_token(&self, token: &str) -> Self {
        match self {
            AnyBackend::Rest(rest) => AnyBackend::Rest(rest.with_access_token(token)),
            other => other.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !matches!(self, AnyBackend::Unconfigured(_))
    }
}

impl Backend for AnyBackend {
    async fn current_user(&self, access_token: &str) -> Result<Option<SessionUser>, BackendError> {
        match self {
            AnyBackend::Rest(b) => b.current_user(access_token).await,
            AnyBackend::Memory(b) => b.current_user(access_token).await,
            AnyBackend::Unconfigured(var) => Err(BackendError::NotConfigured(var)),
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, BackendError> {
        match self {
            AnyBackend::Rest(b) => b.sign_in_with_password(email, password).await,
            AnyBackend::Memory(b) => b.sign_in_with_password(email, password).await,
            AnyBackend::Unconfigured(var) => Err(BackendError::NotConfigured(var)),
        }
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, BackendError> {
        match self {
            AnyBackend::Rest(b) => b.refresh_session(refresh_token).await,
            AnyBackend::Memory(b) => b.refresh_session(refresh_token).await,
            AnyBackend::Unconfigured(var) => Err(BackendError::NotConfigured(var)),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        match self {
            AnyBackend::Rest(b) => b.sign_out(access_token).await,
            AnyBackend::Memory(b) => b.sign_out(access_token).await,
            AnyBackend::Unconfigured(var) => Err(BackendError::NotConfigured(var)),
        }
    }

    async fn select(&self, query: &Query) -> Result<Rows, BackendError> {
        match self {
            AnyBackend::Rest(b) => b.select(query).await,
            AnyBackend::Memory(b) => b.select(query).await,
            AnyBackend::Unconfigured(var) => Err(BackendError::NotConfigured(var)),
        }
    }
}

static SHARED: OnceLock<AnyBackend> = OnceLock::new();

/// Install the process-wide backend. Returns `false` if one was already set.
pub fn install(backend: AnyBackend) -> bool {
    SHARED.set(backend).is_ok()
}

/// The process-wide backend used by server functions, built from the
/// environment on first use if nothing was installed.
pub fn shared() -> &'static AnyBackend {
    SHARED.get_or_init(AnyBackend::from_env)
}
