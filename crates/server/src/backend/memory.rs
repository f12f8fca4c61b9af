use serde_json::{Map, Value};
use shared_types::{AuthSession, SessionUser};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{Backend, BackendError, Query, Rows, Table};

const TOKEN_TTL_SECONDS: i64 = 3600;

#[derive(Debug, Clone)]
struct MemoryUser {
    id: String,
    email: String,
    password: String,
}

/// In-process backend with the same read semantics as the REST one.
///
/// Counts every select so callers can assert how many round trips a view made.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: Mutex<HashMap<Table, Vec<Value>>>,
    users: Mutex<Vec<MemoryUser>>,
    access_tokens: Mutex<HashMap<String, String>>,
    refresh_tokens: Mutex<HashMap<String, String>>,
    failing: Mutex<HashSet<Table>>,
    queries: AtomicUsize,
    auth_calls: AtomicUsize,
    next_token: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, table: Table, rows: impl IntoIterator<Item = Value>) -> Self {
        lock(&self.tables).entry(table).or_default().extend(rows);
        self
    }

    pub fn add_user(&self, id: &str, email: &str, password: &str) {
        lock(&self.users).push(MemoryUser {
            id: id.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        });
    }

    /// Issue a token pair for a known user without going through sign-in.
    pub fn issue_session(&self, user_id: &str) -> Option<AuthSession> {
        let user = lock(&self.users).iter().find(|u| u.id == user_id).cloned()?;
        Some(self.mint(&user))
    }

    /// Make every select on `table` fail with a 500.
    pub fn fail_table(&self, table: Table) {
        lock(&self.failing).insert(table);
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn auth_call_count(&self) -> usize {
        self.auth_calls.load(Ordering::SeqCst)
    }

    /// Selects plus auth calls.
    pub fn call_count(&self) -> usize {
        self.query_count() + self.auth_call_count()
    }

    fn mint(&self, user: &MemoryUser) -> AuthSession {
        let n = self.next_token.fetch_add(1, Ordering::SeqCst);
        let access = format!("mem-access-{n}");
        let refresh = format!("mem-refresh-{n}");
        lock(&self.access_tokens).insert(access.clone(), user.id.clone());
        lock(&self.refresh_tokens).insert(refresh.clone(), user.id.clone());
        AuthSession {
            access_token: access,
            refresh_token: refresh,
            expires_in: TOKEN_TTL_SECONDS,
            user: SessionUser {
                id: user.id.clone(),
                email: Some(user.email.clone()),
            },
        }
    }

    fn user_by_id(&self, id: &str) -> Option<MemoryUser> {
        lock(&self.users).iter().find(|u| u.id == id).cloned()
    }

    fn run_select(&self, query: &Query) -> Result<Rows, BackendError> {
        if lock(&self.failing).contains(&query.target()) {
            return Err(BackendError::Status {
                status: 500,
                message: format!("{} unavailable", query.target().as_str()),
            });
        }

        let tables = lock(&self.tables);
        let empty = Vec::new();
        let source = tables.get(&query.target()).unwrap_or(&empty);
        let profiles = tables.get(&Table::Profiles).unwrap_or(&empty);

        let matched: Vec<&Value> = source
            .iter()
            .filter(|row| {
                query
                    .filters()
                    .iter()
                    .all(|(column, value)| cell_matches(row.get(column), value))
            })
            .collect();

        if query.is_single() && matched.len() != 1 {
            return Err(BackendError::NoRows);
        }

        let items = split_select(query.columns());
        let rows = matched
            .iter()
            .map(|row| project(row, &items, profiles))
            .collect::<Vec<_>>();
        let total = query.wants_count().then_some(rows.len() as u64);
        Ok(Rows { rows, total })
    }
}

fn cell_matches(cell: Option<&Value>, expected: &str) -> bool {
    match cell {
        Some(Value::String(s)) => s == expected,
        Some(Value::Bool(b)) => b.to_string() == expected,
        Some(Value::Number(n)) => n.to_string() == expected,
        Some(Value::Null) | None => expected == "null",
        Some(_) => false,
    }
}

/// Split a select list on top-level commas, leaving embed parentheses intact.
fn split_select(columns: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in columns.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                items.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        items.push(current.trim().to_string());
    }
    items
}

/// An embed item looks like `alias:foreign_key(col,col)`.
fn parse_embed(item: &str) -> Option<(&str, &str, Vec<String>)> {
    let (head, rest) = item.split_once('(')?;
    let inner = rest.strip_suffix(')')?;
    let (alias, fk) = head.split_once(':')?;
    Some((alias.trim(), fk.trim(), split_select(inner)))
}

fn project(row: &Value, items: &[String], profiles: &[Value]) -> Value {
    let Some(source) = row.as_object() else {
        return row.clone();
    };
    let mut out = Map::new();
    for item in items {
        if item == "*" {
            out.extend(source.clone());
        } else if let Some((alias, fk, cols)) = parse_embed(item) {
            let embedded = source
                .get(fk)
                .and_then(Value::as_str)
                .and_then(|id| {
                    profiles
                        .iter()
                        .find(|p| p.get("id").and_then(Value::as_str) == Some(id))
                })
                .map(|p| project(p, &cols, &[]))
                .unwrap_or(Value::Null);
            out.insert(alias.to_string(), embedded);
        } else if let Some(value) = source.get(item.as_str()) {
            out.insert(item.clone(), value.clone());
        }
    }
    Value::Object(out)
}

impl Backend for MemoryBackend {
    async fn current_user(&self, access_token: &str) -> Result<Option<SessionUser>, BackendError> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        let user_id = lock(&self.access_tokens).get(access_token).cloned();
        Ok(user_id.and_then(|id| self.user_by_id(&id)).map(|u| SessionUser {
            id: u.id,
            email: Some(u.email),
        }))
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, BackendError> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        let user = lock(&self.users)
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email) && u.password == password)
            .cloned();
        match user {
            Some(user) => Ok(self.mint(&user)),
            None => Err(BackendError::Status {
                status: 400,
                message: "Invalid login credentials".to_string(),
            }),
        }
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, BackendError> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        let user_id = lock(&self.refresh_tokens).remove(refresh_token);
        match user_id.and_then(|id| self.user_by_id(&id)) {
            Some(user) => Ok(self.mint(&user)),
            None => Err(BackendError::Status {
                status: 400,
                message: "Invalid Refresh Token".to_string(),
            }),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        match lock(&self.access_tokens).remove(access_token) {
            Some(_) => Ok(()),
            None => Err(BackendError::Status {
                status: 401,
                message: "invalid JWT".to_string(),
            }),
        }
    }

    async fn select(&self, query: &Query) -> Result<Rows, BackendError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.run_select(query)
    }
}
