use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::warn;

use crate::{flood::PostingHistory, ids::PostId};

pub const HISTORY_KEY: &str = "Forum.posts";
pub const ADMIN_KEY: &str = "Forum.isAdmin";

/// Key/value session owned by the request layer.
pub trait SessionStore: Send + Sync {
    fn read(&self, key: &str) -> Option<Value>;
    fn write(&mut self, key: &str, value: Value);
}

/// Plain in-process session, mostly for tests and single-user tools.
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    values: HashMap<String, Value>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn read(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_owned(), value);
    }
}

/// Who is posting, as far as the rate limits care.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorContext {
    pub history: PostingHistory,
    pub is_admin: bool,
}

impl ActorContext {
    pub fn new(history: PostingHistory, is_admin: bool) -> Self {
        Self { history, is_admin }
    }

    /// Reads the posting history and admin flag from a session.
    ///
    /// Missing keys mean "no history, not an admin". A history that does not
    /// decode is treated as empty rather than failing the request.
    pub fn from_session(session: &dyn SessionStore) -> Self {
        let history = match session.read(HISTORY_KEY) {
            Some(Value::Null) | None => PostingHistory::new(),
            Some(raw) => serde_json::from_value(raw).unwrap_or_else(|error| {
                warn!(%error, "discarding undecodable posting history");
                PostingHistory::new()
            }),
        };

        let is_admin = match session.read(ADMIN_KEY) {
            Some(Value::Bool(flag)) => flag,
            Some(Value::Number(level)) => level.as_f64().is_some_and(|level| level > 0.0),
            _ => false,
        };

        Self { history, is_admin }
    }
}

/// Appends a successful post to the session's history.
pub fn record_post(session: &mut dyn SessionStore, post_id: PostId, posted_at: DateTime<Utc>) {
    let mut actor = ActorContext::from_session(session);
    actor.history.record(post_id, posted_at);

    match serde_json::to_value(&actor.history) {
        Ok(value) => session.write(HISTORY_KEY, value),
        Err(error) => warn!(%error, "could not store posting history"),
    }
}
