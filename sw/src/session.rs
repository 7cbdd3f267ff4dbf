//! Session store - concurrency-safe session table
//!
//! Sessions are process-memory only; a restart loses everything. The store
//! owns every session exclusively: callers get an `Arc<Mutex<Session>>`
//! handle, and the per-session mutex serializes concurrent calls on the
//! same session id so two racing requests cannot lose updates. Sessions
//! idle past the TTL are evicted by the daemon's periodic sweep and lazily
//! on lookup.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::engine::TaskExecutionEngine;

/// Default idle TTL before a session is evicted (1 hour)
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(3600);

/// One caller-addressable session
#[derive(Debug)]
pub struct Session {
    pub session_id: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    /// Engine is None until the first plan/audit call generates steps
    pub engine: Option<TaskExecutionEngine>,
}

impl Session {
    fn new(session_id: String, name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            name,
            created_at: now,
            last_active: now,
            engine: None,
        }
    }

    /// Record activity, deferring eviction
    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }
}

/// Lightweight session facts for listings and create responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Concurrency-safe map from session id to session
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Create a session with a generated id
    pub async fn create(&self, name: Option<String>) -> SessionInfo {
        let session_id = Uuid::now_v7().to_string();
        debug!(%session_id, ?name, "SessionStore::create: called");
        let session = Session::new(session_id.clone(), name);
        let info = SessionInfo {
            session_id: session_id.clone(),
            name: session.name.clone(),
            created_at: session.created_at,
        };

        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id, Arc::new(Mutex::new(session)));
        info
    }

    /// Look up a session; expired sessions are evicted and treated as absent
    pub async fn get(&self, session_id: &str) -> Option<Arc<Mutex<Session>>> {
        let handle = {
            let sessions = self.sessions.read().await;
            sessions.get(session_id).cloned()
        }?;

        let expired = {
            let session = handle.lock().await;
            self.is_expired(&session)
        };
        if expired {
            debug!(%session_id, "SessionStore::get: lazily evicting expired session");
            let mut sessions = self.sessions.write().await;
            sessions.remove(session_id);
            return None;
        }

        Some(handle)
    }

    /// Fetch an existing session or create one under the given id
    pub async fn get_or_create(&self, session_id: &str) -> Arc<Mutex<Session>> {
        if let Some(handle) = self.get(session_id).await {
            return handle;
        }

        debug!(%session_id, "SessionStore::get_or_create: creating on demand");
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Session::new(session_id.to_string(), None))))
            .clone()
    }

    /// Remove a session explicitly
    pub async fn remove(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id).is_some()
    }

    /// Evict every session idle past the TTL; returns how many were dropped
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let mut expired = Vec::new();

        for (id, handle) in sessions.iter() {
            // try_lock: a locked session is in use, hence not idle
            if let Ok(session) = handle.try_lock()
                && self.is_expired(&session)
            {
                expired.push(id.clone());
            }
        }

        for id in &expired {
            sessions.remove(id);
        }
        if !expired.is_empty() {
            info!(count = expired.len(), "SessionStore::evict_idle: evicted idle sessions");
        }
        expired.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn is_expired(&self, session: &Session) -> bool {
        let idle = Utc::now().signed_duration_since(session.last_active);
        idle.to_std().map(|idle| idle > self.ttl).unwrap_or(false)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}
