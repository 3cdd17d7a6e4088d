//! In-memory session state as immutable snapshots.
//!
//! Every change goes through [`reduce`]; the store only swaps the `Arc` held
//! for the session that dispatched it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::domain::exam_document::{ExamDocument, ExamSection};
use crate::models::dto::request::GenerationRequest;

pub const DEFAULT_MAX_SESSIONS: usize = 1000;
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(4 * 60 * 60);

/// Opaque key of one browser session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Only uuids are accepted as session keys.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(|id| Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Idle,
    Generating,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub document: Option<Arc<ExamDocument>>,
    pub active_tab: ExamSection,
    pub last_request: Option<GenerationRequest>,
}

#[derive(Debug, Clone)]
pub enum SessionAction {
    SubmissionStarted(GenerationRequest),
    SubmissionSucceeded(Arc<ExamDocument>),
    SubmissionFailed(String),
    TabSelected(ExamSection),
}

pub fn reduce(state: &SessionSnapshot, action: SessionAction) -> SessionSnapshot {
    match action {
        SessionAction::SubmissionStarted(request) => SessionSnapshot {
            status: SessionStatus::Generating,
            document: None,
            active_tab: state.active_tab,
            last_request: Some(request),
        },
        SessionAction::SubmissionSucceeded(document) => SessionSnapshot {
            status: SessionStatus::Ready,
            document: Some(document),
            active_tab: ExamSection::Matrix,
            last_request: state.last_request.clone(),
        },
        SessionAction::SubmissionFailed(message) => SessionSnapshot {
            status: SessionStatus::Failed(message),
            document: None,
            active_tab: state.active_tab,
            last_request: state.last_request.clone(),
        },
        SessionAction::TabSelected(section) => SessionSnapshot {
            active_tab: section,
            ..state.clone()
        },
    }
}

struct SessionEntry {
    snapshot: Arc<SessionSnapshot>,
    touched: Instant,
}

/// Snapshots keyed by browser session.
///
/// Sessions idle for longer than `idle_ttl` are dropped on the next write, and
/// the least recently changed one is evicted when `max_sessions` is reached.
/// A session that is generating is never dropped.
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
    max_sessions: usize,
    idle_ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL)
    }
}

impl SessionStore {
    pub fn new(max_sessions: usize, idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions: max_sessions.max(1),
            idle_ttl,
        }
    }

    /// Unknown and expired sessions read as the idle default.
    pub async fn snapshot(&self, id: &SessionId) -> Arc<SessionSnapshot> {
        let now = Instant::now();
        let sessions = self.sessions.read().await;
        let snapshot = sessions
            .get(id)
            .filter(|entry| !self.is_expired(entry, now))
            .map(|entry| Arc::clone(&entry.snapshot));
        snapshot.unwrap_or_default()
    }

    pub async fn dispatch(&self, id: &SessionId, action: SessionAction) -> Arc<SessionSnapshot> {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();
        self.evict(&mut sessions, id, now);

        let current = sessions
            .get(id)
            .map(|entry| Arc::clone(&entry.snapshot))
            .unwrap_or_default();
        let next = Arc::new(reduce(&current, action));
        sessions.insert(
            id.clone(),
            SessionEntry {
                snapshot: Arc::clone(&next),
                touched: now,
            },
        );
        next
    }

    /// Starts a submission unless this session already has one in flight.
    pub async fn try_begin_submission(&self, id: &SessionId, request: GenerationRequest) -> bool {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();
        self.evict(&mut sessions, id, now);

        let current = sessions
            .get(id)
            .map(|entry| Arc::clone(&entry.snapshot))
            .unwrap_or_default();
        if current.status == SessionStatus::Generating {
            return false;
        }

        sessions.insert(
            id.clone(),
            SessionEntry {
                snapshot: Arc::new(reduce(&current, SessionAction::SubmissionStarted(request))),
                touched: now,
            },
        );
        true
    }

    fn is_expired(&self, entry: &SessionEntry, now: Instant) -> bool {
        entry.snapshot.status != SessionStatus::Generating
            && now.duration_since(entry.touched) > self.idle_ttl
    }

    fn evict(&self, sessions: &mut HashMap<SessionId, SessionEntry>, keep: &SessionId, now: Instant) {
        sessions.retain(|_, entry| !self.is_expired(entry, now));

        if sessions.contains_key(keep) || sessions.len() < self.max_sessions {
            return;
        }
        let oldest = sessions
            .iter()
            .filter(|(_, entry)| entry.snapshot.status != SessionStatus::Generating)
            .min_by_key(|(_, entry)| entry.touched)
            .map(|(id, _)| id.clone());
        if let Some(oldest) = oldest {
            log::debug!("Evicting session {}", oldest);
            sessions.remove(&oldest);
        }
    }

    #[cfg(test)]
    async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
