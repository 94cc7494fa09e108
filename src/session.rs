// Per-login session state
// Owned by the registry, addressed by the session id carried in the token

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::jwt::TOKEN_TTL_HOURS;
use crate::domain::kanban::ActionBoard;
use crate::domain::user::Identity;

/// Screen the representative is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Dashboard,
    WeeklySummary,
    Clients,
    Kanban,
    NewVisit,
}

/// State of one logged-in representative
#[derive(Debug)]
pub struct SessionContext {
    pub session_id: Uuid,
    pub identity: Identity,
    pub current_page: Page,
    /// Draft of the actions table, created on first board access
    pub board: Option<ActionBoard>,
}

impl SessionContext {
    pub fn new(identity: Identity) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            identity,
            current_page: Page::Dashboard,
            board: None,
        }
    }
}

pub type SharedSession = Arc<tokio::sync::Mutex<SessionContext>>;

#[derive(Debug)]
struct Entry {
    expires_at: DateTime<Utc>,
    session: SharedSession,
}

impl Entry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Live sessions keyed by id
///
/// A session lives as long as the token issued for it. Expired sessions are
/// dropped when looked up and whenever a new one is opened.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Entry>>,
    ttl: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_ttl(Duration::hours(TOKEN_TTL_HOURS))
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Opens a session and returns its id
    pub async fn open(&self, identity: Identity) -> Uuid {
        let context = SessionContext::new(identity);
        let session_id = context.session_id;
        tracing::info!(
            "Session {} opened for {}",
            session_id,
            context.identity.representative_id
        );

        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| entry.is_live(now));
        if sessions.len() < before {
            tracing::debug!("Dropped {} expired sessions", before - sessions.len());
        }
        sessions.insert(
            session_id,
            Entry {
                expires_at: now + self.ttl,
                session: Arc::new(tokio::sync::Mutex::new(context)),
            },
        );
        session_id
    }

    /// The session, unless it is unknown or expired
    pub async fn get(&self, session_id: Uuid) -> Option<SharedSession> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(&session_id) {
                None => return None,
                Some(entry) if entry.is_live(now) => return Some(Arc::clone(&entry.session)),
                Some(_) => {}
            }
        }

        let mut sessions = self.sessions.write().await;
        if sessions
            .get(&session_id)
            .is_some_and(|entry| !entry.is_live(now))
        {
            sessions.remove(&session_id);
            tracing::debug!("Session {} expired", session_id);
        }
        None
    }

    /// Ends a session, dropping any unsaved draft; false if it was unknown
    pub async fn close(&self, session_id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&session_id);
        if let Some(entry) = &removed {
            let session = entry.session.lock().await;
            if session.board.as_ref().is_some_and(ActionBoard::is_dirty) {
                tracing::warn!("Session {} closed with unsaved board edits", session_id);
            }
        }
        removed.is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
