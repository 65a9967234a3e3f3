use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use game_types::{GameError, GameStatus, SessionState};

/// Persistence seam for session records. Implementations report their own
/// failures as `PersistenceFailure`; callers keep the in-memory session
/// unchanged on error and decide whether to retry or abandon.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, state: SessionState) -> Result<SessionState, GameError>;
    async fn update(&self, id: Uuid, state: SessionState) -> Result<SessionState, GameError>;
    async fn mark_finished(
        &self,
        id: Uuid,
        final_state: SessionState,
    ) -> Result<SessionState, GameError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<SessionState>, GameError>;
}

/// Process-local session store.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<Uuid, SessionState>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, state: SessionState) -> Result<SessionState, GameError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(state.id, state.clone());
        info!(session_id = %state.id, "session record created");
        Ok(state)
    }

    async fn update(&self, id: Uuid, state: SessionState) -> Result<SessionState, GameError> {
        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(&id) {
            return Err(GameError::SessionNotFound { id });
        }
        sessions.insert(id, state.clone());
        Ok(state)
    }

    async fn mark_finished(
        &self,
        id: Uuid,
        mut final_state: SessionState,
    ) -> Result<SessionState, GameError> {
        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(&id) {
            return Err(GameError::SessionNotFound { id });
        }
        final_state.status = GameStatus::Finished;
        if final_state.ended_at.is_none() {
            final_state.ended_at = Some(chrono::Utc::now().to_rfc3339());
        }
        sessions.insert(id, final_state.clone());
        info!(session_id = %id, "session record finished");
        Ok(final_state)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SessionState>, GameError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&id).cloned())
    }
}
