//! Durable storage for the active session
//!
//! `load` never fails: unreadable or corrupt data means "no session", so the
//! restore path can't be wedged by a bad record.

use parking_lot::RwLock;

use gamespace_storage::Database;

use crate::state::SessionState;
use crate::Result;

pub trait SessionStore: Send + Sync {
    fn load(&self) -> Option<SessionState>;

    fn save(&self, state: &SessionState) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// Session kept in the GameSpace database
#[derive(Clone)]
pub struct SqliteSessionStore {
    db: Database,
}

impl SqliteSessionStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl SessionStore for SqliteSessionStore {
    fn load(&self) -> Option<SessionState> {
        let payload = match self.db.load_session_payload() {
            Ok(payload) => payload?,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read saved session, treating as none");
                return None;
            }
        };

        match SessionState::from_json(&payload) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!(error = %e, "Saved session is corrupt, treating as none");
                None
            }
        }
    }

    fn save(&self, state: &SessionState) -> Result<()> {
        let payload = state.to_json()?;
        self.db.store_session_payload(&payload)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.db.clear_session_payload()?;
        Ok(())
    }
}

/// Session kept only for the life of the process
#[derive(Default)]
pub struct MemorySessionStore {
    state: RwLock<Option<SessionState>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<SessionState> {
        self.state.read().clone()
    }

    fn save(&self, state: &SessionState) -> Result<()> {
        *self.state.write() = Some(state.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.state.write() = None;
        Ok(())
    }
}
